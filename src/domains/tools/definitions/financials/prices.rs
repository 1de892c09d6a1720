//! Daily stock price history.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::market::{MarketQueries, PriceHistoryQuery, StockPrice};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::MarketTool;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PriceHistoryParams {
    #[schemars(description = "Ticker symbol (e.g. AAPL)")]
    pub ticker: String,

    #[schemars(description = "Inclusive start date (YYYY-MM-DD)")]
    #[serde(default)]
    pub start_date: Option<String>,

    #[schemars(description = "Inclusive end date (YYYY-MM-DD)")]
    #[serde(default)]
    pub end_date: Option<String>,

    #[schemars(description = "Maximum number of trading days to return (1-365, default: 30)")]
    #[serde(default, deserialize_with = "crate::domains::market::models::numeric::opt_i64")]
    #[schemars(with = "Option<i64>")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct PriceHistoryTool;

#[async_trait]
impl MarketTool for PriceHistoryTool {
    const NAME: &'static str = "get_stock_price_history";

    const DESCRIPTION: &'static str = "Get daily OHLCV stock prices for a company, most recent first, optionally bounded by start/end dates. Returns at most `limit` trading days (default 30).";

    type Params = PriceHistoryParams;
    type Output = Vec<StockPrice>;

    async fn run(params: Self::Params, queries: &MarketQueries) -> Result<Self::Output, ToolError> {
        let query = PriceHistoryQuery::new(
            &params.ticker,
            params.start_date.as_deref(),
            params.end_date.as_deref(),
            params.limit,
        )?;
        queries.stock_prices(&query).await
    }
}
