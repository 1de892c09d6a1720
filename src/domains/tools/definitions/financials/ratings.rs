//! Analyst ratings with a consensus summary.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::market::queries::RatingsResult;
use crate::domains::market::{MarketQueries, RatingsQuery};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::MarketTool;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalystRatingsParams {
    #[schemars(description = "Ticker symbol (e.g. AAPL)")]
    pub ticker: String,

    #[schemars(description = "Analyst firm filter, partial match (e.g. Goldman)")]
    #[serde(default)]
    pub firm: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AnalystRatingsTool;

#[async_trait]
impl MarketTool for AnalystRatingsTool {
    const NAME: &'static str = "get_analyst_ratings";

    const DESCRIPTION: &'static str = "Get analyst ratings for a company, newest first, with a consensus summary: rating distribution and average target price.";

    type Params = AnalystRatingsParams;
    type Output = RatingsResult;

    async fn run(params: Self::Params, queries: &MarketQueries) -> Result<Self::Output, ToolError> {
        let query = RatingsQuery::new(&params.ticker, params.firm.as_deref())?;
        queries.analyst_ratings(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::test_support::call_json;
    use serde_json::json;

    #[tokio::test]
    async fn test_ratings_consensus() {
        let (envelope, is_error) = call_json::<AnalystRatingsTool>(json!({"ticker": "AAPL"})).await;
        assert!(!is_error);
        let consensus = &envelope["data"]["consensus"];
        assert_eq!(consensus["total_ratings"], 3);
        assert_eq!(consensus["distribution"]["Buy"], 1);
        assert_eq!(consensus["distribution"]["Hold"], 1);
        assert_eq!(consensus["avg_target_price"], json!(247.75));
    }

    #[tokio::test]
    async fn test_ratings_without_targets_is_null() {
        let (envelope, _) = call_json::<AnalystRatingsTool>(json!({"ticker": "MSFT"})).await;
        assert!(envelope["data"]["consensus"]["avg_target_price"].is_null());
    }

    #[tokio::test]
    async fn test_ratings_unknown_ticker() {
        let (envelope, _) = call_json::<AnalystRatingsTool>(json!({"ticker": "NOPE"})).await;
        assert_eq!(envelope["error"]["code"], "NOT_FOUND");
    }
}
