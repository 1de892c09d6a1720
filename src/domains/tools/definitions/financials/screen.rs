//! Stock screening against each company's latest report.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::market::queries::ScreenMatch;
use crate::domains::market::{MarketQueries, ScreenCriteria};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::MarketTool;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ScreenStocksParams {
    #[schemars(description = "Minimum quarterly revenue in USD")]
    #[serde(default)]
    pub min_revenue: Option<f64>,

    #[schemars(description = "Minimum earnings per share")]
    #[serde(default)]
    pub min_eps: Option<f64>,

    #[schemars(description = "Minimum gross margin percentage (0-100)")]
    #[serde(default)]
    pub min_gross_margin: Option<f64>,

    #[schemars(description = "Maximum debt-to-equity ratio")]
    #[serde(default)]
    pub max_debt_to_equity: Option<f64>,

    #[schemars(description = "Sector filter, partial match")]
    #[serde(default)]
    pub sector: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScreenStocksTool;

#[async_trait]
impl MarketTool for ScreenStocksTool {
    const NAME: &'static str = "screen_stocks";

    const DESCRIPTION: &'static str = "Screen companies by thresholds on their latest financial report (min revenue, min EPS, min gross margin, max debt-to-equity), optionally within a sector. Companies without a report, or missing a screened field, are excluded.";

    type Params = ScreenStocksParams;
    type Output = Vec<ScreenMatch>;

    async fn run(params: Self::Params, queries: &MarketQueries) -> Result<Self::Output, ToolError> {
        let criteria = ScreenCriteria::new(
            params.min_revenue,
            params.min_eps,
            params.min_gross_margin,
            params.max_debt_to_equity,
            params.sector.as_deref(),
        )?;
        queries.screen_stocks(&criteria).await
    }
}
