//! Sector-level aggregates.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::market::{MarketQueries, SectorName, SectorOverview};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::MarketTool;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SectorOverviewParams {
    #[schemars(description = "Sector name, partial match (e.g. Technology, Healthcare)")]
    pub sector: String,
}

#[derive(Debug, Clone)]
pub struct SectorOverviewTool;

#[async_trait]
impl MarketTool for SectorOverviewTool {
    const NAME: &'static str = "get_sector_overview";

    const DESCRIPTION: &'static str = "Get a sector overview: company count, tickers, average market cap and average gross/operating margins from each company's latest report.";

    type Params = SectorOverviewParams;
    type Output = SectorOverview;

    async fn run(params: Self::Params, queries: &MarketQueries) -> Result<Self::Output, ToolError> {
        let sector = SectorName::parse(&params.sector)?;
        queries.sector_overview(&sector).await
    }
}
