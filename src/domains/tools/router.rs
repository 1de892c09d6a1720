//! Tool Router - builds the rmcp ToolRouter for the financial tools.
//!
//! Each tool knows how to create its own route; this module only lists them.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    AnalystRatingsTool, CompanyProfileTool, CompareCompaniesTool, FinancialReportTool, MarketTool,
    PriceHistoryTool, ScreenStocksTool, SearchCompaniesTool, SectorOverviewTool,
};
use crate::domains::market::MarketQueries;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(queries: Arc<MarketQueries>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(CompanyProfileTool::create_route(queries.clone()))
        .with_route(SearchCompaniesTool::create_route(queries.clone()))
        .with_route(FinancialReportTool::create_route(queries.clone()))
        .with_route(CompareCompaniesTool::create_route(queries.clone()))
        .with_route(PriceHistoryTool::create_route(queries.clone()))
        .with_route(AnalystRatingsTool::create_route(queries.clone()))
        .with_route(ScreenStocksTool::create_route(queries.clone()))
        .with_route(SectorOverviewTool::create_route(queries))
}
