//! Tool Registry - central registration and dispatch for all tools.
//!
//! The rmcp-driven transports go through [`build_tool_router`]; the HTTP
//! transport dispatches by name through [`ToolRegistry::call_tool`].
//!
//! [`build_tool_router`]: super::router::build_tool_router

use std::sync::Arc;

use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;
use tracing::warn;

use super::definitions::{
    AnalystRatingsTool, CompanyProfileTool, CompareCompaniesTool, FinancialReportTool, MarketTool,
    PriceHistoryTool, ScreenStocksTool, SearchCompaniesTool, SectorOverviewTool,
};
use crate::domains::market::MarketQueries;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    queries: Arc<MarketQueries>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(queries: Arc<MarketQueries>) -> Self {
        Self { queries }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            CompanyProfileTool::NAME,
            SearchCompaniesTool::NAME,
            FinancialReportTool::NAME,
            CompareCompaniesTool::NAME,
            PriceHistoryTool::NAME,
            AnalystRatingsTool::NAME,
            ScreenStocksTool::NAME,
            SectorOverviewTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            CompanyProfileTool::to_tool(),
            SearchCompaniesTool::to_tool(),
            FinancialReportTool::to_tool(),
            CompareCompaniesTool::to_tool(),
            PriceHistoryTool::to_tool(),
            AnalystRatingsTool::to_tool(),
            ScreenStocksTool::to_tool(),
            SectorOverviewTool::to_tool(),
        ]
    }

    /// Dispatch a tool call by name.
    ///
    /// Returns `None` for an unknown tool. Every known tool answers with an
    /// envelope, including for invalid arguments.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Option<CallToolResult> {
        let queries = self.queries.as_ref();
        let result = match name {
            CompanyProfileTool::NAME => CompanyProfileTool::call(arguments, queries).await,
            SearchCompaniesTool::NAME => SearchCompaniesTool::call(arguments, queries).await,
            FinancialReportTool::NAME => FinancialReportTool::call(arguments, queries).await,
            CompareCompaniesTool::NAME => CompareCompaniesTool::call(arguments, queries).await,
            PriceHistoryTool::NAME => PriceHistoryTool::call(arguments, queries).await,
            AnalystRatingsTool::NAME => AnalystRatingsTool::call(arguments, queries).await,
            ScreenStocksTool::NAME => ScreenStocksTool::call(arguments, queries).await,
            SectorOverviewTool::NAME => SectorOverviewTool::call(arguments, queries).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                return None;
            }
        };
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::test_support::sample_queries;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(Arc::new(sample_queries()))
    }

    #[test]
    fn test_registry_tool_names() {
        let names = registry().tool_names();
        assert_eq!(names.len(), 8);
        assert!(names.contains(&"get_company_profile"));
        assert!(names.contains(&"get_sector_overview"));
        assert_eq!(ToolRegistry::get_all_tools().len(), names.len());
    }

    #[test]
    fn test_tool_schemas_describe_params() {
        let tools = ToolRegistry::get_all_tools();
        let compare = tools.iter().find(|t| t.name == "compare_companies").unwrap();
        let properties = compare.input_schema.get("properties").unwrap();
        assert!(properties.get("tickers").is_some());
        assert!(properties.get("metrics").is_some());
    }

    #[tokio::test]
    async fn test_registry_call_dispatches() {
        let result = registry()
            .call_tool("get_company_profile", json!({"identifier": "AAPL"}))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
    }

    #[tokio::test]
    async fn test_registry_call_unknown() {
        assert!(registry().call_tool("unknown", json!({})).await.is_none());
    }
}
