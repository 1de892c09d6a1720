//! Side-by-side comparison of 2 to 5 companies.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::market::queries::ComparisonResult;
use crate::domains::market::{Comparison, MarketQueries};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::MarketTool;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompareCompaniesParams {
    #[schemars(description = "Ticker symbols to compare (2 to 5)")]
    pub tickers: Vec<String>,

    #[schemars(
        description = "Report fields to compare (default: revenue, net_income, eps, gross_margin)"
    )]
    #[serde(default)]
    pub metrics: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct CompareCompaniesTool;

#[async_trait]
impl MarketTool for CompareCompaniesTool {
    const NAME: &'static str = "compare_companies";

    const DESCRIPTION: &'static str = "Compare the latest financial report of 2 to 5 companies side by side. Entries keep the requested ticker order; a metric missing from a report is null.";

    type Params = CompareCompaniesParams;
    type Output = ComparisonResult;

    async fn run(params: Self::Params, queries: &MarketQueries) -> Result<Self::Output, ToolError> {
        let comparison = Comparison::new(&params.tickers, params.metrics.as_deref())?;
        queries.compare_companies(&comparison).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::test_support::call_json;
    use serde_json::json;

    #[tokio::test]
    async fn test_compare_rejects_bad_cardinality() {
        let (envelope, _) = call_json::<CompareCompaniesTool>(json!({"tickers": ["AAPL"]})).await;
        assert_eq!(envelope["error"]["code"], "VALIDATION_ERROR");

        let six = json!({"tickers": ["A", "B", "C", "D", "E", "F"]});
        let (envelope, _) = call_json::<CompareCompaniesTool>(six).await;
        assert_eq!(envelope["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_compare_order_and_default_metrics() {
        let (envelope, is_error) =
            call_json::<CompareCompaniesTool>(json!({"tickers": ["msft", "aapl"]})).await;
        assert!(!is_error);
        let comparisons = envelope["data"]["comparisons"].as_array().unwrap();
        assert_eq!(comparisons.len(), 2);
        assert_eq!(comparisons[0]["ticker"], "MSFT");
        assert_eq!(comparisons[1]["ticker"], "AAPL");
        assert_eq!(comparisons[1]["gross_margin"], json!(46.2));
        assert_eq!(
            envelope["data"]["metrics"],
            json!(["revenue", "net_income", "eps", "gross_margin"])
        );
    }

    #[tokio::test]
    async fn test_compare_unknown_ticker_fails_whole_request() {
        let (envelope, _) =
            call_json::<CompareCompaniesTool>(json!({"tickers": ["AAPL", "NOPE"]})).await;
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["error"]["code"], "NOT_FOUND");
        assert!(envelope.get("data").is_none());
    }
}
