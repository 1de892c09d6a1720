//! Company profile lookup by ticker or name.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::market::{CompanyIdentifier, CompanyMatch, MarketQueries};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::MarketTool;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompanyProfileParams {
    #[schemars(description = "Ticker symbol (e.g. AAPL) or company name (full or partial)")]
    pub identifier: String,
}

#[derive(Debug, Clone)]
pub struct CompanyProfileTool;

#[async_trait]
impl MarketTool for CompanyProfileTool {
    const NAME: &'static str = "get_company_profile";

    const DESCRIPTION: &'static str = "Get a company profile by ticker symbol or company name. Tries an exact ticker match first, then a case-insensitive partial name match. Returns a single company (match: \"single\") or every matching company (match: \"multiple\").";

    type Params = CompanyProfileParams;
    type Output = CompanyMatch;

    async fn run(params: Self::Params, queries: &MarketQueries) -> Result<Self::Output, ToolError> {
        let identifier = CompanyIdentifier::parse(&params.identifier)?;
        queries.company_profile(&identifier).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::test_support::call_json;
    use serde_json::json;

    #[tokio::test]
    async fn test_profile_by_ticker() {
        let (envelope, is_error) = call_json::<CompanyProfileTool>(json!({"identifier": "aapl"})).await;
        assert!(!is_error);
        assert_eq!(envelope["status"], "success");
        assert_eq!(envelope["tool"], "get_company_profile");
        assert_eq!(envelope["data"]["match"], "single");
        assert_eq!(envelope["data"]["company"]["name"], "Apple Inc.");
    }

    #[tokio::test]
    async fn test_profile_multiple_matches() {
        let (envelope, _) = call_json::<CompanyProfileTool>(json!({"identifier": "Corp"})).await;
        assert_eq!(envelope["data"]["match"], "multiple");
        assert_eq!(envelope["data"]["count"], 2);
    }

    #[tokio::test]
    async fn test_profile_unknown_and_blank() {
        let (envelope, is_error) = call_json::<CompanyProfileTool>(json!({"identifier": "XYZQ"})).await;
        assert!(is_error);
        assert_eq!(envelope["error"]["code"], "NOT_FOUND");

        let (envelope, _) = call_json::<CompanyProfileTool>(json!({"identifier": "   "})).await;
        assert_eq!(envelope["error"]["code"], "VALIDATION_ERROR");

        let (envelope, _) = call_json::<CompanyProfileTool>(json!({})).await;
        assert_eq!(envelope["error"]["code"], "VALIDATION_ERROR");
    }
}
