//! Company search by sector, industry, market cap and country.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::market::queries::CompanyList;
use crate::domains::market::{CompanySearch, MarketQueries};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::MarketTool;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchCompaniesParams {
    #[schemars(description = "Sector filter, partial match (e.g. Technology)")]
    #[serde(default)]
    pub sector: Option<String>,

    #[schemars(description = "Industry filter, partial match (e.g. Software)")]
    #[serde(default)]
    pub industry: Option<String>,

    #[schemars(description = "Minimum market capitalization in USD")]
    #[serde(default, deserialize_with = "crate::domains::market::models::numeric::opt_i64")]
    #[schemars(with = "Option<i64>")]
    pub min_market_cap: Option<i64>,

    #[schemars(description = "Maximum market capitalization in USD")]
    #[serde(default, deserialize_with = "crate::domains::market::models::numeric::opt_i64")]
    #[schemars(with = "Option<i64>")]
    pub max_market_cap: Option<i64>,

    #[schemars(description = "Country filter, partial match (e.g. USA)")]
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SearchCompaniesTool;

#[async_trait]
impl MarketTool for SearchCompaniesTool {
    const NAME: &'static str = "search_companies";

    const DESCRIPTION: &'static str = "Search companies by sector, industry, market cap range or country. At least one filter is required; filters combine with AND. Returns the matching companies and their count.";

    type Params = SearchCompaniesParams;
    type Output = CompanyList;

    async fn run(params: Self::Params, queries: &MarketQueries) -> Result<Self::Output, ToolError> {
        let search = CompanySearch::new(
            params.sector.as_deref(),
            params.industry.as_deref(),
            params.min_market_cap,
            params.max_market_cap,
            params.country.as_deref(),
        )?;
        queries.search_companies(&search).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::domains::market::fixtures::sample_store;
    use crate::domains::tools::definitions::common::test_support::{call_json, call_json_with};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_search_without_filters_never_reaches_store() {
        let store = Arc::new(sample_store());
        let queries = MarketQueries::new(store.clone());

        let (envelope, is_error) = call_json_with::<SearchCompaniesTool>(json!({}), &queries).await;
        assert!(is_error);
        assert_eq!(envelope["error"]["code"], "VALIDATION_ERROR");

        let (_, is_error) =
            call_json_with::<SearchCompaniesTool>(json!({"sector": "  "}), &queries).await;
        assert!(is_error);
        assert_eq!(store.select_count(), 0);
    }

    #[tokio::test]
    async fn test_search_by_sector() {
        let (envelope, _) = call_json::<SearchCompaniesTool>(json!({"sector": "financial"})).await;
        assert_eq!(envelope["data"]["count"], 1);
        assert_eq!(envelope["data"]["companies"][0]["ticker"], "JPM");
    }

    #[tokio::test]
    async fn test_search_store_failure() {
        let queries = MarketQueries::new(Arc::new(MemoryStore::new().failing("timeout")));
        let (envelope, _) =
            call_json_with::<SearchCompaniesTool>(json!({"country": "USA"}), &queries).await;
        assert_eq!(envelope["error"]["code"], "DATABASE_ERROR");
        assert!(envelope["error"]["message"].as_str().unwrap().contains("timeout"));
    }

    #[tokio::test]
    async fn test_search_accepts_exponent_market_cap() {
        let (envelope, is_error) =
            call_json::<SearchCompaniesTool>(json!({"min_market_cap": 1e12})).await;
        assert!(!is_error);
        assert_eq!(envelope["data"]["count"], 2);
    }
}
