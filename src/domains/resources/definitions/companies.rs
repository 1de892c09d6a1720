//! Listing of every company.

use async_trait::async_trait;

use super::{ResourceDefinition, to_json};
use crate::domains::market::MarketQueries;
use crate::domains::resources::error::ResourceError;

/// All companies (ticker, name, sector, market cap), ordered by ticker.
pub struct CompanyListResource;

#[async_trait]
impl ResourceDefinition for CompanyListResource {
    const URI: &'static str = "financial://companies";
    const NAME: &'static str = "Companies";
    const DESCRIPTION: &'static str = "List of all companies with ticker, name, sector and market cap";
    const MIME_TYPE: &'static str = "application/json";

    async fn read(queries: &MarketQueries) -> Result<String, ResourceError> {
        let companies = queries.list_companies().await?;
        to_json(&companies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::test_support::sample_queries;
    use serde_json::Value;

    #[tokio::test]
    async fn test_company_list_body() {
        let body = CompanyListResource::read(&sample_queries()).await.unwrap();
        let value: Value = serde_json::from_str(&body).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["ticker"], "AAPL");
        assert!(rows[0].get("ceo").is_none());
        assert!(rows[0].get("market_cap").is_some());
    }
}
