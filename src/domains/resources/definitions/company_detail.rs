//! Per-ticker company detail.

use async_trait::async_trait;
use serde_json::json;

use super::{ResourceTemplateDefinition, to_json};
use crate::domains::market::{MarketQueries, Ticker};
use crate::domains::resources::error::ResourceError;

/// Company record plus its latest financial report.
///
/// An unknown ticker still reads successfully, with a body of
/// `{"error": "Company X not found"}`.
pub struct CompanyDetailTemplate;

impl CompanyDetailTemplate {
    const PREFIX: &'static str = "financial://company/";
}

#[async_trait]
impl ResourceTemplateDefinition for CompanyDetailTemplate {
    const URI_TEMPLATE: &'static str = "financial://company/{ticker}";
    const NAME: &'static str = "Company Detail";
    const TITLE: &'static str = "Company Detail by Ticker";
    const DESCRIPTION: &'static str = "Company profile and latest financial report for a ticker";
    const MIME_TYPE: &'static str = "application/json";

    fn match_uri(uri: &str) -> Option<&str> {
        uri.strip_prefix(Self::PREFIX)
    }

    async fn read(argument: &str, queries: &MarketQueries) -> Result<String, ResourceError> {
        let ticker = Ticker::parse(argument)
            .map_err(|_| ResourceError::invalid_uri(format!("{}{}", Self::PREFIX, argument)))?;

        match queries.company_detail(&ticker).await? {
            Some(detail) => to_json(&detail),
            None => to_json(&json!({ "error": format!("Company {} not found", argument) })),
        }
    }
}
