//! PostgREST store client.
//!
//! Renders a [`Select`] into PostgREST's query-string dialect and issues it
//! against `{base_url}/rest/v1/{table}` with the configured key.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{Filter, Row, Select, Store, StoreError, StoreResult};
use crate::core::config::StoreConfig;

const REST_PATH: &str = "rest/v1";

/// Store client for a PostgREST (Supabase) endpoint.
pub struct PostgrestStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    /// Build the client from validated store settings.
    ///
    /// Uses the service-role key so row-level policies do not hide rows.
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("financial-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoreError::transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.service_role_key.clone(),
        })
    }

    /// Full URL of a table endpoint.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, table)
    }
}

/// Render a select as PostgREST query parameters.
pub(crate) fn query_pairs(query: &Select) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(query.filters.len() + 3);

    let columns = query
        .columns
        .as_ref()
        .map(|c| c.join(","))
        .unwrap_or_else(|| "*".to_string());
    pairs.push(("select".to_string(), columns));

    for filter in &query.filters {
        let rendered = match filter {
            Filter::Eq(_, v) => format!("eq.{}", scalar(v)),
            Filter::ILike(_, needle) => format!("ilike.*{}*", needle),
            Filter::Gte(_, v) => format!("gte.{}", scalar(v)),
            Filter::Lte(_, v) => format!("lte.{}", scalar(v)),
        };
        pairs.push((filter.column().to_string(), rendered));
    }

    if !query.order.is_empty() {
        let order = query
            .order
            .iter()
            .map(|o| {
                format!(
                    "{}.{}",
                    o.column,
                    if o.descending { "desc" } else { "asc" }
                )
            })
            .collect::<Vec<_>>()
            .join(",");
        pairs.push(("order".to_string(), order));
    }

    if let Some(limit) = query.limit {
        pairs.push(("limit".to_string(), limit.to_string()));
    }

    pairs
}

/// Render the query string for a select.
pub(crate) fn query_string(query: &Select) -> StoreResult<String> {
    serde_urlencoded::to_string(query_pairs(query))
        .map_err(|e| StoreError::decode(format!("cannot encode query: {}", e)))
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Store for PostgrestStore {
    #[instrument(skip_all, fields(table = %query.table))]
    async fn select(&self, query: &Select) -> StoreResult<Vec<Row>> {
        let url = format!("{}?{}", self.table_url(&query.table), query_string(query)?);
        debug!("Store select with {} filter(s)", query.filters.len());

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| StoreError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::transport(e.to_string()))?;

        if !status.is_success() {
            warn!("Store returned status {} for {}", status, query.table);
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<Vec<Row>>(&body).map_err(|e| StoreError::decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::tables;

    fn store_config() -> StoreConfig {
        StoreConfig {
            url: "https://example.supabase.co/".to_string(),
            anon_key: "anon".to_string(),
            service_role_key: "service".to_string(),
            database_url: String::new(),
        }
    }

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let store = PostgrestStore::new(&store_config()).unwrap();
        assert_eq!(
            store.table_url(tables::COMPANIES),
            "https://example.supabase.co/rest/v1/companies"
        );
    }

    #[test]
    fn test_query_pairs_render_filters_order_and_limit() {
        let query = Select::from(tables::FINANCIAL_REPORTS)
            .eq("company_id", "abc-123")
            .eq("fiscal_year", 2024)
            .order_desc("fiscal_year")
            .order_desc("fiscal_quarter")
            .limit(1);

        let pairs = query_pairs(&query);
        assert_eq!(
            pairs,
            vec![
                ("select".to_string(), "*".to_string()),
                ("company_id".to_string(), "eq.abc-123".to_string()),
                ("fiscal_year".to_string(), "eq.2024".to_string()),
                (
                    "order".to_string(),
                    "fiscal_year.desc,fiscal_quarter.desc".to_string()
                ),
                ("limit".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_render_ilike_and_ranges() {
        let query = Select::from(tables::COMPANIES)
            .columns(&["ticker", "name"])
            .ilike("sector", "Tech")
            .gte("market_cap", 1000)
            .lte("market_cap", 5000);

        let pairs = query_pairs(&query);
        assert_eq!(pairs[0], ("select".to_string(), "ticker,name".to_string()));
        assert_eq!(pairs[1], ("sector".to_string(), "ilike.*Tech*".to_string()));
        assert_eq!(pairs[2], ("market_cap".to_string(), "gte.1000".to_string()));
        assert_eq!(pairs[3], ("market_cap".to_string(), "lte.5000".to_string()));
    }

    #[test]
    fn test_query_string_is_url_encoded() {
        let query = Select::from(tables::ANALYST_RATINGS).ilike("analyst_firm", "Goldman Sachs");
        let qs = query_string(&query).unwrap();
        assert_eq!(qs, "select=*&analyst_firm=ilike.*Goldman+Sachs*");
    }
}
