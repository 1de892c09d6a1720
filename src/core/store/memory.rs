//! In-process store.
//!
//! Evaluates [`Select`] queries over rows held in memory with the same
//! semantics the PostgREST client relies on: AND-combined filters,
//! case-insensitive substring `ilike`, inclusive ranges, multi-term ordering,
//! limit after ordering, then column projection.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;
use serde_json::Value;

use super::{Filter, Row, Select, Store, StoreError, StoreResult};

/// A fixed set of tables served from memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: HashMap<String, Vec<Row>>,
    failure: Option<String>,
    selects: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows to a table. Non-object values are ignored.
    pub fn with_rows(mut self, table: &str, rows: impl IntoIterator<Item = Value>) -> Self {
        let entry = self.tables.entry(table.to_string()).or_default();
        entry.extend(rows.into_iter().filter_map(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        }));
        self
    }

    /// Make every select fail with a transport error carrying `message`.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Number of selects issued so far.
    pub fn select_count(&self) -> usize {
        self.selects.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn select(&self, query: &Select) -> StoreResult<Vec<Row>> {
        self.selects.fetch_add(1, AtomicOrdering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(StoreError::transport(message.clone()));
        }

        let mut rows: Vec<Row> = self
            .tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| matches(row, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if !query.order.is_empty() {
            rows.sort_by(|a, b| {
                for term in &query.order {
                    let ord = compare_nullable(a.get(&term.column), b.get(&term.column));
                    let ord = if term.descending { ord.reverse() } else { ord };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            });
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        if let Some(columns) = &query.columns {
            for row in &mut rows {
                row.retain(|k, _| columns.iter().any(|c| c == k));
            }
        }

        Ok(rows)
    }
}

fn matches(row: &Row, filter: &Filter) -> bool {
    let Some(cell) = row.get(filter.column()).filter(|v| !v.is_null()) else {
        return false;
    };

    match filter {
        Filter::Eq(_, v) => compare(cell, v) == Ordering::Equal,
        Filter::ILike(_, needle) => text(cell)
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        Filter::Gte(_, v) => compare(cell, v) != Ordering::Less,
        Filter::Lte(_, v) => compare(cell, v) != Ordering::Greater,
    }
}

/// Nulls sort after every value, so a descending order puts them first
/// (the PostgreSQL default).
fn compare_nullable(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (Some(a), Some(b)) => compare(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Numeric comparison when both sides are numeric (numbers or numeric
/// strings), text comparison otherwise.
fn compare(a: &Value, b: &Value) -> Ordering {
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => text(a).cmp(&text(b)),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::new().with_rows(
            "companies",
            vec![
                json!({"ticker": "MSFT", "sector": "Technology", "market_cap": 3000}),
                json!({"ticker": "AAPL", "sector": "Technology", "market_cap": 3200}),
                json!({"ticker": "JPM", "sector": "Financial Services", "market_cap": "600"}),
                json!({"ticker": "XOM", "sector": "Energy", "market_cap": null}),
            ],
        )
    }

    fn tickers(rows: &[Row]) -> Vec<&str> {
        rows.iter()
            .map(|r| r["ticker"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_ilike_is_case_insensitive_substring() {
        let rows = store()
            .select(&Select::from("companies").ilike("sector", "tech"))
            .await
            .unwrap();
        assert_eq!(tickers(&rows), vec!["MSFT", "AAPL"]);
    }

    #[tokio::test]
    async fn test_ranges_are_inclusive_and_numeric() {
        let rows = store()
            .select(
                &Select::from("companies")
                    .gte("market_cap", 600)
                    .lte("market_cap", 3000),
            )
            .await
            .unwrap();
        assert_eq!(tickers(&rows), vec!["MSFT", "JPM"]);
    }

    #[tokio::test]
    async fn test_order_limit_and_projection() {
        let rows = store()
            .select(
                &Select::from("companies")
                    .columns(&["ticker"])
                    .order_desc("market_cap")
                    .limit(2),
            )
            .await
            .unwrap();
        // Nulls come first in a descending order.
        assert_eq!(tickers(&rows), vec!["XOM", "AAPL"]);
        assert_eq!(rows[0].len(), 1);
    }

    #[tokio::test]
    async fn test_nulls_last_when_ascending() {
        let rows = store()
            .select(&Select::from("companies").order_asc("market_cap"))
            .await
            .unwrap();
        assert_eq!(tickers(&rows), vec!["JPM", "MSFT", "AAPL", "XOM"]);
    }

    #[tokio::test]
    async fn test_unknown_table_is_empty() {
        let rows = store().select(&Select::from("nope")).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_failing_store_counts_selects() {
        let store = MemoryStore::new().failing("connection reset");
        let err = store.select(&Select::from("companies")).await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(store.select_count(), 1);
    }
}
