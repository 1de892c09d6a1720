//! Store client abstraction.
//!
//! The backing relational store is reached through a small query builder
//! ([`Select`]) and the [`Store`] trait. Two implementations exist:
//!
//! - [`PostgrestStore`]: the production client, speaking the PostgREST
//!   dialect over HTTPS (Supabase REST endpoint).
//! - [`MemoryStore`]: an in-process table set that evaluates the same
//!   builder semantics, used by tests.
//!
//! The store is read-only from this server's point of view; there is no
//! insert/update surface.

mod memory;
mod postgrest;

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// A single row returned by the store, keyed by column name.
pub type Row = Map<String, Value>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Table names used by the query layer.
pub mod tables {
    pub const COMPANIES: &str = "companies";
    pub const FINANCIAL_REPORTS: &str = "financial_reports";
    pub const STOCK_PRICES: &str = "stock_prices";
    pub const ANALYST_RATINGS: &str = "analyst_ratings";
}

/// Errors raised by a store call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response (connect, timeout, TLS...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

/// A filter predicate on one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Exact equality.
    Eq(String, Value),
    /// Case-insensitive substring match.
    ILike(String, String),
    /// Inclusive lower bound.
    Gte(String, Value),
    /// Inclusive upper bound.
    Lte(String, Value),
}

impl Filter {
    /// The column this filter applies to.
    pub fn column(&self) -> &str {
        match self {
            Self::Eq(c, _) | Self::ILike(c, _) | Self::Gte(c, _) | Self::Lte(c, _) => c,
        }
    }
}

/// One ordering term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub descending: bool,
}

/// A read query against one table.
///
/// Filters combine with AND. Ordering terms apply in the order they were
/// added; the limit applies after ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    pub columns: Option<Vec<String>>,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    pub limit: Option<usize>,
}

impl Select {
    /// Start a `select *` on the given table.
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    /// Restrict the returned columns.
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = Some(columns.iter().map(|c| (*c).to_string()).collect());
        self
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(column.to_string(), value.into()));
        self
    }

    /// Case-insensitive "contains" match.
    pub fn ilike(mut self, column: &str, needle: impl Into<String>) -> Self {
        self.filters
            .push(Filter::ILike(column.to_string(), needle.into()));
        self
    }

    pub fn gte(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Gte(column.to_string(), value.into()));
        self
    }

    pub fn lte(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Lte(column.to_string(), value.into()));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            descending: true,
        });
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            descending: false,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Read access to the backing store.
#[async_trait]
pub trait Store: Send + Sync {
    /// Execute a select and return the matching rows.
    async fn select(&self, query: &Select) -> StoreResult<Vec<Row>>;
}
