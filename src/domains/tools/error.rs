//! Tool-specific error types.
//!
//! Every tool failure is one of three kinds, each with a stable code that
//! clients can match on.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::store::StoreError;

/// Structured detail attached to an error.
pub type ErrorDetails = Map<String, Value>;

/// Errors that can occur during tool operations.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    /// Bad or missing input, detected before any store access.
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<ErrorDetails>,
    },

    /// A referenced entity does not exist.
    #[error("{message}")]
    NotFound {
        message: String,
        details: Option<ErrorDetails>,
    },

    /// The store call failed or returned malformed data.
    #[error("{message}")]
    Database {
        message: String,
        details: Option<ErrorDetails>,
    },
}

impl ToolError {
    pub const VALIDATION_CODE: &'static str = "VALIDATION_ERROR";
    pub const NOT_FOUND_CODE: &'static str = "NOT_FOUND";
    pub const DATABASE_CODE: &'static str = "DATABASE_ERROR";

    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            details: None,
        }
    }

    /// Create a new "not found" error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound {
            message: msg.into(),
            details: None,
        }
    }

    /// Create a new store-failure error.
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database {
            message: msg.into(),
            details: None,
        }
    }

    /// Attach a detail bag.
    pub fn with_details(mut self, extra: ErrorDetails) -> Self {
        match &mut self {
            Self::Validation { details, .. }
            | Self::NotFound { details, .. }
            | Self::Database { details, .. } => *details = Some(extra),
        }
        self
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => Self::VALIDATION_CODE,
            Self::NotFound { .. } => Self::NOT_FOUND_CODE,
            Self::Database { .. } => Self::DATABASE_CODE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::NotFound { message, .. }
            | Self::Database { message, .. } => message,
        }
    }

    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Self::Validation { details, .. }
            | Self::NotFound { details, .. }
            | Self::Database { details, .. } => details.as_ref(),
        }
    }
}

/// Wrap store failures with a description of the operation that failed.
pub trait StoreContext<T> {
    fn context(self, operation: &str) -> Result<T, ToolError>;
}

impl<T> StoreContext<T> for Result<T, StoreError> {
    fn context(self, operation: &str) -> Result<T, ToolError> {
        self.map_err(|e| ToolError::database(format!("{}: {}", operation, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_codes() {
        assert_eq!(ToolError::validation("x").code(), "VALIDATION_ERROR");
        assert_eq!(ToolError::not_found("x").code(), "NOT_FOUND");
        assert_eq!(ToolError::database("x").code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_with_details() {
        let mut details = ErrorDetails::new();
        details.insert("id".to_string(), json!("123"));
        let err = ToolError::not_found("Not found").with_details(details);
        assert_eq!(err.message(), "Not found");
        assert_eq!(err.details().unwrap()["id"], json!("123"));
        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_store_context_prefixes_message() {
        let result: Result<(), StoreError> = Err(StoreError::transport("timed out"));
        let err = result.context("Company search failed").unwrap_err();
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert_eq!(err.message(), "Company search failed: request failed: timed out");
    }
}
