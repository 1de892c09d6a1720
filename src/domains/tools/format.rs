//! Response envelope formatting.
//!
//! Every tool returns exactly one of these envelopes as its text body:
//!
//! ```json
//! { "status": "success", "data": ..., "tool": "get_company_profile" }
//! { "status": "error", "error": { "code": "NOT_FOUND", "message": "...", "details": {...} } }
//! ```

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::error::{ErrorDetails, ToolError};

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Envelope<'a> {
    Success {
        data: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        tool: Option<&'a str>,
    },
    Error {
        error: ErrorBody<'a>,
    },
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a ErrorDetails>,
}

/// Render a success envelope around `data`.
pub fn format_success<T: Serialize + ?Sized>(data: &T, tool: Option<&str>) -> String {
    match serde_json::to_value(data) {
        Ok(data) => render(&Envelope::Success { data, tool }),
        Err(e) => {
            warn!("Failed to serialize tool result: {}", e);
            format_error(&ToolError::database(format!(
                "Failed to serialize result: {}",
                e
            )))
        }
    }
}

/// Render an error envelope.
pub fn format_error(error: &ToolError) -> String {
    render(&Envelope::Error {
        error: ErrorBody {
            code: error.code(),
            message: error.message(),
            details: error.details().filter(|d| !d.is_empty()),
        },
    })
}

/// Render either envelope from an operation result.
pub fn format_result<T: Serialize>(result: &Result<T, ToolError>, tool: &str) -> String {
    match result {
        Ok(data) => format_success(data, Some(tool)),
        Err(e) => format_error(e),
    }
}

fn render(envelope: &Envelope<'_>) -> String {
    serde_json::to_string_pretty(envelope).unwrap_or_else(|e| {
        format!(
            r#"{{"status":"error","error":{{"code":"{}","message":"{}"}}}}"#,
            ToolError::DATABASE_CODE,
            e.to_string().replace('"', "'")
        )
    })
}
