//! Plumbing shared by every financial tool.
//!
//! A tool only declares its name, description, parameter type and a
//! `run` body. Decoding, envelope rendering, logging and route creation
//! live here so every tool behaves the same on every transport.

use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Instrument, info, info_span, warn};

use crate::domains::market::MarketQueries;
use crate::domains::tools::ToolError;
use crate::domains::tools::format::format_result;

/// Decode a raw argument bag into typed parameters.
///
/// Shape errors (missing field, wrong JSON type) are validation failures.
pub fn parse_params<P: DeserializeOwned>(arguments: Value) -> Result<P, ToolError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments)
        .map_err(|e| ToolError::validation(format!("Invalid arguments: {}", e)))
}

/// Create a result carrying an envelope body.
pub fn envelope_result(body: String, is_error: bool) -> CallToolResult {
    if is_error {
        CallToolResult::error(vec![Content::text(body)])
    } else {
        CallToolResult::success(vec![Content::text(body)])
    }
}

/// A read-only tool backed by the market query layer.
#[async_trait]
pub trait MarketTool: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    type Params: DeserializeOwned + JsonSchema + Send + 'static;
    type Output: Serialize + Send;

    /// Validate the parameters and run the query.
    async fn run(params: Self::Params, queries: &MarketQueries) -> Result<Self::Output, ToolError>;

    /// Decode raw arguments and run.
    async fn execute(arguments: Value, queries: &MarketQueries) -> Result<Self::Output, ToolError> {
        let params = parse_params::<Self::Params>(arguments)?;
        Self::run(params, queries).await
    }

    /// Execute and render the envelope, for any transport.
    async fn call(arguments: Value, queries: &MarketQueries) -> CallToolResult {
        let span = info_span!("tool", name = Self::NAME);
        async move {
            info!("Tool called");
            let result = Self::execute(arguments, queries).await;
            if let Err(e) = &result {
                warn!(code = e.code(), "{}", e);
            }
            envelope_result(format_result(&result, Self::NAME), result.is_err())
        }
        .instrument(span)
        .await
    }

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the rmcp-driven transports.
    fn create_route<S>(queries: Arc<MarketQueries>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let queries = queries.clone();
            async move { Ok::<_, McpError>(Self::call(Value::Object(args), &queries).await) }.boxed()
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Demo {
        ticker: String,
        #[serde(default)]
        limit: Option<i64>,
    }

    #[test]
    fn test_parse_params_ok_and_null() {
        let demo: Demo = parse_params(json!({"ticker": "AAPL"})).unwrap();
        assert_eq!(demo.ticker, "AAPL");
        assert_eq!(demo.limit, None);

        let err = parse_params::<Demo>(Value::Null).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.message().contains("ticker"));
    }

    #[test]
    fn test_parse_params_wrong_type_is_validation() {
        let err = parse_params::<Demo>(json!({"ticker": "AAPL", "limit": "ten"})).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_envelope_result_flags_errors() {
        assert_eq!(envelope_result("{}".into(), true).is_error, Some(true));
        assert_eq!(envelope_result("{}".into(), false).is_error, Some(false));
    }
}
