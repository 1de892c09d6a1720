//! HTTP transport implementation.
//!
//! HTTP server with JSON-RPC over POST requests, so plain HTTP clients
//! (curl, browsers, agents without stdio) can reach the financial tools.
//! The RPC endpoint is rate limited per client address.

use axum::{
    Json, Router,
    extract::{ConnectInfo, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, instrument, warn};

use super::rate_limit::RateLimiter;
use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::config::RateLimitConfig;

/// Protocol version answered when the client does not ask for one.
const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
    rate_limit: RateLimitConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
    rpc_path: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig, rate_limit: RateLimitConfig) -> Self {
        Self { config, rate_limit }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let limiter = Arc::new(RateLimiter::new(self.rate_limit));
        spawn_pruner(limiter.clone(), Duration::from_secs(self.rate_limit.window_secs.max(1)));

        let app = router(server, &self.config, limiter);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!(
            "  → Limit:    {} requests / {}s per client",
            self.rate_limit.max_requests, self.rate_limit.window_secs
        );
        info!("  → Health:   GET /health");

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the HTTP router.
///
/// Only the RPC endpoint is rate limited; `/` and `/health` stay open.
pub fn router(server: McpServer, config: &HttpConfig, limiter: Arc<RateLimiter>) -> Router {
    let state = AppState {
        server,
        rpc_path: config.rpc_path.clone(),
    };

    let mut app = Router::new()
        .route(&config.rpc_path, post(handle_rpc))
        .route_layer(middleware::from_fn_with_state(limiter, enforce_rate_limit))
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .with_state(state);

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Periodically forget idle clients.
fn spawn_pruner(limiter: Arc<RateLimiter>, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            limiter.prune();
        }
    });
}

/// Reject a client that exhausted its quota with 429 and `Retry-After`.
async fn enforce_rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    match limiter.check(&client) {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            warn!(client = %client, retry_after, "Rate limit exceeded");
            (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after.to_string())],
                Json(json!({
                    "error": "Too many requests",
                    "retry_after": retry_after
                })),
            )
                .into_response()
        }
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "documentation": format!(
            "Send POST requests to {} with JSON-RPC messages",
            state.rpc_path
        )
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", &request.method);
    info!("Received JSON-RPC request: {}", request.method);

    let response = process_request(&state, request).await;

    (StatusCode::OK, Json(response))
}

/// Process a JSON-RPC request and return the response.
async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    match request.method.as_str() {
        "initialize" => handle_initialize(state, request),
        "tools/list" => {
            JsonRpcResponse::success(request.id, json!({ "tools": state.server.list_tools() }))
        }
        "tools/call" => handle_tools_call(state, request).await,
        "resources/list" => JsonRpcResponse::success(
            request.id,
            json!({ "resources": state.server.list_resources().await }),
        ),
        "resources/templates/list" => JsonRpcResponse::success(
            request.id,
            json!({ "resourceTemplates": state.server.list_resource_templates().await }),
        ),
        "resources/read" => handle_resources_read(state, request).await,
        "prompts/list" => JsonRpcResponse::success(
            request.id,
            json!({ "prompts": state.server.list_prompts().await }),
        ),
        "prompts/get" => handle_prompts_get(state, request).await,
        "ping" => JsonRpcResponse::success(request.id, json!({})),

        // Stateless over HTTP: acknowledged, nothing to track.
        method if method.starts_with("notifications/") => {
            debug!("Received notification: {}", method);
            JsonRpcResponse::success(request.id, Value::Null)
        }

        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    }
}

/// Handle initialize request.
fn handle_initialize(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let protocol_version = request
        .params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION)
        .to_string();

    let result = json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": {},
            "resources": {},
            "prompts": {}
        },
        "serverInfo": {
            "name": state.server.name(),
            "version": state.server.version()
        },
        "instructions": crate::core::server::INSTRUCTIONS
    });

    JsonRpcResponse::success(request.id, result)
}

/// Pull a required string field out of the request params.
fn required_param(request: &JsonRpcRequest, field: &str, label: &str) -> Result<String, JsonRpcResponse> {
    let params = request
        .params
        .as_ref()
        .ok_or_else(|| JsonRpcResponse::invalid_params(request.id.clone(), "Missing params"))?;

    params
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| JsonRpcResponse::invalid_params(request.id.clone(), format!("Missing {}", label)))
}

/// Handle tools/call request.
async fn handle_tools_call(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let name = match required_param(&request, "name", "tool name") {
        Ok(name) => name,
        Err(response) => return response,
    };

    let arguments = request
        .params
        .as_ref()
        .and_then(|p| p.get("arguments"))
        .cloned()
        .unwrap_or_else(|| json!({}));

    match state.server.call_tool(&name, arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e),
    }
}

/// Handle resources/read request.
async fn handle_resources_read(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let uri = match required_param(&request, "uri", "resource URI") {
        Ok(uri) => uri,
        Err(response) => return response,
    };

    match state.server.read_resource(&uri).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e),
    }
}

/// Handle prompts/get request.
async fn handle_prompts_get(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let name = match required_param(&request, "name", "prompt name") {
        Ok(name) => name,
        Err(response) => return response,
    };

    let arguments = request.params.as_ref().and_then(|p| p.get("arguments")).cloned();

    match state.server.get_prompt(&name, arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::market::fixtures::sample_store;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app(rate_limit: RateLimitConfig) -> Router {
        let server = McpServer::new(Config::new(), Arc::new(sample_store()));
        router(
            server,
            &HttpConfig::default(),
            Arc::new(RateLimiter::new(rate_limit)),
        )
    }

    fn rpc(body: Value, client: [u8; 4]) -> Request {
        ::http::Request::builder()
            .method("POST")
            .uri("/mcp")
            .header(header::CONTENT_TYPE, "application/json")
            .extension(ConnectInfo(SocketAddr::from((client, 4000))))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_tools_call_returns_envelope() {
        let request = rpc(
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": {
                    "name": "get_financial_report",
                    "arguments": {"ticker": "AAPL", "fiscal_year": 2024, "fiscal_quarter": "Q4"}
                }
            }),
            [10, 0, 0, 1],
        );

        let response = app(RateLimitConfig::default()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let text = body["result"]["content"][0]["text"].as_str().unwrap();
        let envelope: Value = serde_json::from_str(text).unwrap();
        assert_eq!(envelope["status"], "success");
        assert_eq!(envelope["data"][0]["fiscal_year"], 2024);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let request = rpc(
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call", "params": {"name": "nope"}}),
            [10, 0, 0, 1],
        );
        let body = json_body(app(RateLimitConfig::default()).oneshot(request).await.unwrap()).await;
        assert_eq!(body["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_rejects_wrong_jsonrpc_version_and_unknown_method() {
        let app = app(RateLimitConfig::default());

        let bad_version = rpc(json!({"jsonrpc": "1.0", "id": 1, "method": "tools/list"}), [10, 0, 0, 1]);
        let body = json_body(app.clone().oneshot(bad_version).await.unwrap()).await;
        assert_eq!(body["error"]["code"], -32600);

        let unknown = rpc(json!({"jsonrpc": "2.0", "id": 1, "method": "tools/destroy"}), [10, 0, 0, 1]);
        let body = json_body(app.oneshot(unknown).await.unwrap()).await;
        assert_eq!(body["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_initialize_echoes_protocol_version() {
        let request = rpc(
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {"protocolVersion": "2025-03-26"}
            }),
            [10, 0, 0, 1],
        );
        let body = json_body(app(RateLimitConfig::default()).oneshot(request).await.unwrap()).await;
        assert_eq!(body["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(body["result"]["serverInfo"]["name"], "financial-mcp-server");
    }

    #[tokio::test]
    async fn test_rate_limit_returns_429_with_retry_after() {
        let app = app(RateLimitConfig {
            max_requests: 2,
            window_secs: 60,
        });
        let list = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"});

        for _ in 0..2 {
            let response = app.clone().oneshot(rpc(list.clone(), [10, 0, 0, 7])).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.clone().oneshot(rpc(list.clone(), [10, 0, 0, 7])).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after: u64 = response.headers()[header::RETRY_AFTER]
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(retry_after > 0);

        let body = json_body(response).await;
        assert_eq!(body["error"], "Too many requests");
        assert_eq!(body["retry_after"], retry_after);

        let other_client = app.oneshot(rpc(list, [10, 0, 0, 8])).await.unwrap();
        assert_eq!(other_client.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_is_not_rate_limited() {
        let app = app(RateLimitConfig {
            max_requests: 0,
            window_secs: 60,
        });
        let request = ::http::Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");
    }
}
