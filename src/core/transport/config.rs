//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Default bind address for the network transport.
#[cfg(feature = "http")]
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// HTTP transport with JSON-RPC over POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
fn default_host() -> String {
    DEFAULT_HTTP_HOST.to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            Self::Stdio
        }

        #[cfg(all(not(feature = "stdio"), feature = "http"))]
        {
            Self::Http(HttpConfig::default())
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: crate::core::config::DEFAULT_SERVER_PORT,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Resolve the transport from a variable lookup.
    ///
    /// `MCP_TRANSPORT=http` selects the network transport on `port`; anything
    /// else falls back to the default transport.
    #[cfg_attr(not(feature = "http"), allow(unused_variables))]
    pub fn from_lookup<F>(var: F, port: u16) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let transport = var("MCP_TRANSPORT").unwrap_or_default().to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "http")]
            "http" | "sse" => Self::Http(HttpConfig {
                port,
                host: var("MCP_HTTP_HOST").unwrap_or_else(default_host),
                rpc_path: var("MCP_HTTP_PATH").unwrap_or_else(default_rpc_path),
                enable_cors: var("MCP_HTTP_CORS")
                    .map(|v| v.to_lowercase() != "false" && v != "0")
                    .unwrap_or_else(default_cors),
            }),
            _ => Self::default(),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }

    /// Check if this transport is the standard STDIO mode.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[cfg(feature = "stdio")]
    #[test]
    fn test_unknown_transport_falls_back_to_stdio() {
        assert!(TransportConfig::from_lookup(lookup(&[]), 8080).is_stdio());
        assert!(TransportConfig::from_lookup(lookup(&[("MCP_TRANSPORT", "tcp")]), 8080).is_stdio());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_transport_options() {
        let config = TransportConfig::from_lookup(
            lookup(&[
                ("MCP_TRANSPORT", "HTTP"),
                ("MCP_HTTP_HOST", "0.0.0.0"),
                ("MCP_HTTP_PATH", "/rpc"),
                ("MCP_HTTP_CORS", "false"),
            ]),
            9000,
        );
        match config {
            TransportConfig::Http(http) => {
                assert_eq!(http.port, 9000);
                assert_eq!(http.host, "0.0.0.0");
                assert_eq!(http.rpc_path, "/rpc");
                assert!(!http.enable_cors);
            }
            #[allow(unreachable_patterns)]
            other => panic!("expected HTTP transport, got {:?}", other),
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_description() {
        let config = TransportConfig::http(8080, "127.0.0.1");
        assert_eq!(config.description(), "HTTP on 127.0.0.1:8080/mcp");
        assert!(!config.is_stdio());
    }
}
