//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally seeded from a `.env` file). Store
//! connection parameters are required; everything else has a default.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};

/// Default HTTP port when `SERVER_PORT` is not set.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Backing store connection settings.
    pub store: StoreConfig,

    /// Per-client request quota for the network transport.
    pub rate_limit: RateLimitConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,

    /// Port for the network transport (`SERVER_PORT`).
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Connection settings for the backing store.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the REST endpoint.
    pub url: String,

    /// Anonymous (public) access key.
    pub anon_key: String,

    /// Privileged key used by the server's client.
    pub service_role_key: String,

    /// Optional direct database connection string.
    pub database_url: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |s: &str| if s.is_empty() { "" } else { "[REDACTED]" };
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("anon_key", &redact(&self.anon_key))
            .field("service_role_key", &redact(&self.service_role_key))
            .field("database_url", &redact(&self.database_url))
            .finish()
    }
}

/// Sliding-window quota applied per client address.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests admitted per window.
    pub max_requests: usize,

    /// Window length in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 60,
            window_secs: 60,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "financial-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                port: DEFAULT_SERVER_PORT,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            store: StoreConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    /// Fails if any of `SUPABASE_URL`, `SUPABASE_ANON_KEY` or
    /// `SUPABASE_SERVICE_ROLE_KEY` is missing or blank.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let required = ["SUPABASE_URL", "SUPABASE_ANON_KEY", "SUPABASE_SERVICE_ROLE_KEY"];
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|key| var(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(Error::config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let mut config = Self::default();

        config.store = StoreConfig {
            url: var("SUPABASE_URL").unwrap_or_default(),
            anon_key: var("SUPABASE_ANON_KEY").unwrap_or_default(),
            service_role_key: var("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default(),
            database_url: var("DATABASE_URL").unwrap_or_default(),
        };

        if let Some(name) = var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.server.port = parse_var(&var, "SERVER_PORT")?.unwrap_or(DEFAULT_SERVER_PORT);
        config.transport = TransportConfig::from_lookup(&var, config.server.port);

        if let Some(max) = parse_var(&var, "MCP_RATE_LIMIT_MAX")? {
            config.rate_limit.max_requests = max;
        }
        if let Some(window) = parse_var(&var, "MCP_RATE_LIMIT_WINDOW_SECS")? {
            config.rate_limit.window_secs = window;
        }

        Ok(config)
    }

    /// Switch to the network transport on the configured port, keeping any
    /// HTTP settings already loaded.
    #[cfg(feature = "http")]
    pub fn use_http_transport(&mut self) {
        if self.transport.is_stdio() {
            self.transport =
                TransportConfig::http(self.server.port, super::transport::DEFAULT_HTTP_HOST);
        }
    }
}

fn parse_var<T, F>(var: F, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| Error::config(format!("Invalid value for {}: {}", key, e)))
        })
        .transpose()
}
