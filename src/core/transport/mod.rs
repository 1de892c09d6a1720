//! Transport layer for the MCP server.
//!
//! - **STDIO**: Standard input/output, the default MCP mode - feature: `stdio`
//! - **HTTP**: JSON-RPC over POST with per-client rate limiting - feature: `http`
//!
//! Each transport handles the connection lifecycle and delegates
//! message processing to the MCP server handler.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub mod rate_limit;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::{DEFAULT_HTTP_HOST, HttpConfig};

#[cfg(feature = "http")]
pub use rate_limit::RateLimiter;
