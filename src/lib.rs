//! Financial data MCP server.
//!
//! Exposes read-only lookups over a PostgREST-backed market database as
//! Model Context Protocol tools, resources and prompts.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, the store client, the server handler
//!   and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **market**: entities, input validation and store queries
//!   - **tools**: the eight financial tools and their response envelope
//!   - **resources**: company list and per-company detail
//!   - **prompts**: analysis prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use financial_mcp_server::core::{Config, McpServer, PostgrestStore, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let store = Arc::new(PostgrestStore::new(&config.store)?);
//!     let transport = TransportService::new(config.transport.clone());
//!     transport.run(McpServer::new(config, store)).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
