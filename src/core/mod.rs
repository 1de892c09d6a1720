//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server:
//! configuration, error handling, the store client, server lifecycle
//! management and transport layer abstractions.

pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use store::{MemoryStore, PostgrestStore, Store};
pub use transport::{TransportConfig, TransportService};
