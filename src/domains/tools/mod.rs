//! Tools domain module.
//!
//! Tools are the read-only financial operations MCP clients can call. Each
//! one validates its arguments, runs a query through
//! [`MarketQueries`](crate::domains::market::MarketQueries), and answers
//! with a single JSON envelope.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder for the rmcp-driven transports
//! - `registry.rs` - Central tool registry and by-name dispatch
//! - `error.rs` - Error kinds and codes
//! - `format.rs` - Success/error envelopes
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `MarketTool`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add its route in `router.rs` and its arm in `registry.rs`

pub mod definitions;
mod error;
pub mod format;
mod registry;
pub mod router;

pub use error::{ErrorDetails, StoreContext, ToolError};
pub use format::{format_error, format_result, format_success};
pub use registry::ToolRegistry;
pub use router::build_tool_router;
