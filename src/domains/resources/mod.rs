//! Resources domain module.
//!
//! Resources are read-only documents MCP clients can fetch by URI:
//!
//! - `financial://companies` - every company, ordered by ticker
//! - `financial://company/{ticker}` - one company plus its latest report
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `registry.rs` - Central resource registration
//! - `service.rs` - Resource service for listing and reading

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::{ResourceDefinition, ResourceTemplateDefinition};
pub use error::ResourceError;
pub use registry::{get_all_resource_templates, get_all_resources, resource_uris};
pub use service::ResourceService;
