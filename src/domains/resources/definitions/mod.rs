//! Resource definitions module.
//!
//! Each resource is defined in its own file with its URI, metadata and an
//! async reader backed by the market query layer.
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement `ResourceDefinition` (fixed URI) or `ResourceTemplateDefinition`
//! 3. Export it here
//! 4. Register in `registry.rs` and dispatch in `service.rs`

mod companies;
mod company_detail;

pub use companies::CompanyListResource;
pub use company_detail::CompanyDetailTemplate;

use async_trait::async_trait;

use super::error::ResourceError;
use crate::domains::market::MarketQueries;

/// A resource with a fixed URI.
#[async_trait]
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Produce the resource body.
    async fn read(queries: &MarketQueries) -> Result<String, ResourceError>;
}

/// A parameterized resource described by an RFC 6570 URI template.
#[async_trait]
pub trait ResourceTemplateDefinition {
    const URI_TEMPLATE: &'static str;
    const NAME: &'static str;
    const TITLE: &'static str;
    const DESCRIPTION: &'static str;
    const MIME_TYPE: &'static str;

    /// Extract the template argument from a concrete URI, if it matches.
    fn match_uri(uri: &str) -> Option<&str>;

    /// Produce the resource body for one argument.
    async fn read(argument: &str, queries: &MarketQueries) -> Result<String, ResourceError>;
}

/// Serialize a resource body as pretty JSON.
pub(crate) fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ResourceError> {
    serde_json::to_string_pretty(value).map_err(|e| ResourceError::internal(e.to_string()))
}
