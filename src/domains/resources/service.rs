//! Resource service implementation.
//!
//! Lists the registered resources and templates, and routes reads to the
//! matching definition.

use std::sync::Arc;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use tracing::{info, warn};

use super::definitions::{
    CompanyDetailTemplate, CompanyListResource, ResourceDefinition, ResourceTemplateDefinition,
};
use super::error::ResourceError;
use super::registry::{get_all_resource_templates, get_all_resources};
use crate::domains::market::MarketQueries;

/// Service for listing and reading resources.
pub struct ResourceService {
    queries: Arc<MarketQueries>,
    resources: Vec<Resource>,
    templates: Vec<ResourceTemplate>,
}

impl ResourceService {
    pub fn new(queries: Arc<MarketQueries>) -> Self {
        info!("Initializing ResourceService");
        Self {
            queries,
            resources: get_all_resources(),
            templates: get_all_resource_templates(),
        }
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources.clone()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        info!("Reading resource: {}", uri);
        let queries = self.queries.as_ref();

        let body = if uri == CompanyListResource::URI {
            CompanyListResource::read(queries).await?
        } else if let Some(ticker) = CompanyDetailTemplate::match_uri(uri) {
            CompanyDetailTemplate::read(ticker, queries).await?
        } else {
            warn!("Unknown resource requested: {}", uri);
            return Err(ResourceError::not_found(uri));
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(body, uri)],
        })
    }
}
