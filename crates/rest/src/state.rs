//! Application state shared by all request handlers.

use std::sync::Arc;

use songbook_persistence::core::CatalogStorage;
use songbook_persistence::types::Pagination;

use crate::config::ServerConfig;
use crate::service::CatalogService;

/// Shared state: the catalog service and the server configuration.
///
/// Cheap to clone; everything sits behind an `Arc`.
pub struct AppState<S> {
    service: CatalogService<S>,
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: CatalogStorage> AppState<S> {
    /// Creates new application state.
    pub fn new(service: CatalogService<S>, config: ServerConfig) -> Self {
        Self {
            service,
            config: Arc::new(config),
        }
    }

    /// Returns the catalog service.
    pub fn service(&self) -> &CatalogService<S> {
        &self.service
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Normalizes raw offset/limit query values against the server ceiling.
    pub fn pagination(&self, offset: Option<&str>, limit: Option<&str>) -> Pagination {
        Pagination::from_raw(offset, limit, self.config.pag_limit)
    }
}
