//! # songbook-rest - HTTP API for the Songbook catalog
//!
//! This crate exposes the audio and lyrics catalog over HTTP. An audio is
//! created from a `{group, song}` pair; its release date, lyrics and link
//! come from an external metadata service, and the lyrics are stored as
//! ordered segments owned by the audio.
//!
//! ## Backend Support
//!
//! Storage backends are configured through feature flags:
//!
//! - `sqlite` - SQLite backend (default)
//! - `postgres` - PostgreSQL backend
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use songbook_persistence::backends::sqlite::SqliteBackend;
//! use songbook_rest::{HttpMetadataClient, ServerConfig, create_app_with_config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SqliteBackend::open("songbook.db")?;
//!     backend.init_schema()?;
//!
//!     let config = ServerConfig::default();
//!     let metadata = HttpMetadataClient::new(&config.info_service_url, Duration::from_secs(10))?;
//!
//!     let app = create_app_with_config(backend, Arc::new(metadata), config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Method | URL Pattern | Description |
//! |--------|-------------|-------------|
//! | POST | `/api/v1/audios` | Create from `{group, song}` |
//! | GET | `/api/v1/audios` | Filtered, paged listing |
//! | GET | `/api/v1/audios/{uuid}` | Read, `?full=true` adds lyrics |
//! | PATCH | `/api/v1/audios/{uuid}` | Partial update |
//! | DELETE | `/api/v1/audios/{uuid}` | Delete with lyrics |
//! | GET | `/api/v1/audios/{uuid}/lyrics` | Paged lyrics |
//! | GET | `/health` | Health check |
//!
//! ## Error Handling
//!
//! Failures are returned as `{"message": ..., "error": ...}`: 400 for a
//! malformed uuid, body or query and for validation failures, 500 for
//! everything else. A read, update or delete that matches nothing is a 200
//! with an empty `data` object.
//!
//! ## Architecture
//!
//! - [`error`] - Error types and the error envelope
//! - [`config`] - Server configuration
//! - [`metadata`] - Metadata lookup client
//! - [`service`] - Orchestration and time budgets
//! - [`state`] - Application state
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Axum extractors for ids, bodies and pagination
//! - [`responses`] - Success envelopes
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metadata;
pub mod responses;
pub mod routing;
pub mod service;
pub mod state;

// Re-export commonly used types
pub use config::{ServerConfig, StorageBackendMode};
pub use error::{RestError, RestResult};
pub use metadata::{AudioInfo, HttpMetadataClient, MetadataClient, MetadataError};
pub use service::{CatalogService, ServiceError};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use songbook_persistence::core::CatalogStorage;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application.
///
/// # Arguments
///
/// * `storage` - The storage backend to use
/// * `metadata` - Client used to enrich new audios
/// * `config` - Server configuration
pub fn create_app_with_config<S>(
    storage: S,
    metadata: Arc<dyn MetadataClient>,
    config: ServerConfig,
) -> Router
where
    S: CatalogStorage + 'static,
{
    create_app_with_service(CatalogService::new(Arc::new(storage), metadata), config)
}

/// Creates the Axum application around an already configured service.
pub fn create_app_with_service<S>(service: CatalogService<S>, config: ServerConfig) -> Router
where
    S: CatalogStorage + 'static,
{
    info!(
        "Creating catalog API server with backend: {}",
        service.storage().backend_name()
    );

    let state = AppState::new(service, config.clone());

    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins == "*" {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` overrides
/// `level` when set.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "songbook={level},songbook_rest={level},songbook_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
