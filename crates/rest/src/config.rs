//! Server configuration for the Songbook HTTP API.
//!
//! Configuration is read from command line arguments with environment
//! variable fallbacks, or built programmatically.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `APP_PORT` | 8080 | Server port |
//! | `APP_HOST` | 127.0.0.1 | Host to bind |
//! | `APP_LOG_LEVEL` | info | Log level |
//! | `APP_INFO_SERVICE_URL` | http://localhost:8088/info | Metadata lookup endpoint |
//! | `APP_PAG_LIMIT` | 10 | Server page-size ceiling |
//! | `APP_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `APP_ENABLE_CORS` | false | Enable CORS |
//! | `APP_CORS_ORIGINS` | * | Allowed origins |
//! | `APP_STORAGE_BACKEND` | sqlite | `sqlite` or `postgres` |
//! | `APP_DATABASE_URL` | | SQLite path or PostgreSQL connection string |
//!
//! # Example
//!
//! ```rust
//! use songbook_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     pag_limit: 25,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! ```

use std::fmt;
use std::str::FromStr;

use clap::Parser;

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackendMode {
    /// Embedded SQLite database.
    #[default]
    Sqlite,
    /// PostgreSQL server.
    Postgres,
}

impl fmt::Display for StorageBackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackendMode::Sqlite => write!(f, "sqlite"),
            StorageBackendMode::Postgres => write!(f, "postgres"),
        }
    }
}

impl FromStr for StorageBackendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackendMode::Sqlite),
            "postgres" | "postgresql" => Ok(StorageBackendMode::Postgres),
            other => Err(format!(
                "unknown storage backend '{}', expected sqlite or postgres",
                other
            )),
        }
    }
}

/// Server configuration for the Songbook HTTP API.
#[derive(Debug, Clone, Parser)]
#[command(name = "songbook")]
#[command(about = "Audio and lyrics catalog server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "APP_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "APP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "APP_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Endpoint queried for release date, lyrics and link of a new audio.
    #[arg(
        long,
        env = "APP_INFO_SERVICE_URL",
        default_value = "http://localhost:8088/info"
    )]
    pub info_service_url: String,

    /// Server page-size ceiling; also the default page size.
    #[arg(long, env = "APP_PAG_LIMIT", default_value = "10")]
    pub pag_limit: u64,

    /// Request timeout in seconds.
    #[arg(long, env = "APP_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "APP_ENABLE_CORS", default_value = "false")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "APP_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Storage backend.
    #[arg(long, env = "APP_STORAGE_BACKEND", default_value = "sqlite")]
    pub storage_backend: StorageBackendMode,

    /// SQLite database path or PostgreSQL connection string.
    #[arg(long, env = "APP_DATABASE_URL")]
    pub database_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            info_service_url: "http://localhost:8088/info".to_string(),
            pag_limit: 10,
            request_timeout: 30,
            enable_cors: false,
            cors_origins: "*".to_string(),
            storage_backend: StorageBackendMode::Sqlite,
            database_url: None,
        }
    }
}

impl ServerConfig {
    /// Creates a configuration from environment variables only.
    pub fn from_env() -> Self {
        Self::try_parse_from(["songbook"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.pag_limit == 0 {
            errors.push("Pagination limit cannot be 0".to_string());
        }

        match url::Url::parse(&self.info_service_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(format!(
                "Info service URL must use http or https, got '{}'",
                url.scheme()
            )),
            Err(e) => errors.push(format!("Invalid info service URL: {}", e)),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses ephemeral port 0, a small page ceiling and a short timeout.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            pag_limit: 5,
            request_timeout: 5,
            ..Self::default()
        }
    }
}
