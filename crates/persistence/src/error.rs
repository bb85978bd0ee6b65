//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates "nothing matched" results, request
//! validation failures, transaction failures, and backend failures.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
///
/// This enum encompasses all possible errors that can occur during persistence
/// operations, organized by category.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Transaction errors
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns true when the operation succeeded mechanically but matched no rows.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Resource(ResourceError::NotFound { .. }))
    }
}

/// Errors related to resource state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested row was not found.
    #[error("resource not found: {resource_type}/{id}")]
    NotFound { resource_type: String, id: String },
}

impl ResourceError {
    /// Creates a not-found error for an audio id.
    pub fn audio_not_found(id: impl ToString) -> Self {
        ResourceError::NotFound {
            resource_type: "audio".to_string(),
            id: id.to_string(),
        }
    }

    /// Creates a not-found error for the lyrics of an audio id.
    pub fn lyrics_not_found(audio_id: impl ToString) -> Self {
        ResourceError::NotFound {
            resource_type: "lyrics".to_string(),
            id: audio_id.to_string(),
        }
    }
}

/// Errors related to request validation.
///
/// These are produced before any store access and never reach a backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more fields were present but unusable.
    #[error("{}", join_details(.details))]
    InvalidFields { details: Vec<ValidationDetail> },

    /// A partial update carried no fields at all.
    #[error("at least one argument is required")]
    EmptyUpdate,

    /// The release-date bounds of a filter are inverted.
    #[error("'after' date cannot be greater than 'before'")]
    InvertedDateRange,
}

impl ValidationError {
    /// Returns the field-level details, if any.
    pub fn details(&self) -> &[ValidationDetail] {
        match self {
            ValidationError::InvalidFields { details } => details,
            _ => &[],
        }
    }
}

/// Detailed validation error information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetail {
    /// The request field that failed validation.
    pub field: String,
    /// A human-readable error message.
    pub message: String,
}

impl ValidationDetail {
    /// Creates a new detail for the given field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn join_details(details: &[ValidationDetail]) -> String {
    details
        .iter()
        .map(|d| format!("{};", d.message))
        .collect::<String>()
}

/// Errors related to transactions.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// Operation exceeded its time budget.
    #[error("transaction timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Transaction was rolled back.
    #[error("transaction rolled back: {reason}")]
    RolledBack { reason: String },

    /// Transaction is no longer valid (already committed or rolled back).
    #[error("transaction no longer valid")]
    InvalidTransaction,
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Connection pool exhausted.
    #[error("connection pool exhausted for {backend_name}")]
    PoolExhausted { backend_name: String },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A stored value could not be decoded into its model type.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for request validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(_err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::PoolExhausted {
            backend_name: "sqlite".to_string(),
        })
    }
}

#[cfg(feature = "postgres")]
impl From<tokio_postgres::Error> for StorageError {
    fn from(err: tokio_postgres::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "postgres".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}
