//! Error types for the Songbook HTTP API.
//!
//! Every failure is rendered as `{"message": <context>, "error": <cause>}`.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidUuid | 400 |
//! | InvalidBody | 400 |
//! | InvalidQuery | 400 |
//! | Validation | 400 |
//! | Internal | 500 |
//!
//! "No rows matched" is not an error at this layer: handlers answer it with
//! a 200 and an empty payload.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use songbook_persistence::error::ValidationError;
use std::fmt;

/// The primary error type for HTTP API operations.
#[derive(Debug)]
pub enum RestError {
    /// The `{uuid}` path segment is not a UUID (HTTP 400).
    InvalidUuid {
        /// Parser message.
        error: String,
    },

    /// The request body could not be decoded (HTTP 400).
    InvalidBody {
        /// Decoder message.
        error: String,
    },

    /// The query string could not be decoded (HTTP 400).
    InvalidQuery {
        /// Decoder message.
        error: String,
    },

    /// The request was decoded but its values are unusable (HTTP 400).
    Validation {
        /// Operation context.
        message: &'static str,
        /// Field-level problems.
        source: ValidationError,
    },

    /// Anything else (HTTP 500).
    Internal {
        /// Operation context.
        message: &'static str,
        /// Underlying failure.
        error: String,
    },
}

impl RestError {
    /// Wraps a validation failure with the operation context.
    pub fn validation(message: &'static str, source: ValidationError) -> Self {
        RestError::Validation { message, source }
    }

    /// Wraps any other failure with the operation context.
    pub fn internal(message: &'static str, error: impl fmt::Display) -> Self {
        RestError::Internal {
            message,
            error: error.to_string(),
        }
    }

    /// Returns the HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::InvalidUuid { .. }
            | RestError::InvalidBody { .. }
            | RestError::InvalidQuery { .. }
            | RestError::Validation { .. } => StatusCode::BAD_REQUEST,
            RestError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            RestError::InvalidUuid { .. } => "invalid uuid in path param",
            RestError::InvalidBody { .. } => "read body err",
            RestError::InvalidQuery { .. } => "read query err",
            RestError::Validation { message, .. } | RestError::Internal { message, .. } => *message,
        }
    }

    fn cause(&self) -> String {
        match self {
            RestError::InvalidUuid { error }
            | RestError::InvalidBody { error }
            | RestError::InvalidQuery { error }
            | RestError::Internal { error, .. } => error.clone(),
            RestError::Validation { source, .. } => source.to_string(),
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message(), self.cause())
    }
}

impl std::error::Error for RestError {}

/// Error envelope written for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Operation context.
    pub message: String,
    /// Underlying failure.
    pub error: String,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message().to_string(),
            error: self.cause(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type RestResult<T> = Result<T, RestError>;
