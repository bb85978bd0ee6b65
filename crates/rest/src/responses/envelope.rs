//! JSON envelopes for successful responses.
//!
//! - single item: `{"message": ..., "data": ...}`
//! - listing: `{"message": ..., "next_pagination": {"offset", "limit"}, "data": [...]}`
//!
//! The `next_pagination` hint is always `offset + limit`, whether or not the
//! page came back full.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use songbook_persistence::types::Pagination;
use uuid::Uuid;

/// Single-item envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    /// Outcome message.
    pub message: String,
    /// Payload.
    pub data: T,
}

/// Paged listing envelope.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    /// Outcome message.
    pub message: String,
    /// Pagination for the following page.
    pub next_pagination: Pagination,
    /// Items of this page.
    pub data: Vec<T>,
}

/// Payload carrying only an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UuidData {
    /// Identity of the affected audio.
    pub uuid: Uuid,
}

/// Empty object payload, rendered as `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Empty {}

/// Builds a single-item response.
pub fn data<T: Serialize>(status: StatusCode, message: &str, data: T) -> Response {
    (
        status,
        Json(DataResponse {
            message: message.to_string(),
            data,
        }),
    )
        .into_response()
}

/// Builds a 200 response whose payload is `{}`.
pub fn empty(message: &str) -> Response {
    data(StatusCode::OK, message, Empty {})
}

/// Builds a 200 listing response with the hint for the following page.
pub fn page<T: Serialize>(message: &str, pagination: Pagination, items: Vec<T>) -> Response {
    (
        StatusCode::OK,
        Json(PageResponse {
            message: message.to_string(),
            next_pagination: pagination.next_page(),
            data: items,
        }),
    )
        .into_response()
}
