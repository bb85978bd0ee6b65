//! Axum extractors for catalog requests.
//!
//! - [`AudioId`] - Parse the `{uuid}` path segment
//! - [`JsonBody`] - Decode a JSON request body
//! - [`PageQuery`] - Normalize `offset`/`limit` query values

mod audio_id;
mod json_body;
mod pagination;

pub use audio_id::{AudioId, parse_audio_id};
pub use json_body::JsonBody;
pub use pagination::PageQuery;
