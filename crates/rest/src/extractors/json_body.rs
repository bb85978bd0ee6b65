//! JSON request body extractor.
//!
//! Decodes a request body with serde, rejecting with the standard error
//! envelope instead of axum's plain-text rejection.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::RestError;

/// Axum extractor for a JSON body of type `T`.
///
/// The `Content-Type` header is not checked; any body that decodes is
/// accepted.
///
/// # Example
///
/// ```rust,ignore
/// use songbook_rest::extractors::JsonBody;
/// use songbook_persistence::types::AudioCreateRequest;
///
/// async fn create_handler(JsonBody(body): JsonBody<AudioCreateRequest>) {
///     println!("creating {} by {}", body.song, body.group);
/// }
/// ```
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| RestError::InvalidBody {
                error: e.to_string(),
            })?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| RestError::InvalidBody {
                error: e.to_string(),
            })
    }
}
