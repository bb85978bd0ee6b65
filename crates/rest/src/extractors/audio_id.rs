//! Audio identity path extractor.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::RestError;

/// The `{uuid}` path segment, parsed.
///
/// A segment that is not a UUID is rejected with HTTP 400 before the
/// handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioId(pub Uuid);

impl<S> FromRequestParts<S> for AudioId
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::InvalidUuid {
                error: e.to_string(),
            })?;

        parse_audio_id(&raw).map(AudioId)
    }
}

/// Parses a path segment into an audio id.
pub fn parse_audio_id(raw: &str) -> Result<Uuid, RestError> {
    Uuid::parse_str(raw).map_err(|e| RestError::InvalidUuid {
        error: e.to_string(),
    })
}
