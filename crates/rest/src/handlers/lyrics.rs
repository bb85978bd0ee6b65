//! Lyrics handlers.

use axum::{extract::State, response::Response};
use songbook_persistence::core::CatalogStorage;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::{AudioId, PageQuery};
use crate::responses;
use crate::state::AppState;

/// Handler for listing an audio's lyrics in segment order.
///
/// # HTTP Request
///
/// `GET /api/v1/audios/{uuid}/lyrics?limit=&offset=`
///
/// # Response
///
/// - `200 OK` - `{"message", "next_pagination", "data": [...]}`
/// - `200 OK` - Empty `data` and `"no rows find"` when the page is empty
/// - `400 Bad Request` - Malformed uuid
/// - `500 Internal Server Error` - Storage failure
pub async fn list_lyrics_handler<S>(
    State(state): State<AppState<S>>,
    AudioId(id): AudioId,
    PageQuery(pagination): PageQuery,
) -> RestResult<Response>
where
    S: CatalogStorage + 'static,
{
    debug!(
        uuid = %id,
        offset = pagination.offset,
        limit = pagination.limit,
        "Processing lyrics list request"
    );

    match state.service().list_lyrics(id, pagination).await {
        Ok(lyrics) => Ok(responses::page("lyrics got correctly", pagination, lyrics)),
        Err(e) if e.is_not_found() => Ok(responses::page(
            "no rows find",
            pagination,
            Vec::<()>::new(),
        )),
        Err(e) => Err(RestError::internal("error on list audio lyrics", e)),
    }
}
