//! Audio handlers.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | `/api/v1/audios` | [`create_handler`] |
//! | GET | `/api/v1/audios` | [`list_handler`] |
//! | GET | `/api/v1/audios/{uuid}` | [`find_handler`] |
//! | PATCH | `/api/v1/audios/{uuid}` | [`update_handler`] |
//! | DELETE | `/api/v1/audios/{uuid}` | [`delete_handler`] |

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::Response,
};
use serde::Deserialize;
use songbook_persistence::core::CatalogStorage;
use songbook_persistence::types::{AudioCreateRequest, AudioFilterRequest, AudioUpdateRequest};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::{AudioId, JsonBody, PageQuery};
use crate::responses::{self, UuidData};
use crate::state::AppState;

/// Query flags accepted by [`find_handler`].
#[derive(Debug, Default, Deserialize)]
pub struct FindQuery {
    /// `true` loads the lyrics along with the audio.
    pub full: Option<String>,
}

impl FindQuery {
    fn with_lyrics(&self) -> bool {
        self.full.as_deref() == Some("true")
    }
}

fn decode_query<T: serde::de::DeserializeOwned>(uri: &Uri) -> RestResult<T> {
    Query::<T>::try_from_uri(uri)
        .map(|Query(value)| value)
        .map_err(|e| RestError::InvalidQuery {
            error: e.body_text(),
        })
}

/// Handler for creating an audio.
///
/// Looks up release date, lyrics and link for the `{group, song}` pair and
/// stores the audio with its segmented lyrics.
///
/// # HTTP Request
///
/// `POST /api/v1/audios`
///
/// # Response
///
/// - `201 Created` - `{"message": "audio created correctly", "data": {"uuid": ...}}`
/// - `400 Bad Request` - Undecodable body or empty group/song
/// - `500 Internal Server Error` - Lookup or storage failure
pub async fn create_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(body): JsonBody<AudioCreateRequest>,
) -> RestResult<Response>
where
    S: CatalogStorage + 'static,
{
    debug!(group = %body.group, song = %body.song, "Processing create request");

    let audio = body
        .validate()
        .map_err(|e| RestError::validation("validation err", e))?;

    let uuid = state
        .service()
        .create(audio)
        .await
        .map_err(|e| RestError::internal("create audio err", e))?;

    Ok(responses::data(
        StatusCode::CREATED,
        "audio created correctly",
        UuidData { uuid },
    ))
}

/// Handler for listing audios.
///
/// # HTTP Request
///
/// `GET /api/v1/audios?group=&song=&after=&before=&link=&lyric=&limit=&offset=`
///
/// With no filter value present every audio is listed.
///
/// # Response
///
/// - `200 OK` - `{"message", "next_pagination", "data": [...]}`
/// - `400 Bad Request` - Bad date or inverted date range
/// - `500 Internal Server Error` - Storage failure
pub async fn list_handler<S>(
    State(state): State<AppState<S>>,
    PageQuery(pagination): PageQuery,
    uri: Uri,
) -> RestResult<Response>
where
    S: CatalogStorage + 'static,
{
    let filter = decode_query::<AudioFilterRequest>(&uri)?
        .validate()
        .map_err(|e| RestError::validation("validation err", e))?;

    debug!(
        filtered = filter.is_some(),
        offset = pagination.offset,
        limit = pagination.limit,
        "Processing list request"
    );

    let audios = state
        .service()
        .list(filter.as_ref(), pagination)
        .await
        .map_err(|e| RestError::internal("error on list audios", e))?;

    Ok(responses::page("audios got correctly", pagination, audios))
}

/// Handler for reading one audio.
///
/// # HTTP Request
///
/// `GET /api/v1/audios/{uuid}[?full=true]`
///
/// # Response
///
/// - `200 OK` - The audio, with `lyrics` when `full=true`
/// - `200 OK` - `{"message": "no rows find", "data": {}}` when nothing matched
/// - `400 Bad Request` - Malformed uuid
/// - `500 Internal Server Error` - Storage failure
pub async fn find_handler<S>(
    State(state): State<AppState<S>>,
    AudioId(id): AudioId,
    uri: Uri,
) -> RestResult<Response>
where
    S: CatalogStorage + 'static,
{
    let query = decode_query::<FindQuery>(&uri)?;
    debug!(uuid = %id, full = query.with_lyrics(), "Processing find request");

    if query.with_lyrics() {
        match state.service().find_with_lyrics(id).await {
            Ok(audio) => Ok(responses::data(StatusCode::OK, "audio got correctly", audio)),
            Err(e) if e.is_not_found() => Ok(responses::empty("no rows find")),
            Err(e) => Err(RestError::internal(
                "error on find audio by uuid with lyric",
                e,
            )),
        }
    } else {
        match state.service().find(id).await {
            Ok(audio) => Ok(responses::data(StatusCode::OK, "audio got correctly", audio)),
            Err(e) if e.is_not_found() => Ok(responses::empty("no rows find")),
            Err(e) => Err(RestError::internal("error on find audio by uuid", e)),
        }
    }
}

/// Handler for partially updating an audio.
///
/// Only the fields present in the body change. A `lyrics` value replaces the
/// whole lyric set.
///
/// # HTTP Request
///
/// `PATCH /api/v1/audios/{uuid}`
///
/// # Response
///
/// - `200 OK` - The updated audio
/// - `200 OK` - `{"message": "no rows updated", "data": {}}` when nothing matched
/// - `400 Bad Request` - Malformed uuid, undecodable body, empty or invalid fields
/// - `500 Internal Server Error` - Storage failure
pub async fn update_handler<S>(
    State(state): State<AppState<S>>,
    AudioId(id): AudioId,
    JsonBody(body): JsonBody<AudioUpdateRequest>,
) -> RestResult<Response>
where
    S: CatalogStorage + 'static,
{
    debug!(uuid = %id, "Processing update request");

    let update = body
        .validate()
        .map_err(|e| RestError::validation("validation error", e))?;

    match state.service().update(id, &update).await {
        Ok(audio) => Ok(responses::data(StatusCode::OK, "audio updated correctly", audio)),
        Err(e) if e.is_not_found() => Ok(responses::empty("no rows updated")),
        Err(e) => Err(RestError::internal("error on update audio", e)),
    }
}

/// Handler for deleting an audio and its lyrics.
///
/// # HTTP Request
///
/// `DELETE /api/v1/audios/{uuid}`
///
/// # Response
///
/// - `200 OK` - `{"message": "audio deleted correctly", "data": {"uuid": ...}}`
/// - `200 OK` - `{"message": "no rows deleted", "data": {}}` when nothing matched
/// - `400 Bad Request` - Malformed uuid
/// - `500 Internal Server Error` - Storage failure
pub async fn delete_handler<S>(
    State(state): State<AppState<S>>,
    AudioId(id): AudioId,
) -> RestResult<Response>
where
    S: CatalogStorage + 'static,
{
    debug!(uuid = %id, "Processing delete request");

    match state.service().delete(id).await {
        Ok(()) => Ok(responses::data(
            StatusCode::OK,
            "audio deleted correctly",
            UuidData { uuid: id },
        )),
        Err(e) if e.is_not_found() => Ok(responses::empty("no rows deleted")),
        Err(e) => Err(RestError::internal("error on delete audio by uuid", e)),
    }
}
