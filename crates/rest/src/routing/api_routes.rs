//! Catalog route configuration.

use axum::{
    Router,
    routing::get,
};
use songbook_persistence::core::CatalogStorage;

use crate::handlers;
use crate::state::AppState;

/// Creates all catalog routes.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `POST /api/v1/audios` - Create
/// - `GET /api/v1/audios` - Filtered, paged listing
/// - `GET /api/v1/audios/{uuid}` - Read (`?full=true` for lyrics)
/// - `PATCH /api/v1/audios/{uuid}` - Partial update
/// - `DELETE /api/v1/audios/{uuid}` - Delete
/// - `GET /api/v1/audios/{uuid}/lyrics` - Paged lyrics
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: CatalogStorage + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .route(
            "/api/v1/audios",
            get(handlers::list_handler::<S>).post(handlers::create_handler::<S>),
        )
        .route(
            "/api/v1/audios/{uuid}",
            get(handlers::find_handler::<S>)
                .patch(handlers::update_handler::<S>)
                .delete(handlers::delete_handler::<S>),
        )
        .route(
            "/api/v1/audios/{uuid}/lyrics",
            get(handlers::list_lyrics_handler::<S>),
        )
        .with_state(state)
}
