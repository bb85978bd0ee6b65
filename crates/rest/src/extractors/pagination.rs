//! Pagination extractor.
//!
//! Reads `offset` and `limit` from the query string and normalizes them
//! against the server page-size ceiling.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use songbook_persistence::core::CatalogStorage;
use songbook_persistence::types::Pagination;

use crate::state::AppState;

/// Axum extractor for the effective pagination of a listing.
///
/// Never rejects: missing or unusable values fall back to offset 0 and the
/// server limit.
///
/// # Example
///
/// ```rust,ignore
/// use songbook_rest::extractors::PageQuery;
///
/// async fn list_handler(PageQuery(pagination): PageQuery) {
///     let next = pagination.next_page();
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery(pub Pagination);

/// Raw query values; kept as strings so bad input degrades to defaults.
#[derive(Debug, Default, Deserialize)]
struct RawPageQuery {
    offset: Option<String>,
    limit: Option<String>,
}

impl<S> FromRequestParts<AppState<S>> for PageQuery
where
    S: CatalogStorage + 'static,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let raw = Query::<RawPageQuery>::try_from_uri(&parts.uri)
            .map(|Query(raw)| raw)
            .unwrap_or_default();

        Ok(PageQuery(
            state.pagination(raw.offset.as_deref(), raw.limit.as_deref()),
        ))
    }
}
