//! Offset pagination for listing operations.
//!
//! Raw `offset`/`limit` query values are normalized against a server-side
//! limit before they reach a query. The limit is a strict ceiling: a caller
//! asking for the server limit itself (or more) receives the server limit as
//! the default instead.

use serde::{Deserialize, Serialize};

/// Placeholder slot bound to the page size in listing queries.
pub const LIMIT_SLOT: usize = 1;

/// Placeholder slot bound to the page offset in listing queries.
pub const OFFSET_SLOT: usize = 2;

/// First placeholder slot available to filter predicates.
pub const FIRST_FILTER_SLOT: usize = 3;

/// A normalized offset/limit pair.
///
/// Serializes as `{"offset": n, "limit": n}`, which is also the shape of the
/// `next_pagination` hint returned with every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of rows to skip.
    pub offset: u64,
    /// Maximum number of rows to return.
    pub limit: u64,
}

impl Pagination {
    /// Creates pagination from already-normalized values.
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Creates the first page with the given limit.
    pub fn first(limit: u64) -> Self {
        Self { offset: 0, limit }
    }

    /// Normalizes raw request values against the server limit.
    ///
    /// - `offset` falls back to 0 when absent, unparsable, or not positive.
    /// - `limit` falls back to `server_limit` when absent, unparsable, not
    ///   positive, or not strictly less than `server_limit`.
    pub fn from_raw(offset: Option<&str>, limit: Option<&str>, server_limit: u64) -> Self {
        let offset = offset
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|value| *value > 0)
            .map(|value| value as u64)
            .unwrap_or(0);

        let limit = limit
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|value| *value > 0)
            .map(|value| value as u64)
            .filter(|value| *value < server_limit)
            .unwrap_or(server_limit);

        Self { offset, limit }
    }

    /// Returns the pagination for the following page.
    ///
    /// This is a hint computed from the effective values only; the next page
    /// may be empty.
    pub fn next_page(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }

    /// Returns the limit as a signed value for binding.
    pub fn limit_param(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }

    /// Returns the offset as a signed value for binding.
    pub fn offset_param(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER_LIMIT: u64 = 10;

    #[test]
    fn test_defaults_when_absent() {
        let pag = Pagination::from_raw(None, None, SERVER_LIMIT);
        assert_eq!(pag, Pagination::new(0, SERVER_LIMIT));
    }

    #[test]
    fn test_accepts_valid_values() {
        let pag = Pagination::from_raw(Some("20"), Some("5"), SERVER_LIMIT);
        assert_eq!(pag.offset, 20);
        assert_eq!(pag.limit, 5);
    }

    #[test]
    fn test_invalid_offset_falls_back_to_zero() {
        for raw in ["-3", "abc", "", "1.5"] {
            let pag = Pagination::from_raw(Some(raw), None, SERVER_LIMIT);
            assert_eq!(pag.offset, 0, "offset {raw:?}");
        }
    }

    #[test]
    fn test_invalid_limit_falls_back_to_server_limit() {
        for raw in ["0", "-1", "x", ""] {
            let pag = Pagination::from_raw(None, Some(raw), SERVER_LIMIT);
            assert_eq!(pag.limit, SERVER_LIMIT, "limit {raw:?}");
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_not_a_number() {
        let pag = Pagination::from_raw(Some(" 4"), Some("5 "), SERVER_LIMIT);
        assert_eq!(pag, Pagination::new(0, SERVER_LIMIT));
    }

    #[test]
    fn test_server_limit_is_strict_ceiling() {
        let at_ceiling = Pagination::from_raw(None, Some("10"), SERVER_LIMIT);
        assert_eq!(at_ceiling.limit, SERVER_LIMIT);

        let above = Pagination::from_raw(None, Some("500"), SERVER_LIMIT);
        assert_eq!(above.limit, SERVER_LIMIT);

        let below = Pagination::from_raw(None, Some("9"), SERVER_LIMIT);
        assert_eq!(below.limit, 9);
    }

    #[test]
    fn test_supplied_limit_stays_below_ceiling() {
        for raw in 1..=20 {
            let pag = Pagination::from_raw(None, Some(&raw.to_string()), SERVER_LIMIT);
            assert!(pag.limit >= 1 && pag.limit <= SERVER_LIMIT);
            if raw < SERVER_LIMIT as i32 {
                assert_eq!(pag.limit, raw as u64);
            }
        }
    }

    #[test]
    fn test_next_page() {
        let pag = Pagination::from_raw(Some("4"), Some("3"), SERVER_LIMIT);
        assert_eq!(pag.next_page(), Pagination::new(7, 3));
    }

    #[test]
    fn test_next_page_uses_effective_values() {
        let pag = Pagination::from_raw(Some("-8"), Some("999"), SERVER_LIMIT);
        assert_eq!(pag.next_page(), Pagination::new(SERVER_LIMIT, SERVER_LIMIT));
    }

    #[test]
    fn test_serializes_as_offset_limit() {
        let json = serde_json::to_value(Pagination::new(5, 10)).unwrap();
        assert_eq!(json, serde_json::json!({"offset": 5, "limit": 10}));
    }
}
