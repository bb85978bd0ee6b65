//! Filter predicates and the paged audio listing statement.

use crate::types::{AudioFilter, FIRST_FILTER_SLOT, LIMIT_SLOT, OFFSET_SLOT, Pagination};

use super::statements::AUDIO_COLUMNS;
use super::{Dialect, Placeholders, SqlFragment, SqlParam};

/// Builds one predicate per present filter field.
///
/// Fields are visited in a fixed order (group, lower date bound, upper date
/// bound, link, song phrase, lyric phrase) and each present field takes the
/// next placeholder, so indices are contiguous from the starting index.
pub struct PredicateBuilder {
    placeholders: Placeholders,
    predicates: Vec<SqlFragment>,
}

/// The predicates for a filter plus what the FROM clause needs.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    /// Predicates in placeholder order.
    pub predicates: Vec<SqlFragment>,
    /// True when a predicate references the lyrics table.
    pub joins_lyrics: bool,
}

impl PredicateBuilder {
    /// Creates a builder whose first predicate uses placeholder `start`.
    pub fn new(dialect: Dialect, start: usize) -> Self {
        Self {
            placeholders: Placeholders::starting_at(dialect, start),
            predicates: Vec::new(),
        }
    }

    fn equals(&mut self, column: &str, param: SqlParam) {
        let placeholder = self.placeholders.next();
        self.predicates.push(SqlFragment::with_params(
            format!("{} = {}", column, placeholder),
            vec![param],
        ));
    }

    fn compare(&mut self, column: &str, operator: &str, param: SqlParam) {
        let placeholder = self.placeholders.next();
        self.predicates.push(SqlFragment::with_params(
            format!("{} {} {}", column, operator, placeholder),
            vec![param],
        ));
    }

    fn phrase(&mut self, column: &str, phrase: &str) {
        let placeholder = self.placeholders.next();
        let sql = self.placeholders.dialect().phrase_match(column, &placeholder);
        self.predicates
            .push(SqlFragment::with_params(sql, vec![SqlParam::text(phrase)]));
    }

    /// Builds the predicates for `filter`.
    pub fn build(mut self, filter: &AudioFilter) -> FilterQuery {
        if let Some(group) = &filter.group {
            self.equals("a.\"group\"", SqlParam::text(group));
        }
        if let Some(after) = filter.released_after {
            self.compare("a.release_date", ">=", SqlParam::Date(after));
        }
        if let Some(before) = filter.released_before {
            self.compare("a.release_date", "<=", SqlParam::Date(before));
        }
        if let Some(link) = &filter.link {
            self.equals("a.link", SqlParam::text(link));
        }
        if let Some(song) = &filter.song {
            self.phrase("a.song", song);
        }
        if let Some(lyric) = &filter.lyric {
            self.phrase("l.text", lyric);
        }

        FilterQuery {
            predicates: self.predicates,
            joins_lyrics: filter.searches_lyrics(),
        }
    }
}

/// Builds the paged audio listing, optionally filtered.
///
/// LIMIT and OFFSET always occupy placeholders 1 and 2; filter predicates
/// follow from 3. The lyrics table is joined, with duplicate audios removed,
/// only when the filter searches lyric text.
pub fn list_audios_query(
    filter: Option<&AudioFilter>,
    pagination: Pagination,
    dialect: Dialect,
) -> SqlFragment {
    let query = filter.map(|filter| PredicateBuilder::new(dialect, FIRST_FILTER_SLOT).build(filter));
    let joins_lyrics = query.as_ref().is_some_and(|q| q.joins_lyrics);

    let mut sql = if joins_lyrics {
        format!(
            "SELECT DISTINCT {} FROM audios a JOIN lyrics l ON a.uuid = l.audio_uuid",
            AUDIO_COLUMNS
        )
    } else {
        format!("SELECT {} FROM audios a", AUDIO_COLUMNS)
    };

    let mut params = vec![
        SqlParam::BigInt(pagination.limit_param()),
        SqlParam::BigInt(pagination.offset_param()),
    ];

    if let Some(where_clause) = query.and_then(|q| SqlFragment::and_all(q.predicates)) {
        sql.push_str(" WHERE ");
        sql.push_str(&where_clause.sql);
        params.extend(where_clause.params);
    }

    sql.push_str(&format!(
        " ORDER BY a.created_at, a.uuid LIMIT {} OFFSET {}",
        dialect.placeholder(LIMIT_SLOT),
        dialect.placeholder(OFFSET_SLOT)
    ));

    SqlFragment::with_params(sql, params)
}
