//! SQL construction shared by the relational backends.
//!
//! Statements are produced as [`SqlFragment`]s: SQL text with numbered
//! placeholders plus the parameter values in placeholder order, so that
//! `params[n - 1]` is always the value bound to placeholder `n`. Placeholder
//! numbering is owned by a [`Placeholders`] counter created per statement;
//! nothing is shared between invocations.
//!
//! The same builders serve PostgreSQL (`$N`) and SQLite (`?N`); a [`Dialect`]
//! supplies the few expressions that differ between them.

mod insert;
mod predicate;
mod statements;
mod update;

pub use insert::{LYRIC_BATCH_ROWS, audio_insert, lyrics_insert};
pub use predicate::{FilterQuery, PredicateBuilder, list_audios_query};
pub use statements::{
    AUDIO_COLUMNS, LYRIC_COLUMNS, delete_audio, delete_lyrics, find_audio, list_lyrics,
    lyrics_for_audio,
};
pub use update::UpdateBuilder;

use chrono::NaiveDate;
use uuid::Uuid;

/// SQL dialect of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// PostgreSQL: `$N` placeholders, full-text phrase search.
    Postgres,
    /// SQLite: `?N` placeholders, case-insensitive substring search.
    Sqlite,
}

impl Dialect {
    /// Renders the placeholder for a 1-based parameter index.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${}", index),
            Dialect::Sqlite => format!("?{}", index),
        }
    }

    /// Expression for the current timestamp at millisecond precision.
    pub fn now(self) -> &'static str {
        match self {
            Dialect::Postgres => "CURRENT_TIMESTAMP(3)",
            Dialect::Sqlite => "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        }
    }

    /// Predicate matching a word sequence inside a text column.
    pub fn phrase_match(self, column: &str, placeholder: &str) -> String {
        match self {
            Dialect::Postgres => format!(
                "to_tsvector('english', {}) @@ phraseto_tsquery('english', {})",
                column, placeholder
            ),
            Dialect::Sqlite => format!("instr(lower({}), lower({})) > 0", column, placeholder),
        }
    }
}

/// Running placeholder index for a single statement.
#[derive(Debug, Clone)]
pub struct Placeholders {
    dialect: Dialect,
    next: usize,
}

impl Placeholders {
    /// Starts numbering at `start`.
    pub fn starting_at(dialect: Dialect, start: usize) -> Self {
        Self {
            dialect,
            next: start,
        }
    }

    /// Returns the next placeholder and advances by one.
    pub fn next(&mut self) -> String {
        let placeholder = self.dialect.placeholder(self.next);
        self.next += 1;
        placeholder
    }

    /// Index the next placeholder will receive.
    pub fn peek(&self) -> usize {
        self.next
    }

    /// Dialect used for rendering.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
}

/// A SQL fragment with associated parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    /// The SQL string with numbered placeholders.
    pub sql: String,
    /// The parameter values, in placeholder order.
    pub params: Vec<SqlParam>,
}

/// A SQL parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// Text parameter.
    Text(String),
    /// 32-bit integer parameter (lyric order).
    Int(i32),
    /// 64-bit integer parameter (LIMIT / OFFSET).
    BigInt(i64),
    /// Calendar date parameter.
    Date(NaiveDate),
    /// Identity parameter.
    Uuid(Uuid),
}

impl SqlParam {
    /// Creates a text parameter.
    pub fn text(s: &str) -> Self {
        SqlParam::Text(s.to_string())
    }
}

impl SqlFragment {
    /// Creates a new fragment with no parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Combines fragments with AND, keeping parameter order.
    ///
    /// Returns `None` for an empty list.
    pub fn and_all(fragments: Vec<SqlFragment>) -> Option<SqlFragment> {
        if fragments.is_empty() {
            return None;
        }

        let mut sql = Vec::with_capacity(fragments.len());
        let mut params = Vec::new();
        for fragment in fragments {
            sql.push(fragment.sql);
            params.extend(fragment.params);
        }

        Some(SqlFragment {
            sql: sql.join(" AND "),
            params,
        })
    }
}
