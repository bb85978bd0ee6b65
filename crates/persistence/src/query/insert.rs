//! INSERT construction for audios and their lyrics.

use uuid::Uuid;

use crate::types::{NewAudio, NewLyric};

use super::{Dialect, Placeholders, SqlFragment, SqlParam};

/// Number of bound values per lyric row: uuid, audio uuid, order, text.
const LYRIC_ROW_WIDTH: usize = 4;

/// Builds the INSERT for the audio row itself (lyrics are inserted separately).
pub fn audio_insert(id: Uuid, audio: &NewAudio, dialect: Dialect) -> SqlFragment {
    let mut placeholders = Placeholders::starting_at(dialect, 1);
    let values: Vec<String> = (0..5).map(|_| placeholders.next()).collect();
    let now = dialect.now();

    let sql = format!(
        "INSERT INTO audios (uuid, \"group\", song, release_date, link, created_at, updated_at) \
         VALUES ({}, {}, {})",
        values.join(", "),
        now,
        now
    );

    SqlFragment::with_params(
        sql,
        vec![
            SqlParam::Uuid(id),
            SqlParam::text(&audio.group),
            SqlParam::text(&audio.song),
            SqlParam::Date(audio.release_date),
            SqlParam::text(&audio.link),
        ],
    )
}

/// Maximum number of lyric rows per INSERT.
///
/// Keeps every statement far below the bound-parameter limits of both
/// backends (32766 for SQLite, 65535 for PostgreSQL).
pub const LYRIC_BATCH_ROWS: usize = 1000;

/// Builds the multi-row INSERTs for every lyric of an audio, one statement per
/// batch of [`LYRIC_BATCH_ROWS`] rows.
///
/// Placeholders restart at 1 in each statement; `order` values are taken from
/// the lyrics as given. Each row gets a fresh uuid. Returns an empty list when
/// there is nothing to insert. The caller runs every batch in one transaction.
pub fn lyrics_insert(audio_id: Uuid, lyrics: &[NewLyric], dialect: Dialect) -> Vec<SqlFragment> {
    lyrics
        .chunks(LYRIC_BATCH_ROWS)
        .map(|batch| lyrics_batch(audio_id, batch, dialect))
        .collect()
}

fn lyrics_batch(audio_id: Uuid, lyrics: &[NewLyric], dialect: Dialect) -> SqlFragment {
    let mut placeholders = Placeholders::starting_at(dialect, 1);
    let now = dialect.now();
    let mut rows = Vec::with_capacity(lyrics.len());
    let mut params = Vec::with_capacity(lyrics.len() * LYRIC_ROW_WIDTH);

    for lyric in lyrics {
        let values: Vec<String> = (0..LYRIC_ROW_WIDTH).map(|_| placeholders.next()).collect();
        rows.push(format!("({}, {}, {})", values.join(", "), now, now));
        params.push(SqlParam::Uuid(Uuid::new_v4()));
        params.push(SqlParam::Uuid(audio_id));
        params.push(SqlParam::Int(lyric.order));
        params.push(SqlParam::text(&lyric.text));
    }

    let sql = format!(
        "INSERT INTO lyrics (uuid, audio_uuid, \"order\", text, created_at, updated_at) VALUES {}",
        rows.join(", ")
    );

    SqlFragment::with_params(sql, params)
}
