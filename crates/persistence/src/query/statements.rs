//! Fixed-shape statements.

use super::Dialect;

/// Audio columns selected by every audio read, qualified with alias `a`.
pub const AUDIO_COLUMNS: &str =
    "a.uuid, a.\"group\", a.song, a.release_date, a.link, a.created_at, a.updated_at";

/// Lyric columns selected by every lyric read, qualified with alias `l`.
pub const LYRIC_COLUMNS: &str =
    "l.uuid, l.audio_uuid, l.\"order\", l.text, l.created_at, l.updated_at";

/// Selects one audio by uuid (`1`).
pub fn find_audio(dialect: Dialect) -> String {
    format!(
        "SELECT {} FROM audios a WHERE a.uuid = {}",
        AUDIO_COLUMNS,
        dialect.placeholder(1)
    )
}

/// Selects every lyric of an audio (`1`) in segment order.
pub fn lyrics_for_audio(dialect: Dialect) -> String {
    format!(
        "SELECT {} FROM lyrics l WHERE l.audio_uuid = {} ORDER BY l.\"order\"",
        LYRIC_COLUMNS,
        dialect.placeholder(1)
    )
}

/// Selects a page of an audio's lyrics: audio uuid (`1`), limit (`2`), offset (`3`).
pub fn list_lyrics(dialect: Dialect) -> String {
    format!(
        "SELECT {} FROM lyrics l WHERE l.audio_uuid = {} ORDER BY l.\"order\" LIMIT {} OFFSET {}",
        LYRIC_COLUMNS,
        dialect.placeholder(1),
        dialect.placeholder(2),
        dialect.placeholder(3)
    )
}

/// Deletes one audio by uuid (`1`). Lyrics follow through the cascade.
pub fn delete_audio(dialect: Dialect) -> String {
    format!("DELETE FROM audios WHERE uuid = {}", dialect.placeholder(1))
}

/// Deletes every lyric of an audio (`1`).
pub fn delete_lyrics(dialect: Dialect) -> String {
    format!(
        "DELETE FROM lyrics WHERE audio_uuid = {}",
        dialect.placeholder(1)
    )
}
