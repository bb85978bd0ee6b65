//! SQLite schema definitions and migrations.

use rusqlite::Connection;

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

fn schema_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

/// Initialize the database schema.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        create_schema_v1(conn)?;
        set_schema_version(conn, 1)?;
        migrate_schema(conn, 1)?;
    } else if current_version < SCHEMA_VERSION {
        migrate_schema(conn, current_version)?;
    }

    Ok(())
}

/// Get the current schema version.
fn get_schema_version(conn: &Connection) -> StorageResult<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| schema_error(format!("Failed to create schema_version table: {}", e)))?;

    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    Ok(version.unwrap_or(0))
}

/// Set the schema version.
fn set_schema_version(conn: &Connection, version: i32) -> StorageResult<()> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| schema_error(format!("Failed to clear schema_version: {}", e)))?;

    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )
    .map_err(|e| schema_error(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

/// Create the initial schema (version 1).
///
/// Dates are stored as `YYYY-MM-DD` text and timestamps as RFC 3339 text, so
/// lexical ordering matches chronological ordering.
fn create_schema_v1(conn: &Connection) -> StorageResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS audios (
            uuid TEXT PRIMARY KEY,
            \"group\" TEXT NOT NULL,
            song TEXT NOT NULL,
            release_date TEXT NOT NULL,
            link TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| schema_error(format!("Failed to create audios table: {}", e)))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS lyrics (
            uuid TEXT PRIMARY KEY,
            audio_uuid TEXT NOT NULL,
            \"order\" INTEGER NOT NULL,
            text TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (audio_uuid) REFERENCES audios(uuid) ON DELETE CASCADE
        )",
        [],
    )
    .map_err(|e| schema_error(format!("Failed to create lyrics table: {}", e)))?;

    create_indexes(conn)
}

/// Create indexes for efficient queries.
fn create_indexes(conn: &Connection) -> StorageResult<()> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_audios_group ON audios(\"group\")",
        "CREATE INDEX IF NOT EXISTS idx_audios_release_date ON audios(release_date)",
        "CREATE INDEX IF NOT EXISTS idx_audios_created ON audios(created_at, uuid)",
        // One segment per position within an audio
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_lyrics_audio_order ON lyrics(audio_uuid, \"order\")",
    ];

    for index_sql in &indexes {
        conn.execute(index_sql, [])
            .map_err(|e| schema_error(format!("Failed to create index: {}", e)))?;
    }

    Ok(())
}

/// Migration steps; entry `n` moves the schema from version `n + 1` to `n + 2`.
const MIGRATIONS: &[fn(&Connection) -> StorageResult<()>] = &[];

/// Run migrations from `from_version` up to [`SCHEMA_VERSION`].
fn migrate_schema(conn: &Connection, from_version: i32) -> StorageResult<()> {
    for version in from_version..SCHEMA_VERSION {
        let step = usize::try_from(version - 1)
            .ok()
            .and_then(|index| MIGRATIONS.get(index))
            .ok_or_else(|| schema_error(format!("Unknown schema version: {}", version)))?;
        step(conn)?;
        set_schema_version(conn, version + 1)?;
    }

    Ok(())
}
