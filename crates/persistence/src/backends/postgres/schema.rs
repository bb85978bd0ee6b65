//! PostgreSQL schema definitions and migrations.

use crate::error::{BackendError, StorageError, StorageResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema.
pub async fn initialize_schema(client: &deadpool_postgres::Client) -> StorageResult<()> {
    let current_version = get_schema_version(client).await?;

    if current_version == 0 {
        create_schema_v1(client).await?;
        set_schema_version(client, 1).await?;
        migrate_schema(1)?;
    } else if current_version < SCHEMA_VERSION {
        migrate_schema(current_version)?;
    }

    Ok(())
}

/// Get the current schema version.
async fn get_schema_version(client: &deadpool_postgres::Client) -> StorageResult<i32> {
    client
        .execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER NOT NULL
            )",
            &[],
        )
        .await
        .map_err(|e| pg_error(format!("Failed to create schema_version table: {}", e)))?;

    let row = client
        .query_opt("SELECT version FROM schema_version LIMIT 1", &[])
        .await
        .map_err(|e| pg_error(format!("Failed to query schema version: {}", e)))?;

    Ok(row.map(|r| r.get::<_, i32>(0)).unwrap_or(0))
}

/// Set the schema version.
async fn set_schema_version(client: &deadpool_postgres::Client, version: i32) -> StorageResult<()> {
    client
        .execute("DELETE FROM schema_version", &[])
        .await
        .map_err(|e| pg_error(format!("Failed to clear schema_version: {}", e)))?;

    client
        .execute(
            "INSERT INTO schema_version (version) VALUES ($1)",
            &[&version],
        )
        .await
        .map_err(|e| pg_error(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

/// Create the initial schema (version 1).
async fn create_schema_v1(client: &deadpool_postgres::Client) -> StorageResult<()> {
    client
        .execute(
            "CREATE TABLE IF NOT EXISTS audios (
                uuid UUID PRIMARY KEY,
                \"group\" TEXT NOT NULL,
                song TEXT NOT NULL,
                release_date DATE NOT NULL,
                link TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )",
            &[],
        )
        .await
        .map_err(|e| pg_error(format!("Failed to create audios table: {}", e)))?;

    client
        .execute(
            "CREATE TABLE IF NOT EXISTS lyrics (
                uuid UUID PRIMARY KEY,
                audio_uuid UUID NOT NULL REFERENCES audios(uuid) ON DELETE CASCADE,
                \"order\" INTEGER NOT NULL,
                text TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )",
            &[],
        )
        .await
        .map_err(|e| pg_error(format!("Failed to create lyrics table: {}", e)))?;

    create_indexes(client).await
}

/// Create indexes for efficient queries.
async fn create_indexes(client: &deadpool_postgres::Client) -> StorageResult<()> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_audios_group ON audios(\"group\")",
        "CREATE INDEX IF NOT EXISTS idx_audios_release_date ON audios(release_date)",
        "CREATE INDEX IF NOT EXISTS idx_audios_created ON audios(created_at, uuid)",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_lyrics_audio_order ON lyrics(audio_uuid, \"order\")",
        // Phrase search
        "CREATE INDEX IF NOT EXISTS idx_audios_song_fts ON audios USING GIN (to_tsvector('english', song))",
        "CREATE INDEX IF NOT EXISTS idx_lyrics_text_fts ON lyrics USING GIN (to_tsvector('english', text))",
    ];

    for index_sql in &indexes {
        client
            .execute(*index_sql, &[])
            .await
            .map_err(|e| pg_error(format!("Failed to create index: {}", e)))?;
    }

    Ok(())
}

/// Run migrations from `from_version` up to [`SCHEMA_VERSION`].
fn migrate_schema(from_version: i32) -> StorageResult<()> {
    // Version 1 is the only schema so far.
    if from_version == SCHEMA_VERSION {
        return Ok(());
    }

    Err(StorageError::Backend(BackendError::MigrationError {
        message: format!("Unknown schema version: {}", from_version),
    }))
}

fn pg_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "postgres".to_string(),
        message,
        source: None,
    })
}
