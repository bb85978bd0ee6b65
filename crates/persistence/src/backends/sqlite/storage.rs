//! AudioStorage and LyricStorage implementations for SQLite.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, ToSql};
use uuid::Uuid;

use crate::core::{AudioStorage, LyricStorage};
use crate::error::{ResourceError, StorageError, StorageResult};
use crate::query::{
    Dialect, SqlFragment, SqlParam, UpdateBuilder, audio_insert, delete_audio, delete_lyrics,
    find_audio, list_audios_query, list_lyrics, lyrics_for_audio, lyrics_insert,
};
use crate::types::{
    Audio, AudioFilter, AudioUpdate, AudioWithLyrics, Lyric, NewAudio, Pagination,
};

use super::SqliteBackend;
use super::transaction::SqliteTransaction;

const DIALECT: Dialect = Dialect::Sqlite;

/// Storage format of `release_date`.
const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts parameters to rusqlite values. Dates and uuids are stored as text.
pub(crate) fn bind_params(params: &[SqlParam]) -> Vec<Box<dyn ToSql>> {
    params
        .iter()
        .map(|param| -> Box<dyn ToSql> {
            match param {
                SqlParam::Text(s) => Box::new(s.clone()),
                SqlParam::Int(i) => Box::new(*i),
                SqlParam::BigInt(i) => Box::new(*i),
                SqlParam::Date(d) => Box::new(d.format(STORED_DATE_FORMAT).to_string()),
                SqlParam::Uuid(u) => Box::new(u.to_string()),
            }
        })
        .collect()
}

pub(crate) fn execute(conn: &Connection, fragment: &SqlFragment) -> StorageResult<usize> {
    let bound = bind_params(&fragment.params);
    let refs: Vec<&dyn ToSql> = bound.iter().map(|p| p.as_ref()).collect();
    Ok(conn.execute(&fragment.sql, refs.as_slice())?)
}

pub(crate) fn query_optional<T, F>(
    conn: &Connection,
    fragment: &SqlFragment,
    map: F,
) -> StorageResult<Option<T>>
where
    F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
{
    let bound = bind_params(&fragment.params);
    let refs: Vec<&dyn ToSql> = bound.iter().map(|p| p.as_ref()).collect();
    Ok(conn.query_row(&fragment.sql, refs.as_slice(), map).optional()?)
}

fn query_all<T, F>(conn: &Connection, fragment: &SqlFragment, map: F) -> StorageResult<Vec<T>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let bound = bind_params(&fragment.params);
    let refs: Vec<&dyn ToSql> = bound.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&fragment.sql)?;
    let rows = stmt.query_map(refs.as_slice(), map)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(StorageError::from)
}

fn conversion_error<E>(index: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
}

fn uuid_column(row: &Row<'_>, index: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(index)?;
    Uuid::parse_str(&raw).map_err(|e| conversion_error(index, e))
}

fn date_column(row: &Row<'_>, index: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(index)?;
    NaiveDate::parse_from_str(&raw, STORED_DATE_FORMAT).map_err(|e| conversion_error(index, e))
}

fn timestamp_column(row: &Row<'_>, index: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(index)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| conversion_error(index, e))
}

/// Maps a row selected with `AUDIO_COLUMNS` (or the update's RETURNING list).
fn audio_from_row(row: &Row<'_>) -> rusqlite::Result<Audio> {
    Ok(Audio {
        uuid: uuid_column(row, 0)?,
        group: row.get(1)?,
        song: row.get(2)?,
        release_date: date_column(row, 3)?,
        link: row.get(4)?,
        created_at: timestamp_column(row, 5)?,
        updated_at: timestamp_column(row, 6)?,
    })
}

/// Maps a row selected with `LYRIC_COLUMNS`.
fn lyric_from_row(row: &Row<'_>) -> rusqlite::Result<Lyric> {
    Ok(Lyric {
        uuid: uuid_column(row, 0)?,
        audio_uuid: uuid_column(row, 1)?,
        order: row.get(2)?,
        text: row.get(3)?,
        created_at: timestamp_column(row, 4)?,
        updated_at: timestamp_column(row, 5)?,
    })
}

fn by_audio(sql: String, id: Uuid) -> SqlFragment {
    SqlFragment::with_params(sql, vec![SqlParam::Uuid(id)])
}

#[async_trait]
impl AudioStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create_with_lyrics(&self, audio: NewAudio) -> StorageResult<Uuid> {
        let id = Uuid::new_v4();
        let insert_audio = audio_insert(id, &audio, DIALECT);
        let insert_lyrics = lyrics_insert(id, &audio.lyrics, DIALECT);

        self.with_connection(move |conn| {
            let tx = SqliteTransaction::begin(conn)?;
            tx.execute(&insert_audio)?;
            for batch in &insert_lyrics {
                tx.execute(batch)?;
            }
            tx.commit()
        })
        .await?;

        tracing::debug!(audio = %id, lyrics = audio.lyrics.len(), "Created audio");
        Ok(id)
    }

    async fn update(&self, id: Uuid, update: &AudioUpdate) -> StorageResult<Audio> {
        let stmt = UpdateBuilder::build(update, id, DIALECT);
        let replacement = update
            .replacement_lyrics()
            .map(|lyrics| (lyrics.len(), lyrics_insert(id, &lyrics, DIALECT)));

        self.with_connection(move |conn| {
            let tx = SqliteTransaction::begin(conn)?;

            let audio = tx
                .query_optional(&stmt, audio_from_row)?
                .ok_or_else(|| ResourceError::audio_not_found(id))?;

            if let Some((inserted, batches)) = &replacement {
                let removed = tx.execute(&by_audio(delete_lyrics(DIALECT), id))?;
                for batch in batches {
                    tx.execute(batch)?;
                }
                tracing::debug!(audio = %id, removed, inserted = *inserted, "Replaced lyrics");
            }

            tx.commit()?;
            Ok(audio)
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        let affected = self
            .with_connection(move |conn| execute(conn, &by_audio(delete_audio(DIALECT), id)))
            .await?;

        if affected == 0 {
            return Err(ResourceError::audio_not_found(id).into());
        }

        tracing::debug!(audio = %id, "Deleted audio");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> StorageResult<Audio> {
        self.with_connection(move |conn| {
            query_optional(conn, &by_audio(find_audio(DIALECT), id), audio_from_row)?
                .ok_or_else(|| ResourceError::audio_not_found(id).into())
        })
        .await
    }

    async fn find_with_lyrics(&self, id: Uuid) -> StorageResult<AudioWithLyrics> {
        self.with_connection(move |conn| {
            let audio = query_optional(conn, &by_audio(find_audio(DIALECT), id), audio_from_row)?
                .ok_or_else(|| ResourceError::audio_not_found(id))?;
            let lyrics = query_all(
                conn,
                &by_audio(lyrics_for_audio(DIALECT), id),
                lyric_from_row,
            )?;

            Ok(AudioWithLyrics { audio, lyrics })
        })
        .await
    }

    async fn list(&self, pagination: Pagination) -> StorageResult<Vec<Audio>> {
        let stmt = list_audios_query(None, pagination, DIALECT);
        self.with_connection(move |conn| query_all(conn, &stmt, audio_from_row))
            .await
    }

    async fn list_by_filter(
        &self,
        filter: &AudioFilter,
        pagination: Pagination,
    ) -> StorageResult<Vec<Audio>> {
        if filter.is_empty() {
            return self.list(pagination).await;
        }

        let stmt = list_audios_query(Some(filter), pagination, DIALECT);
        tracing::debug!(sql = %stmt.sql, predicates = filter.present_count(), "Filtered listing");
        self.with_connection(move |conn| query_all(conn, &stmt, audio_from_row))
            .await
    }
}

#[async_trait]
impl LyricStorage for SqliteBackend {
    async fn list_by_audio(
        &self,
        audio_id: Uuid,
        pagination: Pagination,
    ) -> StorageResult<Vec<Lyric>> {
        let stmt = SqlFragment::with_params(
            list_lyrics(DIALECT),
            vec![
                SqlParam::Uuid(audio_id),
                SqlParam::BigInt(pagination.limit_param()),
                SqlParam::BigInt(pagination.offset_param()),
            ],
        );
        let lyrics = self
            .with_connection(move |conn| query_all(conn, &stmt, lyric_from_row))
            .await?;

        if lyrics.is_empty() {
            return Err(ResourceError::lyrics_not_found(audio_id).into());
        }

        Ok(lyrics)
    }
}
