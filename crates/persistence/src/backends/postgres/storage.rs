//! AudioStorage and LyricStorage implementations for PostgreSQL.

use async_trait::async_trait;
use tokio_postgres::types::ToSql;
use tokio_postgres::{GenericClient, Row};
use uuid::Uuid;

use crate::core::{AudioStorage, LyricStorage};
use crate::error::{ResourceError, StorageResult};
use crate::query::{
    Dialect, SqlFragment, SqlParam, UpdateBuilder, audio_insert, delete_audio, delete_lyrics,
    find_audio, list_audios_query, list_lyrics, lyrics_for_audio, lyrics_insert,
};
use crate::types::{
    Audio, AudioFilter, AudioUpdate, AudioWithLyrics, Lyric, NewAudio, Pagination,
};

use super::PostgresBackend;

const DIALECT: Dialect = Dialect::Postgres;

type PgParam = Box<dyn ToSql + Sync + Send>;

/// Converts parameters to values whose wire types match the column types.
fn bind_params(params: &[SqlParam]) -> Vec<PgParam> {
    params
        .iter()
        .map(|param| -> PgParam {
            match param {
                SqlParam::Text(s) => Box::new(s.clone()),
                SqlParam::Int(i) => Box::new(*i),
                SqlParam::BigInt(i) => Box::new(*i),
                SqlParam::Date(d) => Box::new(*d),
                SqlParam::Uuid(u) => Box::new(*u),
            }
        })
        .collect()
}

fn param_refs(bound: &[PgParam]) -> Vec<&(dyn ToSql + Sync)> {
    bound
        .iter()
        .map(|p| p.as_ref() as &(dyn ToSql + Sync))
        .collect()
}

async fn execute<C: GenericClient>(client: &C, fragment: &SqlFragment) -> StorageResult<u64> {
    let bound = bind_params(&fragment.params);
    Ok(client
        .execute(fragment.sql.as_str(), &param_refs(&bound))
        .await?)
}

async fn query_opt<C: GenericClient>(
    client: &C,
    fragment: &SqlFragment,
) -> StorageResult<Option<Row>> {
    let bound = bind_params(&fragment.params);
    Ok(client
        .query_opt(fragment.sql.as_str(), &param_refs(&bound))
        .await?)
}

async fn query<C: GenericClient>(client: &C, fragment: &SqlFragment) -> StorageResult<Vec<Row>> {
    let bound = bind_params(&fragment.params);
    Ok(client
        .query(fragment.sql.as_str(), &param_refs(&bound))
        .await?)
}

/// Maps a row selected with `AUDIO_COLUMNS` (or the update's RETURNING list).
fn audio_from_row(row: &Row) -> StorageResult<Audio> {
    Ok(Audio {
        uuid: row.try_get(0)?,
        group: row.try_get(1)?,
        song: row.try_get(2)?,
        release_date: row.try_get(3)?,
        link: row.try_get(4)?,
        created_at: row.try_get(5)?,
        updated_at: row.try_get(6)?,
    })
}

/// Maps a row selected with `LYRIC_COLUMNS`.
fn lyric_from_row(row: &Row) -> StorageResult<Lyric> {
    Ok(Lyric {
        uuid: row.try_get(0)?,
        audio_uuid: row.try_get(1)?,
        order: row.try_get(2)?,
        text: row.try_get(3)?,
        created_at: row.try_get(4)?,
        updated_at: row.try_get(5)?,
    })
}

fn by_audio(sql: String, id: Uuid) -> SqlFragment {
    SqlFragment::with_params(sql, vec![SqlParam::Uuid(id)])
}

#[async_trait]
impl AudioStorage for PostgresBackend {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn create_with_lyrics(&self, audio: NewAudio) -> StorageResult<Uuid> {
        let id = Uuid::new_v4();
        let mut client = self.get_client().await?;
        let tx = client.transaction().await?;

        execute(&*tx, &audio_insert(id, &audio, DIALECT)).await?;
        for batch in lyrics_insert(id, &audio.lyrics, DIALECT) {
            execute(&*tx, &batch).await?;
        }

        tx.commit().await?;
        tracing::debug!(audio = %id, lyrics = audio.lyrics.len(), "Created audio");
        Ok(id)
    }

    async fn update(&self, id: Uuid, update: &AudioUpdate) -> StorageResult<Audio> {
        let mut client = self.get_client().await?;
        let tx = client.transaction().await?;

        let stmt = UpdateBuilder::build(update, id, DIALECT);
        let row = query_opt(&*tx, &stmt)
            .await?
            .ok_or_else(|| ResourceError::audio_not_found(id))?;
        let audio = audio_from_row(&row)?;

        if let Some(lyrics) = update.replacement_lyrics() {
            let removed = execute(&*tx, &by_audio(delete_lyrics(DIALECT), id)).await?;
            for batch in lyrics_insert(id, &lyrics, DIALECT) {
                execute(&*tx, &batch).await?;
            }
            tracing::debug!(audio = %id, removed, inserted = lyrics.len(), "Replaced lyrics");
        }

        tx.commit().await?;
        Ok(audio)
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        let client = self.get_client().await?;
        let affected = execute(&**client, &by_audio(delete_audio(DIALECT), id)).await?;

        if affected == 0 {
            return Err(ResourceError::audio_not_found(id).into());
        }

        tracing::debug!(audio = %id, "Deleted audio");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> StorageResult<Audio> {
        let client = self.get_client().await?;
        let row = query_opt(&**client, &by_audio(find_audio(DIALECT), id))
            .await?
            .ok_or_else(|| ResourceError::audio_not_found(id))?;
        audio_from_row(&row)
    }

    async fn find_with_lyrics(&self, id: Uuid) -> StorageResult<AudioWithLyrics> {
        let client = self.get_client().await?;
        let row = query_opt(&**client, &by_audio(find_audio(DIALECT), id))
            .await?
            .ok_or_else(|| ResourceError::audio_not_found(id))?;
        let audio = audio_from_row(&row)?;

        let lyrics = query(&**client, &by_audio(lyrics_for_audio(DIALECT), id))
            .await?
            .iter()
            .map(lyric_from_row)
            .collect::<StorageResult<Vec<_>>>()?;

        Ok(AudioWithLyrics { audio, lyrics })
    }

    async fn list(&self, pagination: Pagination) -> StorageResult<Vec<Audio>> {
        let client = self.get_client().await?;
        query(&**client, &list_audios_query(None, pagination, DIALECT))
            .await?
            .iter()
            .map(audio_from_row)
            .collect()
    }

    async fn list_by_filter(
        &self,
        filter: &AudioFilter,
        pagination: Pagination,
    ) -> StorageResult<Vec<Audio>> {
        if filter.is_empty() {
            return self.list(pagination).await;
        }

        let client = self.get_client().await?;
        let stmt = list_audios_query(Some(filter), pagination, DIALECT);
        tracing::debug!(sql = %stmt.sql, predicates = filter.present_count(), "Filtered listing");
        query(&**client, &stmt)
            .await?
            .iter()
            .map(audio_from_row)
            .collect()
    }
}

#[async_trait]
impl LyricStorage for PostgresBackend {
    async fn list_by_audio(
        &self,
        audio_id: Uuid,
        pagination: Pagination,
    ) -> StorageResult<Vec<Lyric>> {
        let client = self.get_client().await?;
        let stmt = SqlFragment::with_params(
            list_lyrics(DIALECT),
            vec![
                SqlParam::Uuid(audio_id),
                SqlParam::BigInt(pagination.limit_param()),
                SqlParam::BigInt(pagination.offset_param()),
            ],
        );
        let lyrics = query(&**client, &stmt)
            .await?
            .iter()
            .map(lyric_from_row)
            .collect::<StorageResult<Vec<_>>>()?;

        if lyrics.is_empty() {
            return Err(ResourceError::lyrics_not_found(audio_id).into());
        }

        Ok(lyrics)
    }
}
