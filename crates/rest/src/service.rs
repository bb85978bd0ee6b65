//! Catalog service: orchestration and time budgets above the storage layer.
//!
//! Every operation runs under a deadline. Creation gets
//! [`CREATE_TIMEOUT`] to cover both the metadata lookup and the insert;
//! everything else gets [`OPERATION_TIMEOUT`]. An elapsed deadline surfaces
//! as [`TransactionError::Timeout`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use songbook_persistence::core::CatalogStorage;
use songbook_persistence::error::{StorageError, TransactionError};
use songbook_persistence::types::{
    Audio, AudioCreate, AudioFilter, AudioUpdate, AudioWithLyrics, Lyric, NewAudio, Pagination,
    segment_lyrics,
};
use thiserror::Error;
use tracing::{debug, error};
use uuid::Uuid;

use crate::metadata::{MetadataClient, MetadataError};

/// Budget for a create, metadata lookup included.
pub const CREATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Budget for every other operation.
pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors returned by [`CatalogService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Metadata lookup failed.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Storage failed, matched nothing, or ran out of time.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// Returns true when the operation matched no rows.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Storage(e) if e.is_not_found())
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Storage plus metadata lookup, with per-operation deadlines.
pub struct CatalogService<S> {
    storage: Arc<S>,
    metadata: Arc<dyn MetadataClient>,
    create_timeout: Duration,
    operation_timeout: Duration,
}

impl<S> Clone for CatalogService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            metadata: Arc::clone(&self.metadata),
            create_timeout: self.create_timeout,
            operation_timeout: self.operation_timeout,
        }
    }
}

async fn within<T, F>(budget: Duration, operation: F) -> ServiceResult<T>
where
    F: Future<Output = ServiceResult<T>>,
{
    match tokio::time::timeout(budget, operation).await {
        Ok(result) => result,
        Err(_) => Err(StorageError::from(TransactionError::Timeout {
            timeout_ms: u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
        })
        .into()),
    }
}

fn log_failure<T>(result: &ServiceResult<T>, operation: &str) {
    match result {
        Err(e) if e.is_not_found() => debug!(operation, "No rows matched"),
        Err(e) => error!(operation, error = %e, "Catalog operation failed"),
        Ok(_) => {}
    }
}

impl<S: CatalogStorage> CatalogService<S> {
    /// Creates a service with the default deadlines.
    pub fn new(storage: Arc<S>, metadata: Arc<dyn MetadataClient>) -> Self {
        Self::with_timeouts(storage, metadata, CREATE_TIMEOUT, OPERATION_TIMEOUT)
    }

    /// Creates a service with custom deadlines.
    pub fn with_timeouts(
        storage: Arc<S>,
        metadata: Arc<dyn MetadataClient>,
        create_timeout: Duration,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            storage,
            metadata,
            create_timeout,
            operation_timeout,
        }
    }

    /// Returns the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Looks up metadata for the pair, segments the lyrics and stores the
    /// audio together with every segment.
    pub async fn create(&self, audio: AudioCreate) -> ServiceResult<Uuid> {
        let result = within(self.create_timeout, async {
            let info = self.metadata.lookup(&audio.group, &audio.song).await?;
            let new_audio = NewAudio {
                group: audio.group,
                song: audio.song,
                release_date: info.release_date,
                link: info.link,
                lyrics: segment_lyrics(&info.text),
            };
            Ok(self.storage.create_with_lyrics(new_audio).await?)
        })
        .await;
        log_failure(&result, "create audio");
        result
    }

    /// Finds one audio.
    pub async fn find(&self, id: Uuid) -> ServiceResult<Audio> {
        let result = within(self.operation_timeout, async {
            Ok(self.storage.find(id).await?)
        })
        .await;
        log_failure(&result, "find audio");
        result
    }

    /// Finds one audio with its lyrics.
    pub async fn find_with_lyrics(&self, id: Uuid) -> ServiceResult<AudioWithLyrics> {
        let result = within(self.operation_timeout, async {
            Ok(self.storage.find_with_lyrics(id).await?)
        })
        .await;
        log_failure(&result, "find audio with lyrics");
        result
    }

    /// Lists a page of audios, filtered when a filter is given.
    pub async fn list(
        &self,
        filter: Option<&AudioFilter>,
        pagination: Pagination,
    ) -> ServiceResult<Vec<Audio>> {
        let result = within(self.operation_timeout, async {
            let audios = match filter {
                Some(filter) => self.storage.list_by_filter(filter, pagination).await?,
                None => self.storage.list(pagination).await?,
            };
            Ok(audios)
        })
        .await;
        log_failure(&result, "list audios");
        result
    }

    /// Applies a partial update, replacing the lyrics when they are present.
    pub async fn update(&self, id: Uuid, update: &AudioUpdate) -> ServiceResult<Audio> {
        let result = within(self.operation_timeout, async {
            Ok(self.storage.update(id, update).await?)
        })
        .await;
        log_failure(&result, "update audio");
        result
    }

    /// Deletes an audio and its lyrics.
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let result = within(self.operation_timeout, async {
            Ok(self.storage.delete(id).await?)
        })
        .await;
        log_failure(&result, "delete audio");
        result
    }

    /// Lists a page of an audio's lyrics.
    pub async fn list_lyrics(&self, id: Uuid, pagination: Pagination) -> ServiceResult<Vec<Lyric>> {
        let result = within(self.operation_timeout, async {
            Ok(self.storage.list_by_audio(id, pagination).await?)
        })
        .await;
        log_failure(&result, "list lyrics");
        result
    }

    /// Checks that storage is reachable.
    pub async fn health_check(&self) -> ServiceResult<()> {
        within(self.operation_timeout, async {
            self.storage
                .health_check()
                .await
                .map_err(StorageError::from)?;
            Ok(())
        })
        .await
    }
}
