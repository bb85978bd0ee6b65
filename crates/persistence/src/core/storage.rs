//! Catalog storage traits.
//!
//! [`AudioStorage`] owns the audio aggregate: an audio row and its ordered
//! lyric segments are always written together inside one transaction.
//! [`LyricStorage`] is the read side for lyrics on their own.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StorageResult;
use crate::types::{
    Audio, AudioFilter, AudioUpdate, AudioWithLyrics, Lyric, NewAudio, Pagination,
};

use super::backend::Backend;

/// Storage for audios and their lyrics as one aggregate.
///
/// # Example
///
/// ```ignore
/// use songbook_persistence::core::AudioStorage;
/// use songbook_persistence::types::{AudioUpdateRequest, Pagination};
///
/// async fn example<S: AudioStorage>(storage: &S, audio: NewAudio) -> StorageResult<()> {
///     let id = storage.create_with_lyrics(audio).await?;
///
///     let update = AudioUpdateRequest {
///         lyrics: Some("verse\n\nchorus".to_string()),
///         ..Default::default()
///     }
///     .validate()?;
///     storage.update(id, &update).await?;
///
///     let full = storage.find_with_lyrics(id).await?;
///     assert_eq!(full.lyrics.len(), 2);
///
///     storage.delete(id).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait AudioStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Inserts an audio and all of its lyrics atomically.
    ///
    /// Returns the generated audio uuid. If any lyric insert fails the audio
    /// row is not persisted either.
    async fn create_with_lyrics(&self, audio: NewAudio) -> StorageResult<Uuid>;

    /// Applies a partial update.
    ///
    /// When the update carries lyrics, the existing lyric set is deleted and
    /// replaced in the same transaction as the column update.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If no audio has this uuid
    async fn update(&self, id: Uuid, update: &AudioUpdate) -> StorageResult<Audio>;

    /// Deletes an audio; its lyrics go with it.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If no row was deleted
    async fn delete(&self, id: Uuid) -> StorageResult<()>;

    /// Reads one audio.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If no audio has this uuid
    async fn find(&self, id: Uuid) -> StorageResult<Audio>;

    /// Reads one audio with its lyrics in segment order.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If no audio has this uuid
    async fn find_with_lyrics(&self, id: Uuid) -> StorageResult<AudioWithLyrics>;

    /// Lists a page of audios. An empty page is not an error.
    async fn list(&self, pagination: Pagination) -> StorageResult<Vec<Audio>>;

    /// Lists a page of audios matching every present filter predicate.
    async fn list_by_filter(
        &self,
        filter: &AudioFilter,
        pagination: Pagination,
    ) -> StorageResult<Vec<Audio>>;
}

/// Read access to lyric segments.
#[async_trait]
pub trait LyricStorage: Send + Sync {
    /// Lists a page of an audio's lyrics in segment order.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If the page is empty
    async fn list_by_audio(&self, audio_id: Uuid, pagination: Pagination)
    -> StorageResult<Vec<Lyric>>;
}

/// Everything the HTTP layer needs from a backend.
pub trait CatalogStorage: AudioStorage + LyricStorage + Backend {}

impl<T> CatalogStorage for T where T: AudioStorage + LyricStorage + Backend {}
