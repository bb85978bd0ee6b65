//! Audio and lyric models.
//!
//! Read models ([`Audio`], [`AudioWithLyrics`], [`Lyric`]) are what the
//! backends return. Write models ([`NewAudio`], [`NewLyric`]) are what the
//! create path hands to a backend once external metadata has been merged in.

// Model fields mirror their column and wire names
#![allow(missing_docs)]

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ValidationDetail, ValidationError, ValidationResult};

/// A stored audio row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audio {
    pub uuid: Uuid,
    pub group: String,
    pub song: String,
    pub release_date: NaiveDate,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An audio row together with its full, ordered lyric set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioWithLyrics {
    #[serde(flatten)]
    pub audio: Audio,
    pub lyrics: Vec<Lyric>,
}

/// A stored lyric segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lyric {
    pub uuid: Uuid,
    pub audio_uuid: Uuid,
    pub order: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create body: the pair used to look up the rest of the metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioCreateRequest {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub song: String,
}

/// A validated create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCreate {
    pub group: String,
    pub song: String,
}

impl AudioCreateRequest {
    /// Validates that both group and song are non-empty.
    pub fn validate(self) -> ValidationResult<AudioCreate> {
        let mut details = Vec::new();
        if self.group.is_empty() {
            details.push(ValidationDetail::new(
                "group",
                "'group' is required and cannot be empty",
            ));
        }
        if self.song.is_empty() {
            details.push(ValidationDetail::new(
                "song",
                "'song' is required and cannot be empty",
            ));
        }
        if !details.is_empty() {
            return Err(ValidationError::InvalidFields { details });
        }

        Ok(AudioCreate {
            group: self.group,
            song: self.song,
        })
    }
}

/// A fully-populated audio ready to be inserted with its lyrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAudio {
    pub group: String,
    pub song: String,
    pub release_date: NaiveDate,
    pub link: String,
    pub lyrics: Vec<NewLyric>,
}

/// A lyric segment to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLyric {
    pub order: i32,
    pub text: String,
}

impl NewLyric {
    /// Creates a segment at the given position.
    pub fn new(order: i32, text: impl Into<String>) -> Self {
        Self {
            order,
            text: text.into(),
        }
    }
}
