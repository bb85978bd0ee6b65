//! Partial audio updates.

// Model fields mirror their column and wire names
#![allow(missing_docs)]

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{ValidationDetail, ValidationError, ValidationResult};

use super::audio::NewLyric;
use super::field::Field;
use super::segment::segment_lyrics;

/// Raw update body. Every field is optional; omitted fields stay untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioUpdateRequest {
    pub group: Option<String>,
    pub song: Option<String>,
    pub release_date: Option<String>,
    pub link: Option<String>,
    pub lyrics: Option<String>,
}

/// A validated partial update with at least one field present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioUpdate {
    pub group: Option<String>,
    pub song: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub link: Option<String>,
    /// Raw lyrics text; when present the whole lyric set is replaced.
    pub lyrics: Option<String>,
}

impl AudioUpdateRequest {
    /// Validates the body, collecting every field-level problem.
    pub fn validate(self) -> ValidationResult<AudioUpdate> {
        let group = Field::from_body(self.group, "group cannot be empty");
        let song = Field::from_body(self.song, "song cannot be empty");
        let release_date = Field::from_body(
            self.release_date,
            "invalid date format, example: 2006-09-25",
        )
        .parse_date("invalid date format, example: 2006-09-25");
        let link = Field::from_body(self.link, "link cannot be empty");
        let lyrics = Field::from_body(self.lyrics, "lyrics cannot be empty");

        let details: Vec<ValidationDetail> = [
            ("group", group.error()),
            ("song", song.error()),
            ("release_date", release_date.error()),
            ("link", link.error()),
            ("lyrics", lyrics.error()),
        ]
        .into_iter()
        .filter_map(|(field, error)| error.map(|message| ValidationDetail::new(field, message)))
        .collect();

        if !details.is_empty() {
            return Err(ValidationError::InvalidFields { details });
        }

        let update = AudioUpdate {
            group: group.into_value(),
            song: song.into_value(),
            release_date: release_date.into_value(),
            link: link.into_value(),
            lyrics: lyrics.into_value(),
        };

        if !update.has_columns() && update.lyrics.is_none() {
            return Err(ValidationError::EmptyUpdate);
        }

        Ok(update)
    }
}

impl AudioUpdate {
    /// Returns true when any audio column (not lyrics) is set.
    pub fn has_columns(&self) -> bool {
        self.group.is_some()
            || self.song.is_some()
            || self.release_date.is_some()
            || self.link.is_some()
    }

    /// Returns the segmented replacement lyrics, if lyrics text was supplied.
    pub fn replacement_lyrics(&self) -> Option<Vec<NewLyric>> {
        self.lyrics.as_deref().map(segment_lyrics)
    }
}
