//! Audio listing filters.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{ValidationDetail, ValidationError, ValidationResult};

use super::field::Field;

/// Raw filter values as they arrive in a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioFilterRequest {
    /// Exact group name.
    pub group: Option<String>,
    /// Phrase searched in the song title.
    pub song: Option<String>,
    /// Inclusive lower release-date bound (`YYYY-MM-DD`).
    pub after: Option<String>,
    /// Inclusive upper release-date bound (`YYYY-MM-DD`).
    pub before: Option<String>,
    /// Exact external link.
    pub link: Option<String>,
    /// Phrase searched in the lyrics.
    pub lyric: Option<String>,
}

/// A validated filter with at least one predicate present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioFilter {
    /// Exact group name.
    pub group: Option<String>,
    /// Phrase matched against the song title.
    pub song: Option<String>,
    /// Inclusive lower release-date bound.
    pub released_after: Option<NaiveDate>,
    /// Inclusive upper release-date bound.
    pub released_before: Option<NaiveDate>,
    /// Exact external link.
    pub link: Option<String>,
    /// Phrase matched against lyric text.
    pub lyric: Option<String>,
}

impl AudioFilterRequest {
    /// Validates the raw values.
    ///
    /// Returns `Ok(None)` when no field is present, meaning "list everything".
    pub fn validate(self) -> ValidationResult<Option<AudioFilter>> {
        let group = Field::from_query(self.group);
        let song = Field::from_query(self.song);
        let after = Field::from_query(self.after)
            .parse_date("invalid after format, example: 2006-09-25");
        let before = Field::from_query(self.before)
            .parse_date("invalid before format, example: 2006-09-25");
        let link = Field::from_query(self.link);
        let lyric = Field::from_query(self.lyric);

        let details: Vec<ValidationDetail> = [("after", after.error()), ("before", before.error())]
            .into_iter()
            .filter_map(|(field, error)| error.map(|message| ValidationDetail::new(field, message)))
            .collect();
        if !details.is_empty() {
            return Err(ValidationError::InvalidFields { details });
        }

        let filter = AudioFilter {
            group: group.into_value(),
            song: song.into_value(),
            released_after: after.into_value(),
            released_before: before.into_value(),
            link: link.into_value(),
            lyric: lyric.into_value(),
        };

        if let (Some(after), Some(before)) = (filter.released_after, filter.released_before) {
            if after > before {
                return Err(ValidationError::InvertedDateRange);
            }
        }

        if filter.is_empty() {
            Ok(None)
        } else {
            Ok(Some(filter))
        }
    }
}

impl AudioFilter {
    /// Returns the number of present predicates.
    pub fn present_count(&self) -> usize {
        [
            self.group.is_some(),
            self.song.is_some(),
            self.released_after.is_some(),
            self.released_before.is_some(),
            self.link.is_some(),
            self.lyric.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Returns true when no predicate is present.
    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }

    /// Returns true when the filter needs the lyrics table.
    pub fn searches_lyrics(&self) -> bool {
        self.lyric.is_some()
    }
}
