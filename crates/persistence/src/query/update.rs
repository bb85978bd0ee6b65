//! Partial audio UPDATE construction.

use uuid::Uuid;

use crate::types::AudioUpdate;

use super::{Dialect, Placeholders, SqlFragment, SqlParam};

const RETURNING: &str = "RETURNING uuid, \"group\", song, release_date, link, created_at, updated_at";

/// Builds the UPDATE for the audio columns of an [`AudioUpdate`].
///
/// The uuid is always placeholder 1 and `updated_at` is always refreshed, so
/// a lyrics-only update still produces a valid statement that touches the row
/// and reports whether it exists. Present columns are assigned in the order
/// group, song, release date, link, taking placeholders from 2 upward.
pub struct UpdateBuilder;

impl UpdateBuilder {
    /// Builds the statement for `update` on audio `id`.
    pub fn build(update: &AudioUpdate, id: Uuid, dialect: Dialect) -> SqlFragment {
        let mut placeholders = Placeholders::starting_at(dialect, 2);
        let mut assignments = vec![format!("updated_at = {}", dialect.now())];
        let mut params = vec![SqlParam::Uuid(id)];

        if let Some(group) = &update.group {
            assignments.push(format!("\"group\" = {}", placeholders.next()));
            params.push(SqlParam::text(group));
        }
        if let Some(song) = &update.song {
            assignments.push(format!("song = {}", placeholders.next()));
            params.push(SqlParam::text(song));
        }
        if let Some(release_date) = update.release_date {
            assignments.push(format!("release_date = {}", placeholders.next()));
            params.push(SqlParam::Date(release_date));
        }
        if let Some(link) = &update.link {
            assignments.push(format!("link = {}", placeholders.next()));
            params.push(SqlParam::text(link));
        }

        let sql = format!(
            "UPDATE audios SET {} WHERE uuid = {} {}",
            assignments.join(", "),
            dialect.placeholder(1),
            RETURNING
        );

        SqlFragment::with_params(sql, params)
    }
}
