//! Lyrics text segmentation.

use super::audio::NewLyric;

/// Separator between lyric segments: one blank line.
pub const SEGMENT_SEPARATOR: &str = "\n\n";

/// Splits lyrics text into ordered segments on blank lines.
///
/// Segments are numbered from 0 in order of appearance. Nothing is trimmed and
/// empty segments between consecutive separators are kept.
pub fn segment_lyrics(text: &str) -> Vec<NewLyric> {
    text.split(SEGMENT_SEPARATOR)
        .enumerate()
        .map(|(order, segment)| NewLyric::new(order as i32, segment))
        .collect()
}
