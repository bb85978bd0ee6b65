//! Core types for the persistence layer.
//!
//! - [`Pagination`] - normalized offset/limit
//! - [`Field`] - tri-state request field used during validation
//! - [`AudioFilter`], [`AudioUpdate`], [`AudioCreate`] - validated request DTOs
//! - [`Audio`], [`AudioWithLyrics`], [`Lyric`] - read models
//! - [`NewAudio`], [`NewLyric`] - write models
//! - [`segment_lyrics`] - blank-line lyrics segmentation
//!
//! # Example
//!
//! ```
//! use songbook_persistence::types::{AudioFilterRequest, Pagination};
//!
//! let filter = AudioFilterRequest {
//!     group: Some("Muse".to_string()),
//!     ..Default::default()
//! }
//! .validate()
//! .unwrap()
//! .expect("one field present");
//! assert_eq!(filter.present_count(), 1);
//!
//! let page = Pagination::from_raw(Some("0"), Some("5"), 10);
//! assert_eq!(page.next_page(), Pagination::new(5, 5));
//! ```

mod audio;
mod field;
mod filter;
mod pagination;
mod segment;
mod update;

pub use audio::{
    Audio, AudioCreate, AudioCreateRequest, AudioWithLyrics, Lyric, NewAudio, NewLyric,
};
pub use field::{Field, REQUEST_DATE_FORMAT};
pub use filter::{AudioFilter, AudioFilterRequest};
pub use pagination::{FIRST_FILTER_SLOT, LIMIT_SLOT, OFFSET_SLOT, Pagination};
pub use segment::{SEGMENT_SEPARATOR, segment_lyrics};
pub use update::{AudioUpdate, AudioUpdateRequest};
