//! Songbook Persistence Layer
//!
//! Stores audio records and their lyric segments as one aggregate: an audio
//! row and its ordered lyrics are always written in a single transaction.
//!
//! # Features
//!
//! - **Multiple Backends**: SQLite and PostgreSQL behind one set of traits
//! - **Filtered Listings**: exact, date-range and phrase predicates with offset pagination
//! - **Partial Updates**: only the supplied columns change; lyrics are replaced as a set
//! - **Transactions**: create and update are atomic across both tables
//!
//! # Backend Features
//!
//! Enable backends with feature flags in `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! songbook-persistence = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! Available backend features:
//! - `sqlite` (default) - SQLite with in-memory and file modes
//! - `postgres` - PostgreSQL with full-text phrase search
//!
//! # Architecture
//!
//! - [`types`] - Request DTOs, read/write models, pagination, lyrics segmentation
//! - [`query`] - SQL builders shared by the relational backends
//! - [`error`] - Error types for all operations
//! - [`core`] - Storage traits and abstractions
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```
//! use songbook_persistence::types::{AudioUpdateRequest, segment_lyrics};
//!
//! // Lyrics are split on blank lines and numbered from zero
//! let lyrics = segment_lyrics("verse\n\nchorus");
//! assert_eq!(lyrics.len(), 2);
//! assert_eq!(lyrics[1].order, 1);
//!
//! // A partial update needs at least one field
//! let update = AudioUpdateRequest {
//!     song: Some("Uprising".to_string()),
//!     ..Default::default()
//! }
//! .validate()
//! .unwrap();
//! assert!(update.has_columns());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod query;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{Audio, AudioFilter, AudioUpdate, AudioWithLyrics, Lyric, NewAudio, Pagination};

// Re-export core traits
pub use core::{AudioStorage, Backend, BackendKind, CatalogStorage, LyricStorage};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
