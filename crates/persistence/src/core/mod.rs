//! Core storage traits and abstractions.
//!
//! - [`Backend`] - Database driver abstraction
//! - [`AudioStorage`] - Transactional audio + lyrics aggregate operations
//! - [`LyricStorage`] - Paged lyric reads
//! - [`CatalogStorage`] - Everything above, as one bound

mod backend;
mod storage;

pub use backend::{Backend, BackendKind};
pub use storage::{AudioStorage, CatalogStorage, LyricStorage};
