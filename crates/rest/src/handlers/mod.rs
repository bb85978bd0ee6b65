//! HTTP request handlers.
//!
//! - [`audio`] - Create, list, read, update and delete audios
//! - [`lyrics`] - Paged lyric listing for one audio
//! - [`health`] - Health check endpoint

pub mod audio;
pub mod health;
pub mod lyrics;

pub use audio::{create_handler, delete_handler, find_handler, list_handler, update_handler};
pub use health::health_handler;
pub use lyrics::list_lyrics_handler;
