//! SQLite backend implementation.
//!
//! Supports both in-memory databases (great for testing) and file-based
//! databases (for development and small deployments).
//!
//! # Example
//!
//! ```no_run
//! use songbook_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create an in-memory database
//! let backend = SqliteBackend::in_memory()?;
//!
//! // Initialize the schema
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE audios (
//!     uuid TEXT PRIMARY KEY,
//!     "group" TEXT NOT NULL,
//!     song TEXT NOT NULL,
//!     release_date TEXT NOT NULL,   -- YYYY-MM-DD
//!     link TEXT NOT NULL,
//!     created_at TEXT NOT NULL,     -- RFC 3339, millisecond precision
//!     updated_at TEXT NOT NULL
//! );
//!
//! CREATE TABLE lyrics (
//!     uuid TEXT PRIMARY KEY,
//!     audio_uuid TEXT NOT NULL REFERENCES audios(uuid) ON DELETE CASCADE,
//!     "order" INTEGER NOT NULL,
//!     text TEXT NOT NULL,
//!     created_at TEXT NOT NULL,
//!     updated_at TEXT NOT NULL
//! );
//! ```
//!
//! Phrase filters are case-insensitive substring matches here; PostgreSQL
//! uses full-text phrase search instead.

mod backend;
mod schema;
mod storage;
mod transaction;

pub use backend::{SqliteBackend, SqliteBackendConfig};
