//! PostgreSQL backend implementation.
//!
//! Connection pooling via deadpool-postgres, native `UUID`, `DATE` and
//! `TIMESTAMPTZ` columns, and full-text phrase search for the song and lyric
//! filters.
//!
//! # Example
//!
//! ```no_run
//! use songbook_persistence::backends::postgres::{PostgresBackend, PostgresConfig};
//!
//! # async fn main_example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PostgresConfig::default();
//! let backend = PostgresBackend::new(config).await?;
//!
//! backend.init_schema().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS audios (
//!     uuid UUID PRIMARY KEY,
//!     "group" TEXT NOT NULL,
//!     song TEXT NOT NULL,
//!     release_date DATE NOT NULL,
//!     link TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL
//! );
//!
//! CREATE TABLE IF NOT EXISTS lyrics (
//!     uuid UUID PRIMARY KEY,
//!     audio_uuid UUID NOT NULL REFERENCES audios(uuid) ON DELETE CASCADE,
//!     "order" INTEGER NOT NULL,
//!     text TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL
//! );
//! ```

mod backend;
pub(crate) mod schema;
mod storage;

pub use backend::{PostgresBackend, PostgresConfig, PostgresSslMode};
