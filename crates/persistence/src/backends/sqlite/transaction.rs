//! Transaction guard for the SQLite backend.

use rusqlite::{Connection, Row};

use crate::error::{StorageError, StorageResult, TransactionError};
use crate::query::SqlFragment;

use super::storage;

/// An open `BEGIN IMMEDIATE` transaction on a pooled connection.
///
/// Dropping the guard without calling [`commit`](Self::commit) rolls the
/// transaction back.
pub(crate) struct SqliteTransaction<'c> {
    conn: &'c Connection,
    active: bool,
}

impl std::fmt::Debug for SqliteTransaction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteTransaction")
            .field("active", &self.active)
            .finish()
    }
}

impl<'c> SqliteTransaction<'c> {
    /// Starts a write transaction.
    pub(crate) fn begin(conn: &'c Connection) -> StorageResult<Self> {
        conn.execute("BEGIN IMMEDIATE", []).map_err(|e| {
            StorageError::Transaction(TransactionError::RolledBack {
                reason: format!("Failed to begin transaction: {}", e),
            })
        })?;

        Ok(Self { conn, active: true })
    }

    fn ensure_active(&self) -> StorageResult<()> {
        if self.active {
            Ok(())
        } else {
            Err(StorageError::Transaction(TransactionError::InvalidTransaction))
        }
    }

    /// Executes a statement and returns the number of affected rows.
    pub(crate) fn execute(&self, fragment: &SqlFragment) -> StorageResult<usize> {
        self.ensure_active()?;
        storage::execute(self.conn, fragment)
    }

    /// Runs a statement expected to yield at most one row.
    pub(crate) fn query_optional<T, F>(
        &self,
        fragment: &SqlFragment,
        map: F,
    ) -> StorageResult<Option<T>>
    where
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.ensure_active()?;
        storage::query_optional(self.conn, fragment, map)
    }

    /// Commits the transaction.
    pub(crate) fn commit(mut self) -> StorageResult<()> {
        self.ensure_active()?;

        self.conn.execute("COMMIT", []).map_err(|e| {
            StorageError::Transaction(TransactionError::RolledBack {
                reason: format!("Commit failed: {}", e),
            })
        })?;

        self.active = false;
        Ok(())
    }
}

impl Drop for SqliteTransaction<'_> {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.conn.execute("ROLLBACK", []) {
                tracing::warn!(error = %e, "SQLite rollback failed");
            } else {
                tracing::debug!("SQLite transaction rolled back");
            }
        }
    }
}
