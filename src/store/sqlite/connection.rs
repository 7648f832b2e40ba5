//! Opening, configuring and closing the store's connection.

use super::SqliteStore;
use super::transaction::Transaction;
use crate::store::{StoreError, StoreResult, create_schema};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Pragmas applied to every connection.
const BASE_PRAGMAS: &str = "PRAGMA foreign_keys = ON;
     PRAGMA synchronous = NORMAL;
     PRAGMA busy_timeout = 5000;";

impl SqliteStore {
    /// Opens an in-memory store with the schema in place.
    ///
    /// Nothing is persisted; used by tests and throwaway sessions.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(BASE_PRAGMAS)?;
        create_schema(&conn)?;
        tracing::debug!("opened in-memory store");
        Ok(Self { conn })
    }

    /// Opens or creates the store file at `path`.
    ///
    /// Creates parent directories if they don't exist, switches the file to
    /// WAL journaling and ensures the schema exists.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        let journal_mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        conn.execute_batch(BASE_PRAGMAS)?;
        create_schema(&conn)?;
        tracing::info!(path = %path.display(), %journal_mode, "opened store");
        Ok(Self { conn })
    }

    /// Closes the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_, err)| StoreError::Database(err))?;
        tracing::debug!("closed store");
        Ok(())
    }

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begins a write transaction that rolls back on drop unless committed.
    pub fn transaction(&mut self) -> StoreResult<Transaction<'_>> {
        Transaction::begin(&self.conn)
    }
}
