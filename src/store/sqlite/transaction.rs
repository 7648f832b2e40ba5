//! Write transactions that roll back unless committed.

use crate::store::StoreResult;
use rusqlite::{Connection, Params};

/// A write transaction on the store's connection.
///
/// Started with `BEGIN IMMEDIATE` so the write lock is taken up front.
/// Dropping it without calling [`Transaction::commit`] rolls back, which is
/// how every early `?` return inside a mutation discards partial writes.
pub struct Transaction<'a> {
    conn: &'a Connection,
    finished: bool,
}

impl<'a> Transaction<'a> {
    pub(crate) fn begin(conn: &'a Connection) -> StoreResult<Self> {
        conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(Self {
            conn,
            finished: false,
        })
    }

    pub(crate) fn conn(&self) -> &Connection {
        self.conn
    }

    /// Executes a statement and returns the number of rows changed.
    pub fn execute(&self, sql: &str, params: impl Params) -> StoreResult<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Executes an `INSERT` and returns the rowid assigned to the new row.
    pub fn insert(&self, sql: &str, params: impl Params) -> StoreResult<i64> {
        self.conn.execute(sql, params)?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn commit(mut self) -> StoreResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.finished = true;
        Ok(())
    }

    /// Rolls back explicitly instead of waiting for drop.
    pub fn rollback(mut self) -> StoreResult<()> {
        self.finished = true;
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(err) = self.conn.execute_batch("ROLLBACK") {
                tracing::warn!("rollback failed: {err}");
            }
        }
    }
}
