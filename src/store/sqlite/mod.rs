//! SQLite-backed notes store implementation.

mod connection;
mod maintenance;
mod repo_impl;
mod rows;
mod transaction;


use rusqlite::Connection;

pub use maintenance::StoreStats;
pub use transaction::Transaction;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed notes store.
///
/// Owns the single database connection for the process. It is opened once
/// at startup, handed by reference to whatever needs it, and released with
/// [`SqliteStore::close`] (or on drop).
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
