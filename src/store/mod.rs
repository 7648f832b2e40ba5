//! SQLite store, schema and query contracts

mod query;
mod repository;
pub mod schema;
pub mod sqlite;

pub use query::match_expression;
pub use repository::{
    ConnectionStatus, DEFAULT_HIGHLIGHT_CLOSE, DEFAULT_HIGHLIGHT_OPEN, DEFAULT_SEARCH_LIMIT,
    NoteStore, SearchOptions, SearchResult, StoreError, StoreResult,
};
pub use schema::{create_schema, get_schema_version, rebuild_fts};
pub use sqlite::{SqliteStore, StoreStats, Transaction};
