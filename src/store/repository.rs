//! NoteStore trait and result types.

use crate::domain::{Folder, FolderId, FolderNode, Note, NoteId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default cap on the number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Default markers placed around matched terms in snippets.
pub const DEFAULT_HIGHLIGHT_OPEN: &str = "<mark>";
pub const DEFAULT_HIGHLIGHT_CLOSE: &str = "</mark>";

// ===========================================
// Errors
// ===========================================

/// Errors that can occur during store operations.
///
/// Missing records are not errors: lookups return `Option` and
/// mutations report whether a row was affected.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred (I/O failure, constraint violation, ...).
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The search query was rejected by the full-text engine.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Stored data could not be interpreted.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A folder cannot be moved into itself or one of its descendants.
    #[error("cannot move folder {folder} into {target}: target is inside the folder")]
    InvalidMove { folder: FolderId, target: FolderId },

    /// An I/O error occurred while preparing the database location.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ===========================================
// SearchResult
// ===========================================

/// A ranked full-text match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    id: NoteId,
    title: String,
    snippet: String,
    score: f64,
}

impl SearchResult {
    pub fn new(id: NoteId, title: impl Into<String>, snippet: impl Into<String>, score: f64) -> Self {
        Self {
            id,
            title: title.into(),
            snippet: snippet.into(),
            score,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the content excerpt with matched terms wrapped in the
    /// highlight markers.
    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    /// Returns the relevance score (higher is more relevant).
    pub fn score(&self) -> f64 {
        self.score
    }
}

// ===========================================
// SearchOptions
// ===========================================

/// Caller-controlled search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of results returned.
    pub limit: usize,
    /// Inserted before each matched term in the snippet.
    pub highlight_open: String,
    /// Inserted after each matched term in the snippet.
    pub highlight_close: String,
}

impl SearchOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_markers(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.highlight_open = open.into();
        self.highlight_close = close.into();
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            highlight_open: DEFAULT_HIGHLIGHT_OPEN.to_string(),
            highlight_close: DEFAULT_HIGHLIGHT_CLOSE.to_string(),
        }
    }
}

// ===========================================
// ConnectionStatus
// ===========================================

/// Outcome of a connection health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl ConnectionStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// ===========================================
// NoteStore Trait
// ===========================================

/// Repository trait for folders and notes.
///
/// Every note mutation keeps the full-text index in step with the notes
/// table: after any call returns, search sees exactly the stored titles and
/// contents.
pub trait NoteStore {
    /// Runs a trivial query to confirm the connection is usable.
    fn test_connection(&self) -> StoreResult<ConnectionStatus>;

    // ----- folders -----

    /// Creates a folder under `parent_id` (or at the root).
    ///
    /// A `parent_id` that does not exist is rejected by the foreign key.
    fn create_folder(&mut self, name: &str, parent_id: Option<FolderId>) -> StoreResult<Folder>;

    fn get_folder(&self, id: FolderId) -> StoreResult<Option<Folder>>;

    /// Returns every folder, ordered by name.
    fn get_folders(&self) -> StoreResult<Vec<Folder>>;

    /// Returns the direct children of `parent_id` (root folders for `None`), ordered by name.
    fn get_child_folders(&self, parent_id: Option<FolderId>) -> StoreResult<Vec<Folder>>;

    /// Renames a folder. Returns `false` if it does not exist.
    fn rename_folder(&mut self, id: FolderId, name: &str) -> StoreResult<bool>;

    /// Deletes a folder and all of its descendants.
    ///
    /// Notes inside the deleted subtree are kept and become unfiled.
    /// Returns `false` if the folder does not exist.
    fn delete_folder(&mut self, id: FolderId) -> StoreResult<bool>;

    /// Re-parents a folder (`None` moves it to the root).
    ///
    /// Returns `false` if the folder does not exist.
    fn move_folder(&mut self, id: FolderId, new_parent: Option<FolderId>) -> StoreResult<bool>;

    // ----- notes -----

    /// Creates a note and its search index entry.
    fn create_note(
        &mut self,
        title: &str,
        content: &str,
        folder_id: Option<FolderId>,
    ) -> StoreResult<Note>;

    fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>>;

    /// Replaces a note's title and content and refreshes its index entry.
    ///
    /// The folder association is preserved. Returns the stored note, or
    /// `None` if it does not exist.
    fn update_note(&mut self, id: NoteId, title: &str, content: &str) -> StoreResult<Option<Note>>;

    /// Deletes a note and its index entry. Returns `false` if it did not exist.
    fn delete_note(&mut self, id: NoteId) -> StoreResult<bool>;

    /// Files a note under `folder_id` (`None` makes it unfiled).
    fn move_note(&mut self, id: NoteId, folder_id: Option<FolderId>) -> StoreResult<Option<Note>>;

    /// Returns notes in `folder_id` together with all unfiled notes,
    /// most recently updated first.
    fn get_notes_in_folder(&self, folder_id: FolderId) -> StoreResult<Vec<Note>>;

    /// Returns only the notes filed directly in `folder_id` (unfiled notes for `None`),
    /// ordered by title.
    fn get_notes_directly_in(&self, folder_id: Option<FolderId>) -> StoreResult<Vec<Note>>;

    /// Returns the folder chain of a note, from its own folder up to the root.
    ///
    /// Empty for unfiled or missing notes.
    fn note_ancestors(&self, id: NoteId) -> StoreResult<Vec<FolderId>>;

    /// Builds the full folder tree with the notes filed in each folder.
    fn folder_tree(&self) -> StoreResult<Vec<FolderNode>>;

    // ----- search -----

    /// Full-text search with the default limit and markers.
    fn search_notes(&self, query: &str) -> StoreResult<Vec<SearchResult>> {
        self.search_notes_with(query, &SearchOptions::default())
    }

    /// Full-text search, highest score first.
    ///
    /// Empty or whitespace-only queries return no results.
    fn search_notes_with(&self, query: &str, options: &SearchOptions)
    -> StoreResult<Vec<SearchResult>>;
}
