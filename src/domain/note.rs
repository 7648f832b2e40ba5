//! Note record.

use crate::domain::{FolderId, NoteId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of characters kept by [`Note::preview`].
const PREVIEW_CHARS: usize = 100;

/// A note as stored in the database.
///
/// # Examples
///
/// ```
/// use kvault::domain::{Note, NoteId};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let note = Note::new(NoteId::new(1), "Groceries", "buy milk", None, now, now);
/// assert_eq!(note.title(), "Groceries");
/// assert!(note.is_unfiled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    folder_id: Option<FolderId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a note value from stored fields.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        folder_id: Option<FolderId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            folder_id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the containing folder, or `None` if the note is unfiled.
    pub fn folder_id(&self) -> Option<FolderId> {
        self.folder_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the title, content or folder last changed.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_unfiled(&self) -> bool {
        self.folder_id.is_none()
    }

    /// Returns a single-line excerpt of the content for listings.
    ///
    /// Newlines are collapsed to spaces and an ellipsis is appended when the
    /// content was cut.
    pub fn preview(&self) -> String {
        let flat: String = self
            .content
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if flat.chars().count() <= PREVIEW_CHARS {
            flat
        } else {
            let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
            format!("{}…", cut.trim_end())
        }
    }
}
