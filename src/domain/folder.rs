//! Folder in the note hierarchy.

use crate::domain::FolderId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A folder in the tree.
///
/// Folders nest through `parent_id`; a folder without a parent sits at the
/// root. Names are display strings and are not required to be unique, even
/// among siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    id: FolderId,
    name: String,
    parent_id: Option<FolderId>,
    created_at: DateTime<Utc>,
}

impl Folder {
    /// Creates a folder value from stored fields.
    pub fn new(
        id: FolderId,
        name: impl Into<String>,
        parent_id: Option<FolderId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
            created_at,
        }
    }

    pub fn id(&self) -> FolderId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent folder, or `None` for a root-level folder.
    pub fn parent_id(&self) -> Option<FolderId> {
        self.parent_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if this folder has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
