//! Nested view of the folder hierarchy.

use crate::domain::{Folder, Note};
use serde::Serialize;

/// A folder together with its subfolders and the notes filed directly in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderNode {
    pub folder: Folder,
    pub children: Vec<FolderNode>,
    pub notes: Vec<Note>,
}

impl FolderNode {
    pub fn new(folder: Folder) -> Self {
        Self {
            folder,
            children: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Counts the notes in this folder and every descendant.
    pub fn total_notes(&self) -> usize {
        self.notes.len()
            + self
                .children
                .iter()
                .map(FolderNode::total_notes)
                .sum::<usize>()
    }
}
