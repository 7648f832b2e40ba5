//! Core types: Folder, Note, FolderNode and their integer ids

mod folder;
mod id;
mod note;
mod tree;

pub use folder::Folder;
pub use id::{FolderId, NoteId, ParseIdError};
pub use note::Note;
pub use tree::FolderNode;
