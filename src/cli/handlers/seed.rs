//! Seed command handler.

use anyhow::{Context, Result, bail};
use std::io::Write;

use crate::store::NoteStore;

/// Sample folders, each with the notes filed in it.
const SAMPLE_DATA: &[(&str, &[(&str, &str)])] = &[
    (
        "Projects",
        &[(
            "My First Project",
            "# Project Notes\n\nStart here...\n\nUse `kvault note edit` to change this note.",
        )],
    ),
    (
        "Docs",
        &[(
            "Getting Started",
            "# Welcome to kvault\n\n\
             - `kvault tree` shows folders and notes\n\
             - `kvault search <words>` finds notes by title or content\n\
             - `kvault note new <title>` adds a note",
        )],
    ),
];

/// Fills an empty store with sample folders and notes.
///
/// Refuses to touch a store that already holds anything.
pub fn handle_seed<S: NoteStore>(store: &mut S, out: &mut impl Write) -> Result<()> {
    if !store.get_folders()?.is_empty() || !store.get_notes_directly_in(None)?.is_empty() {
        bail!("database is not empty; seed only runs on a fresh database");
    }

    let mut notes = 0;
    for (folder_name, folder_notes) in SAMPLE_DATA {
        let folder = store
            .create_folder(folder_name, None)
            .with_context(|| format!("failed to create sample folder '{folder_name}'"))?;
        for (title, content) in *folder_notes {
            store.create_note(title, content, Some(folder.id()))?;
            notes += 1;
        }
    }

    tracing::info!(folders = SAMPLE_DATA.len(), notes, "seeded sample data");
    writeln!(out, "Added {} folders and {} notes", SAMPLE_DATA.len(), notes)?;
    Ok(())
}
