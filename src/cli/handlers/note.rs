//! Note command handlers.

use anyhow::{Context, Result, bail};
use std::io::{Read, Write};

use super::{describe_folder, format_timestamp, read_content, require_title, truncate_str};
use crate::cli::NoteCommand;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::Note;
use crate::store::NoteStore;

/// Width of the preview line in human listings.
const PREVIEW_WIDTH: usize = 72;

pub fn handle_note<S: NoteStore>(
    command: &NoteCommand,
    store: &mut S,
    out: &mut impl Write,
    input: &mut dyn Read,
) -> Result<()> {
    match command {
        NoteCommand::New(args) => {
            let title = require_title(&args.title)?;
            let content = read_content(&args.content, input)?.unwrap_or_default();
            let note = store
                .create_note(title, &content, args.folder)
                .with_context(|| format!("failed to create note '{title}'"))?;
            writeln!(out, "Created: {} [{}]", note.title(), note.id())?;
        }
        NoteCommand::Show(args) => {
            let Some(note) = store.get_note(args.id)? else {
                bail!("note not found: {}", args.id);
            };
            match args.format {
                OutputFormat::Human => {
                    let ancestors = store.note_ancestors(note.id())?;
                    print_note(&note, &ancestors_path(&*store, &ancestors)?, out)?;
                }
                OutputFormat::Json => writeln!(out, "{}", Output::new(&note).to_json()?)?,
            }
        }
        NoteCommand::Edit(args) => {
            if args.title.is_none() && args.content.is_empty() {
                bail!("nothing to change: pass --title, --content or --stdin");
            }
            let Some(current) = store.get_note(args.id)? else {
                bail!("note not found: {}", args.id);
            };
            let title = match &args.title {
                Some(t) => require_title(t)?.to_string(),
                None => current.title().to_string(),
            };
            let content = read_content(&args.content, input)?
                .unwrap_or_else(|| current.content().to_string());

            let Some(note) = store.update_note(args.id, &title, &content)? else {
                bail!("note not found: {}", args.id);
            };
            writeln!(out, "Updated: {} [{}]", note.title(), note.id())?;
        }
        NoteCommand::Rm(args) => {
            if !store.delete_note(args.id)? {
                bail!("note not found: {}", args.id);
            }
            writeln!(out, "Deleted note [{}]", args.id)?;
        }
        NoteCommand::Mv(args) => {
            let Some(note) = store
                .move_note(args.id, args.to)
                .with_context(|| format!("failed to move note {}", args.id))?
            else {
                bail!("note not found: {}", args.id);
            };
            let destination = match args.to {
                Some(_) => describe_folder(args.to),
                None => "unfiled".to_string(),
            };
            writeln!(out, "Moved: {} [{}] to {}", note.title(), note.id(), destination)?;
        }
        NoteCommand::Ls(args) => {
            let notes = match args.folder {
                Some(folder) => store.get_notes_in_folder(folder)?,
                None => store.get_notes_directly_in(None)?,
            };
            format_note_list(&notes, args.format, out)?;
        }
    }
    Ok(())
}

/// Renders a folder chain (innermost first) as `Outer / Inner`.
fn ancestors_path<S: NoteStore>(store: &S, ancestors: &[crate::domain::FolderId]) -> Result<String> {
    let mut names = Vec::with_capacity(ancestors.len());
    for id in ancestors.iter().rev() {
        if let Some(folder) = store.get_folder(*id)? {
            names.push(folder.name().to_string());
        }
    }
    Ok(names.join(" / "))
}

fn print_note(note: &Note, folder_path: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, "# {}", note.title())?;
    writeln!(out)?;
    writeln!(
        out,
        "ID: {}  Created: {}  Updated: {}",
        note.id(),
        format_timestamp(note.created_at()),
        format_timestamp(note.updated_at())
    )?;
    if folder_path.is_empty() {
        writeln!(out, "Folder: (unfiled)")?;
    } else {
        writeln!(out, "Folder: {folder_path}")?;
    }
    writeln!(out)?;

    if !note.content().is_empty() {
        writeln!(out, "{}", note.content())?;
    }
    Ok(())
}

fn format_note_list(notes: &[Note], format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if notes.is_empty() {
                writeln!(out, "No notes found.")?;
                return Ok(());
            }
            for note in notes {
                writeln!(
                    out,
                    "[{}] {}  (updated {})",
                    note.id(),
                    note.title(),
                    format_timestamp(note.updated_at())
                )?;
                let preview = note.preview();
                if !preview.is_empty() {
                    writeln!(out, "  {}", truncate_str(&preview, PREVIEW_WIDTH))?;
                }
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes
                .iter()
                .map(|n| NoteListing {
                    id: n.id().get(),
                    title: n.title().to_string(),
                    folder_id: n.folder_id().map(|f| f.get()),
                    updated_at: n.updated_at(),
                    preview: n.preview(),
                })
                .collect();
            writeln!(out, "{}", Output::new(listings).to_json()?)?;
        }
    }
    Ok(())
}
