//! Tree command handler.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::cli::TreeArgs;
use crate::cli::output::{Output, OutputFormat};
use crate::domain::{FolderNode, Note};
use crate::store::NoteStore;

const INDENT: &str = "  ";

/// JSON shape of the tree: the folder hierarchy plus notes outside any folder.
#[derive(Serialize)]
struct TreeView<'a> {
    folders: &'a [FolderNode],
    unfiled: &'a [Note],
}

pub fn handle_tree<S: NoteStore>(args: &TreeArgs, store: &S, out: &mut impl Write) -> Result<()> {
    let roots = store.folder_tree()?;
    let unfiled = store.get_notes_directly_in(None)?;

    match args.format {
        OutputFormat::Human => {
            if roots.is_empty() && unfiled.is_empty() {
                writeln!(out, "Nothing here yet.")?;
                return Ok(());
            }
            for node in &roots {
                write_node(node, 0, out)?;
            }
            if !unfiled.is_empty() {
                writeln!(out, "(unfiled)")?;
                write_notes(&unfiled, 1, out)?;
            }
        }
        OutputFormat::Json => {
            let view = TreeView {
                folders: &roots,
                unfiled: &unfiled,
            };
            writeln!(out, "{}", Output::new(view).to_json()?)?;
        }
    }
    Ok(())
}

fn write_node(node: &FolderNode, depth: usize, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{}{}/ [{}] ({})",
        INDENT.repeat(depth),
        node.folder.name(),
        node.folder.id(),
        node.total_notes()
    )?;
    for child in &node.children {
        write_node(child, depth + 1, out)?;
    }
    write_notes(&node.notes, depth + 1, out)
}

fn write_notes(notes: &[Note], depth: usize, out: &mut impl Write) -> Result<()> {
    for note in notes {
        writeln!(out, "{}{} [{}]", INDENT.repeat(depth), note.title(), note.id())?;
    }
    Ok(())
}
