//! Folder command handlers.

use anyhow::{Context, Result, bail};
use std::io::Write;

use super::{describe_folder, format_timestamp};
use crate::cli::FolderCommand;
use crate::cli::output::{Output, OutputFormat};
use crate::domain::Folder;
use crate::store::NoteStore;

pub fn handle_folder<S: NoteStore>(
    command: &FolderCommand,
    store: &mut S,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        FolderCommand::Create(args) => {
            let folder = store
                .create_folder(&args.name, args.parent)
                .with_context(|| match args.parent {
                    Some(parent) => format!("failed to create folder in [{parent}]"),
                    None => "failed to create folder".to_string(),
                })?;
            writeln!(out, "Created folder: {} [{}]", folder.name(), folder.id())?;
        }
        FolderCommand::Ls(args) => {
            let folders = if args.roots {
                store.get_child_folders(None)?
            } else if let Some(parent) = args.parent {
                store.get_child_folders(Some(parent))?
            } else {
                store.get_folders()?
            };
            format_folder_output(&folders, args.format, out)?;
        }
        FolderCommand::Rename(args) => {
            if !store.rename_folder(args.id, &args.name)? {
                bail!("folder not found: {}", args.id);
            }
            writeln!(out, "Renamed folder [{}] to {}", args.id, args.name)?;
        }
        FolderCommand::Rm(args) => {
            if !store.delete_folder(args.id)? {
                bail!("folder not found: {}", args.id);
            }
            writeln!(out, "Deleted folder [{}]", args.id)?;
        }
        FolderCommand::Mv(args) => {
            if !store.move_folder(args.id, args.to)? {
                bail!("folder not found: {}", args.id);
            }
            writeln!(out, "Moved folder [{}] to {}", args.id, describe_folder(args.to))?;
        }
    }
    Ok(())
}

fn format_folder_output(folders: &[Folder], format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if folders.is_empty() {
                writeln!(out, "No folders found.")?;
            }
            for folder in folders {
                let parent = folder
                    .parent_id()
                    .map(|p| format!("  (in [{p}])"))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "[{}] {}{}  created {}",
                    folder.id(),
                    folder.name(),
                    parent,
                    format_timestamp(folder.created_at())
                )?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", Output::new(folders).to_json()?)?;
        }
    }
    Ok(())
}
