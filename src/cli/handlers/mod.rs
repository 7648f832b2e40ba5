//! Command handlers for the CLI.
//!
//! Handlers receive the already-open store and write their output to the
//! given writer, so the binary owns the store's lifetime and tests can
//! capture output.

mod folder;
mod note;
mod search;
mod seed;
mod status;
mod tree;


use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use std::io::Read;

use crate::cli::ContentArgs;
use crate::domain::FolderId;

// Re-export public items
pub use folder::handle_folder;
pub use note::handle_note;
pub use search::handle_search;
pub use seed::handle_seed;
pub use status::{handle_check, handle_reindex, handle_status};
pub use tree::handle_tree;

#[cfg(test)]
pub(crate) use search::strip_markers;

// ===========================================
// Shared Utilities
// ===========================================

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Formats a timestamp for human-readable listings.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Describes a folder destination, where `None` means the root or unfiled.
pub(crate) fn describe_folder(folder: Option<FolderId>) -> String {
    match folder {
        Some(id) => format!("folder [{id}]"),
        None => "root".to_string(),
    }
}

/// Rejects titles that are empty after trimming.
pub(crate) fn require_title(title: &str) -> Result<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        bail!("title cannot be empty");
    }
    Ok(trimmed)
}

/// Resolves note content from `--content` or `--stdin`.
///
/// Returns `None` when neither was given.
pub(crate) fn read_content(args: &ContentArgs, input: &mut dyn Read) -> Result<Option<String>> {
    if args.stdin {
        let mut buf = String::new();
        input
            .read_to_string(&mut buf)
            .context("failed to read content from stdin")?;
        return Ok(Some(buf));
    }
    Ok(args.content.clone())
}
