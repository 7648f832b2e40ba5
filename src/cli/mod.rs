//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logging;
pub mod output;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::{FolderId, NoteId};
use output::OutputFormat;

/// kvault - local notes with folders and full-text search
#[derive(Parser, Debug)]
#[command(name = "kvault", version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides --dev and the config file)
    #[arg(long, global = true, env = "KVAULT_DB")]
    pub db: Option<PathBuf>,

    /// Use the development database in the current directory
    #[arg(long, global = true)]
    pub dev: bool,

    /// Config file to read instead of the default location
    #[arg(long, global = true, env = "KVAULT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the database connection
    Status(StatusArgs),

    /// Manage folders
    #[command(subcommand)]
    Folder(FolderCommand),

    /// Manage notes
    #[command(subcommand)]
    Note(NoteCommand),

    /// Show the folder tree with its notes
    Tree(TreeArgs),

    /// Full-text search across notes
    Search(SearchArgs),

    /// Check the database and search index for damage
    Check,

    /// Rebuild the search index from stored notes
    Reindex,

    /// Add sample folders and notes to an empty database
    Seed,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ===========================================
// Folder Commands
// ===========================================

#[derive(Subcommand, Debug)]
pub enum FolderCommand {
    /// Create a folder
    Create(FolderCreateArgs),

    /// List folders
    Ls(FolderListArgs),

    /// Rename a folder
    Rename(FolderRenameArgs),

    /// Delete a folder and its subfolders (notes become unfiled)
    Rm(FolderIdArgs),

    /// Move a folder under another folder, or to the root
    Mv(FolderMoveArgs),
}

/// Arguments for `folder create`
#[derive(Args, Debug)]
pub struct FolderCreateArgs {
    /// Folder name
    pub name: String,

    /// Parent folder ID (omit for a root folder)
    #[arg(short, long)]
    pub parent: Option<FolderId>,
}

/// Arguments for `folder ls`
#[derive(Args, Debug)]
pub struct FolderListArgs {
    /// Only list direct children of this folder
    #[arg(short, long, conflicts_with = "roots")]
    pub parent: Option<FolderId>,

    /// Only list root-level folders
    #[arg(long)]
    pub roots: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for `folder rename`
#[derive(Args, Debug)]
pub struct FolderRenameArgs {
    pub id: FolderId,

    /// New name
    pub name: String,
}

/// Arguments for commands taking a single folder ID
#[derive(Args, Debug)]
pub struct FolderIdArgs {
    pub id: FolderId,
}

/// Arguments for `folder mv`
#[derive(Args, Debug)]
pub struct FolderMoveArgs {
    pub id: FolderId,

    /// New parent folder (omit to move to the root)
    #[arg(long)]
    pub to: Option<FolderId>,
}

// ===========================================
// Note Commands
// ===========================================

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Create a note
    New(NoteNewArgs),

    /// Show a note
    Show(NoteShowArgs),

    /// Change a note's title or content
    Edit(NoteEditArgs),

    /// Delete a note
    Rm(NoteIdArgs),

    /// Move a note into a folder, or make it unfiled
    Mv(NoteMoveArgs),

    /// List notes in a folder (plus unfiled notes)
    Ls(NoteListArgs),
}

/// Where new note content comes from
#[derive(Args, Debug, Default)]
pub struct ContentArgs {
    /// Note content
    #[arg(short, long, conflicts_with = "stdin")]
    pub content: Option<String>,

    /// Read note content from standard input
    #[arg(long)]
    pub stdin: bool,
}

impl ContentArgs {
    /// True when neither `--content` nor `--stdin` was given.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && !self.stdin
    }
}

/// Arguments for `note new`
#[derive(Args, Debug)]
pub struct NoteNewArgs {
    /// Note title
    pub title: String,

    #[command(flatten)]
    pub content: ContentArgs,

    /// Folder to file the note in
    #[arg(short = 'F', long)]
    pub folder: Option<FolderId>,
}

/// Arguments for `note show`
#[derive(Args, Debug)]
pub struct NoteShowArgs {
    pub id: NoteId,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for `note edit`
#[derive(Args, Debug)]
pub struct NoteEditArgs {
    pub id: NoteId,

    /// New title (keeps the current title if omitted)
    #[arg(short, long)]
    pub title: Option<String>,

    #[command(flatten)]
    pub content: ContentArgs,
}

/// Arguments for commands taking a single note ID
#[derive(Args, Debug)]
pub struct NoteIdArgs {
    pub id: NoteId,
}

/// Arguments for `note mv`
#[derive(Args, Debug)]
pub struct NoteMoveArgs {
    pub id: NoteId,

    /// Destination folder (omit to make the note unfiled)
    #[arg(long)]
    pub to: Option<FolderId>,
}

/// Arguments for `note ls`
#[derive(Args, Debug)]
pub struct NoteListArgs {
    /// Folder to list; unfiled notes are always included.
    /// Without a folder only unfiled notes are listed.
    #[arg(short = 'F', long)]
    pub folder: Option<FolderId>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

// ===========================================
// Other Commands
// ===========================================

/// Arguments for the `status` command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tree` command
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (words are combined; the last one matches as a prefix)
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Maximum number of results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
