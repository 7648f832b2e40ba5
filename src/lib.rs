//! kvault - local notes with folders and full-text search

pub mod cli;
pub mod domain;
pub mod store;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::io::{self, Write};

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_check, handle_folder, handle_note, handle_reindex, handle_search, handle_seed,
        handle_status, handle_tree,
    },
    logging,
};
use store::SqliteStore;

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Command::Completions(args) = &cli.command {
        clap_complete::generate(args.shell, &mut Cli::command(), "kvault", &mut out);
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    let db_path = config.database_path(cli.db.as_ref(), cli.dev);
    tracing::debug!(path = %db_path.display(), "resolved database path");

    let mut store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;

    let result = match &cli.command {
        Command::Status(args) => handle_status(args, &store, &db_path, &mut out),
        Command::Folder(command) => handle_folder(command, &mut store, &mut out),
        Command::Note(command) => handle_note(command, &mut store, &mut out, &mut io::stdin()),
        Command::Tree(args) => handle_tree(args, &store, &mut out),
        Command::Search(args) => handle_search(args, &config, &store, &mut out),
        Command::Check => handle_check(&store, &mut out),
        Command::Reindex => handle_reindex(&mut store, &mut out),
        Command::Seed => handle_seed(&mut store, &mut out),
        Command::Completions(_) => Ok(()),
    };
    out.flush()?;

    store.close().context("failed to close database")?;
    result
}
