//! Status and maintenance handlers.

use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::Path;

use crate::cli::StatusArgs;
use crate::cli::output::{Output, OutputFormat, StatusReport};
use crate::store::{NoteStore, SqliteStore};

pub fn handle_status(
    args: &StatusArgs,
    store: &SqliteStore,
    db_path: &Path,
    out: &mut impl Write,
) -> Result<()> {
    let connection = store.test_connection().context("database connection check failed")?;
    let report = StatusReport::new(
        connection,
        db_path.display().to_string(),
        store.schema_version()?,
        store.stats()?,
    );

    match args.format {
        OutputFormat::Human => {
            writeln!(out, "Status:   {}", report.status)?;
            writeln!(out, "Database: {}", report.database)?;
            writeln!(out, "Schema:   v{}", report.schema_version)?;
            writeln!(out, "Folders:  {}", report.folders)?;
            writeln!(out, "Notes:    {}", report.notes)?;
        }
        OutputFormat::Json => writeln!(out, "{}", Output::new(&report).to_json()?)?,
    }
    Ok(())
}

pub fn handle_check(store: &SqliteStore, out: &mut impl Write) -> Result<()> {
    let problems = store.integrity_check()?;
    if problems.is_empty() {
        writeln!(out, "No problems found.")?;
        return Ok(());
    }

    for problem in &problems {
        writeln!(out, "  {problem}")?;
    }
    bail!("database check found {} problem(s)", problems.len());
}

pub fn handle_reindex(store: &mut SqliteStore, out: &mut impl Write) -> Result<()> {
    store
        .rebuild_search_index()
        .context("failed to rebuild search index")?;
    let stats = store.stats()?;
    writeln!(out, "Rebuilt search index for {} notes", stats.notes)?;
    Ok(())
}
