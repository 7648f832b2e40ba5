//! Search command handler.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::cli::SearchArgs;
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};
use crate::store::{NoteStore, SearchOptions, SearchResult};

#[derive(Serialize)]
struct SearchHit<'a> {
    id: i64,
    title: &'a str,
    snippet: &'a str,
    score: f64,
}

pub fn handle_search<S: NoteStore>(
    args: &SearchArgs,
    config: &Config,
    store: &S,
    out: &mut impl Write,
) -> Result<()> {
    let options = config.search_options(args.limit);
    let query = args.query.join(" ");

    let results = store
        .search_notes_with(&query, &options)
        .with_context(|| format!("search failed for '{query}'"))?;
    tracing::debug!(query = %query, hits = results.len(), "search complete");

    match args.format {
        OutputFormat::Human => print_results(&results, &options, out)?,
        OutputFormat::Json => {
            let hits: Vec<SearchHit> = results
                .iter()
                .map(|r| SearchHit {
                    id: r.id().get(),
                    title: r.title(),
                    snippet: r.snippet(),
                    score: r.score(),
                })
                .collect();
            writeln!(out, "{}", Output::new(hits).to_json()?)?;
        }
    }
    Ok(())
}

fn print_results(results: &[SearchResult], options: &SearchOptions, out: &mut impl Write) -> Result<()> {
    if results.is_empty() {
        writeln!(out, "No matching notes found.")?;
        return Ok(());
    }

    for result in results {
        writeln!(out, "[{}] {} (score: {:.2})", result.id(), result.title(), result.score())?;
        let snippet = strip_markers(result.snippet(), options);
        let snippet = snippet.trim();
        if !snippet.is_empty() {
            writeln!(out, "  {}", snippet.replace('\n', " "))?;
        }
    }
    let noun = if results.len() == 1 { "result" } else { "results" };
    writeln!(out, "{} {}", results.len(), noun)?;
    Ok(())
}

/// Removes highlight markers from a snippet for plain terminal output.
pub(crate) fn strip_markers(snippet: &str, options: &SearchOptions) -> String {
    let mut text = snippet.to_string();
    for marker in [&options.highlight_open, &options.highlight_close] {
        if !marker.is_empty() {
            text = text.replace(marker.as_str(), "");
        }
    }
    text
}
