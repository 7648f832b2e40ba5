//! Output format types for CLI commands.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::store::{ConnectionStatus, StoreStats};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// Renders as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Result of the `status` command.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub database: String,
    pub schema_version: i64,
    pub folders: i64,
    pub notes: i64,
}

impl StatusReport {
    pub fn new(
        connection: ConnectionStatus,
        database: String,
        schema_version: i64,
        stats: StoreStats,
    ) -> Self {
        Self {
            status: connection.status,
            timestamp: connection.timestamp,
            database,
            schema_version,
            folders: stats.folders,
            notes: stats.notes,
        }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: i64,
    pub title: String,
    pub folder_id: Option<i64>,
    pub updated_at: DateTime<Utc>,
    pub preview: String,
}
