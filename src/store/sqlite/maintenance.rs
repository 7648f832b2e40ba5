//! Health checks and index maintenance for SqliteStore.

use super::SqliteStore;
use crate::store::schema::{check_fts, get_schema_version, rebuild_fts};
use crate::store::StoreResult;
use serde::Serialize;

/// Row counts for the primary tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub folders: i64,
    pub notes: i64,
}

impl SqliteStore {
    /// Returns the schema version recorded in the database.
    pub fn schema_version(&self) -> StoreResult<i64> {
        Ok(get_schema_version(&self.conn)?)
    }

    pub fn stats(&self) -> StoreResult<StoreStats> {
        let (folders, notes) = self.conn.query_row(
            "SELECT (SELECT COUNT(*) FROM folders), (SELECT COUNT(*) FROM notes)",
            [],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        )?;
        Ok(StoreStats { folders, notes })
    }

    /// Rebuilds the full-text index from the notes table.
    pub fn rebuild_search_index(&mut self) -> StoreResult<()> {
        let tx = self.transaction()?;
        rebuild_fts(tx.conn())?;
        tx.commit()?;
        tracing::info!("rebuilt search index");
        Ok(())
    }

    /// Checks the database file and the search index for damage.
    ///
    /// Returns the problems found; an empty list means the store is healthy.
    pub fn integrity_check(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare("PRAGMA integrity_check")?;
        let mut problems = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        problems.retain(|line| line != "ok");

        if let Err(err) = check_fts(&self.conn) {
            problems.push(format!("search index: {err}"));
        }

        for problem in &problems {
            tracing::warn!(problem = problem.as_str(), "integrity check failed");
        }
        Ok(problems)
    }
}
