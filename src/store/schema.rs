//! SQLite schema creation for the notes store.

use rusqlite::Connection;

/// Current schema version recorded in `schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the database schema for the notes store.
///
/// This function creates all required tables, indexes, and triggers.
/// It is idempotent - calling it multiple times is safe.
///
/// # Tables Created
/// - `folders` - Folder hierarchy (self-referencing, cascading deletes)
/// - `notes` - Note records (folder reference cleared when the folder goes)
/// - `notes_fts` - FTS5 index over note title and content, keyed by note id
/// - `schema_version` - Schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // ===========================================
    // Folders
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS folders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            parent_id INTEGER REFERENCES folders(id) ON DELETE CASCADE,
            created_at INTEGER NOT NULL
        );",
    )?;

    // ===========================================
    // Notes
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL DEFAULT '',
            folder_id INTEGER REFERENCES folders(id) ON DELETE SET NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );",
    )?;

    // ===========================================
    // Indexes
    // ===========================================
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_folders_parent ON folders(parent_id);
         CREATE INDEX IF NOT EXISTS idx_folders_name ON folders(name);
         CREATE INDEX IF NOT EXISTS idx_notes_folder ON notes(folder_id);
         CREATE INDEX IF NOT EXISTS idx_notes_updated ON notes(updated_at);",
    )?;

    // ===========================================
    // FTS5 Virtual Table
    // ===========================================
    // Column names must match the notes table for 'rebuild' to work.
    conn.execute_batch(
        "CREATE VIRTUAL TABLE IF NOT EXISTS notes_fts USING fts5(
            title,
            content,
            content='notes',
            content_rowid='id',
            prefix='2 3 4'
        );",
    )?;

    // ===========================================
    // FTS5 Sync Triggers
    // ===========================================
    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS notes_fts_insert
        AFTER INSERT ON notes BEGIN
            INSERT INTO notes_fts(rowid, title, content)
            VALUES (NEW.id, NEW.title, NEW.content);
        END;",
    )?;

    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS notes_fts_delete
        AFTER DELETE ON notes BEGIN
            INSERT INTO notes_fts(notes_fts, rowid, title, content)
            VALUES ('delete', OLD.id, OLD.title, OLD.content);
        END;",
    )?;

    // Folder moves and detaches do not touch the indexed columns.
    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS notes_fts_update
        AFTER UPDATE OF title, content ON notes BEGIN
            INSERT INTO notes_fts(notes_fts, rowid, title, content)
            VALUES ('delete', OLD.id, OLD.title, OLD.content);
            INSERT INTO notes_fts(rowid, title, content)
            VALUES (NEW.id, NEW.title, NEW.content);
        END;",
    )?;

    // ===========================================
    // Schema Version
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}

/// Rebuilds the FTS5 index from the notes table.
///
/// Recovers from index corruption or writes that bypassed the triggers.
pub fn rebuild_fts(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute("INSERT INTO notes_fts(notes_fts) VALUES('rebuild')", [])?;
    Ok(())
}

/// Checks that the FTS5 index matches the notes table.
///
/// Fails with `SQLITE_CORRUPT_VTAB` when the two have diverged.
pub fn check_fts(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO notes_fts(notes_fts, rank) VALUES('integrity-check', 1)",
        [],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // Test Helpers
    // ===========================================

    fn test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        conn
    }

    fn sqlite_object_exists(conn: &Connection, kind: &str, name: &str) -> bool {
        conn.query_row(
            "SELECT 1 FROM sqlite_master WHERE type=?1 AND name=?2",
            [kind, name],
            |_| Ok(()),
        )
        .is_ok()
    }

    fn get_columns(conn: &Connection, table: &str) -> Vec<(String, String, bool)> {
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({})", table))
            .unwrap();
        stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(1)?,   // name
                row.get::<_, String>(2)?,   // type
                row.get::<_, i32>(3)? != 0, // notnull
            ))
        })
        .unwrap()
        .map(|r| r.unwrap())
        .collect()
    }

    fn insert_note(conn: &Connection, title: &str, content: &str) -> i64 {
        conn.execute(
            "INSERT INTO notes (title, content, created_at, updated_at) VALUES (?1, ?2, 0, 0)",
            [title, content],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn fts_count(conn: &Connection, expr: &str) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM notes_fts WHERE notes_fts MATCH ?1",
            [expr],
            |row| row.get(0),
        )
        .unwrap()
    }

    // ===========================================
    // Tables
    // ===========================================

    #[test]
    fn creates_all_tables() {
        let conn = test_connection();
        create_schema(&conn).unwrap();

        for table in ["folders", "notes", "notes_fts", "schema_version"] {
            assert!(
                sqlite_object_exists(&conn, "table", table),
                "{table} table should exist"
            );
        }
    }

    #[test]
    fn folders_table_has_expected_columns() {
        let conn = test_connection();
        create_schema(&conn).unwrap();

        let columns = get_columns(&conn, "folders");
        let names: Vec<&str> = columns.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(names, ["id", "name", "parent_id", "created_at"]);

        let parent = columns.iter().find(|(n, _, _)| n == "parent_id").unwrap();
        assert!(!parent.2, "parent_id should be nullable");
    }

    #[test]
    fn notes_table_has_expected_columns() {
        let conn = test_connection();
        create_schema(&conn).unwrap();

        let columns = get_columns(&conn, "notes");
        let names: Vec<&str> = columns.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(
            names,
            ["id", "title", "content", "folder_id", "created_at", "updated_at"]
        );

        let title = columns.iter().find(|(n, _, _)| n == "title").unwrap();
        assert_eq!(title.1, "TEXT");
        assert!(title.2, "title should be NOT NULL");
    }

    #[test]
    fn creates_hierarchy_indexes() {
        let conn = test_connection();
        create_schema(&conn).unwrap();

        assert!(sqlite_object_exists(&conn, "index", "idx_folders_parent"));
        assert!(sqlite_object_exists(&conn, "index", "idx_notes_folder"));
        assert!(sqlite_object_exists(&conn, "index", "idx_notes_updated"));
    }

    #[test]
    fn creates_sync_triggers() {
        let conn = test_connection();
        create_schema(&conn).unwrap();

        for trigger in ["notes_fts_insert", "notes_fts_delete", "notes_fts_update"] {
            assert!(
                sqlite_object_exists(&conn, "trigger", trigger),
                "{trigger} should exist"
            );
        }
    }

    // ===========================================
    // Idempotency & Versioning
    // ===========================================

    #[test]
    fn create_schema_is_idempotent() {
        let conn = test_connection();
        create_schema(&conn).unwrap();
        create_schema(&conn).unwrap();
        create_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name='notes_fts'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "should have exactly one notes_fts table");

        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[test]
    fn schema_version_is_recorded() {
        let conn = test_connection();
        create_schema(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn create_schema_preserves_existing_rows() {
        let conn = test_connection();
        create_schema(&conn).unwrap();
        insert_note(&conn, "Kept", "still here");

        create_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(fts_count(&conn, "still"), 1);
    }

    // ===========================================
    // Referential Actions
    // ===========================================

    #[test]
    fn deleting_parent_folder_cascades() {
        let conn = test_connection();
        create_schema(&conn).unwrap();

        conn.execute_batch(
            "INSERT INTO folders (id, name, parent_id, created_at) VALUES (1, 'a', NULL, 0);
             INSERT INTO folders (id, name, parent_id, created_at) VALUES (2, 'b', 1, 0);
             INSERT INTO folders (id, name, parent_id, created_at) VALUES (3, 'c', 2, 0);",
        )
        .unwrap();

        conn.execute("DELETE FROM folders WHERE id = 1", []).unwrap();

        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM folders", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn deleting_folder_detaches_notes() {
        let conn = test_connection();
        create_schema(&conn).unwrap();

        conn.execute_batch(
            "INSERT INTO folders (id, name, parent_id, created_at) VALUES (1, 'a', NULL, 0);
             INSERT INTO folders (id, name, parent_id, created_at) VALUES (2, 'b', 1, 0);
             INSERT INTO notes (id, title, content, folder_id, created_at, updated_at)
                 VALUES (10, 'deep', 'x', 2, 0, 0);",
        )
        .unwrap();

        conn.execute("DELETE FROM folders WHERE id = 1", []).unwrap();

        let folder_id: Option<i64> = conn
            .query_row("SELECT folder_id FROM notes WHERE id = 10", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(folder_id, None);
    }

    // ===========================================
    // FTS Sync
    // ===========================================

    #[test]
    fn insert_trigger_indexes_title_and_content() {
        let conn = test_connection();
        create_schema(&conn).unwrap();
        insert_note(&conn, "Groceries", "buy milk and eggs");

        assert_eq!(fts_count(&conn, "groceries"), 1);
        assert_eq!(fts_count(&conn, "milk"), 1);
    }

    #[test]
    fn fts_rowid_is_note_id() {
        let conn = test_connection();
        create_schema(&conn).unwrap();
        insert_note(&conn, "first", "");
        let id = insert_note(&conn, "second", "unique");

        let rowid: i64 = conn
            .query_row(
                "SELECT rowid FROM notes_fts WHERE notes_fts MATCH 'unique'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(rowid, id);
    }

    #[test]
    fn update_trigger_replaces_entry() {
        let conn = test_connection();
        create_schema(&conn).unwrap();
        let id = insert_note(&conn, "Old", "apples");

        conn.execute(
            "UPDATE notes SET title = 'New', content = 'oranges' WHERE id = ?1",
            [id],
        )
        .unwrap();

        assert_eq!(fts_count(&conn, "apples"), 0);
        assert_eq!(fts_count(&conn, "oranges"), 1);
        check_fts(&conn).unwrap();
    }

    #[test]
    fn delete_trigger_removes_entry() {
        let conn = test_connection();
        create_schema(&conn).unwrap();
        let id = insert_note(&conn, "Gone", "vanishing");

        conn.execute("DELETE FROM notes WHERE id = ?1", [id]).unwrap();

        assert_eq!(fts_count(&conn, "vanishing"), 0);
        check_fts(&conn).unwrap();
    }

    #[test]
    fn rebuild_fts_restores_missing_entries() {
        let conn = test_connection();
        create_schema(&conn).unwrap();

        conn.execute_batch("DROP TRIGGER notes_fts_insert;").unwrap();
        insert_note(&conn, "Unindexed", "bypassed trigger");
        assert_eq!(fts_count(&conn, "bypassed"), 0);

        rebuild_fts(&conn).unwrap();
        assert_eq!(fts_count(&conn, "bypassed"), 1);
    }
}
