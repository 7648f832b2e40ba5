//! NoteStore trait implementation for SqliteStore.

use super::SqliteStore;
use super::rows::{
    FOLDER_COLUMNS, NOTE_COLUMNS, fetch_folder, fetch_note, now, query_folders, query_notes,
};
use crate::domain::{Folder, FolderId, FolderNode, Note, NoteId};
use crate::store::{
    ConnectionStatus, NoteStore, SearchOptions, SearchResult, StoreError, StoreResult,
    match_expression,
};
use rusqlite::params;
use std::collections::HashMap;

/// Guard against runaway recursion when walking parent links.
const MAX_FOLDER_DEPTH: i64 = 1024;

impl NoteStore for SqliteStore {
    fn test_connection(&self) -> StoreResult<ConnectionStatus> {
        self.conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(ConnectionStatus::ok())
    }

    // ===========================================
    // Folders
    // ===========================================

    fn create_folder(&mut self, name: &str, parent_id: Option<FolderId>) -> StoreResult<Folder> {
        let created_at = now();
        let tx = self.transaction()?;
        let id = tx.insert(
            "INSERT INTO folders (name, parent_id, created_at) VALUES (?1, ?2, ?3)",
            params![name, parent_id, created_at.timestamp()],
        )?;
        tx.commit()?;

        let id = FolderId::new(id);
        tracing::debug!(%id, name, "created folder");
        Ok(Folder::new(id, name, parent_id, created_at))
    }

    fn get_folder(&self, id: FolderId) -> StoreResult<Option<Folder>> {
        fetch_folder(&self.conn, id)
    }

    fn get_folders(&self) -> StoreResult<Vec<Folder>> {
        query_folders(
            &self.conn,
            &format!("SELECT {FOLDER_COLUMNS} FROM folders ORDER BY name, id"),
            [],
        )
    }

    fn get_child_folders(&self, parent_id: Option<FolderId>) -> StoreResult<Vec<Folder>> {
        query_folders(
            &self.conn,
            &format!(
                "SELECT {FOLDER_COLUMNS} FROM folders
                 WHERE parent_id IS ?1
                 ORDER BY name, id"
            ),
            [parent_id],
        )
    }

    fn rename_folder(&mut self, id: FolderId, name: &str) -> StoreResult<bool> {
        let tx = self.transaction()?;
        let changed = tx.execute(
            "UPDATE folders SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;
        tx.commit()?;

        tracing::debug!(%id, name, changed, "renamed folder");
        Ok(changed > 0)
    }

    fn delete_folder(&mut self, id: FolderId) -> StoreResult<bool> {
        // Descendants go via ON DELETE CASCADE, notes are detached via ON DELETE SET NULL.
        let tx = self.transaction()?;
        let changed = tx.execute("DELETE FROM folders WHERE id = ?1", [id])?;
        tx.commit()?;

        tracing::debug!(%id, changed, "deleted folder");
        Ok(changed > 0)
    }

    fn move_folder(&mut self, id: FolderId, new_parent: Option<FolderId>) -> StoreResult<bool> {
        let tx = self.transaction()?;

        if let Some(target) = new_parent {
            let inside: bool = tx.conn().query_row(
                "WITH RECURSIVE subtree(id) AS (
                     SELECT id FROM folders WHERE id = ?1
                     UNION
                     SELECT f.id FROM folders f JOIN subtree s ON f.parent_id = s.id
                 )
                 SELECT EXISTS(SELECT 1 FROM subtree WHERE id = ?2)",
                [id, target],
                |row| row.get(0),
            )?;
            if inside {
                return Err(StoreError::InvalidMove { folder: id, target });
            }
        }

        let changed = tx.execute(
            "UPDATE folders SET parent_id = ?1 WHERE id = ?2",
            params![new_parent, id],
        )?;
        tx.commit()?;

        tracing::debug!(%id, ?new_parent, changed, "moved folder");
        Ok(changed > 0)
    }

    // ===========================================
    // Notes
    // ===========================================

    fn create_note(
        &mut self,
        title: &str,
        content: &str,
        folder_id: Option<FolderId>,
    ) -> StoreResult<Note> {
        let created_at = now();
        // The insert trigger writes the index entry in the same statement.
        let tx = self.transaction()?;
        let id = tx.insert(
            "INSERT INTO notes (title, content, folder_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![title, content, folder_id, created_at.timestamp()],
        )?;
        tx.commit()?;

        let id = NoteId::new(id);
        tracing::debug!(%id, title, ?folder_id, "created note");
        Ok(Note::new(id, title, content, folder_id, created_at, created_at))
    }

    fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        fetch_note(&self.conn, id)
    }

    fn update_note(&mut self, id: NoteId, title: &str, content: &str) -> StoreResult<Option<Note>> {
        let tx = self.transaction()?;
        let changed = tx.execute(
            "UPDATE notes SET title = ?1, content = ?2, updated_at = ?3 WHERE id = ?4",
            params![title, content, now().timestamp(), id],
        )?;
        if changed == 0 {
            tx.rollback()?;
            return Ok(None);
        }

        let note = fetch_note(tx.conn(), id)?;
        tx.commit()?;

        tracing::debug!(%id, title, "updated note");
        Ok(note)
    }

    fn delete_note(&mut self, id: NoteId) -> StoreResult<bool> {
        let tx = self.transaction()?;
        let changed = tx.execute("DELETE FROM notes WHERE id = ?1", [id])?;
        tx.commit()?;

        tracing::debug!(%id, changed, "deleted note");
        Ok(changed > 0)
    }

    fn move_note(&mut self, id: NoteId, folder_id: Option<FolderId>) -> StoreResult<Option<Note>> {
        let tx = self.transaction()?;
        let changed = tx.execute(
            "UPDATE notes SET folder_id = ?1, updated_at = ?2 WHERE id = ?3",
            params![folder_id, now().timestamp(), id],
        )?;
        if changed == 0 {
            tx.rollback()?;
            return Ok(None);
        }

        let note = fetch_note(tx.conn(), id)?;
        tx.commit()?;

        tracing::debug!(%id, ?folder_id, "moved note");
        Ok(note)
    }

    fn get_notes_in_folder(&self, folder_id: FolderId) -> StoreResult<Vec<Note>> {
        query_notes(
            &self.conn,
            &format!(
                "SELECT {NOTE_COLUMNS} FROM notes
                 WHERE folder_id = ?1 OR folder_id IS NULL
                 ORDER BY updated_at DESC, id DESC"
            ),
            [folder_id],
        )
    }

    fn get_notes_directly_in(&self, folder_id: Option<FolderId>) -> StoreResult<Vec<Note>> {
        query_notes(
            &self.conn,
            &format!(
                "SELECT {NOTE_COLUMNS} FROM notes
                 WHERE folder_id IS ?1
                 ORDER BY title, id"
            ),
            [folder_id],
        )
    }

    fn note_ancestors(&self, id: NoteId) -> StoreResult<Vec<FolderId>> {
        let mut stmt = self.conn.prepare(
            "WITH RECURSIVE chain(id, parent_id, depth) AS (
                 SELECT f.id, f.parent_id, 0
                 FROM folders f JOIN notes n ON n.folder_id = f.id
                 WHERE n.id = ?1
                 UNION ALL
                 SELECT f.id, f.parent_id, c.depth + 1
                 FROM folders f JOIN chain c ON f.id = c.parent_id
                 WHERE c.depth < ?2
             )
             SELECT id FROM chain ORDER BY depth",
        )?;
        let chain = stmt
            .query_map(params![id, MAX_FOLDER_DEPTH], |row| row.get::<_, FolderId>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if chain.len() as i64 > MAX_FOLDER_DEPTH {
            return Err(StoreError::InvalidData(format!(
                "folder chain of note {id} exceeds {MAX_FOLDER_DEPTH} levels"
            )));
        }
        Ok(chain)
    }

    fn folder_tree(&self) -> StoreResult<Vec<FolderNode>> {
        let mut children: HashMap<Option<FolderId>, Vec<Folder>> = HashMap::new();
        for folder in self.get_folders()? {
            children.entry(folder.parent_id()).or_default().push(folder);
        }

        let mut notes: HashMap<FolderId, Vec<Note>> = HashMap::new();
        for note in query_notes(
            &self.conn,
            &format!(
                "SELECT {NOTE_COLUMNS} FROM notes
                 WHERE folder_id IS NOT NULL
                 ORDER BY title, id"
            ),
            [],
        )? {
            if let Some(folder_id) = note.folder_id() {
                notes.entry(folder_id).or_default().push(note);
            }
        }

        Ok(build_nodes(None, &mut children, &mut notes))
    }

    // ===========================================
    // Search
    // ===========================================

    fn search_notes_with(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> StoreResult<Vec<SearchResult>> {
        let Some(expr) = match_expression(query) else {
            return Ok(Vec::new());
        };

        // Weights: title=10, content=1. bm25 is lower-is-better, so negate it.
        let mut stmt = self.conn.prepare(
            "SELECT
                n.id,
                n.title,
                snippet(notes_fts, 1, ?2, ?3, '...', 64) AS snippet,
                -bm25(notes_fts, 10.0, 1.0) AS score
             FROM notes_fts
             JOIN notes n ON n.id = notes_fts.rowid
             WHERE notes_fts MATCH ?1
             ORDER BY score DESC, n.id
             LIMIT ?4",
        )?;

        let limit = i64::try_from(options.limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(
                params![
                    expr,
                    options.highlight_open,
                    options.highlight_close,
                    limit
                ],
                |row| {
                    Ok(SearchResult::new(
                        row.get::<_, NoteId>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, f64>(3)?,
                    ))
                },
            )
            .map_err(map_fts_error)?;

        let results = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(map_fts_error)?;

        tracing::debug!(query, hits = results.len(), "searched notes");
        Ok(results)
    }
}

/// Classifies FTS5 parse failures as query errors rather than database errors.
fn map_fts_error(err: rusqlite::Error) -> StoreError {
    let msg = err.to_string();
    if msg.contains("fts5") || msg.contains("syntax") {
        StoreError::InvalidQuery(msg)
    } else {
        StoreError::Database(err)
    }
}

/// Assembles the nodes under `parent`, consuming entries from both maps.
fn build_nodes(
    parent: Option<FolderId>,
    children: &mut HashMap<Option<FolderId>, Vec<Folder>>,
    notes: &mut HashMap<FolderId, Vec<Note>>,
) -> Vec<FolderNode> {
    let Some(folders) = children.remove(&parent) else {
        return Vec::new();
    };

    folders
        .into_iter()
        .map(|folder| {
            let id = folder.id();
            let mut node = FolderNode::new(folder);
            node.notes = notes.remove(&id).unwrap_or_default();
            node.children = build_nodes(Some(id), children, notes);
            node
        })
        .collect()
}
