//! Row mapping and read queries shared by the store operations.
//!
//! These take a plain `&Connection` so they can run both on the store and
//! inside an open [`Transaction`](super::Transaction).

use crate::domain::{Folder, FolderId, Note, NoteId};
use crate::store::StoreResult;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Params, Row};

pub(super) const FOLDER_COLUMNS: &str = "id, name, parent_id, created_at";
pub(super) const NOTE_COLUMNS: &str = "id, title, content, folder_id, created_at, updated_at";

/// Current time truncated to whole seconds, the precision stored on disk.
pub(super) fn now() -> DateTime<Utc> {
    let secs = Utc::now().timestamp();
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let secs: i64 = row.get(idx)?;
    DateTime::from_timestamp(secs, 0).ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, secs))
}

pub(super) fn folder_from_row(row: &Row<'_>) -> rusqlite::Result<Folder> {
    Ok(Folder::new(
        row.get::<_, FolderId>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, Option<FolderId>>(2)?,
        timestamp_at(row, 3)?,
    ))
}

pub(super) fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note::new(
        row.get::<_, NoteId>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, String>(2)?,
        row.get::<_, Option<FolderId>>(3)?,
        timestamp_at(row, 4)?,
        timestamp_at(row, 5)?,
    ))
}

pub(super) fn fetch_folder(conn: &Connection, id: FolderId) -> StoreResult<Option<Folder>> {
    let folder = conn
        .query_row(
            &format!("SELECT {FOLDER_COLUMNS} FROM folders WHERE id = ?1"),
            [id],
            folder_from_row,
        )
        .optional()?;
    Ok(folder)
}

pub(super) fn fetch_note(conn: &Connection, id: NoteId) -> StoreResult<Option<Note>> {
    let note = conn
        .query_row(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
            [id],
            note_from_row,
        )
        .optional()?;
    Ok(note)
}

/// Runs a folder query; `sql` must select [`FOLDER_COLUMNS`] in order.
pub(super) fn query_folders(
    conn: &Connection,
    sql: &str,
    params: impl Params,
) -> StoreResult<Vec<Folder>> {
    let mut stmt = conn.prepare(sql)?;
    let folders = stmt
        .query_map(params, folder_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(folders)
}

/// Runs a note query; `sql` must select [`NOTE_COLUMNS`] in order.
pub(super) fn query_notes(
    conn: &Connection,
    sql: &str,
    params: impl Params,
) -> StoreResult<Vec<Note>> {
    let mut stmt = conn.prepare(sql)?;
    let notes = stmt
        .query_map(params, note_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(notes)
}
