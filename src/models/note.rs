//! Free-text notes attached to story elements.
//!
//! A note always references an element that was resolved before the write,
//! so there are no dangling notes. Many notes per element, insertion-ordered.

use serde::{Deserialize, Serialize};
use surrealdb::{Datetime, RecordId};

use crate::db::connection::FicnotesDb;
use crate::FicnotesError;

/// A note as stored in database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: RecordId,
    pub element: RecordId,
    pub body: String,
    pub created_at: Datetime,
}

/// Data for creating a new note.
#[derive(Debug, Clone, Serialize)]
pub struct NoteCreate {
    pub element: RecordId,
    pub body: String,
}

/// Create a new note.
pub async fn create_note(db: &FicnotesDb, data: NoteCreate) -> Result<Note, FicnotesError> {
    let result: Option<Note> = db.create("note").content(data).await?;
    result.ok_or_else(|| FicnotesError::Database("Failed to create note".into()))
}

/// List an element's notes in insertion order (oldest first).
pub async fn list_notes(db: &FicnotesDb, element: &RecordId) -> Result<Vec<Note>, FicnotesError> {
    let mut resp = db
        .query("SELECT * FROM note WHERE element = $element ORDER BY created_at ASC")
        .bind(("element", element.clone()))
        .await?;
    let notes: Vec<Note> = resp.take(0)?;
    Ok(notes)
}
