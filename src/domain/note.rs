//! Note aggregate and its detail view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{NoteId, Tag};

/// Display name given to every freshly created note.
pub const DEFAULT_NOTE_NAME: &str = "New Note";

/// Longest accepted note name, in characters.
pub const MAX_NOTE_NAME_LEN: usize = 25;

/// A user-authored text record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Note {
    /// Surrogate key assigned by the store.
    pub id: NoteId,
    /// Display name.
    pub name: String,
    /// Free-text body.
    pub content: String,
    /// Creation time, then refreshed on every content or tag mutation.
    pub last_modified: DateTime<Utc>,
}

/// A note together with the tags currently attached to it.
#[derive(Debug, Clone, Serialize)]
pub struct NoteDetail {
    /// The note itself.
    pub note: Note,
    /// Attached tags, ordered by tag id.
    pub tags: Vec<Tag>,
}

