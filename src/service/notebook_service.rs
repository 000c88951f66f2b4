//! Notebook service: note, tag, and association operations.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::note::MAX_NOTE_NAME_LEN;
use crate::domain::tag::MAX_TAG_NAME_LEN;
use crate::domain::{Note, NoteDetail, NoteId, NoteListing, Preferences, Tag, TagId};
use crate::error::AppError;
use crate::persistence::{NoteRepository, TagNoteRepository, TagRepository};

/// Outcome of a tag create or rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagWrite {
    /// The tag was written.
    Written(Tag),
    /// The name was empty; nothing was written.
    SkippedEmptyName,
}

/// Orchestration layer for every store operation.
///
/// Each mutation follows the pattern: begin transaction → run statements
/// → commit. Returning early with `?` drops the transaction, which rolls
/// it back. Reads run on a plain pooled connection.
#[derive(Debug, Clone)]
pub struct NotebookService {
    pool: SqlitePool,
    notes: NoteRepository,
    tags: TagRepository,
    links: TagNoteRepository,
}

impl NotebookService {
    /// Creates a new `NotebookService` over the given pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            notes: NoteRepository,
            tags: TagRepository,
            links: TagNoteRepository,
        }
    }

    /// Returns a reference to the inner pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ── Notes ───────────────────────────────────────────────────────────

    /// Lists notes filtered and ordered by `prefs`, with the tag data the
    /// list page needs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn list_notes(&self, prefs: &Preferences) -> Result<NoteListing, AppError> {
        let mut conn = self.pool.acquire().await?;
        let notes = self.notes.list(&mut conn, prefs).await?;
        let tags = self.tags.list(&mut conn).await?;
        let search_tags = self.tags.find_many(&mut conn, &prefs.search_tags).await?;
        tracing::debug!(
            count = notes.len(),
            search_tags = prefs.search_tags.len(),
            search_text = %prefs.search_text,
            "notes listed"
        );
        Ok(NoteListing {
            notes,
            tags,
            search_tags,
            preferences: prefs.clone(),
        })
    }

    /// Creates a note with every field at its default.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn create_note(&self) -> Result<Note, AppError> {
        let mut tx = self.pool.begin().await?;
        let note = self.notes.insert(&mut tx, Utc::now()).await?;
        tx.commit().await?;
        tracing::info!(note_id = %note.id, "note created");
        Ok(note)
    }

    /// Fetches a note with its attached tags. `None` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn note_detail(&self, id: NoteId) -> Result<Option<NoteDetail>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let Some(note) = self.notes.find(&mut conn, id).await? else {
            return Ok(None);
        };
        let tags = self.links.tags_for_note(&mut conn, id).await?;
        Ok(Some(NoteDetail { note, tags }))
    }

    /// Replaces a note's name and content and refreshes its timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRequest`] if the name is too long,
    /// [`AppError::NoteNotFound`] if the note does not exist, or
    /// [`AppError::Database`] on database failure.
    pub async fn update_note(
        &self,
        id: NoteId,
        name: &str,
        content: &str,
    ) -> Result<(), AppError> {
        if name.chars().count() > MAX_NOTE_NAME_LEN {
            return Err(AppError::InvalidRequest(format!(
                "note name longer than {MAX_NOTE_NAME_LEN} characters"
            )));
        }
        let mut tx = self.pool.begin().await?;
        if !self.notes.update(&mut tx, id, name, content, Utc::now()).await? {
            return Err(AppError::NoteNotFound(id));
        }
        tx.commit().await?;
        tracing::info!(note_id = %id, "note updated");
        Ok(())
    }

    /// Deletes a note and its associations. Unknown ids are a no-op.
    ///
    /// Returns `true` if a note was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn delete_note(&self, id: NoteId) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let unlinked = self.links.delete_for_note(&mut tx, id).await?;
        let removed = self.notes.delete(&mut tx, id).await? > 0;
        tx.commit().await?;
        if removed {
            tracing::info!(note_id = %id, unlinked, "note deleted");
        } else {
            tracing::debug!(note_id = %id, "delete of unknown note ignored");
        }
        Ok(removed)
    }

    // ── Tags ────────────────────────────────────────────────────────────

    /// Lists every tag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn list_tags(&self) -> Result<Vec<Tag>, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.tags.list(&mut conn).await
    }

    /// Notes carrying the given tag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn notes_for_tag(&self, id: TagId) -> Result<Vec<Note>, AppError> {
        let mut conn = self.pool.acquire().await?;
        self.links.notes_for_tag(&mut conn, id).await
    }

    /// Creates a tag. An empty name writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRequest`] if the name is too long or
    /// [`AppError::Database`] on database failure.
    pub async fn create_tag(&self, name: &str) -> Result<TagWrite, AppError> {
        if name.is_empty() {
            tracing::debug!("tag create with empty name skipped");
            return Ok(TagWrite::SkippedEmptyName);
        }
        check_tag_name(name)?;
        let mut tx = self.pool.begin().await?;
        let tag = self.tags.insert(&mut tx, name).await?;
        tx.commit().await?;
        tracing::info!(tag_id = %tag.id, name, "tag created");
        Ok(TagWrite::Written(tag))
    }

    /// Renames a tag. An empty name writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidRequest`] if the name is too long,
    /// [`AppError::TagNotFound`] if the tag does not exist, or
    /// [`AppError::Database`] on database failure.
    pub async fn rename_tag(&self, id: TagId, name: &str) -> Result<TagWrite, AppError> {
        if name.is_empty() {
            tracing::debug!(tag_id = %id, "tag rename with empty name skipped");
            return Ok(TagWrite::SkippedEmptyName);
        }
        check_tag_name(name)?;
        let mut tx = self.pool.begin().await?;
        if !self.tags.rename(&mut tx, id, name).await? {
            return Err(AppError::TagNotFound(id));
        }
        tx.commit().await?;
        tracing::info!(tag_id = %id, name, "tag renamed");
        Ok(TagWrite::Written(Tag {
            id,
            name: name.to_string(),
        }))
    }

    /// Deletes a tag and its associations. Unknown ids are a no-op.
    ///
    /// Returns `true` if a tag was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn delete_tag(&self, id: TagId) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let unlinked = self.links.delete_for_tag(&mut tx, id).await?;
        let removed = self.tags.delete(&mut tx, id).await? > 0;
        tx.commit().await?;
        if removed {
            tracing::info!(tag_id = %id, unlinked, "tag deleted");
        }
        Ok(removed)
    }

    // ── Associations ────────────────────────────────────────────────────

    /// Attaches a tag to a note and refreshes the note's timestamp.
    /// Attaching an already-attached tag only refreshes the timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NoteNotFound`] / [`AppError::TagNotFound`] if
    /// either side does not exist, or [`AppError::Database`] on database
    /// failure.
    pub async fn attach_tag(&self, note_id: NoteId, tag_id: TagId) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        if self.tags.find(&mut tx, tag_id).await?.is_none() {
            return Err(AppError::TagNotFound(tag_id));
        }
        if !self.notes.touch(&mut tx, note_id, Utc::now()).await? {
            return Err(AppError::NoteNotFound(note_id));
        }
        let added = self.links.attach(&mut tx, tag_id, note_id).await?;
        tx.commit().await?;
        tracing::info!(%note_id, %tag_id, added, "tag attached");
        Ok(())
    }

    /// Detaches a tag from a note and refreshes the note's timestamp.
    /// Detaching a tag that is not attached changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NoteNotFound`] if the note does not exist or
    /// [`AppError::Database`] on database failure.
    pub async fn detach_tag(&self, note_id: NoteId, tag_id: TagId) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        if self.notes.find(&mut tx, note_id).await?.is_none() {
            return Err(AppError::NoteNotFound(note_id));
        }
        if self.links.detach(&mut tx, tag_id, note_id).await? {
            self.notes.touch(&mut tx, note_id, Utc::now()).await?;
            tracing::info!(%note_id, %tag_id, "tag detached");
        } else {
            tracing::debug!(%note_id, %tag_id, "detach of absent tag ignored");
        }
        tx.commit().await?;
        Ok(())
    }
}

fn check_tag_name(name: &str) -> Result<(), AppError> {
    if name.chars().count() > MAX_TAG_NAME_LEN {
        return Err(AppError::InvalidRequest(format!(
            "tag name longer than {MAX_TAG_NAME_LEN} characters"
        )));
    }
    Ok(())
}
