//! Statements against the `tag_note` join table.
//!
//! Relationship traversal is always an explicit query here; entities never
//! load their associations implicitly.

use sqlx::SqliteConnection;

use crate::domain::{Note, NoteId, Tag, TagId};
use crate::error::AppError;

/// Repository for note/tag associations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagNoteRepository;

impl TagNoteRepository {
    /// Attaches a tag to a note. Returns `false` if the pair already existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure, including a
    /// foreign-key violation when either side does not exist.
    pub async fn attach(
        &self,
        conn: &mut SqliteConnection,
        tag_id: TagId,
        note_id: NoteId,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("INSERT OR IGNORE INTO tag_note (tag_id, note_id) VALUES (?, ?)")
            .bind(tag_id)
            .bind(note_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Detaches a tag from a note. Returns `false` if the pair was absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn detach(
        &self,
        conn: &mut SqliteConnection,
        tag_id: TagId,
        note_id: NoteId,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tag_note WHERE tag_id = ? AND note_id = ?")
            .bind(tag_id)
            .bind(note_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Tags attached to a note, ordered by tag id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn tags_for_note(
        &self,
        conn: &mut SqliteConnection,
        note_id: NoteId,
    ) -> Result<Vec<Tag>, AppError> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name FROM tags t \
             JOIN tag_note tn ON tn.tag_id = t.id \
             WHERE tn.note_id = ? ORDER BY t.id ASC",
        )
        .bind(note_id)
        .fetch_all(conn)
        .await?;
        Ok(tags)
    }

    /// Notes carrying a tag, ordered by note id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn notes_for_tag(
        &self,
        conn: &mut SqliteConnection,
        tag_id: TagId,
    ) -> Result<Vec<Note>, AppError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT n.id, n.name, n.content, n.last_modified FROM notes n \
             JOIN tag_note tn ON tn.note_id = n.id \
             WHERE tn.tag_id = ? ORDER BY n.id ASC",
        )
        .bind(tag_id)
        .fetch_all(conn)
        .await?;
        Ok(notes)
    }

    /// Removes every association of a note.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn delete_for_note(
        &self,
        conn: &mut SqliteConnection,
        note_id: NoteId,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tag_note WHERE note_id = ?")
            .bind(note_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Removes every association of a tag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn delete_for_tag(
        &self,
        conn: &mut SqliteConnection,
        tag_id: TagId,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tag_note WHERE tag_id = ?")
            .bind(tag_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::persistence::{NoteRepository, TagRepository, connect_in_memory};

    #[tokio::test]
    async fn attach_is_idempotent_and_detach_reports_absence() {
        let Ok(pool) = connect_in_memory().await else {
            panic!("in-memory database");
        };
        let Ok(mut conn) = pool.acquire().await else {
            panic!("acquire");
        };
        let Ok(note) = NoteRepository.insert(&mut conn, Utc::now()).await else {
            panic!("note");
        };
        let Ok(tag) = TagRepository.insert(&mut conn, "work").await else {
            panic!("tag");
        };

        assert!(matches!(TagNoteRepository.attach(&mut conn, tag.id, note.id).await, Ok(true)));
        assert!(matches!(TagNoteRepository.attach(&mut conn, tag.id, note.id).await, Ok(false)));

        let Ok(tags) = TagNoteRepository.tags_for_note(&mut conn, note.id).await else {
            panic!("tags_for_note");
        };
        assert_eq!(tags, vec![tag.clone()]);
        let Ok(notes) = TagNoteRepository.notes_for_tag(&mut conn, tag.id).await else {
            panic!("notes_for_tag");
        };
        assert_eq!(notes.len(), 1);

        assert!(matches!(TagNoteRepository.detach(&mut conn, tag.id, note.id).await, Ok(true)));
        assert!(matches!(TagNoteRepository.detach(&mut conn, tag.id, note.id).await, Ok(false)));
    }

    #[tokio::test]
    async fn attaching_unknown_tag_violates_foreign_key() {
        let Ok(pool) = connect_in_memory().await else {
            panic!("in-memory database");
        };
        let Ok(mut conn) = pool.acquire().await else {
            panic!("acquire");
        };
        let Ok(note) = NoteRepository.insert(&mut conn, Utc::now()).await else {
            panic!("note");
        };
        let result = TagNoteRepository.attach(&mut conn, TagId::new(404), note.id).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn deleting_a_tag_cascades_join_rows() {
        let Ok(pool) = connect_in_memory().await else {
            panic!("in-memory database");
        };
        let Ok(mut conn) = pool.acquire().await else {
            panic!("acquire");
        };
        let Ok(note) = NoteRepository.insert(&mut conn, Utc::now()).await else {
            panic!("note");
        };
        let Ok(tag) = TagRepository.insert(&mut conn, "gone").await else {
            panic!("tag");
        };
        assert!(matches!(TagNoteRepository.attach(&mut conn, tag.id, note.id).await, Ok(true)));
        assert!(matches!(TagRepository.delete(&mut conn, tag.id).await, Ok(1)));

        let Ok(tags) = TagNoteRepository.tags_for_note(&mut conn, note.id).await else {
            panic!("tags_for_note");
        };
        assert!(tags.is_empty());
        assert!(matches!(TagNoteRepository.delete_for_tag(&mut conn, tag.id).await, Ok(0)));
    }
}
