//! Statements against the `notes` table.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::domain::{Note, NoteId, Preferences};
use crate::error::AppError;

const NOTE_COLUMNS: &str = "n.id, n.name, n.content, n.last_modified";

/// Repository for [`Note`] rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteRepository;

impl NoteRepository {
    /// Inserts a note with the column defaults for name and content.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        now: DateTime<Utc>,
    ) -> Result<Note, AppError> {
        let note = sqlx::query_as::<_, Note>(
            "INSERT INTO notes (last_modified) VALUES (?) \
             RETURNING id, name, content, last_modified",
        )
        .bind(now)
        .fetch_one(conn)
        .await?;
        Ok(note)
    }

    /// Fetches a note by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn find(
        &self,
        conn: &mut SqliteConnection,
        id: NoteId,
    ) -> Result<Option<Note>, AppError> {
        let note = sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes n WHERE n.id = ?"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?;
        Ok(note)
    }

    /// Replaces name and content and stamps `last_modified`.
    ///
    /// Returns `false` if no such note exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn update(
        &self,
        conn: &mut SqliteConnection,
        id: NoteId,
        name: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE notes SET name = ?, content = ?, last_modified = ? WHERE id = ?")
                .bind(name)
                .bind(content)
                .bind(now)
                .bind(id)
                .execute(conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Stamps `last_modified` without touching name or content.
    ///
    /// Returns `false` if no such note exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn touch(
        &self,
        conn: &mut SqliteConnection,
        id: NoteId,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE notes SET last_modified = ? WHERE id = ?")
            .bind(now)
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes a note, returning the number of rows removed (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn delete(&self, conn: &mut SqliteConnection, id: NoteId) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Lists notes matching the session filter in the session order.
    ///
    /// A note passes the tag filter if it carries any selected tag, and
    /// the text filter if its content contains the search text literally
    /// (case-sensitive). Empty filters match everything. Name ascending
    /// sorts before last-modified descending; id ascending breaks the
    /// remaining ties.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn list(
        &self,
        conn: &mut SqliteConnection,
        prefs: &Preferences,
    ) -> Result<Vec<Note>, AppError> {
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {NOTE_COLUMNS} FROM notes n WHERE 1 = 1"));

        if prefs.filters_by_tag() {
            qb.push(
                " AND EXISTS (SELECT 1 FROM tag_note tn WHERE tn.note_id = n.id AND tn.tag_id IN (",
            );
            let mut ids = qb.separated(", ");
            for tag_id in &prefs.search_tags {
                ids.push_bind(*tag_id);
            }
            ids.push_unseparated("))");
        }

        if prefs.filters_by_text() {
            qb.push(" AND instr(n.content, ");
            qb.push_bind(prefs.search_text.clone());
            qb.push(") > 0");
        }

        qb.push(" ORDER BY ");
        if prefs.sort_by_name {
            qb.push("n.name ASC, ");
        }
        if prefs.sort_by_time {
            qb.push("n.last_modified DESC, ");
        }
        qb.push("n.id ASC");

        let notes = qb.build_query_as::<Note>().fetch_all(conn).await?;
        Ok(notes)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use chrono::Duration;
    use sqlx::SqlitePool;

    use super::*;
    use crate::domain::TagId;
    use crate::persistence::{TagNoteRepository, TagRepository, connect_in_memory};

    async fn pool() -> SqlitePool {
        let Ok(pool) = connect_in_memory().await else {
            panic!("in-memory database");
        };
        pool
    }

    async fn seed(pool: &SqlitePool, rows: &[(&str, &str, i64)]) -> Vec<NoteId> {
        let Ok(mut conn) = pool.acquire().await else {
            panic!("acquire");
        };
        let base = Utc::now();
        let mut ids = Vec::new();
        for (name, content, offset_secs) in rows {
            let Ok(note) = NoteRepository.insert(&mut conn, base).await else {
                panic!("insert");
            };
            let at = base + Duration::seconds(*offset_secs);
            let Ok(true) = NoteRepository
                .update(&mut conn, note.id, name, content, at)
                .await
            else {
                panic!("update");
            };
            ids.push(note.id);
        }
        ids
    }

    async fn list(pool: &SqlitePool, prefs: &Preferences) -> Vec<NoteId> {
        let Ok(mut conn) = pool.acquire().await else {
            panic!("acquire");
        };
        let Ok(notes) = NoteRepository.list(&mut conn, prefs).await else {
            panic!("list");
        };
        notes.into_iter().map(|n| n.id).collect()
    }

    #[tokio::test]
    async fn insert_uses_column_defaults() {
        let pool = pool().await;
        let Ok(mut conn) = pool.acquire().await else {
            panic!("acquire");
        };
        let before = Utc::now();
        let Ok(note) = NoteRepository.insert(&mut conn, Utc::now()).await else {
            panic!("insert");
        };
        assert_eq!(note.name, "New Note");
        assert_eq!(note.content, "");
        assert!(note.last_modified >= before);
    }

    #[tokio::test]
    async fn empty_text_matches_same_as_no_text() {
        let pool = pool().await;
        seed(&pool, &[("a", "apple", 0), ("b", "banana", 1), ("c", "", 2)]).await;

        let all = list(&pool, &Preferences::default()).await;
        let mut prefs = Preferences::default();
        prefs.set_search_text("");
        assert_eq!(list(&pool, &prefs).await.len(), all.len());
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn text_filter_is_literal_substring() {
        let pool = pool().await;
        let ids = seed(
            &pool,
            &[("a", "100% done", 0), ("b", "1000 done", 1), ("c", "Done", 2)],
        )
        .await;

        let mut prefs = Preferences::default();
        prefs.set_search_text("0%");
        assert_eq!(list(&pool, &prefs).await, vec![ids[0]]);

        prefs.set_search_text("done");
        assert_eq!(list(&pool, &prefs).await, vec![ids[0], ids[1]]);
    }

    #[tokio::test]
    async fn tag_filter_matches_any_selected_tag() {
        let pool = pool().await;
        let ids = seed(&pool, &[("a", "", 0), ("b", "", 1), ("c", "", 2)]).await;
        let Ok(mut conn) = pool.acquire().await else {
            panic!("acquire");
        };
        let Ok(work) = TagRepository.insert(&mut conn, "work").await else {
            panic!("tag");
        };
        let Ok(home) = TagRepository.insert(&mut conn, "home").await else {
            panic!("tag");
        };
        for (tag, note) in [(work.id, ids[0]), (home.id, ids[1]), (work.id, ids[1])] {
            let Ok(true) = TagNoteRepository.attach(&mut conn, tag, note).await else {
                panic!("attach");
            };
        }
        drop(conn);

        let mut prefs = Preferences::default();
        prefs.add_search_tag(work.id);
        assert_eq!(list(&pool, &prefs).await, vec![ids[0], ids[1]]);

        prefs.add_search_tag(home.id);
        assert_eq!(list(&pool, &prefs).await, vec![ids[0], ids[1]]);

        let mut prefs = Preferences::default();
        prefs.add_search_tag(TagId::new(999));
        assert!(list(&pool, &prefs).await.is_empty());
    }

    #[tokio::test]
    async fn name_sort_then_time_descending() {
        let pool = pool().await;
        let ids = seed(
            &pool,
            &[("beta", "", 0), ("alpha", "", 1), ("beta", "", 5), ("alpha", "", 3)],
        )
        .await;

        let mut prefs = Preferences::default();
        prefs.set_sort(true, true);
        assert_eq!(list(&pool, &prefs).await, vec![ids[3], ids[1], ids[2], ids[0]]);

        prefs.set_sort(false, true);
        assert_eq!(list(&pool, &prefs).await, vec![ids[2], ids[3], ids[1], ids[0]]);

        prefs.set_sort(false, false);
        assert_eq!(list(&pool, &prefs).await, ids);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let pool = pool().await;
        let Ok(mut conn) = pool.acquire().await else {
            panic!("acquire");
        };
        let missing = NoteId::new(41);
        let Ok(updated) = NoteRepository
            .update(&mut conn, missing, "x", "y", Utc::now())
            .await
        else {
            panic!("update");
        };
        assert!(!updated);
        let Ok(deleted) = NoteRepository.delete(&mut conn, missing).await else {
            panic!("delete");
        };
        assert_eq!(deleted, 0);
    }
}
