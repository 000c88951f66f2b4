//! Statements against the `tags` table.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::domain::{Tag, TagId};
use crate::error::AppError;

/// Repository for [`Tag`] rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagRepository;

impl TagRepository {
    /// Inserts a tag with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn insert(&self, conn: &mut SqliteConnection, name: &str) -> Result<Tag, AppError> {
        let tag = sqlx::query_as::<_, Tag>("INSERT INTO tags (name) VALUES (?) RETURNING id, name")
            .bind(name)
            .fetch_one(conn)
            .await?;
        Ok(tag)
    }

    /// Fetches a tag by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn find(
        &self,
        conn: &mut SqliteConnection,
        id: TagId,
    ) -> Result<Option<Tag>, AppError> {
        let tag = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(tag)
    }

    /// Fetches the tags whose ids appear in `ids`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn find_many(
        &self,
        conn: &mut SqliteConnection,
        ids: &[TagId],
    ) -> Result<Vec<Tag>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT id, name FROM tags WHERE id IN (");
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id ASC");
        let tags = qb.build_query_as::<Tag>().fetch_all(conn).await?;
        Ok(tags)
    }

    /// Lists every tag, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn list(&self, conn: &mut SqliteConnection) -> Result<Vec<Tag>, AppError> {
        let tags = sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY id ASC")
            .fetch_all(conn)
            .await?;
        Ok(tags)
    }

    /// Renames a tag. Returns `false` if no such tag exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn rename(
        &self,
        conn: &mut SqliteConnection,
        id: TagId,
        name: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE tags SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes a tag, returning the number of rows removed (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on database failure.
    pub async fn delete(&self, conn: &mut SqliteConnection, id: TagId) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::connect_in_memory;

    #[tokio::test]
    async fn names_are_not_unique() {
        let Ok(pool) = connect_in_memory().await else {
            panic!("in-memory database");
        };
        let Ok(mut conn) = pool.acquire().await else {
            panic!("acquire");
        };
        let Ok(a) = TagRepository.insert(&mut conn, "dup").await else {
            panic!("insert");
        };
        let Ok(b) = TagRepository.insert(&mut conn, "dup").await else {
            panic!("insert");
        };
        assert_ne!(a.id, b.id);

        let Ok(found) = TagRepository.find_many(&mut conn, &[b.id, TagId::new(77)]).await else {
            panic!("find_many");
        };
        assert_eq!(found, vec![b]);
    }

    #[tokio::test]
    async fn rename_missing_tag_reports_false() {
        let Ok(pool) = connect_in_memory().await else {
            panic!("in-memory database");
        };
        let Ok(mut conn) = pool.acquire().await else {
            panic!("acquire");
        };
        let Ok(renamed) = TagRepository.rename(&mut conn, TagId::new(3), "x").await else {
            panic!("rename");
        };
        assert!(!renamed);
    }
}
