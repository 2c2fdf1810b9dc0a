use async_trait::async_trait;
use prep_core::model::{Bookmark, BookmarkId};

use super::{
    SqliteRepository,
    mapping::{conn, content_columns, map_bookmark_row},
};
use crate::repository::{BookmarkRepository, StorageError};

#[async_trait]
impl BookmarkRepository for SqliteRepository {
    async fn upsert_bookmark(&self, bookmark: &Bookmark) -> Result<(), StorageError> {
        let (content_key, content_index) = content_columns(bookmark.content())?;
        sqlx::query(
            r"
                INSERT INTO bookmarks (id, kind, content_key, content_index, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(id) DO UPDATE SET
                    kind = excluded.kind,
                    content_key = excluded.content_key,
                    content_index = excluded.content_index,
                    created_at = excluded.created_at
            ",
        )
        .bind(bookmark.id().as_str())
        .bind(bookmark.kind().as_str())
        .bind(content_key)
        .bind(content_index)
        .bind(bookmark.created_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        tracing::debug!(id = %bookmark.id(), "stored bookmark");
        Ok(())
    }

    async fn get_bookmark(&self, id: &BookmarkId) -> Result<Option<Bookmark>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, kind, content_key, content_index, created_at
                FROM bookmarks
                WHERE id = ?1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_bookmark_row).transpose()
    }

    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, kind, content_key, content_index, created_at
                FROM bookmarks
                ORDER BY created_at ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_bookmark_row).collect()
    }
}
