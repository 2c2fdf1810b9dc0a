use async_trait::async_trait;
use prep_core::model::ProgressRecord;

use super::{
    SqliteRepository,
    mapping::{conn, map_progress_row},
};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO section_progress (section_id, completed_at)
                VALUES (?1, ?2)
                ON CONFLICT(section_id) DO UPDATE SET
                    completed_at = excluded.completed_at
            ",
        )
        .bind(record.section_id().as_str())
        .bind(record.completed_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        tracing::debug!(section = %record.section_id(), "recorded section progress");
        Ok(())
    }

    async fn list_progress(&self) -> Result<Vec<ProgressRecord>, StorageError> {
        let rows = sqlx::query("SELECT section_id, completed_at FROM section_progress")
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        rows.iter().map(map_progress_row).collect()
    }
}
