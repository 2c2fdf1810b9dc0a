use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prep_core::model::{QuizResult, QuizResultId, QuizScore};

use super::{
    SqliteRepository,
    mapping::{conn, map_quiz_row},
};
use crate::repository::{QuizResultRepository, StorageError};

#[async_trait]
impl QuizResultRepository for SqliteRepository {
    async fn append_result(
        &self,
        score: QuizScore,
        date: DateTime<Utc>,
    ) -> Result<QuizResult, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO quiz_results (score, total_questions, date)
                VALUES (?1, ?2, ?3)
            ",
        )
        .bind(i64::from(score.score()))
        .bind(i64::from(score.total_questions()))
        .bind(date)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        let id = u64::try_from(res.last_insert_rowid())
            .map_err(|_| StorageError::Serialization("quiz result id sign overflow".into()))?;
        tracing::debug!(
            id,
            score = score.score(),
            total = score.total_questions(),
            "appended quiz result"
        );
        Ok(QuizResult::from_persisted(QuizResultId::new(id), score, date))
    }

    async fn list_results_by_date(&self) -> Result<Vec<QuizResult>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, score, total_questions, date
                FROM quiz_results
                ORDER BY date ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_quiz_row).collect()
    }
}
