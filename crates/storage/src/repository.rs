use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prep_core::model::{
    Bookmark, BookmarkId, ProgressRecord, QuizResult, QuizResultId, QuizScore, SectionId,
    SettingKey, SettingValue,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::sqlite::SqliteRepository;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The engine failed or is unavailable (closed, busy, out of space).
    #[error("connection error: {0}")]
    Connection(String),

    /// A stored row no longer decodes into a valid record.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Sections read, keyed by section id.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Insert or replace the record for its section.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;

    /// All progress records, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read or decode failures.
    async fn list_progress(&self) -> Result<Vec<ProgressRecord>, StorageError>;
}

/// Append-only quiz history.
#[async_trait]
pub trait QuizResultRepository: Send + Sync {
    /// Append an attempt and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the attempt cannot be stored.
    async fn append_result(
        &self,
        score: QuizScore,
        date: DateTime<Utc>,
    ) -> Result<QuizResult, StorageError>;

    /// All attempts, oldest first (ties broken by id).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read or decode failures.
    async fn list_results_by_date(&self) -> Result<Vec<QuizResult>, StorageError>;
}

#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the bookmark cannot be stored.
    async fn upsert_bookmark(&self, bookmark: &Bookmark) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on read or decode failures.
    async fn get_bookmark(&self, id: &BookmarkId) -> Result<Option<Bookmark>, StorageError>;

    /// Bookmarks ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read or decode failures.
    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>, StorageError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn put_setting(&self, key: &SettingKey, value: &SettingValue)
    -> Result<(), StorageError>;

    /// `Ok(None)` when the key was never written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on read or decode failures.
    async fn get_setting(&self, key: &SettingKey) -> Result<Option<SettingValue>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<HashMap<SectionId, ProgressRecord>>>,
    quiz_results: Arc<Mutex<Vec<QuizResult>>>,
    bookmarks: Arc<Mutex<HashMap<BookmarkId, Bookmark>>>,
    settings: Arc<Mutex<HashMap<SettingKey, SettingValue>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self.progress.lock().map_err(poisoned)?;
        guard.insert(record.section_id().clone(), record.clone());
        Ok(())
    }

    async fn list_progress(&self) -> Result<Vec<ProgressRecord>, StorageError> {
        let guard = self.progress.lock().map_err(poisoned)?;
        Ok(guard.values().cloned().collect())
    }
}

#[async_trait]
impl QuizResultRepository for InMemoryRepository {
    async fn append_result(
        &self,
        score: QuizScore,
        date: DateTime<Utc>,
    ) -> Result<QuizResult, StorageError> {
        let mut guard = self.quiz_results.lock().map_err(poisoned)?;
        let next = u64::try_from(guard.len())
            .map_err(|_| StorageError::Serialization("quiz id overflow".into()))?
            + 1;
        let result = QuizResult::from_persisted(QuizResultId::new(next), score, date);
        guard.push(result.clone());
        Ok(result)
    }

    async fn list_results_by_date(&self) -> Result<Vec<QuizResult>, StorageError> {
        let guard = self.quiz_results.lock().map_err(poisoned)?;
        let mut out = guard.clone();
        out.sort_by_key(|r| (r.date(), r.id()));
        Ok(out)
    }
}

#[async_trait]
impl BookmarkRepository for InMemoryRepository {
    async fn upsert_bookmark(&self, bookmark: &Bookmark) -> Result<(), StorageError> {
        let mut guard = self.bookmarks.lock().map_err(poisoned)?;
        guard.insert(bookmark.id().clone(), bookmark.clone());
        Ok(())
    }

    async fn get_bookmark(&self, id: &BookmarkId) -> Result<Option<Bookmark>, StorageError> {
        let guard = self.bookmarks.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    async fn list_bookmarks(&self) -> Result<Vec<Bookmark>, StorageError> {
        let guard = self.bookmarks.lock().map_err(poisoned)?;
        let mut out: Vec<Bookmark> = guard.values().cloned().collect();
        out.sort_by(|a, b| (a.created_at(), a.id()).cmp(&(b.created_at(), b.id())));
        Ok(out)
    }
}

#[async_trait]
impl SettingsRepository for InMemoryRepository {
    async fn put_setting(
        &self,
        key: &SettingKey,
        value: &SettingValue,
    ) -> Result<(), StorageError> {
        let mut guard = self.settings.lock().map_err(poisoned)?;
        guard.insert(key.clone(), value.clone());
        Ok(())
    }

    async fn get_setting(&self, key: &SettingKey) -> Result<Option<SettingValue>, StorageError> {
        let guard = self.settings.lock().map_err(poisoned)?;
        Ok(guard.get(key).cloned())
    }
}

/// The four collections behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub quiz_results: Arc<dyn QuizResultRepository>,
    pub bookmarks: Arc<dyn BookmarkRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub(crate) sqlite: Option<SqliteRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    /// Wire every collection to one repository value.
    pub fn from_repository<R>(repo: R) -> Self
    where
        R: ProgressRepository
            + QuizResultRepository
            + BookmarkRepository
            + SettingsRepository
            + Clone
            + 'static,
    {
        Self {
            progress: Arc::new(repo.clone()),
            quiz_results: Arc::new(repo.clone()),
            bookmarks: Arc::new(repo.clone()),
            settings: Arc::new(repo),
            sqlite: None,
        }
    }

    /// Release the underlying database, if any. Later calls fail with
    /// `StorageError::Connection`.
    pub async fn close(&self) {
        if let Some(repo) = &self.sqlite {
            repo.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use prep_core::time::fixed_now;

    #[tokio::test]
    async fn progress_upsert_keeps_one_record_per_section() {
        let repo = InMemoryRepository::new();
        let id = SectionId::new("ch1-s1").unwrap();
        repo.upsert_progress(&ProgressRecord::new(id.clone(), fixed_now()))
            .await
            .unwrap();
        let later = fixed_now() + Duration::hours(1);
        repo.upsert_progress(&ProgressRecord::new(id, later))
            .await
            .unwrap();

        let all = repo.list_progress().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].completed_at(), later);
    }

    #[tokio::test]
    async fn quiz_results_come_back_by_date() {
        let repo = InMemoryRepository::new();
        let now = fixed_now();
        let late = repo
            .append_result(QuizScore::new(3, 10).unwrap(), now + Duration::days(1))
            .await
            .unwrap();
        let early = repo
            .append_result(QuizScore::new(8, 10).unwrap(), now)
            .await
            .unwrap();
        assert_ne!(late.id(), early.id());

        let listed = repo.list_results_by_date().await.unwrap();
        assert_eq!(listed, vec![early, late]);
    }
}
