use prep_core::model::{
    Bookmark, BookmarkId, BookmarkKind, ContentRef, ProgressRecord, QuizResult, QuizScore,
    SectionId, SettingKey, SettingValue,
};
use prep_core::{Clock, ValidationError, stats};
use storage::Storage;

use crate::error::StoreError;

/// On-device persistence for reading progress, quiz history, bookmarks and
/// settings, plus the numbers derived from them.
///
/// Construct one per process and hand clones to whoever needs it; clones share
/// the same underlying database.
#[derive(Clone)]
pub struct LocalStore {
    clock: Clock,
    storage: Storage,
}

impl LocalStore {
    #[must_use]
    pub fn new(clock: Clock, storage: Storage) -> Self {
        Self { clock, storage }
    }

    /// Open (creating if needed) and migrate the database at `database_url`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Open` if the database cannot be opened or migrated.
    pub async fn open(database_url: &str, clock: Clock) -> Result<Self, StoreError> {
        let storage = Storage::sqlite(database_url).await?;
        Ok(Self::new(clock, storage))
    }

    /// A disposable store that lives only as long as its clones.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(clock, Storage::in_memory())
    }

    /// Same database, different clock.
    #[must_use]
    pub fn with_clock(&self, clock: Clock) -> Self {
        Self::new(clock, self.storage.clone())
    }

    pub async fn close(&self) {
        self.storage.close().await;
    }

    //
    // ─── PROGRESS ──────────────────────────────────────────────────────────────
    //

    /// Mark a section as read now. Repeating the call only refreshes the
    /// completion time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a blank id, `StoreError::Storage`
    /// if the write fails.
    pub async fn record_section_read(&self, section_id: &str) -> Result<ProgressRecord, StoreError> {
        let record = ProgressRecord::new(SectionId::new(section_id)?, self.clock.now());
        self.storage.progress.upsert_progress(&record).await?;
        Ok(record)
    }

    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the read fails.
    pub async fn list_progress(&self) -> Result<Vec<ProgressRecord>, StoreError> {
        Ok(self.storage.progress.list_progress().await?)
    }

    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the read fails.
    pub async fn count_read_sections(&self) -> Result<usize, StoreError> {
        Ok(self.list_progress().await?.len())
    }

    //
    // ─── QUIZ HISTORY ──────────────────────────────────────────────────────────
    //

    /// Append a quiz attempt dated now.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if `total_questions` is zero or
    /// `score > total_questions`; nothing is written in that case.
    pub async fn record_quiz_result(
        &self,
        score: u32,
        total_questions: u32,
    ) -> Result<QuizResult, StoreError> {
        let score = QuizScore::new(score, total_questions)?;
        let result = self
            .storage
            .quiz_results
            .append_result(score, self.clock.now())
            .await?;
        tracing::debug!(id = %result.id(), percent = score.percent(), "quiz result recorded");
        Ok(result)
    }

    /// All attempts, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the read fails.
    pub async fn list_quiz_results_by_date(&self) -> Result<Vec<QuizResult>, StoreError> {
        Ok(self.storage.quiz_results.list_results_by_date().await?)
    }

    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the read fails.
    pub async fn count_quizzes_taken(&self) -> Result<usize, StoreError> {
        Ok(self.list_quiz_results_by_date().await?.len())
    }

    /// Pooled accuracy across every attempt, 0 with no history.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the read fails.
    pub async fn average_accuracy_percent(&self) -> Result<u32, StoreError> {
        let results = self.list_quiz_results_by_date().await?;
        Ok(stats::pooled_accuracy_percent(
            results.iter().map(QuizResult::score),
        ))
    }

    //
    // ─── SETTINGS ──────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a blank key, `StoreError::Storage`
    /// if the write fails.
    pub async fn set_setting(
        &self,
        key: &str,
        value: impl Into<SettingValue>,
    ) -> Result<(), StoreError> {
        let key = SettingKey::new(key)?;
        self.storage.settings.put_setting(&key, &value.into()).await?;
        Ok(())
    }

    /// `Ok(None)` when the key was never set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a blank key, `StoreError::Storage`
    /// if the read fails.
    pub async fn get_setting(&self, key: &str) -> Result<Option<SettingValue>, StoreError> {
        let key = SettingKey::new(key)?;
        Ok(self.storage.settings.get_setting(&key).await?)
    }

    /// The stored display name, if one was saved as text.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the read fails.
    pub async fn user_display_name(&self) -> Result<Option<String>, StoreError> {
        let value = self
            .storage
            .settings
            .get_setting(&SettingKey::user_name())
            .await?;
        Ok(match value {
            Some(SettingValue::Text(name)) => Some(name),
            _ => None,
        })
    }

    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the write fails.
    pub async fn set_user_display_name(&self, name: &str) -> Result<(), StoreError> {
        self.storage
            .settings
            .put_setting(&SettingKey::user_name(), &SettingValue::from(name))
            .await?;
        Ok(())
    }

    /// True until a display name has been saved.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the read fails.
    pub async fn needs_display_name(&self) -> Result<bool, StoreError> {
        Ok(self.user_display_name().await?.is_none())
    }

    /// Save a name typed by the user, trimmed. Blank input is rejected.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for blank input, `StoreError::Storage`
    /// if the write fails.
    pub async fn submit_display_name(&self, raw: &str) -> Result<String, StoreError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyDisplayName.into());
        }
        self.set_user_display_name(name).await?;
        tracing::info!("display name saved");
        Ok(name.to_owned())
    }

    //
    // ─── BOOKMARKS ─────────────────────────────────────────────────────────────
    //

    /// Bookmark a section or flashcard. Bookmarking the same target again
    /// refreshes its timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a blank content key,
    /// `StoreError::Storage` if the write fails.
    pub async fn add_bookmark(
        &self,
        kind: BookmarkKind,
        content: ContentRef,
    ) -> Result<Bookmark, StoreError> {
        let bookmark = Bookmark::for_content(kind, content, self.clock.now())?;
        self.storage.bookmarks.upsert_bookmark(&bookmark).await?;
        Ok(bookmark)
    }

    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a blank id, `StoreError::Storage`
    /// if the read fails.
    pub async fn get_bookmark(&self, id: &str) -> Result<Option<Bookmark>, StoreError> {
        let id = BookmarkId::new(id)?;
        Ok(self.storage.bookmarks.get_bookmark(&id).await?)
    }

    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the read fails.
    pub async fn list_bookmarks(&self) -> Result<Vec<Bookmark>, StoreError> {
        Ok(self.storage.bookmarks.list_bookmarks().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use prep_core::time::{fixed_clock, fixed_now};

    #[tokio::test]
    async fn repeat_reads_count_once() {
        let store = LocalStore::in_memory(fixed_clock());
        store.record_section_read("ch1-s1").await.unwrap();
        store.record_section_read("ch1-s1").await.unwrap();
        assert_eq!(store.count_read_sections().await.unwrap(), 1);

        store.record_section_read("ch1-s2").await.unwrap();
        assert_eq!(store.count_read_sections().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn later_read_moves_completion_time() {
        let store = LocalStore::in_memory(fixed_clock());
        store.record_section_read("ch4-s1").await.unwrap();
        let later = store.with_clock(Clock::fixed(fixed_now() + Duration::days(2)));
        later.record_section_read("ch4-s1").await.unwrap();

        let progress = store.list_progress().await.unwrap();
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].completed_at(), fixed_now() + Duration::days(2));
    }

    #[tokio::test]
    async fn blank_section_is_rejected() {
        let store = LocalStore::in_memory(fixed_clock());
        let err = store.record_section_read("   ").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::EmptySectionId)
        ));
    }

    #[tokio::test]
    async fn invalid_scores_write_nothing() {
        let store = LocalStore::in_memory(fixed_clock());
        assert!(matches!(
            store.record_quiz_result(11, 10).await,
            Err(StoreError::Validation(ValidationError::ScoreExceedsTotal { .. }))
        ));
        assert!(matches!(
            store.record_quiz_result(0, 0).await,
            Err(StoreError::Validation(ValidationError::InvalidTotal(0)))
        ));
        assert_eq!(store.count_quizzes_taken().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn display_name_ignores_non_text_values() {
        let store = LocalStore::in_memory(fixed_clock());
        assert!(store.needs_display_name().await.unwrap());

        store.set_setting("userName", 42.0).await.unwrap();
        assert_eq!(store.user_display_name().await.unwrap(), None);

        store.set_user_display_name("Sam").await.unwrap();
        assert_eq!(store.user_display_name().await.unwrap().as_deref(), Some("Sam"));
        assert!(!store.needs_display_name().await.unwrap());
    }

    #[tokio::test]
    async fn submitted_names_are_trimmed() {
        let store = LocalStore::in_memory(fixed_clock());
        assert!(matches!(
            store.submit_display_name("  \t").await,
            Err(StoreError::Validation(ValidationError::EmptyDisplayName))
        ));
        assert!(store.needs_display_name().await.unwrap());

        let saved = store.submit_display_name("  Alex ").await.unwrap();
        assert_eq!(saved, "Alex");
        assert_eq!(
            store.get_setting("userName").await.unwrap(),
            Some(SettingValue::from("Alex"))
        );
    }

    #[tokio::test]
    async fn bookmarking_twice_keeps_one_entry() {
        let store = LocalStore::in_memory(fixed_clock());
        let first = store
            .add_bookmark(BookmarkKind::Section, ContentRef::Key("ch2-s1".into()))
            .await
            .unwrap();
        store
            .add_bookmark(BookmarkKind::Section, ContentRef::Key("ch2-s1".into()))
            .await
            .unwrap();
        store
            .add_bookmark(BookmarkKind::Flashcard, ContentRef::Index(3))
            .await
            .unwrap();

        assert_eq!(store.list_bookmarks().await.unwrap().len(), 2);
        assert_eq!(
            store.get_bookmark("section:ch2-s1").await.unwrap(),
            Some(first)
        );
        assert_eq!(store.get_bookmark("flashcard:9").await.unwrap(), None);
    }
}
