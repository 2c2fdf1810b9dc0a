use prep_core::model::QuizResult;
use prep_core::stats;

use crate::error::StoreError;
use crate::local_store::LocalStore;

/// Numbers for the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub display_name: Option<String>,
    pub sections_read: usize,
    pub read_percent: u32,
    pub quizzes_taken: usize,
    pub accuracy_percent: u32,
}

impl Dashboard {
    /// Gather the dashboard from the store. `total_sections` is the size of
    /// the handbook the read percentage is measured against.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if any read fails.
    pub async fn load(store: &LocalStore, total_sections: usize) -> Result<Self, StoreError> {
        let display_name = store.user_display_name().await?;
        let sections_read = store.count_read_sections().await?;
        let results = store.list_quiz_results_by_date().await?;

        Ok(Self {
            display_name,
            sections_read,
            read_percent: stats::read_percent(sections_read, total_sections),
            quizzes_taken: results.len(),
            accuracy_percent: stats::pooled_accuracy_percent(
                results.iter().map(QuizResult::score),
            ),
        })
    }

    #[must_use]
    pub fn greeting(&self) -> String {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => format!("Welcome back, {name}!"),
            _ => "Welcome back!".to_owned(),
        }
    }
}
