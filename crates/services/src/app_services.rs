use rand::Rng;

use prep_core::Clock;
use prep_core::model::Question;

use crate::config::StoreConfig;
use crate::dashboard::Dashboard;
use crate::error::{QuizSessionError, StoreError};
use crate::local_store::LocalStore;
use crate::quiz_session::QuizSession;
use crate::test_builder::{TestMode, build_test};

/// Everything the UI needs, wired from one configuration.
#[derive(Clone)]
pub struct AppServices {
    config: StoreConfig,
    store: LocalStore,
}

impl AppServices {
    /// Open the configured database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Open` if the database cannot be opened or migrated.
    pub async fn open(config: StoreConfig, clock: Clock) -> Result<Self, StoreError> {
        let store = LocalStore::open(&config.database_url, clock).await?;
        tracing::info!(
            total_sections = config.total_sections,
            test_size = config.test_size,
            "study services ready"
        );
        Ok(Self { config, store })
    }

    #[must_use]
    pub fn with_store(config: StoreConfig, store: LocalStore) -> Self {
        Self { config, store }
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// # Errors
    ///
    /// Returns `StoreError::Storage` if any read fails.
    pub async fn dashboard(&self) -> Result<Dashboard, StoreError> {
        Dashboard::load(&self.store, self.config.total_sections).await
    }

    /// Random test of the configured size.
    #[must_use]
    pub fn random_mode(&self) -> TestMode {
        TestMode::Random {
            size: self.config.test_size,
        }
    }

    /// # Errors
    ///
    /// Returns `QuizSessionError::Empty` for an empty bank.
    pub fn start_quiz<R: Rng + ?Sized>(
        &self,
        bank: &[Question],
        mode: TestMode,
        rng: &mut R,
    ) -> Result<QuizSession, QuizSessionError> {
        QuizSession::new(build_test(bank, mode, rng))
    }

    /// Persist a completed quiz against the configured pass mark.
    ///
    /// # Errors
    ///
    /// See [`QuizSession::finish`].
    pub async fn finish_quiz(&self, session: &mut QuizSession) -> Result<(), QuizSessionError> {
        session.finish(&self.store, self.config.pass_percent).await?;
        Ok(())
    }

    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}
