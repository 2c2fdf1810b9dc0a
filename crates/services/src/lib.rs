#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod flashcards;
pub mod local_store;
pub mod quiz_session;
pub mod test_builder;

pub use prep_core::Clock;

pub use app_services::AppServices;
pub use config::StoreConfig;
pub use dashboard::Dashboard;
pub use error::{QuizSessionError, StoreError};
pub use flashcards::{Face, FlashcardCursor};
pub use local_store::LocalStore;
pub use quiz_session::{AnswerFeedback, QuizReport, QuizSession};
pub use test_builder::{TestMode, build_test};
