//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::ValidationError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `LocalStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Open(#[from] SqliteInitError),
}

/// Errors emitted while stepping through a quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizSessionError {
    #[error("no questions available for quiz")]
    Empty,
    #[error("quiz already finished")]
    Completed,
    #[error("current question already answered")]
    AlreadyAnswered,
    #[error("current question not answered yet")]
    NotAnswered,
    #[error("option {choice} out of range for a question with {options} options")]
    OptionOutOfRange { choice: usize, options: usize },
    #[error("quiz still has unanswered questions")]
    Unfinished,
    #[error(transparent)]
    Store(#[from] StoreError),
}
