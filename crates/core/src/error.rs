use thiserror::Error;

/// Rejected arguments to a write, or persisted values that break a model invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("section id must not be empty")]
    EmptySectionId,

    #[error("setting key must not be empty")]
    EmptySettingKey,

    #[error("bookmark id must not be empty")]
    EmptyBookmarkId,

    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("unknown bookmark kind: {0}")]
    UnknownBookmarkKind(String),

    #[error("total questions must be positive, got {0}")]
    InvalidTotal(i64),

    #[error("score must not be negative, got {0}")]
    NegativeScore(i64),

    #[error("score ({score}) exceeds total questions ({total})")]
    ScoreExceedsTotal { score: i64, total: i64 },
}
