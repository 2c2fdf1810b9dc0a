use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::model::QuizResultId;

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

/// Correct answers out of questions asked, with `score <= total_questions`
/// and `total_questions > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    score: u32,
    total_questions: u32,
}

impl QuizScore {
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidTotal` when `total_questions` is zero and
    /// `ValidationError::ScoreExceedsTotal` when `score > total_questions`.
    pub fn new(score: u32, total_questions: u32) -> Result<Self, ValidationError> {
        if total_questions == 0 {
            return Err(ValidationError::InvalidTotal(0));
        }
        if score > total_questions {
            return Err(ValidationError::ScoreExceedsTotal {
                score: i64::from(score),
                total: i64::from(total_questions),
            });
        }
        Ok(Self {
            score,
            total_questions,
        })
    }

    /// Validates signed integers, as read back from storage or handed over by a
    /// loosely typed caller.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for negative scores, non-positive totals,
    /// values beyond `u32`, or a score above the total.
    pub fn from_raw(score: i64, total_questions: i64) -> Result<Self, ValidationError> {
        if score < 0 {
            return Err(ValidationError::NegativeScore(score));
        }
        if total_questions <= 0 {
            return Err(ValidationError::InvalidTotal(total_questions));
        }
        if score > total_questions {
            return Err(ValidationError::ScoreExceedsTotal {
                score,
                total: total_questions,
            });
        }
        let total = u32::try_from(total_questions)
            .map_err(|_| ValidationError::InvalidTotal(total_questions))?;
        // score <= total, so it fits too
        let score = u32::try_from(score).map_err(|_| ValidationError::NegativeScore(score))?;
        Self::new(score, total)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Percentage for this attempt alone, rounded half up.
    #[must_use]
    pub fn percent(&self) -> u32 {
        crate::stats::rounded_percent(u64::from(self.score), u64::from(self.total_questions))
    }
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

/// One persisted quiz attempt. Attempts are append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    id: QuizResultId,
    score: QuizScore,
    date: DateTime<Utc>,
}

impl QuizResult {
    #[must_use]
    pub fn from_persisted(id: QuizResultId, score: QuizScore, date: DateTime<Utc>) -> Self {
        Self { id, score, date }
    }

    #[must_use]
    pub fn id(&self) -> QuizResultId {
        self.id
    }

    #[must_use]
    pub fn score(&self) -> QuizScore {
        self.score
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_scores() {
        assert_eq!(QuizScore::new(3, 0), Err(ValidationError::InvalidTotal(0)));
        assert_eq!(
            QuizScore::new(11, 10),
            Err(ValidationError::ScoreExceedsTotal {
                score: 11,
                total: 10
            })
        );
        assert_eq!(
            QuizScore::from_raw(-1, 10),
            Err(ValidationError::NegativeScore(-1))
        );
        assert_eq!(
            QuizScore::from_raw(0, -4),
            Err(ValidationError::InvalidTotal(-4))
        );
        assert!(QuizScore::from_raw(0, i64::MAX).is_err());
    }

    #[test]
    fn accepts_perfect_and_zero_scores() {
        assert_eq!(QuizScore::new(10, 10).unwrap().percent(), 100);
        assert_eq!(QuizScore::from_raw(0, 30).unwrap().percent(), 0);
        assert_eq!(QuizScore::new(2, 3).unwrap().percent(), 67);
    }
}
