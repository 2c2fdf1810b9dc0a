//! Derived numbers shown on the dashboard.

use crate::model::QuizScore;

/// `round(100 * part / whole)` with halves rounded up; 0 when `whole` is 0.
#[must_use]
pub fn rounded_percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = (200 * u128::from(part) + u128::from(whole)) / (2 * u128::from(whole));
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Pooled accuracy: total correct over total asked, across every attempt.
///
/// Attempts are weighted by their question count, so (10/10, 0/20) gives 33,
/// not the 50 a mean of per-attempt percentages would.
#[must_use]
pub fn pooled_accuracy_percent<I>(scores: I) -> u32
where
    I: IntoIterator<Item = QuizScore>,
{
    let (correct, asked) = scores.into_iter().fold((0_u64, 0_u64), |(c, a), s| {
        (
            c + u64::from(s.score()),
            a + u64::from(s.total_questions()),
        )
    });
    rounded_percent(correct, asked)
}

/// Share of the handbook read, capped at 100.
#[must_use]
pub fn read_percent(sections_read: usize, total_sections: usize) -> u32 {
    let read = u64::try_from(sections_read).unwrap_or(u64::MAX);
    let total = u64::try_from(total_sections).unwrap_or(u64::MAX);
    rounded_percent(read, total).min(100)
}
