use prep_core::model::{Question, QuizResult};

use crate::error::QuizSessionError;
use crate::local_store::LocalStore;

/// What the user learns after picking an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_answer: usize,
    pub explanation: String,
}

/// Outcome of a finished quiz, after it has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizReport {
    pub result: QuizResult,
    pub percent: u32,
    pub passed: bool,
}

/// In-memory walk through a built test, one question at a time.
///
/// Each question takes exactly one answer; the score is persisted once via
/// [`QuizSession::finish`].
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    selected: Option<usize>,
    score: u32,
    report: Option<QuizReport>,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `QuizSessionError::Empty` if no questions are provided.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizSessionError> {
        if questions.is_empty() {
            return Err(QuizSessionError::Empty);
        }
        Ok(Self {
            questions,
            current: 0,
            selected: None,
            score: 0,
            report: None,
        })
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() {
            return None;
        }
        self.questions.get(self.current)
    }

    /// Zero-based index of the question on screen.
    #[must_use]
    pub fn position(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.report.is_some()
    }

    #[must_use]
    pub fn report(&self) -> Option<&QuizReport> {
        self.report.as_ref()
    }

    /// Lock in `choice` for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Completed` once the quiz is finished,
    /// `AlreadyAnswered` on a second answer, and `OptionOutOfRange` for an
    /// option the question does not have.
    pub fn answer(&mut self, choice: usize) -> Result<AnswerFeedback, QuizSessionError> {
        if self.is_complete() {
            return Err(QuizSessionError::Completed);
        }
        if self.selected.is_some() {
            return Err(QuizSessionError::AlreadyAnswered);
        }
        let question = &self.questions[self.current];
        if choice >= question.options.len() {
            return Err(QuizSessionError::OptionOutOfRange {
                choice,
                options: question.options.len(),
            });
        }

        let correct = question.is_correct(choice);
        if correct {
            self.score += 1;
        }
        self.selected = Some(choice);

        Ok(AnswerFeedback {
            correct,
            correct_answer: question.correct_answer,
            explanation: question.explanation.clone(),
        })
    }

    /// Move to the next question. Returns `false` on the last question, which
    /// is left in place for [`QuizSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::NotAnswered` before the current question is
    /// answered and `Completed` once finished.
    pub fn advance(&mut self) -> Result<bool, QuizSessionError> {
        if self.is_complete() {
            return Err(QuizSessionError::Completed);
        }
        if self.selected.is_none() {
            return Err(QuizSessionError::NotAnswered);
        }
        if self.is_last() {
            return Ok(false);
        }
        self.current += 1;
        self.selected = None;
        Ok(true)
    }

    /// Persist the score and close the quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Unfinished` until the last question is
    /// answered, `Completed` on a second call, and `Store` if persisting fails.
    pub async fn finish(
        &mut self,
        store: &LocalStore,
        pass_percent: u32,
    ) -> Result<&QuizReport, QuizSessionError> {
        if self.is_complete() {
            return Err(QuizSessionError::Completed);
        }
        if !self.is_last() || self.selected.is_none() {
            return Err(QuizSessionError::Unfinished);
        }

        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        let result = store.record_quiz_result(self.score, total).await?;
        let percent = result.score().percent();
        let passed = percent >= pass_percent;
        tracing::info!(score = self.score, total, percent, passed, "quiz finished");

        Ok(self.report.insert(QuizReport {
            result,
            percent,
            passed,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::time::fixed_clock;

    fn question(correct: usize) -> Question {
        Question {
            question: format!("Pick {correct}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_answer: correct,
            explanation: format!("It was {correct}"),
        }
    }

    #[test]
    fn empty_quiz_is_rejected() {
        assert!(matches!(
            QuizSession::new(Vec::new()),
            Err(QuizSessionError::Empty)
        ));
    }

    #[test]
    fn one_answer_per_question() {
        let mut session = QuizSession::new(vec![question(1), question(2)]).unwrap();
        assert!(matches!(session.advance(), Err(QuizSessionError::NotAnswered)));
        assert!(matches!(
            session.answer(3),
            Err(QuizSessionError::OptionOutOfRange { choice: 3, options: 3 })
        ));

        let feedback = session.answer(1).unwrap();
        assert!(feedback.correct);
        assert_eq!(feedback.explanation, "It was 1");
        assert!(matches!(
            session.answer(0),
            Err(QuizSessionError::AlreadyAnswered)
        ));
        assert_eq!(session.score(), 1);

        assert!(session.advance().unwrap());
        assert_eq!(session.position(), 1);
        assert_eq!(session.selected(), None);
    }

    #[tokio::test]
    async fn finish_persists_once() {
        let store = LocalStore::in_memory(fixed_clock());
        let mut session = QuizSession::new(vec![question(0), question(1)]).unwrap();

        session.answer(0).unwrap();
        assert!(matches!(
            session.finish(&store, 80).await,
            Err(QuizSessionError::Unfinished)
        ));
        session.advance().unwrap();
        let feedback = session.answer(2).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_answer, 1);
        assert!(!session.advance().unwrap());

        let report = session.finish(&store, 80).await.unwrap().clone();
        assert_eq!(report.percent, 50);
        assert!(!report.passed);
        assert_eq!(report.result.score().score(), 1);
        assert!(session.current_question().is_none());

        assert!(matches!(
            session.finish(&store, 80).await,
            Err(QuizSessionError::Completed)
        ));
        assert_eq!(store.count_quizzes_taken().await.unwrap(), 1);
    }
}
