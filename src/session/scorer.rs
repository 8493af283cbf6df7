use crate::engine::stats;
use crate::generator::question::{Answer, QuizQuestion};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionScore {
    pub score: u32,
    pub total: u32,
}

impl SessionScore {
    pub fn percentage(&self) -> u32 {
        stats::percentage(self.score, self.total)
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64
        }
    }
}

/// Running tally for one quiz or training session.
///
/// Once finalized the tally is frozen: later answers are still judged for
/// feedback but no longer counted, and `finalize` keeps returning the frozen score.
#[derive(Debug, Default)]
pub struct SessionScorer {
    score: u32,
    total: u32,
    finalized: Option<SessionScore>,
}

impl SessionScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_answer(&mut self, question: &QuizQuestion, answer: Answer) -> bool {
        let correct = question.is_correct(answer);
        if self.finalized.is_some() {
            log::debug!("answer after finalize ignored for {question}");
            return correct;
        }
        self.total += 1;
        if correct {
            self.score += 1;
        }
        correct
    }

    /// Count a question the learner never answered as attempted and wrong.
    pub fn record_unanswered(&mut self) {
        if self.finalized.is_none() {
            self.total += 1;
        }
    }

    pub fn running(&self) -> SessionScore {
        SessionScore {
            score: self.score,
            total: self.total,
        }
    }

    pub fn finalize(&mut self) -> SessionScore {
        *self.finalized.get_or_insert(SessionScore {
            score: self.score,
            total: self.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::question::QuestionKind;

    fn mc(a: u32, b: u32) -> QuizQuestion {
        let p = a * b;
        QuizQuestion {
            a,
            b,
            kind: QuestionKind::MultipleChoice {
                choices: [p + 1, p, p + 2, p + 3],
            },
        }
    }

    #[test]
    fn test_counts_correct_and_incorrect() {
        let mut scorer = SessionScorer::new();
        assert!(scorer.record_answer(&mc(3, 4), Answer::Number(12)));
        assert!(!scorer.record_answer(&mc(3, 4), Answer::Number(13)));
        assert!(scorer.record_answer(&mc(5, 5), Answer::Number(25)));
        assert_eq!(scorer.running(), SessionScore { score: 2, total: 3 });
        assert_eq!(scorer.running().percentage(), 67);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut scorer = SessionScorer::new();
        scorer.record_answer(&mc(2, 2), Answer::Number(4));
        let first = scorer.finalize();
        let second = scorer.finalize();
        assert_eq!(first, second);
        assert_eq!(first, SessionScore { score: 1, total: 1 });
    }

    #[test]
    fn test_answers_after_finalize_are_not_counted() {
        let mut scorer = SessionScorer::new();
        scorer.record_answer(&mc(2, 2), Answer::Number(4));
        scorer.finalize();
        assert!(scorer.record_answer(&mc(2, 3), Answer::Number(6)));
        scorer.record_unanswered();
        assert_eq!(scorer.finalize(), SessionScore { score: 1, total: 1 });
        assert_eq!(scorer.running(), SessionScore { score: 1, total: 1 });
    }

    #[test]
    fn test_unanswered_counts_toward_total() {
        let mut scorer = SessionScorer::new();
        scorer.record_answer(&mc(2, 2), Answer::Number(4));
        scorer.record_unanswered();
        assert_eq!(scorer.finalize(), SessionScore { score: 1, total: 2 });
    }

    #[test]
    fn test_empty_session_percentage_is_zero() {
        let mut scorer = SessionScorer::new();
        assert_eq!(scorer.finalize().percentage(), 0);
    }
}
