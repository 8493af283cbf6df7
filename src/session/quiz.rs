use std::time::Instant;

use crate::generator::question::{Answer, QuestionKind, QuizQuestion};
use crate::generator::tables::TableSet;
use crate::generator::{GenerationMode, QuestionGenerator};
use crate::session::difficulty::Difficulty;
use crate::session::result::QuizResult;
use crate::session::scorer::{SessionScore, SessionScorer};
use crate::session::timer::{Countdown, TickOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    InProgress,
    Completed,
    Abandoned,
}

/// A timed quiz: a fixed list of questions answered in order.
///
/// Only submitted answers score. When the countdown runs out, the answer
/// that is selected but not yet submitted is discarded and every remaining
/// question counts as attempted and wrong, so `total` always equals the
/// quiz length.
pub struct QuizState {
    pub difficulty: Difficulty,
    pub tables: TableSet,
    questions: Vec<QuizQuestion>,
    index: usize,
    selected: Option<Answer>,
    scorer: SessionScorer,
    countdown: Countdown,
    phase: QuizPhase,
    result: Option<QuizResult>,
}

impl QuizState {
    pub fn new(
        difficulty: Difficulty,
        tables: TableSet,
        generator: &mut QuestionGenerator,
        now: Instant,
    ) -> Self {
        let questions = generator.generate(difficulty.question_count(), GenerationMode::Quiz);
        Self::with_questions(difficulty, tables, questions, now)
    }

    pub fn with_questions(
        difficulty: Difficulty,
        tables: TableSet,
        questions: Vec<QuizQuestion>,
        now: Instant,
    ) -> Self {
        let mut countdown = Countdown::new(difficulty.time_limit_secs());
        countdown.start(now);
        let mut quiz = Self {
            difficulty,
            tables,
            questions,
            index: 0,
            selected: None,
            scorer: SessionScorer::new(),
            countdown,
            phase: QuizPhase::InProgress,
            result: None,
        };
        if quiz.questions.is_empty() {
            quiz.complete();
        }
        quiz
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn is_in_progress(&self) -> bool {
        self.phase == QuizPhase::InProgress
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        if self.is_in_progress() {
            self.questions.get(self.index)
        } else {
            None
        }
    }

    /// Zero-based position of the current question.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.index + 1).min(self.questions.len()) as f64 / self.questions.len() as f64
    }

    pub fn selected(&self) -> Option<Answer> {
        self.selected
    }

    pub fn score(&self) -> SessionScore {
        self.scorer.running()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn select(&mut self, answer: Answer) {
        if self.is_in_progress() {
            self.selected = Some(answer);
        }
    }

    /// Select a multiple-choice option by index, or a true/false verdict
    /// (index 0 = true, 1 = false).
    pub fn select_option(&mut self, option: usize) {
        let answer = match self.current().map(|q| &q.kind) {
            Some(QuestionKind::MultipleChoice { choices }) => {
                choices.get(option).map(|&c| Answer::Number(c as i64))
            }
            Some(QuestionKind::TrueFalse { .. }) => match option {
                0 => Some(Answer::Judgment(true)),
                1 => Some(Answer::Judgment(false)),
                _ => None,
            },
            _ => None,
        };
        if let Some(answer) = answer {
            self.select(answer);
        }
    }

    /// Score the selected answer and move on. Submitting the last question
    /// completes the quiz. Returns whether the answer was correct, or `None`
    /// when nothing was selected or the quiz is over.
    pub fn submit(&mut self) -> Option<bool> {
        if !self.is_in_progress() {
            return None;
        }
        let answer = self.selected?;
        let question = self.questions.get(self.index)?;
        let correct = self.scorer.record_answer(question, answer);
        self.selected = None;
        self.index += 1;
        if self.index >= self.questions.len() {
            self.complete();
        }
        Some(correct)
    }

    pub fn on_tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = self.countdown.advance(now);
        self.handle_tick(outcome)
    }

    /// Advance the countdown by exactly one second.
    pub fn tick_second(&mut self) -> TickOutcome {
        let outcome = self.countdown.tick();
        self.handle_tick(outcome)
    }

    fn handle_tick(&mut self, outcome: TickOutcome) -> TickOutcome {
        if outcome == TickOutcome::Expired && self.is_in_progress() {
            log::info!("quiz timer expired at question {}", self.index + 1);
            self.complete();
        }
        outcome
    }

    /// Leave the quiz without a result.
    pub fn abandon(&mut self) {
        if self.is_in_progress() {
            self.countdown.cancel();
            self.selected = None;
            self.phase = QuizPhase::Abandoned;
        }
    }

    fn complete(&mut self) {
        if !self.is_in_progress() {
            return;
        }
        self.countdown.cancel();
        self.selected = None;
        for _ in self.index..self.questions.len() {
            self.scorer.record_unanswered();
        }
        let final_score = self.scorer.finalize();
        self.phase = QuizPhase::Completed;
        self.result = Some(QuizResult::new(
            final_score.score,
            final_score.total,
            self.difficulty.as_str(),
            self.tables.to_vec(),
        ));
    }

    /// Hand over the completed result for persistence. Yields it once.
    pub fn take_result(&mut self) -> Option<QuizResult> {
        self.result.take()
    }

    pub fn final_score(&self) -> Option<SessionScore> {
        if self.phase == QuizPhase::Completed {
            Some(self.scorer.running())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::timer::TickOutcome;

    fn tf(a: u32, b: u32, is_true: bool) -> QuizQuestion {
        let shown = if is_true { a * b } else { a * b + 3 };
        QuizQuestion {
            a,
            b,
            kind: QuestionKind::TrueFalse { shown, is_true },
        }
    }

    fn mc(a: u32, b: u32) -> QuizQuestion {
        let p = a * b;
        QuizQuestion {
            a,
            b,
            kind: QuestionKind::MultipleChoice {
                choices: [p, p + 1, p + 2, p + 3],
            },
        }
    }

    fn quiz(questions: Vec<QuizQuestion>) -> QuizState {
        QuizState::with_questions(Difficulty::Easy, TableSet::from_tables([2, 3]), questions, Instant::now())
    }

    #[test]
    fn test_new_generates_preset_count() {
        let mut generator = QuestionGenerator::with_seed(&TableSet::all(), 1);
        let quiz = QuizState::new(Difficulty::Medium, TableSet::all(), &mut generator, Instant::now());
        assert_eq!(quiz.len(), 15);
        assert_eq!(quiz.remaining_secs(), 420);
        assert!(quiz.is_in_progress());
    }

    #[test]
    fn test_submit_without_selection_is_noop() {
        let mut q = quiz(vec![mc(2, 3)]);
        assert_eq!(q.submit(), None);
        assert_eq!(q.position(), 0);
    }

    #[test]
    fn test_full_run_produces_result_once() {
        let mut q = quiz(vec![mc(2, 3), tf(3, 3, false)]);
        q.select_option(0);
        assert_eq!(q.submit(), Some(true));
        q.select_option(0); // claims "true" on a false equation
        assert_eq!(q.submit(), Some(false));
        assert_eq!(q.phase(), QuizPhase::Completed);

        let result = q.take_result().unwrap();
        assert_eq!((result.score, result.total), (1, 2));
        assert_eq!(result.difficulty, "easy");
        assert_eq!(result.tables, vec![2, 3]);
        assert!(q.take_result().is_none());
    }

    #[test]
    fn test_expiry_discards_unsubmitted_answer_and_counts_remaining() {
        let mut q = quiz(vec![mc(2, 2), mc(2, 4), mc(3, 3)]);
        q.select_option(0);
        q.submit();
        q.select_option(0); // selected but never submitted
        for _ in 0..299 {
            assert!(matches!(q.tick_second(), TickOutcome::Running(_)));
        }
        assert_eq!(q.tick_second(), TickOutcome::Expired);
        assert_eq!(q.phase(), QuizPhase::Completed);

        let result = q.take_result().unwrap();
        assert_eq!((result.score, result.total), (1, 3));
    }

    #[test]
    fn test_ticks_after_completion_are_noops() {
        let mut q = quiz(vec![mc(2, 2)]);
        q.select_option(0);
        q.submit();
        assert!(q.take_result().is_some());
        for _ in 0..400 {
            assert_eq!(q.tick_second(), TickOutcome::Ignored);
        }
        assert!(q.take_result().is_none());
    }

    #[test]
    fn test_abandon_cancels_timer_and_yields_no_result() {
        let mut q = quiz(vec![mc(2, 2), mc(2, 3)]);
        q.select_option(0);
        q.submit();
        q.abandon();
        assert_eq!(q.phase(), QuizPhase::Abandoned);
        assert_eq!(q.tick_second(), TickOutcome::Ignored);
        assert!(q.take_result().is_none());
        q.select_option(0);
        assert_eq!(q.submit(), None);
    }

    #[test]
    fn test_submissions_after_completion_do_not_double_count() {
        let mut q = quiz(vec![mc(2, 2)]);
        q.select_option(0);
        q.submit();
        q.select(Answer::Number(4));
        assert_eq!(q.submit(), None);
        assert_eq!(q.final_score(), Some(SessionScore { score: 1, total: 1 }));
    }

    #[test]
    fn test_select_option_out_of_range_ignored() {
        let mut q = quiz(vec![tf(2, 2, true)]);
        q.select_option(5);
        assert_eq!(q.selected(), None);
        q.select_option(1);
        assert_eq!(q.selected(), Some(Answer::Judgment(false)));
    }

    #[test]
    fn test_empty_quiz_completes_immediately() {
        let mut q = quiz(Vec::new());
        assert_eq!(q.phase(), QuizPhase::Completed);
        let result = q.take_result().unwrap();
        assert_eq!((result.score, result.total), (0, 0));
    }
}
