use std::time::Instant;

use rand::rngs::SmallRng;

use crate::generator::question::{Answer, QuizQuestion};
use crate::generator::tables::TableSet;
use crate::generator::{GenerationMode, QuestionGenerator};
use crate::numerals;
use crate::session::scorer::{SessionScore, SessionScorer};
use crate::session::timer::{Countdown, TickOutcome};

/// Longest answer accepted from the keyboard (the largest product is 100).
const MAX_INPUT_LEN: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainingMode {
    /// Selected tables, untimed.
    Focused,
    /// Every table, untimed.
    Random,
    /// Selected tables against the clock.
    Timed,
}

impl TrainingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TrainingMode::Focused => "focused",
            TrainingMode::Random => "random",
            TrainingMode::Timed => "timed",
        }
    }
}

/// Verdict on the last submitted answer, kept for display.
#[derive(Clone, Debug)]
pub struct Feedback {
    pub question: QuizQuestion,
    pub given: i64,
    pub correct: bool,
    pub at: Instant,
}

pub struct TrainingState {
    pub mode: TrainingMode,
    pub input: String,
    generator: QuestionGenerator,
    current: QuizQuestion,
    scorer: SessionScorer,
    countdown: Option<Countdown>,
    feedback: Option<Feedback>,
    finished: bool,
}

impl TrainingState {
    pub fn new(
        mode: TrainingMode,
        tables: &TableSet,
        rng: SmallRng,
        timed_secs: u32,
        now: Instant,
    ) -> Self {
        let tables = match mode {
            TrainingMode::Random => TableSet::all(),
            TrainingMode::Focused | TrainingMode::Timed => tables.clone(),
        };
        let mut generator = QuestionGenerator::new(&tables, rng);
        let current = generator.next_question(GenerationMode::Typed);
        let countdown = (mode == TrainingMode::Timed).then(|| {
            let mut countdown = Countdown::new(timed_secs);
            countdown.start(now);
            countdown
        });
        Self {
            mode,
            input: String::new(),
            generator,
            current,
            scorer: SessionScorer::new(),
            countdown,
            feedback: None,
            finished: false,
        }
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        if self.finished { None } else { Some(&self.current) }
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Drop feedback older than `max_age_ms`.
    pub fn expire_feedback(&mut self, now: Instant, max_age_ms: u64) {
        if let Some(ref fb) = self.feedback {
            if now.saturating_duration_since(fb.at).as_millis() as u64 >= max_age_ms {
                self.feedback = None;
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn score(&self) -> SessionScore {
        self.scorer.running()
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.countdown.as_ref().map(Countdown::remaining)
    }

    /// Accept Western or Eastern digits; anything else is ignored.
    pub fn type_char(&mut self, ch: char) {
        if self.finished || self.input.chars().count() >= MAX_INPUT_LEN {
            return;
        }
        if ch.is_ascii_digit() || ('٠'..='٩').contains(&ch) {
            self.input.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Check the typed answer, record it and move to a fresh question.
    /// Returns `None` when there is no input or the session is over.
    pub fn submit(&mut self, now: Instant) -> Option<bool> {
        if self.finished || self.input.is_empty() {
            return None;
        }
        let given = numerals::to_western_digits(&self.input);
        let correct = self.scorer.record_answer(&self.current, Answer::Number(given));
        let answered = std::mem::replace(
            &mut self.current,
            self.generator.next_question(GenerationMode::Typed),
        );
        self.feedback = Some(Feedback {
            question: answered,
            given,
            correct,
            at: now,
        });
        self.input.clear();
        Some(correct)
    }

    pub fn on_tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = match self.countdown {
            Some(ref mut countdown) => countdown.advance(now),
            None => TickOutcome::Ignored,
        };
        self.handle_tick(outcome)
    }

    pub fn tick_second(&mut self) -> TickOutcome {
        let outcome = match self.countdown {
            Some(ref mut countdown) => countdown.tick(),
            None => TickOutcome::Ignored,
        };
        self.handle_tick(outcome)
    }

    fn handle_tick(&mut self, outcome: TickOutcome) -> TickOutcome {
        if outcome == TickOutcome::Expired && !self.finished {
            log::info!("training timer expired after {} answers", self.scorer.running().total);
            self.finish();
        }
        outcome
    }

    /// End the session, learner- or timer-initiated. Pending input is dropped.
    pub fn finish(&mut self) -> SessionScore {
        if let Some(ref mut countdown) = self.countdown {
            countdown.cancel();
        }
        self.finished = true;
        self.input.clear();
        self.scorer.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn session(mode: TrainingMode, tables: &[u32]) -> TrainingState {
        TrainingState::new(
            mode,
            &TableSet::from_tables(tables.iter().copied()),
            SmallRng::seed_from_u64(17),
            60,
            Instant::now(),
        )
    }

    fn type_str(session: &mut TrainingState, s: &str) {
        for ch in s.chars() {
            session.type_char(ch);
        }
    }

    #[test]
    fn test_correct_answer_in_eastern_digits() {
        let mut s = session(TrainingMode::Focused, &[6]);
        let product = s.current().unwrap().correct_answer();
        type_str(&mut s, &numerals::to_eastern_digits(product));
        assert_eq!(s.submit(Instant::now()), Some(true));
        assert_eq!(s.score(), SessionScore { score: 1, total: 1 });
        let fb = s.feedback().unwrap();
        assert!(fb.correct);
        assert_eq!(fb.given, product as i64);
        assert!(s.input.is_empty());
    }

    #[test]
    fn test_wrong_answer_counts_toward_total() {
        let mut s = session(TrainingMode::Focused, &[6]);
        let product = s.current().unwrap().correct_answer();
        type_str(&mut s, &(product + 1).to_string());
        assert_eq!(s.submit(Instant::now()), Some(false));
        assert_eq!(s.score(), SessionScore { score: 0, total: 1 });
    }

    #[test]
    fn test_empty_input_not_submitted() {
        let mut s = session(TrainingMode::Random, &[]);
        type_str(&mut s, "abc");
        assert!(s.input.is_empty());
        assert_eq!(s.submit(Instant::now()), None);
        assert_eq!(s.score().total, 0);
    }

    #[test]
    fn test_input_length_capped() {
        let mut s = session(TrainingMode::Random, &[]);
        type_str(&mut s, "123456");
        assert_eq!(s.input, "1234");
        s.backspace();
        assert_eq!(s.input, "123");
    }

    #[test]
    fn test_focused_uses_selected_tables_random_uses_all() {
        let mut focused = session(TrainingMode::Focused, &[4]);
        for _ in 0..20 {
            assert_eq!(focused.current().unwrap().a, 4);
            focused.type_char('1');
            focused.submit(Instant::now());
        }

        let mut random = session(TrainingMode::Random, &[4]);
        let mut saw_other = false;
        for _ in 0..50 {
            saw_other |= random.current().unwrap().a != 4;
            random.type_char('1');
            random.submit(Instant::now());
        }
        assert!(saw_other);
    }

    #[test]
    fn test_untimed_modes_ignore_ticks() {
        let mut s = session(TrainingMode::Focused, &[2]);
        assert_eq!(s.remaining_secs(), None);
        assert_eq!(s.tick_second(), TickOutcome::Ignored);
        assert!(!s.is_finished());
    }

    #[test]
    fn test_timed_session_finishes_at_zero() {
        let mut s = session(TrainingMode::Timed, &[3]);
        assert_eq!(s.remaining_secs(), Some(60));
        s.type_char('3');
        s.submit(Instant::now());
        for _ in 0..59 {
            assert!(matches!(s.tick_second(), TickOutcome::Running(_)));
            assert!(!s.is_finished());
        }
        assert_eq!(s.tick_second(), TickOutcome::Expired);
        assert!(s.is_finished());
        assert_eq!(s.tick_second(), TickOutcome::Ignored);
        assert_eq!(s.score().total, 1);
        assert!(s.current().is_none());
    }

    #[test]
    fn test_finish_cancels_timer_and_freezes_score() {
        let mut s = session(TrainingMode::Timed, &[3]);
        let final_score = s.finish();
        assert_eq!(final_score, SessionScore::default());
        assert_eq!(s.tick_second(), TickOutcome::Ignored);
        s.type_char('9');
        assert_eq!(s.submit(Instant::now()), None);
        assert_eq!(s.finish(), final_score);
    }

    #[test]
    fn test_feedback_expires() {
        let t0 = Instant::now();
        let mut s = session(TrainingMode::Focused, &[5]);
        s.type_char('5');
        s.submit(t0);
        s.expire_feedback(t0 + std::time::Duration::from_millis(100), 1500);
        assert!(s.feedback().is_some());
        s.expire_feedback(t0 + std::time::Duration::from_millis(1500), 1500);
        assert!(s.feedback().is_none());
    }
}
