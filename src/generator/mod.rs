pub mod choices;
pub mod question;
pub mod tables;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::generator::choices::build_choices;
use crate::generator::question::{QuestionKind, QuizQuestion};
use crate::generator::tables::TableSet;

pub const DEFAULT_TRUE_FALSE_RATIO: f64 = 0.3;

/// Largest perturbation applied to a false true/false equation.
const MAX_FALSE_OFFSET: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationMode {
    /// Multiple-choice and true/false mix, as used by quizzes.
    Quiz,
    /// Free-entry questions for training drills.
    Typed,
}

pub struct QuestionGenerator {
    tables: Vec<u32>,
    true_false_ratio: f64,
    rng: SmallRng,
}

impl QuestionGenerator {
    pub fn new(tables: &TableSet, rng: SmallRng) -> Self {
        Self {
            tables: tables.effective(),
            true_false_ratio: DEFAULT_TRUE_FALSE_RATIO,
            rng,
        }
    }

    pub fn with_seed(tables: &TableSet, seed: u64) -> Self {
        Self::new(tables, SmallRng::seed_from_u64(seed))
    }

    /// Clamped to `0.0..=1.0`; NaN and infinities fall back to the default.
    pub fn with_true_false_ratio(mut self, ratio: f64) -> Self {
        self.true_false_ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            DEFAULT_TRUE_FALSE_RATIO
        };
        self
    }

    pub fn generate(&mut self, count: usize, mode: GenerationMode) -> Vec<QuizQuestion> {
        (0..count).map(|_| self.next_question(mode)).collect()
    }

    pub fn next_question(&mut self, mode: GenerationMode) -> QuizQuestion {
        match mode {
            GenerationMode::Quiz => {
                if self.rng.gen_bool(self.true_false_ratio) {
                    self.true_false()
                } else {
                    self.multiple_choice()
                }
            }
            GenerationMode::Typed => {
                let (a, b) = self.operands();
                QuizQuestion { a, b, kind: QuestionKind::Typed }
            }
        }
    }

    fn operands(&mut self) -> (u32, u32) {
        let a = self.tables[self.rng.gen_range(0..self.tables.len())];
        let b = self.rng.gen_range(1..=10);
        (a, b)
    }

    fn multiple_choice(&mut self) -> QuizQuestion {
        let (a, b) = self.operands();
        let choices = build_choices(a * b, &mut self.rng);
        QuizQuestion {
            a,
            b,
            kind: QuestionKind::MultipleChoice { choices },
        }
    }

    fn true_false(&mut self) -> QuizQuestion {
        let (a, b) = self.operands();
        let is_true = self.rng.gen_bool(0.5);
        let shown = if is_true {
            a * b
        } else {
            a * b + self.rng.gen_range(1..=MAX_FALSE_OFFSET)
        };
        QuizQuestion {
            a,
            b,
            kind: QuestionKind::TrueFalse { shown, is_true },
        }
    }
}
