use std::fmt;

/// What the learner submits for a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Answer {
    Number(i64),
    Judgment(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionKind {
    /// Four distinct positive values, one of them the product.
    MultipleChoice { choices: [u32; 4] },
    /// `a × b = shown`; `is_true` holds exactly when `shown == a × b`.
    TrueFalse { shown: u32, is_true: bool },
    /// Free entry, used by training drills.
    Typed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizQuestion {
    pub a: u32,
    pub b: u32,
    pub kind: QuestionKind,
}

impl QuizQuestion {
    pub fn correct_answer(&self) -> u32 {
        self.a * self.b
    }

    /// The answer that scores as correct for this question.
    pub fn expected(&self) -> Answer {
        match self.kind {
            QuestionKind::TrueFalse { is_true, .. } => Answer::Judgment(is_true),
            _ => Answer::Number(self.correct_answer() as i64),
        }
    }

    /// Exact match only; an answer of the wrong shape is simply wrong.
    pub fn is_correct(&self, answer: Answer) -> bool {
        answer == self.expected()
    }

    pub fn choices(&self) -> Option<&[u32; 4]> {
        match &self.kind {
            QuestionKind::MultipleChoice { choices } => Some(choices),
            _ => None,
        }
    }
}

impl fmt::Display for QuizQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            QuestionKind::TrueFalse { shown, .. } => write!(f, "{} × {} = {}", self.a, self.b, shown),
            _ => write!(f, "{} × {} = ?", self.a, self.b),
        }
    }
}
