use crate::session::result::QuizResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub count: usize,
    pub average_pct: u32,
    pub best_pct: u32,
}

/// Rounded percentage, half away from zero. Zero when `total` is zero.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * score as f64 / total as f64).round() as u32
}

/// Aggregate figures over the whole history.
///
/// The average weights every question equally (`sum(score) / sum(total)`),
/// not every session.
pub fn compute_stats(history: &[QuizResult]) -> ProgressStats {
    if history.is_empty() {
        return ProgressStats::default();
    }

    let (score_sum, total_sum) = history.iter().fold((0u64, 0u64), |(s, t), r| {
        (s + r.score as u64, t + r.total as u64)
    });
    let average_pct = if total_sum == 0 {
        0
    } else {
        (100.0 * score_sum as f64 / total_sum as f64).round() as u32
    };
    let best_pct = history.iter().map(QuizResult::percentage).max().unwrap_or(0);

    ProgressStats {
        count: history.len(),
        average_pct,
        best_pct,
    }
}

/// Grade band shown after a quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizGrade {
    Outstanding,
    VeryGood,
    Good,
    NeedsReview,
}

impl QuizGrade {
    pub fn from_percentage(pct: u32) -> Self {
        match pct {
            90.. => QuizGrade::Outstanding,
            70..=89 => QuizGrade::VeryGood,
            50..=69 => QuizGrade::Good,
            _ => QuizGrade::NeedsReview,
        }
    }

    pub fn message_key(self) -> &'static str {
        match self {
            QuizGrade::Outstanding => "grade.quiz.outstanding",
            QuizGrade::VeryGood => "grade.quiz.very_good",
            QuizGrade::Good => "grade.quiz.good",
            QuizGrade::NeedsReview => "grade.quiz.needs_review",
        }
    }
}

/// Grade band shown after a training drill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainingGrade {
    Excellent,
    Good,
    NeedsPractice,
}

impl TrainingGrade {
    pub fn from_percentage(pct: u32) -> Self {
        match pct {
            80.. => TrainingGrade::Excellent,
            60..=79 => TrainingGrade::Good,
            _ => TrainingGrade::NeedsPractice,
        }
    }

    pub fn message_key(self) -> &'static str {
        match self {
            TrainingGrade::Excellent => "grade.training.excellent",
            TrainingGrade::Good => "grade.training.good",
            TrainingGrade::NeedsPractice => "grade.training.needs_practice",
        }
    }
}

/// Badge next to a row of the history list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryBadge {
    Star,
    Good,
    KeepGoing,
}

impl HistoryBadge {
    pub fn for_result(result: &QuizResult) -> Self {
        match result.ratio() {
            r if r >= 0.9 => HistoryBadge::Star,
            r if r >= 0.7 => HistoryBadge::Good,
            _ => HistoryBadge::KeepGoing,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            HistoryBadge::Star => "🌟",
            HistoryBadge::Good => "👍",
            HistoryBadge::KeepGoing => "💪",
        }
    }
}
