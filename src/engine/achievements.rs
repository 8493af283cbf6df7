use std::collections::BTreeSet;

use crate::session::result::QuizResult;

/// Milestones derived from the quiz history. Never stored; always recomputed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Achievement {
    FirstQuiz,
    FiveQuizzes,
    TenQuizzes,
    PerfectScore,
    Excellent,
}

pub const ALL_ACHIEVEMENTS: [Achievement; 5] = [
    Achievement::FirstQuiz,
    Achievement::FiveQuizzes,
    Achievement::TenQuizzes,
    Achievement::PerfectScore,
    Achievement::Excellent,
];

/// Milestones advertised as "coming up" on the progress screen.
const UPCOMING: [Achievement; 3] = [
    Achievement::FirstQuiz,
    Achievement::PerfectScore,
    Achievement::TenQuizzes,
];

impl Achievement {
    pub fn id(self) -> &'static str {
        match self {
            Achievement::FirstQuiz => "first-quiz",
            Achievement::FiveQuizzes => "five-quizzes",
            Achievement::TenQuizzes => "ten-quizzes",
            Achievement::PerfectScore => "perfect-score",
            Achievement::Excellent => "excellent",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Achievement::FirstQuiz => "🎯",
            Achievement::FiveQuizzes => "🏃",
            Achievement::TenQuizzes => "🧠",
            Achievement::PerfectScore => "🌟",
            Achievement::Excellent => "🏆",
        }
    }

    pub fn title_key(self) -> String {
        format!("achievement.{}.title", self.id())
    }

    pub fn description_key(self) -> String {
        format!("achievement.{}.description", self.id())
    }

    pub fn hint_key(self) -> String {
        format!("achievement.{}.hint", self.id())
    }

    /// Whether the history satisfies this milestone.
    pub fn is_earned(self, history: &[QuizResult]) -> bool {
        match self {
            Achievement::FirstQuiz => !history.is_empty(),
            Achievement::FiveQuizzes => history.len() >= 5,
            Achievement::TenQuizzes => history.len() >= 10,
            Achievement::PerfectScore => history.iter().any(|r| r.total > 0 && r.score == r.total),
            Achievement::Excellent => history.iter().any(|r| r.total > 0 && r.ratio() >= 0.9),
        }
    }
}

pub fn compute_achievements(history: &[QuizResult]) -> BTreeSet<Achievement> {
    ALL_ACHIEVEMENTS
        .into_iter()
        .filter(|a| a.is_earned(history))
        .collect()
}

pub fn upcoming_achievements(earned: &BTreeSet<Achievement>) -> Vec<Achievement> {
    UPCOMING
        .into_iter()
        .filter(|a| !earned.contains(a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: u32, total: u32) -> QuizResult {
        QuizResult::new(score, total, "medium", vec![2, 3])
    }

    #[test]
    fn test_no_history_no_achievements() {
        assert!(compute_achievements(&[]).is_empty());
    }

    #[test]
    fn test_first_quiz_iff_any_history() {
        let earned = compute_achievements(&[result(1, 10)]);
        assert_eq!(earned, BTreeSet::from([Achievement::FirstQuiz]));
    }

    #[test]
    fn test_count_milestones() {
        let history: Vec<_> = (0..5).map(|_| result(3, 10)).collect();
        let earned = compute_achievements(&history);
        assert!(earned.contains(&Achievement::FiveQuizzes));
        assert!(!earned.contains(&Achievement::TenQuizzes));

        let history: Vec<_> = (0..10).map(|_| result(3, 10)).collect();
        assert!(compute_achievements(&history).contains(&Achievement::TenQuizzes));
    }

    #[test]
    fn test_perfect_score_implies_excellent() {
        let earned = compute_achievements(&[result(2, 10), result(15, 15)]);
        assert!(earned.contains(&Achievement::PerfectScore));
        assert!(earned.contains(&Achievement::Excellent));
    }

    #[test]
    fn test_excellent_threshold_is_inclusive() {
        let earned = compute_achievements(&[result(18, 20)]);
        assert!(earned.contains(&Achievement::Excellent));
        assert!(!earned.contains(&Achievement::PerfectScore));

        let earned = compute_achievements(&[result(17, 20)]);
        assert!(!earned.contains(&Achievement::Excellent));
    }

    #[test]
    fn test_empty_session_is_not_perfect() {
        let earned = compute_achievements(&[result(0, 0)]);
        assert_eq!(earned, BTreeSet::from([Achievement::FirstQuiz]));
    }

    #[test]
    fn test_upcoming_excludes_earned() {
        let earned = BTreeSet::from([Achievement::FirstQuiz]);
        assert_eq!(
            upcoming_achievements(&earned),
            vec![Achievement::PerfectScore, Achievement::TenQuizzes]
        );
        assert_eq!(upcoming_achievements(&BTreeSet::new()).len(), 3);
    }

    #[test]
    fn test_locale_keys_follow_ids() {
        assert_eq!(
            Achievement::PerfectScore.title_key(),
            "achievement.perfect-score.title"
        );
        let ids: BTreeSet<&str> = ALL_ACHIEVEMENTS.into_iter().map(Achievement::id).collect();
        assert_eq!(ids.len(), ALL_ACHIEVEMENTS.len());
    }
}
