use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::stats;

/// One completed quiz, as persisted under the `quizHistory` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    #[serde(rename = "date", alias = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub score: u32,
    pub total: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    /// Tables the quiz covered; empty means all of them.
    #[serde(default)]
    pub tables: Vec<u32>,
}

fn default_difficulty() -> String {
    "easy".to_string()
}

impl QuizResult {
    /// Builds a record stamped with the current time. `score` is clamped to `total`.
    pub fn new(score: u32, total: u32, difficulty: &str, tables: Vec<u32>) -> Self {
        Self {
            timestamp: Utc::now(),
            score: score.min(total),
            total,
            difficulty: difficulty.to_string(),
            tables,
        }
    }

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

    pub fn is_valid(&self) -> bool {
        self.score <= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_clamped_to_total() {
        let r = QuizResult::new(12, 10, "easy", Vec::new());
        assert_eq!(r.score, 10);
        assert!(r.is_valid());
    }

    #[test]
    fn test_serialized_field_names() {
        let r = QuizResult::new(9, 10, "hard", vec![3, 7]);
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("date").is_some());
        assert_eq!(json["score"], 9);
        assert_eq!(json["total"], 10);
        assert_eq!(json["difficulty"], "hard");
        assert_eq!(json["tables"], serde_json::json!([3, 7]));
    }

    #[test]
    fn test_deserializes_iso_date_and_missing_optional_fields() {
        let json = r#"{"date":"2025-03-01T10:15:00.000Z","score":4,"total":5}"#;
        let r: QuizResult = serde_json::from_str(json).unwrap();
        assert_eq!(r.score, 4);
        assert_eq!(r.difficulty, "easy");
        assert!(r.tables.is_empty());
        assert_eq!(r.percentage(), 80);
    }
}
