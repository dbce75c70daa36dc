use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Difficulty;

/// One learner attempt at an item, as packaged by the ingestion side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseResponse {
  pub is_correct: bool,
  /// Seconds spent on the attempt
  pub time_spent: f64,
  pub hints_used: u32,
  /// Nominal difficulty tier of the item (0-5)
  pub difficulty: i32,
  /// Self-reported confidence (0-5)
  #[serde(default)]
  pub confidence: Option<f64>,
}

impl ExerciseResponse {
  pub fn new(is_correct: bool, time_spent: f64, hints_used: u32, difficulty: i32) -> Self {
    Self {
      is_correct,
      time_spent,
      hints_used,
      difficulty,
      confidence: None,
    }
  }

  pub fn with_confidence(mut self, confidence: f64) -> Self {
    self.confidence = Some(confidence);
    self
  }
}

/// Output of one scheduling step; callers fold it back into the stored card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperMemoResult {
  pub easiness_factor: f64,
  pub repetition_number: u32,
  /// Days until the next review, after interval limiting
  pub interval: i64,
  pub next_review: DateTime<Utc>,
  /// True if the previous due date had already passed
  pub should_review: bool,
  pub difficulty: Difficulty,
}
