use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::{DEFAULT_EASINESS, MAX_EASINESS, MIN_EASINESS};
use crate::domain::SuperMemoResult;

/// How hard an item currently is for a learner (diagnostic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Beginner,
  Easy,
  Medium,
  Hard,
  VeryHard,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty: {0}")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
  type Err = UnknownDifficulty;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "beginner" => Ok(Self::Beginner),
      "easy" => Ok(Self::Easy),
      "medium" => Ok(Self::Medium),
      "hard" => Ok(Self::Hard),
      "very_hard" => Ok(Self::VeryHard),
      _ => Err(UnknownDifficulty(s.to_string())),
    }
  }
}

impl Difficulty {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Beginner => "beginner",
      Self::Easy => "easy",
      Self::Medium => "medium",
      Self::Hard => "hard",
      Self::VeryHard => "very_hard",
    }
  }
}

/// Scheduling record for one (learner, item) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacedRepetitionCard {
  pub learner_id: i64,
  pub item_id: i64,

  pub easiness_factor: f64,
  /// Consecutive successful reviews since the last failure
  pub repetition_number: u32,
  /// Days between `last_review` and `next_review`
  pub interval: i64,
  pub last_review: DateTime<Utc>,
  pub next_review: DateTime<Utc>,

  /// Last applied quality score (0-5)
  pub quality: f64,
}

impl SpacedRepetitionCard {
  /// Card as it exists right after a learner's first response to an item
  pub fn new(learner_id: i64, item_id: i64, now: DateTime<Utc>) -> Self {
    Self {
      learner_id,
      item_id,
      easiness_factor: DEFAULT_EASINESS,
      repetition_number: 0,
      interval: 1,
      last_review: now,
      next_review: now + Duration::days(1),
      quality: 0.0,
    }
  }

  /// Copy of this card with a scheduling result folded in
  pub fn with_review(&self, result: &SuperMemoResult, quality: f64, now: DateTime<Utc>) -> Self {
    Self {
      easiness_factor: result.easiness_factor,
      repetition_number: result.repetition_number,
      interval: result.interval,
      last_review: now,
      next_review: result.next_review,
      quality,
      ..self.clone()
    }
  }
}

/// Scheduling inputs after defaults have been filled in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulingState {
  pub easiness_factor: f64,
  pub repetition_number: u32,
  pub interval: i64,
  pub next_review: Option<DateTime<Utc>>,
}

/// Prior history of an item, if any
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardHistory {
  /// No response recorded yet
  New,
  Existing(SchedulingState),
}

impl CardHistory {
  pub fn from_card(card: Option<&SpacedRepetitionCard>) -> Self {
    match card {
      None => Self::New,
      Some(card) => Self::Existing(SchedulingState {
        easiness_factor: card.easiness_factor,
        repetition_number: card.repetition_number,
        interval: card.interval,
        next_review: Some(card.next_review),
      }),
    }
  }

  /// Fill defaults for new items and pull stored values back into range
  pub fn resolve(&self) -> SchedulingState {
    match self {
      Self::New => SchedulingState {
        easiness_factor: DEFAULT_EASINESS,
        repetition_number: 0,
        interval: 0,
        next_review: None,
      },
      Self::Existing(state) => SchedulingState {
        easiness_factor: clamp_stored_easiness(state.easiness_factor),
        interval: state.interval.max(0),
        ..*state
      },
    }
  }
}

fn clamp_stored_easiness(ef: f64) -> f64 {
  if ef.is_nan() {
    DEFAULT_EASINESS
  } else {
    ef.clamp(MIN_EASINESS, MAX_EASINESS)
  }
}
