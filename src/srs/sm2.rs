use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::{
  DIFFICULTY_THRESHOLDS, FAILURE_EASINESS_PENALTY, FIRST_INTERVAL_DAYS, SECOND_INTERVAL_DAYS,
  SUCCESS_THRESHOLD,
};
use crate::domain::{CardHistory, Difficulty, SchedulingState, SuperMemoResult};
use crate::srs::limiter::limit_interval;
use crate::srs::numeric::{clamp_easiness, clamp_interval, clamp_quality};

/// Calculate the next review for an item.
///
/// Quality at or above 2.5 advances the card: repetitions go up by one,
/// the interval follows the SM-2 progression (1 day, 6 days, then
/// interval * EF) and EF moves by the SM-2 formula.
///
/// Anything lower steps the card back a single repetition instead of
/// resetting it, schedules it for tomorrow and takes 0.15 off EF.
///
/// Intervals grown from EF are capped by repetition maturity; the two
/// seed steps are fixed.
pub fn calculate_next_review(
  history: &CardHistory,
  quality: f64,
  now: DateTime<Utc>,
) -> SuperMemoResult {
  let state = history.resolve();
  let quality = clamp_quality(quality);

  let (easiness_factor, repetition_number, interval) = if quality >= SUCCESS_THRESHOLD {
    advance(&state, quality)
  } else {
    step_back(&state)
  };

  let easiness_factor = clamp_easiness(easiness_factor);
  let interval = clamp_interval(interval);

  let should_review = state.next_review.is_none_or(|due| due <= now);

  SuperMemoResult {
    easiness_factor,
    repetition_number,
    interval,
    next_review: now + Duration::days(interval),
    should_review,
    difficulty: classify_difficulty(easiness_factor, repetition_number),
  }
}

fn advance(state: &SchedulingState, quality: f64) -> (f64, u32, i64) {
  let repetition_number = state.repetition_number.saturating_add(1);

  let interval = match repetition_number {
    1 => FIRST_INTERVAL_DAYS,
    2 => SECOND_INTERVAL_DAYS,
    _ => {
      let grown = (state.interval as f64 * state.easiness_factor).round() as i64;
      let limited = limit_interval(grown, repetition_number);
      tracing::debug!(repetition_number, grown, limited, "interval limited");
      limited
    }
  };

  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
  let d = 5.0 - quality;
  let easiness_factor = state.easiness_factor + (0.1 - d * (0.08 + d * 0.02));

  tracing::debug!(quality, repetition_number, interval, easiness_factor, "review passed");
  (easiness_factor, repetition_number, interval)
}

fn step_back(state: &SchedulingState) -> (f64, u32, i64) {
  // One step back only; a full reset is too harsh for young learners
  let repetition_number = state.repetition_number.saturating_sub(1);
  let easiness_factor = state.easiness_factor - FAILURE_EASINESS_PENALTY;

  tracing::debug!(repetition_number, easiness_factor, "review failed");
  (easiness_factor, repetition_number, 1)
}

pub fn classify_difficulty(easiness_factor: f64, repetition_number: u32) -> Difficulty {
  let (easy, medium, hard) = DIFFICULTY_THRESHOLDS;
  if repetition_number <= 1 {
    Difficulty::Beginner
  } else if easiness_factor >= easy {
    Difficulty::Easy
  } else if easiness_factor >= medium {
    Difficulty::Medium
  } else if easiness_factor >= hard {
    Difficulty::Hard
  } else {
    Difficulty::VeryHard
  }
}

/// Interval each rating button would produce, for display before answering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntervalPreview {
  pub again: i64,
  pub hard: i64,
  pub good: i64,
  pub easy: i64,
}

pub fn preview_intervals(history: &CardHistory, now: DateTime<Utc>) -> IntervalPreview {
  let interval_for = |quality: f64| calculate_next_review(history, quality, now).interval;
  IntervalPreview {
    again: interval_for(0.0),
    hard: interval_for(3.0),
    good: interval_for(4.0),
    easy: interval_for(5.0),
  }
}
