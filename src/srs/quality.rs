//! Quality estimation: turns a raw exercise response into a 0-5 score.
//!
//! The score is the sum of four terms:
//! - Correctness: 3 for a correct answer, 1 or 0.5 for a wrong one depending on hints
//! - Pacing: up to 1 when solve time is close to what the item's difficulty tier expects
//! - Hint discipline: up to 1 for solving without hints
//! - Confidence: up to 0.5 from the learner's self-report
//!
//! The sum is clamped to [0, 5] and rounded to the nearest 0.5.

use crate::config::{CONFIDENCE_WEIGHT, EXPECTED_TIME_SECS, MAX_QUALITY, NATURAL_PACE, SLOW_PACE_LIMIT};
use crate::domain::ExerciseResponse;
use crate::srs::numeric::{clamp_index, clamp_quality, round_to_half};

pub fn calculate_quality(response: &ExerciseResponse) -> f64 {
  let correctness = correctness_score(response.is_correct, response.hints_used);
  let pacing = pacing_score(response.time_spent, response.difficulty);
  let hints = hint_score(response.hints_used);
  let confidence = response.confidence.map_or(0.0, confidence_score);

  let raw = correctness + pacing + hints + confidence;
  tracing::trace!(correctness, pacing, hints, confidence, raw, "quality terms");

  round_to_half(clamp_quality(raw))
}

/// Expected solve time for a difficulty tier, clamped into the table
pub fn expected_time(difficulty: i32) -> f64 {
  EXPECTED_TIME_SECS[clamp_index(difficulty, EXPECTED_TIME_SECS.len())]
}

fn correctness_score(is_correct: bool, hints_used: u32) -> f64 {
  if is_correct {
    3.0
  } else if hints_used <= 1 {
    1.0
  } else {
    0.5
  }
}

fn pacing_score(time_spent: f64, difficulty: i32) -> f64 {
  let ratio = time_spent / expected_time(difficulty);
  if !ratio.is_finite() {
    return 0.0;
  }

  let (fast, slow) = NATURAL_PACE;
  if (fast..=slow).contains(&ratio) {
    1.0 // Natural pace: neither a guess nor a struggle
  } else if ratio > slow && ratio <= SLOW_PACE_LIMIT {
    0.5
  } else {
    0.0
  }
}

fn hint_score(hints_used: u32) -> f64 {
  match hints_used {
    0 => 1.0,
    1..=2 => 0.5,
    _ => 0.0,
  }
}

fn confidence_score(confidence: f64) -> f64 {
  if confidence.is_nan() {
    return 0.0;
  }
  (confidence.clamp(0.0, MAX_QUALITY) / MAX_QUALITY) * CONFIDENCE_WEIGHT
}
