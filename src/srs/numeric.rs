//! Clamp and rounding helpers shared by every engine component.

use crate::config::{MAX_EASINESS, MAX_QUALITY, MIN_EASINESS};

/// Pull a quality score into [0, 5]; NaN counts as a total blackout
pub fn clamp_quality(quality: f64) -> f64 {
  if quality.is_nan() {
    0.0
  } else {
    quality.clamp(0.0, MAX_QUALITY)
  }
}

pub fn clamp_easiness(ef: f64) -> f64 {
  ef.clamp(MIN_EASINESS, MAX_EASINESS)
}

/// Intervals are whole days and never shorter than one
pub fn clamp_interval(days: i64) -> i64 {
  days.max(1)
}

/// Round to the nearest 0.5
pub fn round_to_half(value: f64) -> f64 {
  (value * 2.0).round() / 2.0
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
  let factor = 10f64.powi(decimals);
  (value * factor).round() / factor
}

/// Clamp a difficulty tier into the bounds of a lookup table
pub fn clamp_index(value: i32, len: usize) -> usize {
  let max = len.saturating_sub(1) as i32;
  value.clamp(0, max) as usize
}
