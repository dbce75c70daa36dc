//! Interval caps by repetition maturity.
//!
//! Young learners lose track of material long before the plain SM-2
//! intervals would bring it back, so every interval is bounded by how many
//! consecutive successful reviews the card has behind it.

use crate::config::{INTERVAL_CAPS, LONG_TERM_INTERVAL_CAP};
use crate::srs::numeric::clamp_interval;

/// Longest interval allowed for a card with `repetition_number` successes
pub fn max_interval(repetition_number: u32) -> i64 {
  INTERVAL_CAPS
    .iter()
    .find(|(max_rep, _)| repetition_number <= *max_rep)
    .map(|(_, cap)| *cap)
    .unwrap_or(LONG_TERM_INTERVAL_CAP)
}

pub fn limit_interval(interval: i64, repetition_number: u32) -> i64 {
  clamp_interval(interval.min(max_interval(repetition_number)))
}
