//! Learning progress statistics and rule-based study advice.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{
  DEFAULT_EASINESS, DIFFICULT_MAX_EASINESS, MASTERED_MIN_EASINESS, MASTERED_MIN_REPETITIONS,
  MAX_ACTIVITY_WINDOW_DAYS, StudySettings, SUCCESS_MIN_EASINESS, SUCCESS_MIN_QUALITY,
};
use crate::domain::SpacedRepetitionCard;
use crate::srs::numeric::round_to;
use crate::srs::planner::is_due_by;

/// Mastery summary over a learner's card set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
  pub total_cards: usize,
  pub mastered: usize,
  pub learning: usize,
  pub difficult: usize,
  /// Mean easiness factor, two decimals
  pub average_easiness: f64,
  /// Mean interval in days, one decimal
  pub average_interval: f64,
  /// Fraction (0-1) of cards that are both easy enough and recently well answered
  pub success_rate: f64,
}

impl ProgressStats {
  fn empty() -> Self {
    Self {
      total_cards: 0,
      mastered: 0,
      learning: 0,
      difficult: 0,
      average_easiness: DEFAULT_EASINESS,
      average_interval: 0.0,
      success_rate: 0.0,
    }
  }
}

pub fn is_mastered(card: &SpacedRepetitionCard) -> bool {
  card.easiness_factor >= MASTERED_MIN_EASINESS && card.repetition_number >= MASTERED_MIN_REPETITIONS
}

pub fn is_difficult(card: &SpacedRepetitionCard) -> bool {
  card.easiness_factor <= DIFFICULT_MAX_EASINESS
}

pub fn analyze_learning_progress(cards: &[SpacedRepetitionCard]) -> ProgressStats {
  if cards.is_empty() {
    return ProgressStats::empty();
  }

  let total = cards.len();
  let mastered = cards.iter().filter(|c| is_mastered(c)).count();
  // Mastery needs EF >= 2.2, so no card is counted twice
  let difficult = cards.iter().filter(|c| is_difficult(c)).count();
  let successful = cards
    .iter()
    .filter(|c| c.easiness_factor >= SUCCESS_MIN_EASINESS && c.quality >= SUCCESS_MIN_QUALITY)
    .count();

  let n = total as f64;
  let easiness_sum: f64 = cards.iter().map(|c| c.easiness_factor).sum();
  // Summed as floats: stored intervals are not bounded above
  let interval_sum: f64 = cards.iter().map(|c| c.interval as f64).sum();

  ProgressStats {
    total_cards: total,
    mastered,
    learning: total - mastered - difficult,
    difficult,
    average_easiness: round_to(easiness_sum / n, 2),
    average_interval: round_to(interval_sum / n, 1),
    success_rate: successful as f64 / n,
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
  FocusDifficult,
  PrioritizeReviews,
  IncreaseFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
  High,
  Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
  pub kind: RecommendationKind,
  pub priority: Priority,
  pub message: String,
  /// Items the recommendation is about; empty for general advice
  pub item_ids: Vec<i64>,
}

/// Study advice using the default thresholds
pub fn get_personalized_recommendations(
  cards: &[SpacedRepetitionCard],
  now: DateTime<Utc>,
) -> Vec<Recommendation> {
  get_personalized_recommendations_with(cards, now, &StudySettings::default())
}

/// Each rule is checked on its own; any combination may fire.
///
/// The overload rule counts cards due as of `now`, including those that
/// came due earlier today. The planner's due list stops at midnight, so it
/// can be shorter than the count reported here.
pub fn get_personalized_recommendations_with(
  cards: &[SpacedRepetitionCard],
  now: DateTime<Utc>,
  settings: &StudySettings,
) -> Vec<Recommendation> {
  let mut recommendations = Vec::new();

  let difficult: Vec<i64> = cards.iter().filter(|c| is_difficult(c)).map(|c| c.item_id).collect();
  if !difficult.is_empty() {
    recommendations.push(Recommendation {
      kind: RecommendationKind::FocusDifficult,
      priority: Priority::High,
      message: format!("Focus on {} difficult items with extra practice", difficult.len()),
      item_ids: difficult,
    });
  }

  let mut due: Vec<&SpacedRepetitionCard> = cards.iter().filter(|c| is_due_by(c, now)).collect();
  if due.len() > settings.due_overload_threshold {
    let due_count = due.len();
    due.sort_by_key(|c| c.next_review);
    recommendations.push(Recommendation {
      kind: RecommendationKind::PrioritizeReviews,
      priority: Priority::High,
      message: format!("{} reviews are waiting; start with the oldest ones", due_count),
      item_ids: due
        .iter()
        .take(settings.priority_review_count)
        .map(|c| c.item_id)
        .collect(),
    });
  }

  if !cards.is_empty() {
    let window_start = activity_window_start(now, settings.activity_window_days);
    let recent = cards.iter().filter(|c| c.last_review >= window_start).count();
    let activity = recent as f64 / cards.len() as f64;
    if activity < settings.min_recent_activity {
      recommendations.push(Recommendation {
        kind: RecommendationKind::IncreaseFrequency,
        priority: Priority::Medium,
        message: "Short daily practice sessions help keep items fresh".to_string(),
        item_ids: Vec::new(),
      });
    }
  }

  tracing::debug!(count = recommendations.len(), "recommendations built");
  recommendations
}

/// Start of the recent-activity window, with the window kept to 1..=365 days
fn activity_window_start(now: DateTime<Utc>, window_days: i64) -> DateTime<Utc> {
  let days = window_days.clamp(1, MAX_ACTIVITY_WINDOW_DAYS);
  Duration::try_days(days)
    .and_then(|window| now.checked_sub_signed(window))
    .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
