use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{CardHistory, ExerciseResponse, SpacedRepetitionCard, SuperMemoResult};
use crate::srs::quality::calculate_quality;
use crate::srs::sm2::calculate_next_review;

/// Everything produced by handling one response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewOutcome {
  pub quality: f64,
  pub result: SuperMemoResult,
  /// Updated copy of the card, ready to be stored
  pub card: SpacedRepetitionCard,
}

/// Score a response, schedule the item and fold the result into a card.
///
/// `existing` is the stored card for (learner, item), or `None` on the
/// learner's first response, in which case the card is created here.
pub fn process_response(
  existing: Option<&SpacedRepetitionCard>,
  learner_id: i64,
  item_id: i64,
  response: &ExerciseResponse,
  now: DateTime<Utc>,
) -> ReviewOutcome {
  let quality = calculate_quality(response);
  let history = CardHistory::from_card(existing);
  let result = calculate_next_review(&history, quality, now);

  let card = match existing {
    Some(card) => card.with_review(&result, quality, now),
    None => SpacedRepetitionCard::new(learner_id, item_id, now).with_review(&result, quality, now),
  };

  tracing::debug!(
    learner_id = card.learner_id,
    item_id = card.item_id,
    quality,
    interval = result.interval,
    "response processed"
  );

  ReviewOutcome {
    quality,
    result,
    card,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};

  use crate::domain::Difficulty;

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 16, 20, 0).unwrap()
  }

  #[test]
  fn test_first_response_creates_card() {
    let response = ExerciseResponse::new(true, 40.0, 0, 1);
    let outcome = process_response(None, 3, 99, &response, now());

    assert_eq!(outcome.quality, 5.0);
    assert_eq!(outcome.card.learner_id, 3);
    assert_eq!(outcome.card.item_id, 99);
    assert_eq!(outcome.card.repetition_number, 1);
    assert_eq!(outcome.card.interval, 1);
    assert_eq!(outcome.card.last_review, now());
    assert_eq!(outcome.card.next_review, now() + Duration::days(1));
    assert!((outcome.card.quality - 5.0).abs() < f64::EPSILON);
    assert!(outcome.result.should_review);
    assert_eq!(outcome.result.difficulty, Difficulty::Beginner);
  }

  #[test]
  fn test_first_response_failed() {
    let response = ExerciseResponse::new(false, 400.0, 4, 0);
    let outcome = process_response(None, 3, 99, &response, now());

    assert_eq!(outcome.card.repetition_number, 0);
    assert_eq!(outcome.card.interval, 1);
    assert!((outcome.card.easiness_factor - 2.35).abs() < 1e-9);
  }

  #[test]
  fn test_existing_card_keeps_identity() {
    let mut stored = SpacedRepetitionCard::new(8, 21, now() - Duration::days(6));
    stored.repetition_number = 2;
    stored.interval = 6;
    stored.next_review = now();

    let response = ExerciseResponse::new(true, 90.0, 1, 3);
    let outcome = process_response(Some(&stored), 0, 0, &response, now());

    // 3 + 1 + 0.5 = 4.5
    assert_eq!(outcome.quality, 4.5);
    assert_eq!(outcome.card.learner_id, 8);
    assert_eq!(outcome.card.item_id, 21);
    assert_eq!(outcome.card.repetition_number, 3);
    assert_eq!(outcome.card.interval, 7);
    assert_eq!(outcome.card.next_review - outcome.card.last_review, Duration::days(7));
    // Stored card is not modified
    assert_eq!(stored.repetition_number, 2);
  }

  #[test]
  fn test_repeated_successes_increase_repetitions() {
    let response = ExerciseResponse::new(true, 30.0, 0, 0);
    let mut card = process_response(None, 1, 1, &response, now()).card;
    let mut at = now();

    for expected in 2..=10 {
      at += Duration::days(card.interval);
      card = process_response(Some(&card), 1, 1, &response, at).card;
      assert_eq!(card.repetition_number, expected);
    }
    assert_eq!(card.interval, 30);
  }
}
