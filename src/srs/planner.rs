//! Study planning over a snapshot of a learner's cards.
//!
//! Splits cards into what is due now, what comes up within the week, and a
//! seven-day calendar. Nothing here mutates the cards; the plan borrows them.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::config::{DEFAULT_MAX_CARDS_PER_DAY, SCHEDULE_DAYS, UPCOMING_WINDOW_DAYS};
use crate::domain::SpacedRepetitionCard;

/// Cards scheduled for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule<'a> {
  pub date: NaiveDate,
  pub cards: Vec<&'a SpacedRepetitionCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudySchedule<'a> {
  /// Cards due by the start of today, earliest first, capped per day
  pub due: Vec<&'a SpacedRepetitionCard>,
  /// Cards coming due within the week, earliest first
  pub upcoming: Vec<&'a SpacedRepetitionCard>,
  /// One entry per day from today, always seven long
  pub schedule: Vec<DaySchedule<'a>>,
}

/// Midnight UTC of the day containing `now`
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
  now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// True if the card's review falls on or before `cutoff`
pub fn is_due_by(card: &SpacedRepetitionCard, cutoff: DateTime<Utc>) -> bool {
  card.next_review <= cutoff
}

pub fn get_study_schedule(
  cards: &[SpacedRepetitionCard],
  max_cards_per_day: usize,
  now: DateTime<Utc>,
) -> StudySchedule<'_> {
  let today = start_of_day(now);
  let window_end = today + Duration::days(UPCOMING_WINDOW_DAYS);

  let mut sorted: Vec<&SpacedRepetitionCard> = cards.iter().collect();
  // Stable sort keeps input order for equal review times
  sorted.sort_by_key(|card| card.next_review);

  let due: Vec<_> = sorted
    .iter()
    .copied()
    .filter(|card| is_due_by(card, today))
    .take(max_cards_per_day)
    .collect();

  let upcoming: Vec<_> = sorted
    .iter()
    .copied()
    .filter(|card| !is_due_by(card, today) && card.next_review < window_end)
    .collect();

  let schedule = (0..SCHEDULE_DAYS)
    .map(|offset| {
      let date = today.date_naive() + Duration::days(offset);
      let day_cards = sorted
        .iter()
        .copied()
        .filter(|card| card.next_review.date_naive() == date)
        .take(max_cards_per_day)
        .collect();
      DaySchedule {
        date,
        cards: day_cards,
      }
    })
    .collect();

  tracing::debug!(
    total = cards.len(),
    due = due.len(),
    upcoming = upcoming.len(),
    "study schedule built"
  );

  StudySchedule {
    due,
    upcoming,
    schedule,
  }
}

/// Study schedule with the default daily cap
pub fn get_default_study_schedule(
  cards: &[SpacedRepetitionCard],
  now: DateTime<Utc>,
) -> StudySchedule<'_> {
  get_study_schedule(cards, DEFAULT_MAX_CARDS_PER_DAY, now)
}
