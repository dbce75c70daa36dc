//! Boundary checks for exercise responses.
//!
//! The scheduling engine accepts any response and clamps what it must, so
//! these checks belong to whoever ingests raw attempts: reject malformed
//! data here, before it is scored and stored.

use crate::domain::ExerciseResponse;

const MAX_DIFFICULTY: i32 = 5;
const MAX_CONFIDENCE: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResponseError {
  #[error("time spent must be a finite, non-negative number of seconds (got {0})")]
  InvalidTimeSpent(f64),
  #[error("difficulty must be between 0 and 5 (got {0})")]
  DifficultyOutOfRange(i32),
  #[error("confidence must be between 0 and 5 (got {0})")]
  ConfidenceOutOfRange(f64),
}

pub fn validate_response(response: &ExerciseResponse) -> Result<(), ResponseError> {
  if !response.time_spent.is_finite() || response.time_spent < 0.0 {
    return Err(ResponseError::InvalidTimeSpent(response.time_spent));
  }

  if !(0..=MAX_DIFFICULTY).contains(&response.difficulty) {
    return Err(ResponseError::DifficultyOutOfRange(response.difficulty));
  }

  if let Some(confidence) = response.confidence {
    if !(0.0..=MAX_CONFIDENCE).contains(&confidence) {
      return Err(ResponseError::ConfidenceOutOfRange(confidence));
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_valid_response() {
    let response = ExerciseResponse::new(true, 0.0, 0, 0).with_confidence(5.0);
    assert_eq!(validate_response(&response), Ok(()));
  }

  #[test]
  fn test_negative_time_rejected() {
    let response = ExerciseResponse::new(true, -1.0, 0, 2);
    assert_eq!(
      validate_response(&response),
      Err(ResponseError::InvalidTimeSpent(-1.0))
    );
  }

  #[test]
  fn test_nonfinite_time_rejected() {
    let response = ExerciseResponse::new(true, f64::INFINITY, 0, 2);
    assert!(matches!(
      validate_response(&response),
      Err(ResponseError::InvalidTimeSpent(_))
    ));

    let response = ExerciseResponse::new(true, f64::NAN, 0, 2);
    assert!(validate_response(&response).is_err());
  }

  #[test]
  fn test_difficulty_bounds() {
    assert!(validate_response(&ExerciseResponse::new(false, 10.0, 1, 5)).is_ok());
    assert_eq!(
      validate_response(&ExerciseResponse::new(false, 10.0, 1, 6)),
      Err(ResponseError::DifficultyOutOfRange(6))
    );
    assert_eq!(
      validate_response(&ExerciseResponse::new(false, 10.0, 1, -1)),
      Err(ResponseError::DifficultyOutOfRange(-1))
    );
  }

  #[test]
  fn test_confidence_bounds() {
    let high = ExerciseResponse::new(true, 10.0, 0, 1).with_confidence(5.5);
    assert_eq!(
      validate_response(&high),
      Err(ResponseError::ConfidenceOutOfRange(5.5))
    );

    let nan = ExerciseResponse::new(true, 10.0, 0, 1).with_confidence(f64::NAN);
    assert!(matches!(
      validate_response(&nan),
      Err(ResponseError::ConfidenceOutOfRange(_))
    ));
  }

  #[test]
  fn test_error_messages() {
    let err = ResponseError::DifficultyOutOfRange(9);
    assert_eq!(err.to_string(), "difficulty must be between 0 and 5 (got 9)");
  }
}
