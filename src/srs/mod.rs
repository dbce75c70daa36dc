pub mod limiter;
pub mod numeric;
pub mod planner;
pub mod progress;
pub mod quality;
pub mod review;
pub mod sm2;

pub use limiter::limit_interval;
pub use planner::{get_default_study_schedule, get_study_schedule, DaySchedule, StudySchedule};
pub use progress::{
  analyze_learning_progress, get_personalized_recommendations,
  get_personalized_recommendations_with, Priority, ProgressStats, Recommendation,
  RecommendationKind,
};
pub use quality::calculate_quality;
pub use review::{process_response, ReviewOutcome};
pub use sm2::{calculate_next_review, classify_difficulty, preview_intervals, IntervalPreview};
