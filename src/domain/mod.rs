pub mod card;
pub mod review;

pub use card::{CardHistory, Difficulty, SchedulingState, SpacedRepetitionCard, UnknownDifficulty};
pub use review::{ExerciseResponse, SuperMemoResult};
