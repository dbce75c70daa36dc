//! Engine configuration constants and study settings.
//!
//! This module centralizes the scoring tables, interval caps and reporting
//! thresholds used by the scheduling engine. Everything here is immutable;
//! callers that want different study limits load a [`StudySettings`] once
//! at startup and pass it in explicitly.

use serde::Deserialize;
use std::path::Path;

// ==================== Easiness Factor ====================

/// Lowest easiness factor a card may ever carry
pub const MIN_EASINESS: f64 = 1.3;

/// Highest easiness factor a card may ever carry
pub const MAX_EASINESS: f64 = 2.5;

/// Easiness factor assigned to a card on its first response
pub const DEFAULT_EASINESS: f64 = 2.5;

/// Easiness penalty applied on a failed review
pub const FAILURE_EASINESS_PENALTY: f64 = 0.15;

// ==================== Quality Scoring ====================

/// Quality at or above which a review counts as a success
pub const SUCCESS_THRESHOLD: f64 = 2.5;

/// Highest quality score
pub const MAX_QUALITY: f64 = 5.0;

/// Expected solve time in seconds, indexed by item difficulty tier 0-5
pub const EXPECTED_TIME_SECS: [f64; 6] = [30.0, 45.0, 60.0, 90.0, 120.0, 180.0];

/// Pace ratio band that earns the full pacing bonus
pub const NATURAL_PACE: (f64, f64) = (0.5, 2.0);

/// Upper pace ratio that still earns the partial pacing bonus
pub const SLOW_PACE_LIMIT: f64 = 3.0;

/// Weight of the self-reported confidence bonus at full confidence
pub const CONFIDENCE_WEIGHT: f64 = 0.5;

// ==================== Interval Limits ====================

/// Seed interval (days) after the first successful review
pub const FIRST_INTERVAL_DAYS: i64 = 1;

/// Seed interval (days) after the second consecutive successful review
pub const SECOND_INTERVAL_DAYS: i64 = 6;

/// Interval caps by repetition bucket: (highest repetition number in bucket, max days)
pub const INTERVAL_CAPS: [(u32, i64); 3] = [(2, 3), (4, 7), (8, 14)];

/// Interval cap once a card is past every bucket in [`INTERVAL_CAPS`]
pub const LONG_TERM_INTERVAL_CAP: i64 = 30;

// ==================== Difficulty Classification ====================

/// Easiness thresholds for (easy, medium, hard); anything lower is very hard
pub const DIFFICULTY_THRESHOLDS: (f64, f64, f64) = (2.3, 2.0, 1.6);

// ==================== Progress Reporting ====================

/// Minimum easiness for a card to count as mastered
pub const MASTERED_MIN_EASINESS: f64 = 2.2;

/// Minimum repetition number for a card to count as mastered
pub const MASTERED_MIN_REPETITIONS: u32 = 3;

/// Easiness at or below which a card counts as difficult
pub const DIFFICULT_MAX_EASINESS: f64 = 1.6;

/// Minimum easiness for a card to count toward the success rate
pub const SUCCESS_MIN_EASINESS: f64 = 2.0;

/// Minimum last-applied quality for a card to count toward the success rate
pub const SUCCESS_MIN_QUALITY: f64 = 3.0;

// ==================== Study Planning ====================

/// Default number of cards planned per day
pub const DEFAULT_MAX_CARDS_PER_DAY: usize = 10;

/// Number of day buckets in the study calendar
pub const SCHEDULE_DAYS: i64 = 7;

/// Look-ahead window (days) for upcoming cards
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

// ==================== Study Settings ====================

/// Due-card count above which reviews should be prioritized
pub const DEFAULT_DUE_OVERLOAD_THRESHOLD: usize = 15;

/// Number of earliest-due items listed in a prioritize-reviews recommendation
pub const DEFAULT_PRIORITY_REVIEW_COUNT: usize = 10;

/// Window (days) used to measure recent study activity
pub const DEFAULT_ACTIVITY_WINDOW_DAYS: i64 = 7;

/// Fraction of recently reviewed cards below which study frequency is too low
pub const DEFAULT_MIN_RECENT_ACTIVITY: f64 = 0.3;

/// Longest accepted recent-activity window (days)
pub const MAX_ACTIVITY_WINDOW_DAYS: i64 = 365;

/// Errors raised while loading study settings from a file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid study setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Tunable limits for the study planner and advisor
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StudySettings {
    pub max_cards_per_day: usize,
    pub due_overload_threshold: usize,
    pub priority_review_count: usize,
    pub activity_window_days: i64,
    pub min_recent_activity: f64,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            max_cards_per_day: DEFAULT_MAX_CARDS_PER_DAY,
            due_overload_threshold: DEFAULT_DUE_OVERLOAD_THRESHOLD,
            priority_review_count: DEFAULT_PRIORITY_REVIEW_COUNT,
            activity_window_days: DEFAULT_ACTIVITY_WINDOW_DAYS,
            min_recent_activity: DEFAULT_MIN_RECENT_ACTIVITY,
        }
    }
}

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    study: Option<StudySettings>,
}

impl StudySettings {
    /// Parse the `[study]` table of a TOML document. A missing table yields defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: SettingsFile = toml::from_str(contents)?;
        let settings = file.study.unwrap_or_default();
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the planner and advisor cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cards_per_day == 0 {
            return Err(ConfigError::Invalid {
                field: "max_cards_per_day",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(1..=MAX_ACTIVITY_WINDOW_DAYS).contains(&self.activity_window_days) {
            return Err(ConfigError::Invalid {
                field: "activity_window_days",
                reason: format!(
                    "must be between 1 and {} (got {})",
                    MAX_ACTIVITY_WINDOW_DAYS, self.activity_window_days
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.min_recent_activity) {
            return Err(ConfigError::Invalid {
                field: "min_recent_activity",
                reason: format!("must be a fraction between 0 and 1 (got {})", self.min_recent_activity),
            });
        }
        Ok(())
    }

    /// Read and parse a settings file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

/// Load study settings with priority: config.toml > .env > default
pub fn load_study_settings() -> StudySettings {
    // Load .env file if present
    let _ = dotenvy::dotenv();
    let env_cap = std::env::var("SRS_MAX_CARDS_PER_DAY").ok();
    resolve_study_settings(Path::new("config.toml"), env_cap.as_deref())
}

fn resolve_study_settings(config_path: &Path, env_cap: Option<&str>) -> StudySettings {
    // Priority 1: config.toml
    if config_path.exists() {
        match StudySettings::from_path(config_path) {
            Ok(settings) => {
                tracing::info!("Using study settings from {}", config_path.display());
                return settings;
            }
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", config_path.display(), e);
            }
        }
    }

    // Priority 2: SRS_MAX_CARDS_PER_DAY
    if let Some(raw) = env_cap {
        match raw.trim().parse::<usize>() {
            Ok(cap) if cap > 0 => {
                tracing::info!("Using max cards per day from SRS_MAX_CARDS_PER_DAY: {}", cap);
                return StudySettings {
                    max_cards_per_day: cap,
                    ..StudySettings::default()
                };
            }
            _ => tracing::warn!("Ignoring invalid SRS_MAX_CARDS_PER_DAY value: {}", raw),
        }
    }

    tracing::info!("Using default study settings");
    StudySettings::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_constants() {
        let settings = StudySettings::default();
        assert_eq!(settings.max_cards_per_day, 10);
        assert_eq!(settings.due_overload_threshold, 15);
        assert_eq!(settings.priority_review_count, 10);
        assert_eq!(settings.activity_window_days, 7);
        assert!((settings.min_recent_activity - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_toml_partial_table() {
        let settings = StudySettings::from_toml_str("[study]\nmax_cards_per_day = 5\n").unwrap();
        assert_eq!(settings.max_cards_per_day, 5);
        // Unset keys keep their defaults
        assert_eq!(settings.due_overload_threshold, 15);
    }

    #[test]
    fn test_from_toml_missing_table() {
        let settings = StudySettings::from_toml_str("[database]\npath = \"x.db\"\n").unwrap();
        assert_eq!(settings, StudySettings::default());
    }

    #[test]
    fn test_from_toml_malformed() {
        let err = StudySettings::from_toml_str("[study]\nmax_cards_per_day = \"many\"\n");
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_toml_rejects_oversized_window() {
        let err = StudySettings::from_toml_str("[study]\nactivity_window_days = 100000000\n");
        assert!(matches!(
            err,
            Err(ConfigError::Invalid {
                field: "activity_window_days",
                ..
            })
        ));
    }

    #[test]
    fn test_from_toml_rejects_non_positive_window() {
        for raw in ["0", "-3"] {
            let doc = format!("[study]\nactivity_window_days = {}\n", raw);
            assert!(matches!(
                StudySettings::from_toml_str(&doc),
                Err(ConfigError::Invalid { .. })
            ));
        }
        let ok = StudySettings::from_toml_str("[study]\nactivity_window_days = 365\n").unwrap();
        assert_eq!(ok.activity_window_days, 365);
    }

    #[test]
    fn test_from_toml_rejects_bad_fractions_and_caps() {
        assert!(StudySettings::from_toml_str("[study]\nmin_recent_activity = 1.5\n").is_err());
        assert!(StudySettings::from_toml_str("[study]\nmax_cards_per_day = 0\n").is_err());
    }

    #[test]
    fn test_invalid_error_message() {
        let err = StudySettings::from_toml_str("[study]\nactivity_window_days = 0\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid study setting `activity_window_days`: must be between 1 and 365 (got 0)"
        );
    }

    #[test]
    fn test_resolve_invalid_settings_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[study]\nactivity_window_days = -1\n").unwrap();

        assert_eq!(resolve_study_settings(&path, None), StudySettings::default());
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StudySettings::from_path(&dir.path().join("absent.toml"));
        assert!(matches!(err, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_resolve_prefers_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[study]\nmax_cards_per_day = 4\nmin_recent_activity = 0.5").unwrap();

        let settings = resolve_study_settings(&path, Some("20"));
        assert_eq!(settings.max_cards_per_day, 4);
        assert!((settings.min_recent_activity - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_falls_back_to_env() {
        let dir = tempfile::tempdir().unwrap();
        let settings = resolve_study_settings(&dir.path().join("config.toml"), Some("12"));
        assert_eq!(settings.max_cards_per_day, 12);
    }

    #[test]
    fn test_resolve_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[study\n").unwrap();

        let settings = resolve_study_settings(&path, None);
        assert_eq!(settings, StudySettings::default());
    }

    #[test]
    fn test_resolve_ignores_invalid_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(resolve_study_settings(&path, Some("zero")), StudySettings::default());
        assert_eq!(resolve_study_settings(&path, Some("0")), StudySettings::default());
    }

    #[test]
    fn test_interval_caps_ascending() {
        let mut last = (0, 0);
        for cap in INTERVAL_CAPS {
            assert!(cap.0 > last.0 && cap.1 > last.1);
            last = cap;
        }
        assert!(LONG_TERM_INTERVAL_CAP > last.1);
    }
}
