//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Trivia provider endpoint and request timeout
//! - Quiz defaults (amount, difficulty, category) and allowed amount range
//! - Countdown allowance per question and tick interval
//! - Whether correct answers are revealed after grading
//!
//! Configuration is stored at `~/.config/quizzical/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::provider::DEFAULT_BASE_URL;
use crate::quiz::{CategorySelection, Difficulty, QuizRequest};
use crate::session::{
    SessionSettings, TimerMode, MAX_PER_QUESTION_MS, PER_QUESTION_ALLOWANCE_MS, TICK_INTERVAL_MS,
};

/// Trivia provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Quiz defaults and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default = "default_per_question_ms")]
    pub per_question_ms: u64,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_min_questions")]
    pub min_questions: u32,
    #[serde(default = "default_max_questions")]
    pub max_questions: u32,
    #[serde(default = "default_min_questions")]
    pub default_amount: u32,
    #[serde(default = "default_difficulty")]
    pub default_difficulty: Difficulty,
    #[serde(default)]
    pub default_category: CategorySelection,
    /// When false, sessions run without a countdown.
    #[serde(default = "default_true")]
    pub timed: bool,
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub reveal_answers: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/quizzical/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

// Default functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_per_question_ms() -> u64 {
    PER_QUESTION_ALLOWANCE_MS
}
fn default_tick_interval_ms() -> u64 {
    TICK_INTERVAL_MS
}
fn default_min_questions() -> u32 {
    5
}
fn default_max_questions() -> u32 {
    10
}
fn default_difficulty() -> Difficulty {
    Difficulty::Easy
}
fn default_true() -> bool {
    true
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            per_question_ms: default_per_question_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            min_questions: default_min_questions(),
            max_questions: default_max_questions(),
            default_amount: default_min_questions(),
            default_difficulty: default_difficulty(),
            default_category: CategorySelection::Mixed,
            timed: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            reveal_answers: true,
        }
    }
}

impl QuizConfig {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            per_question_ms: self.per_question_ms,
            mode: if self.timed {
                TimerMode::Countdown
            } else {
                TimerMode::Untimed
            },
        }
    }

    /// Request built from the configured defaults.
    pub fn default_request(&self) -> QuizRequest {
        QuizRequest::new(
            self.default_amount,
            self.default_difficulty,
            self.default_category.clone(),
        )
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("not a leaf value".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("."),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Reject values that would make a quiz unplayable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        };
        if self.quiz.per_question_ms == 0 || self.quiz.per_question_ms > MAX_PER_QUESTION_MS {
            return Err(invalid(
                "quiz.per_question_ms",
                "must be between 1 and 600000 (10 minutes)",
            ));
        }
        if self.quiz.tick_interval_ms == 0 {
            return Err(invalid("quiz.tick_interval_ms", "must be greater than zero"));
        }
        if self.quiz.min_questions == 0 || self.quiz.min_questions > self.quiz.max_questions {
            return Err(invalid(
                "quiz.min_questions",
                "must be at least 1 and not above quiz.max_questions",
            ));
        }
        if self.provider.timeout_secs == 0 {
            return Err(invalid("provider.timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or fails validation.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.quiz.per_question_ms, 5_000);
        assert_eq!(parsed.quiz.default_category, CategorySelection::Mixed);
        assert_eq!(parsed.provider.base_url, "https://opentdb.com");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("quiz.timed").as_deref(), Some("true"));
        assert_eq!(cfg.get("quiz.max_questions").as_deref(), Some("10"));
        assert_eq!(cfg.get("quiz.default_difficulty").as_deref(), Some("easy"));
        assert_eq!(cfg.get("quiz.default_category").as_deref(), Some("Mixed"));
        assert!(cfg.get("quiz.missing_key").is_none());
        assert!(cfg.get("quiz").is_none());
    }

    #[test]
    fn apply_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.apply("quiz.timed", "false").unwrap();
        cfg.apply("quiz.per_question_ms", "8000").unwrap();
        cfg.apply("quiz.default_category", "Science & Nature").unwrap();
        cfg.apply("quiz.default_difficulty", "hard").unwrap();
        assert!(!cfg.quiz.timed);
        assert_eq!(cfg.quiz.per_question_ms, 8_000);
        assert_eq!(
            cfg.quiz.default_category,
            CategorySelection::named("Science & Nature")
        );
        assert_eq!(cfg.quiz.default_difficulty, Difficulty::Hard);
        assert_eq!(cfg.quiz.session_settings().mode, TimerMode::Untimed);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("quiz.nonexistent_key", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.apply("", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.apply("quiz.timed", "not_a_bool").is_err());
        assert!(cfg.apply("quiz.per_question_ms", "fast").is_err());
        assert!(cfg.apply("quiz.default_difficulty", "extreme").is_err());
        assert!(cfg.quiz.timed);
    }

    #[test]
    fn apply_rejects_values_failing_validation() {
        let mut cfg = Config::default();
        assert!(cfg.apply("quiz.per_question_ms", "0").is_err());
        assert!(cfg.apply("quiz.min_questions", "20").is_err());
        assert_eq!(cfg.quiz.min_questions, 5);
    }

    #[test]
    fn per_question_allowance_is_capped() {
        let mut cfg = Config::default();
        assert!(cfg.apply("quiz.per_question_ms", "600000").is_ok());
        assert!(matches!(
            cfg.apply("quiz.per_question_ms", "600001"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(cfg.apply("quiz.per_question_ms", "9223372036854775807").is_err());
        assert_eq!(cfg.quiz.per_question_ms, 600_000);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("[quiz]\nmax_questions = 20\n").unwrap();
        assert_eq!(cfg.quiz.max_questions, 20);
        assert_eq!(cfg.quiz.min_questions, 5);
        assert_eq!(cfg.provider.timeout_secs, 10);
        assert!(cfg.display.reveal_answers);
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.quiz.default_amount, 5);
        assert!(path.exists());

        let mut cfg = cfg;
        cfg.apply("quiz.default_amount", "7").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().quiz.default_amount, 7);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[quiz\nbroken").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn default_request_uses_configured_defaults() {
        let req = QuizConfig::default().default_request();
        assert_eq!(req, QuizRequest::new(5, Difficulty::Easy, CategorySelection::Mixed));
    }
}
