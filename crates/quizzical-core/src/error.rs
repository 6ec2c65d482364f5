//! Core error types for quizzical-core.
//!
//! Provider status codes (no results, rate limited, ...) are not errors:
//! they travel inside [`QuestionSet`](crate::quiz::QuestionSet) so the
//! rendering surface decides how to present them. The types here cover
//! transport failures, bad input and contract violations that cannot be
//! absorbed as no-ops.

use std::path::PathBuf;
use thiserror::Error;

use crate::quiz::ResponseCode;

/// Core error type for quizzical-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Question or category provider failures
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Session lifecycle errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transport and parse failures while talking to the trivia provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Request could not be sent or the body could not be read
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status without a usable body
    #[error("unexpected HTTP status {status}")]
    Http { status: u16 },

    /// Body was readable but not in the expected shape
    #[error("malformed response: {0}")]
    Decode(String),

    /// `response_code` outside the documented 0..=5 range
    #[error("unknown response code {0}")]
    UnknownResponseCode(u8),

    /// Base URL in the configuration is not a valid URL
    #[error("invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Category name not present in the known category list
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Requested number of questions outside the allowed range
    #[error("Number of questions must be between {min} and {max} (got {amount})")]
    AmountOutOfRange { amount: u32, min: u32, max: u32 },
}

/// Session lifecycle errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// Question set carries a non-success provider status
    #[error("cannot start a session: {}", .0.message())]
    ProviderFailure(ResponseCode),

    /// Question set reported success but contained no questions
    #[error("cannot start a session from an empty question set")]
    EmptyQuestionSet,

    /// Operation needs a graded session
    #[error("session has not been graded yet")]
    NotGraded,
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
