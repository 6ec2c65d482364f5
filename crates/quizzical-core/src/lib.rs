//! # Quizzical Core Library
//!
//! This library provides the core logic for Quizzical, a timed multiple-choice
//! trivia quiz. Rendering surfaces (the CLI today) are thin layers over the
//! same core.
//!
//! ## Architecture
//!
//! - **Session Engine**: A wall-clock-based state machine that requires the caller
//!   to periodically invoke `tick()` so the countdown can force a submission
//! - **Quiz Model**: Questions with frozen choice sets, provider status codes,
//!   categories and request shapes
//! - **Providers**: Traits for question and category sources, plus an
//!   Open Trivia DB client
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Session`]: Quiz session state machine
//! - [`QuizController`]: Owns the current session and talks to a provider
//! - [`OpenTdbClient`]: Open Trivia DB question and category provider
//! - [`Config`]: Application configuration management

pub mod controller;
pub mod error;
pub mod events;
pub mod provider;
pub mod quiz;
pub mod session;
pub mod storage;

pub use controller::{Launch, QuizController};
pub use error::{ConfigError, CoreError, ProviderError, SessionError, ValidationError};
pub use events::Event;
pub use provider::{CategoryProvider, OpenTdbClient, QuestionProvider};
pub use quiz::{
    Category, CategorySelection, Difficulty, Question, QuestionKind, QuestionSet, QuizRequest,
    ResponseCode,
};
pub use session::{
    derive_replay_config, Outcome, Session, SessionSnapshot, SessionState, SubmitReason,
    TimerMode,
};
pub use storage::Config;
