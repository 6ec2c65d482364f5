mod countdown;
mod engine;
mod outcome;
mod replay;

pub(crate) use countdown::timestamp;
pub use countdown::{
    format_clock, now_ms, Countdown, MAX_PER_QUESTION_MS, PER_QUESTION_ALLOWANCE_MS,
    TICK_INTERVAL_MS,
};
pub use engine::{
    QuestionView, Session, SessionSettings, SessionSnapshot, SessionState, SubmitReason, TimerMode,
    UNTIMED_CLOCK,
};
pub use outcome::{LossReason, Outcome};
pub use replay::derive_replay_config;
