use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quiz::{QuizRequest, ResponseCode};
use crate::session::SubmitReason;

/// Every state change in a quiz session produces an Event.
/// Hosts log them or turn them into screen updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        session_id: Uuid,
        question_count: usize,
        time_budget_ms: u64,
        timed: bool,
        at: DateTime<Utc>,
    },
    AnswerSelected {
        session_id: Uuid,
        question_index: usize,
        answer: String,
        at: DateTime<Utc>,
    },
    SessionGraded {
        session_id: Uuid,
        score: usize,
        total: usize,
        reason: SubmitReason,
        is_won: bool,
        at: DateTime<Utc>,
    },
    /// "Play again" asked the provider for a same-shaped question set.
    ReplayRequested {
        session_id: Uuid,
        request: QuizRequest,
        at: DateTime<Utc>,
    },
    /// The provider refused the replay; the graded session stays on screen.
    ReplayFailed {
        session_id: Uuid,
        response_code: ResponseCode,
        message: String,
        at: DateTime<Utc>,
    },
    SessionAbandoned {
        session_id: Uuid,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn session_id(&self) -> Uuid {
        match self {
            Event::SessionStarted { session_id, .. }
            | Event::AnswerSelected { session_id, .. }
            | Event::SessionGraded { session_id, .. }
            | Event::ReplayRequested { session_id, .. }
            | Event::ReplayFailed { session_id, .. }
            | Event::SessionAbandoned { session_id, .. } => *session_id,
        }
    }
}
