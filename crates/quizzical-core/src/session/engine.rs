//! Quiz session state machine.
//!
//! A session is created from a playable question set and is driven by three
//! inputs: answer selections, timer ticks and submission. It holds no
//! global state and reads no clock of its own; every command takes the
//! current time in epoch milliseconds so tests can simulate time exactly.
//!
//! ## State Transitions
//!
//! ```text
//! Active -> Graded
//! ```
//!
//! A graded session never changes again. Replay builds a new session.
//!
//! ## Usage
//!
//! ```ignore
//! let (mut session, _started) = Session::initialize(set, now_ms())?;
//! session.select_answer(0, "True", now_ms())?;
//! // In a loop every TICK_INTERVAL_MS:
//! session.tick(now_ms()); // Returns Some(Event::SessionGraded) on expiry
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::countdown::{format_clock, timestamp, Countdown, PER_QUESTION_ALLOWANCE_MS};
use super::outcome::Outcome;
use crate::error::{SessionError, ValidationError};
use crate::events::Event;
use crate::quiz::{Difficulty, Question, QuestionSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Accepting answers, timer running.
    Active,
    /// Score computed, inputs locked, timer stopped.
    Graded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitReason {
    Manual,
    TimeExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// Time budget per question; expiry forces a losing submission.
    #[default]
    Countdown,
    /// No time pressure; the win rule is the score threshold alone.
    Untimed,
}

/// Clock text for sessions without a countdown.
pub const UNTIMED_CLOCK: &str = "--:--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub per_question_ms: u64,
    pub mode: TimerMode,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            per_question_ms: PER_QUESTION_ALLOWANCE_MS,
            mode: TimerMode::Countdown,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    questions: Vec<Question>,
    selected_answers: Vec<Option<String>>,
    /// `None` until graded.
    score: Option<usize>,
    countdown: Countdown,
    mode: TimerMode,
    is_locked: bool,
    forced_submission: bool,
    submit_reason: Option<SubmitReason>,
}

impl Session {
    /// Start a session with the default 5 s per question countdown.
    pub fn initialize(set: QuestionSet, now_ms: u64) -> Result<(Self, Event), SessionError> {
        Self::initialize_with(set, now_ms, SessionSettings::default())
    }

    /// Start a session. The question set must be successful and non-empty.
    pub fn initialize_with(
        set: QuestionSet,
        now_ms: u64,
        settings: SessionSettings,
    ) -> Result<(Self, Event), SessionError> {
        let code = set.response_code();
        if !code.is_success() {
            return Err(SessionError::ProviderFailure(code));
        }
        if set.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }

        let questions = set.into_questions();
        let count = questions.len();
        let budget_ms = (count as u64).saturating_mul(settings.per_question_ms);
        let session = Self {
            id: Uuid::new_v4(),
            selected_answers: vec![None; count],
            questions,
            score: None,
            countdown: Countdown::start(budget_ms, now_ms),
            mode: settings.mode,
            is_locked: false,
            forced_submission: false,
            submit_reason: None,
        };
        debug!(session_id = %session.id, count, budget_ms, "session started");

        let event = Event::SessionStarted {
            session_id: session.id,
            question_count: count,
            time_budget_ms: budget_ms,
            timed: session.mode == TimerMode::Countdown,
            at: timestamp(now_ms),
        };
        Ok((session, event))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        if self.score.is_some() {
            SessionState::Graded
        } else {
            SessionState::Active
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn selected_answers(&self) -> &[Option<String>] {
        &self.selected_answers
    }

    pub fn score(&self) -> Option<usize> {
        self.score
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn forced_submission(&self) -> bool {
        self.forced_submission
    }

    pub fn submit_reason(&self) -> Option<SubmitReason> {
        self.submit_reason
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn time_budget_ms(&self) -> u64 {
        self.countdown.budget_ms()
    }

    /// Remaining time as of the last tick, clamped at zero. Always zero for
    /// untimed sessions.
    pub fn remaining_ms(&self) -> u64 {
        match self.mode {
            TimerMode::Countdown => self.countdown.remaining_ms(),
            TimerMode::Untimed => 0,
        }
    }

    /// Remaining time as `mm:ss`, or `--:--` when untimed.
    pub fn clock(&self) -> String {
        match self.mode {
            TimerMode::Countdown => format_clock(self.remaining_ms()),
            TimerMode::Untimed => UNTIMED_CLOCK.to_string(),
        }
    }

    pub fn answered_count(&self) -> usize {
        self.selected_answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        let score = self.score?;
        let reason = self.submit_reason?;
        Some(Outcome::evaluate(score, self.questions.len(), reason))
    }

    pub fn is_won(&self) -> Option<bool> {
        self.outcome().map(|o| o.is_won)
    }

    pub fn loss_reason(&self) -> Option<String> {
        self.outcome().and_then(|o| o.loss_reason_text())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let graded = self.state() == SessionState::Graded;
        let questions = self
            .questions
            .iter()
            .zip(&self.selected_answers)
            .enumerate()
            .map(|(index, (q, selected))| QuestionView {
                index,
                prompt: q.prompt().to_string(),
                category: q.category().to_string(),
                difficulty: q.difficulty(),
                choices: q.choices().to_vec(),
                selected: selected.clone(),
                correct_answer: graded.then(|| q.correct_answer().to_string()),
            })
            .collect();

        SessionSnapshot {
            session_id: self.id,
            state: self.state(),
            questions,
            is_locked: self.is_locked,
            score: self.score,
            total: self.questions.len(),
            timed: self.mode == TimerMode::Countdown,
            remaining_ms: self.remaining_ms(),
            clock: self.clock(),
            forced_submission: self.forced_submission,
            outcome: self.outcome(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Record `answer` for question `index`, replacing any earlier choice.
    ///
    /// Returns `Ok(None)` without changing anything once the session is
    /// locked. An index out of range or an answer that is not one of the
    /// question's choices is an error.
    pub fn select_answer(
        &mut self,
        index: usize,
        answer: &str,
        now_ms: u64,
    ) -> Result<Option<Event>, ValidationError> {
        if self.is_locked {
            debug!(session_id = %self.id, index, "selection ignored, session locked");
            return Ok(None);
        }
        let question = self.questions.get(index).ok_or(ValidationError::OutOfBounds {
            collection: "questions".into(),
            index,
            len: self.questions.len(),
        })?;
        if !question.has_choice(answer) {
            return Err(ValidationError::InvalidValue {
                field: format!("answer[{index}]"),
                message: format!("'{answer}' is not one of the choices"),
            });
        }

        self.selected_answers[index] = Some(answer.to_string());
        Ok(Some(Event::AnswerSelected {
            session_id: self.id,
            question_index: index,
            answer: answer.to_string(),
            at: timestamp(now_ms),
        }))
    }

    /// Grade the session. Only the first call has any effect.
    pub fn submit(&mut self, reason: SubmitReason, now_ms: u64) -> Option<Event> {
        if self.score.is_some() {
            debug!(session_id = %self.id, ?reason, "submission ignored, already graded");
            return None;
        }

        self.countdown.stop(now_ms);
        let score = self
            .questions
            .iter()
            .zip(&self.selected_answers)
            .filter(|(q, selected)| selected.as_deref().is_some_and(|a| q.is_correct(a)))
            .count();
        self.score = Some(score);
        self.is_locked = true;
        self.forced_submission = reason == SubmitReason::TimeExpired;
        self.submit_reason = Some(reason);

        let outcome = Outcome::evaluate(score, self.questions.len(), reason);
        info!(
            session_id = %self.id,
            score,
            total = outcome.total,
            ?reason,
            won = outcome.is_won,
            "session graded"
        );
        Some(Event::SessionGraded {
            session_id: self.id,
            score,
            total: outcome.total,
            reason,
            is_won: outcome.is_won,
            at: timestamp(now_ms),
        })
    }

    /// Advance the countdown to `now_ms`.
    ///
    /// Returns `Some(Event::SessionGraded)` on the tick that finds the time
    /// budget exhausted. Graded and untimed sessions ignore ticks.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        if self.state() == SessionState::Graded || self.mode == TimerMode::Untimed {
            return None;
        }
        let remaining = self.countdown.update(now_ms);
        if remaining <= 0 && !self.forced_submission {
            debug!(session_id = %self.id, remaining, "time expired");
            return self.submit(SubmitReason::TimeExpired, now_ms);
        }
        None
    }
}

/// Read-only view of a session for the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub state: SessionState,
    pub questions: Vec<QuestionView>,
    pub is_locked: bool,
    pub score: Option<usize>,
    pub total: usize,
    pub timed: bool,
    pub remaining_ms: u64,
    pub clock: String,
    pub forced_submission: bool,
    pub outcome: Option<Outcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub index: usize,
    pub prompt: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub choices: Vec<String>,
    pub selected: Option<String>,
    /// Revealed once the session is graded.
    pub correct_answer: Option<String>,
}
