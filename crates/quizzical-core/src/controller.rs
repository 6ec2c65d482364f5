//! Host-side quiz controller.
//!
//! Owns the category list, at most one [`Session`] and the last provider
//! failure, and wires the session to a provider. Every state change is
//! returned to the caller and also queued for [`QuizController::drain_events`],
//! so a rendering surface can either react inline or poll.

use tracing::{info, warn};

use crate::error::{Result, SessionError, ValidationError};
use crate::events::Event;
use crate::provider::{CategoryProvider, QuestionProvider};
use crate::quiz::{Category, QuestionSet, QuizRequest, ResponseCode};
use crate::session::{
    derive_replay_config, timestamp, Session, SessionSettings, SessionSnapshot, SubmitReason,
};
use crate::storage::QuizConfig;

/// Result of asking the provider for a new question set.
#[derive(Debug, Clone, PartialEq)]
pub enum Launch {
    /// A new session is active.
    Started(Event),
    /// The provider reported a failure; nothing was replaced.
    Rejected(ResponseCode),
}

pub struct QuizController<P> {
    provider: P,
    categories: Vec<Category>,
    session: Option<Session>,
    last_error: Option<ResponseCode>,
    settings: SessionSettings,
    min_questions: u32,
    max_questions: u32,
    events: Vec<Event>,
}

impl<P> QuizController<P>
where
    P: QuestionProvider + CategoryProvider,
{
    pub fn new(provider: P, config: &QuizConfig) -> Self {
        Self {
            provider,
            categories: Vec::new(),
            session: None,
            last_error: None,
            settings: config.session_settings(),
            min_questions: config.min_questions,
            max_questions: config.max_questions,
            events: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(Session::snapshot)
    }

    pub fn last_error(&self) -> Option<ResponseCode> {
        self.last_error
    }

    /// Fixed message for the last provider failure, e.g. "Rate Limit".
    pub fn error_message(&self) -> Option<&'static str> {
        self.last_error.map(ResponseCode::message)
    }

    pub fn amount_range(&self) -> (u32, u32) {
        (self.min_questions, self.max_questions)
    }

    /// Take every event produced since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Fetch the category list. Failures propagate; there is no fallback.
    pub async fn load_categories(&mut self) -> Result<&[Category]> {
        let categories = self.provider.fetch_categories().await?;
        info!(count = categories.len(), "categories loaded");
        self.categories = categories;
        Ok(&self.categories)
    }

    /// Start a quiz from the configuration screen.
    pub async fn start(&mut self, request: &QuizRequest, now_ms: u64) -> Result<Launch> {
        request.validate(self.min_questions, self.max_questions)?;
        self.ensure_categories(request).await?;
        let set = self
            .provider
            .fetch_questions(request, &self.categories)
            .await?;
        if let Some(code) = self.reject_failed(&set) {
            return Ok(Launch::Rejected(code));
        }
        self.launch(set, now_ms)
    }

    /// "Play again" with the shape of the graded session.
    ///
    /// When the provider refuses, the graded session stays in place and the
    /// failure is recorded in [`last_error`](Self::last_error).
    pub async fn start_replay(&mut self, now_ms: u64) -> Result<Launch> {
        let session = self.session.as_ref().ok_or(SessionError::NotGraded)?;
        let session_id = session.id();
        let request = derive_replay_config(session)?;
        info!(%session_id, amount = request.amount, category = %request.category, "replay requested");
        self.events.push(Event::ReplayRequested {
            session_id,
            request: request.clone(),
            at: timestamp(now_ms),
        });

        self.ensure_categories(&request).await?;
        let set = self
            .provider
            .fetch_questions(&request, &self.categories)
            .await?;
        if let Some(code) = self.reject_failed(&set) {
            self.events.push(Event::ReplayFailed {
                session_id,
                response_code: code,
                message: code.message().to_string(),
                at: timestamp(now_ms),
            });
            return Ok(Launch::Rejected(code));
        }
        self.launch(set, now_ms)
    }

    pub fn select_answer(
        &mut self,
        index: usize,
        answer: &str,
        now_ms: u64,
    ) -> Result<Option<Event>, ValidationError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let event = session.select_answer(index, answer, now_ms)?;
        Ok(self.record(event))
    }

    pub fn submit(&mut self, now_ms: u64) -> Option<Event> {
        let event = self.session.as_mut()?.submit(SubmitReason::Manual, now_ms);
        self.record(event)
    }

    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        let event = self.session.as_mut()?.tick(now_ms);
        self.record(event)
    }

    /// Leave the quiz and return to configuration. The session is dropped.
    pub fn abandon(&mut self, now_ms: u64) -> Option<Event> {
        self.last_error = None;
        let session = self.session.take()?;
        info!(session_id = %session.id(), "session abandoned");
        self.record(Some(Event::SessionAbandoned {
            session_id: session.id(),
            at: timestamp(now_ms),
        }))
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// A named category can only be resolved against a loaded list.
    async fn ensure_categories(&mut self, request: &QuizRequest) -> Result<()> {
        if !request.category.is_mixed() && self.categories.is_empty() {
            self.load_categories().await?;
        }
        Ok(())
    }

    fn reject_failed(&mut self, set: &QuestionSet) -> Option<ResponseCode> {
        let code = set.response_code();
        if code.is_success() {
            None
        } else {
            warn!(code = code.code(), message = code.message(), "question set rejected");
            self.last_error = Some(code);
            Some(code)
        }
    }

    fn launch(&mut self, set: QuestionSet, now_ms: u64) -> Result<Launch> {
        let (session, event) = Session::initialize_with(set, now_ms, self.settings)?;
        self.session = Some(session);
        self.last_error = None;
        self.events.push(event.clone());
        Ok(Launch::Started(event))
    }

    fn record(&mut self, event: Option<Event>) -> Option<Event> {
        if let Some(ref e) = event {
            self.events.push(e.clone());
        }
        event
    }
}
