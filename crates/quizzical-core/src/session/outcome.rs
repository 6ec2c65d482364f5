use serde::{Deserialize, Serialize};

use super::engine::SubmitReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossReason {
    /// Half or fewer of the answers were correct.
    LowScore,
    /// Grading was forced by the countdown.
    TimedOut,
}

impl LossReason {
    pub fn describe(self) -> &'static str {
        match self {
            LossReason::LowScore => "scored 50% or less",
            LossReason::TimedOut => "ran out of time",
        }
    }
}

/// Result of a graded session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub score: usize,
    pub total: usize,
    pub reason: SubmitReason,
    pub is_won: bool,
    pub loss_reasons: Vec<LossReason>,
}

impl Outcome {
    /// A win needs a strict majority of correct answers and a manual
    /// submission. Running out of time loses whatever the score.
    pub fn evaluate(score: usize, total: usize, reason: SubmitReason) -> Self {
        let mut loss_reasons = Vec::new();
        if score * 2 <= total {
            loss_reasons.push(LossReason::LowScore);
        }
        if reason == SubmitReason::TimeExpired {
            loss_reasons.push(LossReason::TimedOut);
        }
        Self {
            score,
            total,
            reason,
            is_won: loss_reasons.is_empty(),
            loss_reasons,
        }
    }

    /// e.g. "You scored 50% or less and ran out of time". `None` on a win.
    pub fn loss_reason_text(&self) -> Option<String> {
        if self.loss_reasons.is_empty() {
            return None;
        }
        let parts: Vec<&str> = self.loss_reasons.iter().map(|r| r.describe()).collect();
        Some(format!("You {}", parts.join(" and ")))
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64 * 100.0
    }
}
