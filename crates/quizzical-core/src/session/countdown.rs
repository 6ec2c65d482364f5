//! Wall-clock countdown for a quiz session.
//!
//! Remaining time is always `budget - (now - started)`, recomputed from the
//! timestamp the caller passes in. Nothing here sleeps or spawns; the host
//! calls [`Session::tick`](super::Session::tick) every [`TICK_INTERVAL_MS`].

use chrono::{DateTime, Utc};

/// Time allowed per question.
pub const PER_QUESTION_ALLOWANCE_MS: u64 = 5_000;

/// Timer resolution.
pub const TICK_INTERVAL_MS: u64 = 100;

/// Upper bound for a configured per-question allowance (10 minutes).
pub const MAX_PER_QUESTION_MS: u64 = 600_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    budget_ms: u64,
    started_at_ms: u64,
    /// Last computed value; negative once the deadline has passed.
    remaining_ms: i64,
    stopped: bool,
}

impl Countdown {
    /// Budgets beyond `i64::MAX` are clamped to it.
    pub fn start(budget_ms: u64, now_ms: u64) -> Self {
        let budget_ms = budget_ms.min(i64::MAX as u64);
        Self {
            budget_ms,
            started_at_ms: now_ms,
            remaining_ms: budget_ms as i64,
            stopped: false,
        }
    }

    pub fn budget_ms(&self) -> u64 {
        self.budget_ms
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn is_running(&self) -> bool {
        !self.stopped
    }

    /// Recompute from `now_ms` and return the unclamped remaining time.
    /// A stopped countdown keeps the value it had when stopped.
    pub fn update(&mut self, now_ms: u64) -> i64 {
        if !self.stopped {
            let elapsed = now_ms.saturating_sub(self.started_at_ms);
            let elapsed = elapsed.min(i64::MAX as u64) as i64;
            self.remaining_ms = (self.budget_ms as i64).saturating_sub(elapsed);
        }
        self.remaining_ms
    }

    pub fn stop(&mut self, now_ms: u64) {
        self.update(now_ms);
        self.stopped = true;
    }

    pub fn raw_remaining_ms(&self) -> i64 {
        self.remaining_ms
    }

    /// Remaining time as shown to the user, never below zero.
    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms.max(0) as u64
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ms <= 0
    }
}

/// Format milliseconds as zero-padded `mm:ss`.
///
/// Partial seconds round up, so `00:00` appears only once time is out.
pub fn format_clock(remaining_ms: u64) -> String {
    let total_secs = remaining_ms.div_ceil(1000);
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

pub(crate) fn timestamp(ms: u64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms as i64).unwrap_or_default()
}
