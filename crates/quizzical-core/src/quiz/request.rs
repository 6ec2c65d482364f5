use serde::{Deserialize, Serialize};

use super::category::CategorySelection;
use super::question::Difficulty;
use crate::error::ValidationError;

/// The provider never returns more than this many questions per call.
pub const PROVIDER_MAX_AMOUNT: u32 = 50;

/// Shape of a question set to fetch.
///
/// Built from user input at the configuration screen, or derived from a
/// graded session for replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    pub amount: u32,
    pub difficulty: Difficulty,
    pub category: CategorySelection,
}

impl QuizRequest {
    pub fn new(amount: u32, difficulty: Difficulty, category: CategorySelection) -> Self {
        Self {
            amount,
            difficulty,
            category,
        }
    }

    /// Check `amount` against `[min, max]`, capped at the provider maximum.
    pub fn validate(&self, min: u32, max: u32) -> Result<(), ValidationError> {
        let min = min.max(1);
        let max = max.min(PROVIDER_MAX_AMOUNT);
        if self.amount < min || self.amount > max {
            return Err(ValidationError::AmountOutOfRange {
                amount: self.amount,
                min,
                max,
            });
        }
        Ok(())
    }
}
