use async_trait::async_trait;

use crate::error::Result;
use crate::quiz::{Category, QuestionSet, QuizRequest};

/// Source of question sets.
///
/// Provider status failures (no results, rate limited, ...) come back as
/// `Ok` with a failed [`QuestionSet`]; only transport, parse and input
/// problems are `Err`.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Fetch a question set shaped like `request`. A named category is
    /// resolved to a provider id through `known`.
    async fn fetch_questions(
        &self,
        request: &QuizRequest,
        known: &[Category],
    ) -> Result<QuestionSet>;
}

/// Source of the selectable category list.
#[async_trait]
pub trait CategoryProvider: Send + Sync {
    /// Categories sorted alphabetically by name.
    async fn fetch_categories(&self) -> Result<Vec<Category>>;
}
