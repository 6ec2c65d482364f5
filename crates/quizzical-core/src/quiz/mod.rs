mod category;
mod question;
mod question_set;
mod request;

pub use category::{resolve_category_id, sort_categories, Category, CategorySelection};
pub use question::{build_choices, Difficulty, Question, QuestionKind, RawQuestion};
pub use question_set::{QuestionSet, ResponseCode};
pub use request::{QuizRequest, PROVIDER_MAX_AMOUNT};
