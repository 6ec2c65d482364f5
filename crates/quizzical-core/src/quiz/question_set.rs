use serde::{Deserialize, Serialize};

use super::question::Question;
use crate::error::ProviderError;

/// Human-readable text for each provider response code, indexed by code.
const RESPONSE_MESSAGES: [&str; 6] = [
    "Success",
    "No Results",
    "Invalid Parameter",
    "Token Not Found",
    "Token Empty",
    "Rate Limit",
];

/// Status reported by the question provider alongside every question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ResponseCode {
    Success = 0,
    NoResults = 1,
    InvalidParameter = 2,
    TokenNotFound = 3,
    TokenEmpty = 4,
    RateLimit = 5,
}

impl ResponseCode {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        self == ResponseCode::Success
    }

    pub fn message(self) -> &'static str {
        RESPONSE_MESSAGES[self as usize]
    }
}

impl TryFrom<u8> for ResponseCode {
    type Error = ProviderError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ResponseCode::Success),
            1 => Ok(ResponseCode::NoResults),
            2 => Ok(ResponseCode::InvalidParameter),
            3 => Ok(ResponseCode::TokenNotFound),
            4 => Ok(ResponseCode::TokenEmpty),
            5 => Ok(ResponseCode::RateLimit),
            other => Err(ProviderError::UnknownResponseCode(other)),
        }
    }
}

impl From<ResponseCode> for u8 {
    fn from(code: ResponseCode) -> Self {
        code.code()
    }
}

/// Ordered questions plus the provider's status.
///
/// A failed set never carries questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    response_code: ResponseCode,
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn success(questions: Vec<Question>) -> Self {
        Self {
            response_code: ResponseCode::Success,
            questions,
        }
    }

    pub fn failure(code: ResponseCode) -> Self {
        Self {
            response_code: code,
            questions: Vec::new(),
        }
    }

    pub fn response_code(&self) -> ResponseCode {
        self.response_code
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Whether a session may be started from this set.
    pub fn is_playable(&self) -> bool {
        self.response_code.is_success() && !self.questions.is_empty()
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}
