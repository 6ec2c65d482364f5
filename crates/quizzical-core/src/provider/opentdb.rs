//! Open Trivia DB client -- questions and categories over HTTPS.
//!
//! Questions are requested with `encode=url3986` so every text field
//! arrives percent-encoded and is decoded here, before choices are built.

use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::traits::{CategoryProvider, QuestionProvider};
use crate::error::{ProviderError, Result};
use crate::quiz::{
    resolve_category_id, sort_categories, Category, Question, QuestionSet, QuizRequest,
    RawQuestion, ResponseCode,
};
use crate::storage::ProviderConfig;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    trivia_categories: Vec<Category>,
}

pub struct OpenTdbClient {
    http: Client,
    base_url: Url,
}

impl OpenTdbClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let base_url = Url::parse(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quizzical/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `api.php?amount=..[&category=..]&difficulty=..&encode=url3986`
    pub fn questions_url(
        &self,
        request: &QuizRequest,
        category_id: Option<u32>,
    ) -> Result<Url, ProviderError> {
        let mut url = self.base_url.join("api.php")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("amount", &request.amount.to_string());
            if let Some(id) = category_id {
                query.append_pair("category", &id.to_string());
            }
            query.append_pair("difficulty", request.difficulty.as_str());
            query.append_pair("encode", "url3986");
        }
        Ok(url)
    }

    pub fn categories_url(&self) -> Result<Url, ProviderError> {
        Ok(self.base_url.join("api_category.php")?)
    }
}

#[async_trait]
impl QuestionProvider for OpenTdbClient {
    async fn fetch_questions(
        &self,
        request: &QuizRequest,
        known: &[Category],
    ) -> Result<QuestionSet> {
        let category_id = resolve_category_id(&request.category, known)?;
        let url = self.questions_url(request, category_id)?;
        debug!(%url, "fetching questions");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ProviderError::from)?;
        let status = resp.status();
        let body = resp.text().await.map_err(ProviderError::from)?;

        // Rate limiting arrives as HTTP 429 with a regular body, so the body
        // is consulted before the status.
        let payload: QuestionsResponse = match serde_json::from_str(&body) {
            Ok(payload) => payload,
            Err(_) if !status.is_success() => {
                return Err(ProviderError::Http {
                    status: status.as_u16(),
                }
                .into())
            }
            Err(e) => return Err(ProviderError::Decode(e.to_string()).into()),
        };

        let code = ResponseCode::try_from(payload.response_code)?;
        if !code.is_success() {
            warn!(code = code.code(), message = code.message(), "provider refused question request");
            return Ok(QuestionSet::failure(code));
        }

        let raws = payload
            .results
            .into_iter()
            .map(decode_question)
            .collect::<Result<Vec<_>, _>>()?;

        let mut rng = rand::thread_rng();
        let questions: Vec<Question> = raws
            .into_iter()
            .map(|raw| Question::from_raw(raw, &mut rng))
            .collect();
        debug!(count = questions.len(), "questions received");
        Ok(QuestionSet::success(questions))
    }
}

#[async_trait]
impl CategoryProvider for OpenTdbClient {
    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let url = self.categories_url()?;
        debug!(%url, "fetching categories");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ProviderError::from)?;
        if !resp.status().is_success() {
            return Err(ProviderError::Http {
                status: resp.status().as_u16(),
            }
            .into());
        }
        let body = resp.text().await.map_err(ProviderError::from)?;
        let payload: CategoriesResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;

        let mut categories = payload.trivia_categories;
        sort_categories(&mut categories);
        Ok(categories)
    }
}

fn decode_text(text: &str) -> Result<String, ProviderError> {
    urlencoding::decode(text)
        .map(Cow::into_owned)
        .map_err(|e| ProviderError::Decode(format!("invalid percent-encoding in '{text}': {e}")))
}

fn decode_question(raw: RawQuestion) -> Result<RawQuestion, ProviderError> {
    Ok(RawQuestion {
        kind: raw.kind,
        difficulty: raw.difficulty,
        category: decode_text(&raw.category)?,
        question: decode_text(&raw.question)?,
        correct_answer: decode_text(&raw.correct_answer)?,
        incorrect_answers: raw
            .incorrect_answers
            .iter()
            .map(|a| decode_text(a))
            .collect::<Result<_, _>>()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{CategorySelection, Difficulty, QuestionKind};

    fn client() -> OpenTdbClient {
        OpenTdbClient::new(DEFAULT_BASE_URL, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn mixed_request_omits_category() {
        let req = QuizRequest::new(5, Difficulty::Easy, CategorySelection::Mixed);
        let url = client().questions_url(&req, None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://opentdb.com/api.php?amount=5&difficulty=easy&encode=url3986"
        );
    }

    #[test]
    fn named_request_carries_category_id() {
        let req = QuizRequest::new(10, Difficulty::Hard, CategorySelection::named("Science"));
        let url = client().questions_url(&req, Some(17)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://opentdb.com/api.php?amount=10&category=17&difficulty=hard&encode=url3986"
        );
    }

    #[test]
    fn categories_url_points_at_category_endpoint() {
        assert_eq!(
            client().categories_url().unwrap().as_str(),
            "https://opentdb.com/api_category.php"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            OpenTdbClient::new("not a url", Duration::from_secs(1)),
            Err(ProviderError::InvalidUrl(_))
        ));
    }

    #[test]
    fn decodes_every_text_field() {
        let raw = RawQuestion {
            kind: QuestionKind::Multiple,
            difficulty: Difficulty::Medium,
            category: "Entertainment%3A%20Books".into(),
            question: "Who%20wrote%20%22Dune%22%3F".into(),
            correct_answer: "Frank%20Herbert".into(),
            incorrect_answers: vec!["Isaac%20Asimov".into(), "Ursula%20K.%20Le%20Guin".into()],
        };
        let decoded = decode_question(raw).unwrap();
        assert_eq!(decoded.category, "Entertainment: Books");
        assert_eq!(decoded.question, "Who wrote \"Dune\"?");
        assert_eq!(decoded.correct_answer, "Frank Herbert");
        assert_eq!(decoded.incorrect_answers[1], "Ursula K. Le Guin");
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        assert!(matches!(decode_text("%FF%FE"), Err(ProviderError::Decode(_))));
    }
}
