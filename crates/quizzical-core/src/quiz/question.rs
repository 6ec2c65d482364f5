//! Trivia questions and choice-set construction.
//!
//! Choices are built exactly once, when a raw provider record is turned
//! into a [`Question`]. The resulting order is frozen for the lifetime of
//! the question so answers never move under the user.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const BOOLEAN_CHOICES: [&str; 2] = ["True", "False"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ValidationError::InvalidValue {
                field: "difficulty".into(),
                message: format!("expected easy, medium or hard, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Multiple,
    Boolean,
}

/// A question as the provider sends it, before choices are assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub difficulty: Difficulty,
    pub category: String,
    pub question: String,
    pub correct_answer: String,
    #[serde(default)]
    pub incorrect_answers: Vec<String>,
}

/// One immutable trivia item with its frozen choice set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    correct_answer: String,
    choices: Vec<String>,
    category: String,
    difficulty: Difficulty,
    kind: QuestionKind,
}

impl Question {
    /// Build a question from a provider record, placing the correct answer
    /// among the choices with `rng`.
    pub fn from_raw<R: Rng + ?Sized>(raw: RawQuestion, rng: &mut R) -> Self {
        let choices = build_choices(raw.kind, &raw.correct_answer, raw.incorrect_answers, rng);
        Self {
            prompt: raw.question,
            correct_answer: raw.correct_answer,
            choices,
            category: raw.category,
            difficulty: raw.difficulty,
            kind: raw.kind,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn has_choice(&self, answer: &str) -> bool {
        self.choices.iter().any(|c| c == answer)
    }

    /// Grading is by text equality, never by position.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

/// Assemble the answer choices for one question.
///
/// Boolean questions always get `["True", "False"]`. Otherwise the correct
/// answer is spliced into the incorrect answers at a uniformly random
/// index in `0..=incorrect.len()`.
pub fn build_choices<R: Rng + ?Sized>(
    kind: QuestionKind,
    correct: &str,
    mut incorrect: Vec<String>,
    rng: &mut R,
) -> Vec<String> {
    match kind {
        QuestionKind::Boolean => BOOLEAN_CHOICES.iter().map(|s| s.to_string()).collect(),
        QuestionKind::Multiple => {
            let idx = rng.gen_range(0..=incorrect.len());
            incorrect.insert(idx, correct.to_string());
            incorrect
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn raw_multiple() -> RawQuestion {
        RawQuestion {
            kind: QuestionKind::Multiple,
            difficulty: Difficulty::Medium,
            category: "Science: Computers".into(),
            question: "What does CPU stand for?".into(),
            correct_answer: "Central Processing Unit".into(),
            incorrect_answers: vec![
                "Central Process Unit".into(),
                "Computer Personal Unit".into(),
                "Central Processor Unit".into(),
            ],
        }
    }

    #[test]
    fn boolean_choices_are_fixed() {
        let mut rng = StdRng::seed_from_u64(7);
        let choices = build_choices(QuestionKind::Boolean, "False", vec!["True".into()], &mut rng);
        assert_eq!(choices, vec!["True".to_string(), "False".to_string()]);
    }

    #[test]
    fn multiple_choices_contain_every_answer_once() {
        let mut rng = StdRng::seed_from_u64(1);
        let q = Question::from_raw(raw_multiple(), &mut rng);
        assert_eq!(q.choices().len(), 4);
        assert_eq!(
            q.choices().iter().filter(|c| *c == "Central Processing Unit").count(),
            1
        );
        for wrong in &raw_multiple().incorrect_answers {
            assert!(q.has_choice(wrong));
        }
    }

    #[test]
    fn incorrect_answers_keep_their_relative_order() {
        let mut rng = StdRng::seed_from_u64(99);
        let q = Question::from_raw(raw_multiple(), &mut rng);
        let others: Vec<&String> = q
            .choices()
            .iter()
            .filter(|c| c.as_str() != q.correct_answer())
            .collect();
        assert_eq!(others, raw_multiple().incorrect_answers.iter().collect::<Vec<_>>());
    }

    #[test]
    fn correct_answer_reaches_every_position() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let q = Question::from_raw(raw_multiple(), &mut rng);
            let pos = q
                .choices()
                .iter()
                .position(|c| c == q.correct_answer())
                .unwrap();
            seen[pos] = true;
        }
        assert!(seen.iter().all(|s| *s), "positions seen: {seen:?}");
    }

    #[test]
    fn no_incorrect_answers_yields_single_choice() {
        let mut rng = StdRng::seed_from_u64(3);
        let choices = build_choices(QuestionKind::Multiple, "Only", Vec::new(), &mut rng);
        assert_eq!(choices, vec!["Only".to_string()]);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn raw_question_deserializes_provider_shape() {
        let json = r#"{
            "type": "boolean",
            "difficulty": "hard",
            "category": "Science & Nature",
            "question": "The sun is a star.",
            "correct_answer": "True",
            "incorrect_answers": ["False"]
        }"#;
        let raw: RawQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(raw.kind, QuestionKind::Boolean);
        assert_eq!(raw.difficulty, Difficulty::Hard);
        assert_eq!(raw.incorrect_answers, vec!["False".to_string()]);
    }
}
