//! Shared builders for integration tests.
#![allow(dead_code)]

use quizzical_core::quiz::RawQuestion;
use quizzical_core::{Difficulty, Question, QuestionKind, QuestionSet};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn multiple(category: &str, difficulty: Difficulty, correct: &str, seed: u64) -> Question {
    let mut rng = StdRng::seed_from_u64(seed);
    Question::from_raw(
        RawQuestion {
            kind: QuestionKind::Multiple,
            difficulty,
            category: category.to_string(),
            question: format!("Which one is {correct}?"),
            correct_answer: correct.to_string(),
            incorrect_answers: vec!["Alpha".into(), "Beta".into(), "Gamma".into()],
        },
        &mut rng,
    )
}

pub fn boolean(category: &str, difficulty: Difficulty, correct: &str) -> Question {
    let mut rng = StdRng::seed_from_u64(0);
    let wrong = if correct == "True" { "False" } else { "True" };
    Question::from_raw(
        RawQuestion {
            kind: QuestionKind::Boolean,
            difficulty,
            category: category.to_string(),
            question: format!("Is the answer {correct}?"),
            correct_answer: correct.to_string(),
            incorrect_answers: vec![wrong.to_string()],
        },
        &mut rng,
    )
}

/// `n` multiple-choice questions in one category, correct answer "Delta".
pub fn uniform_set(n: usize, category: &str, difficulty: Difficulty) -> QuestionSet {
    QuestionSet::success(
        (0..n)
            .map(|i| multiple(category, difficulty, "Delta", i as u64))
            .collect(),
    )
}
