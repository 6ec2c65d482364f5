use super::engine::{Session, SessionState};
use crate::error::SessionError;
use crate::quiz::{CategorySelection, QuizRequest};

/// Configuration for "Play again": same amount, the first question's
/// difficulty, and the shared category or `Mixed` when questions differ.
pub fn derive_replay_config(session: &Session) -> Result<QuizRequest, SessionError> {
    if session.state() != SessionState::Graded {
        return Err(SessionError::NotGraded);
    }
    let questions = session.questions();
    let first = questions.first().ok_or(SessionError::EmptyQuestionSet)?;

    let category = if questions.iter().all(|q| q.category() == first.category()) {
        CategorySelection::named(first.category())
    } else {
        CategorySelection::Mixed
    };

    Ok(QuizRequest::new(
        questions.len() as u32,
        first.difficulty(),
        category,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Difficulty, Question, QuestionKind, QuestionSet, RawQuestion};
    use crate::session::SubmitReason;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(category: &str, difficulty: Difficulty) -> Question {
        let mut rng = StdRng::seed_from_u64(5);
        Question::from_raw(
            RawQuestion {
                kind: QuestionKind::Multiple,
                difficulty,
                category: category.into(),
                question: "Which planet is known as the Red Planet?".into(),
                correct_answer: "Mars".into(),
                incorrect_answers: vec!["Venus".into(), "Jupiter".into(), "Mercury".into()],
            },
            &mut rng,
        )
    }

    fn graded(questions: Vec<Question>) -> Session {
        let (mut session, _) = Session::initialize(QuestionSet::success(questions), 0).unwrap();
        session.submit(SubmitReason::Manual, 10);
        session
    }

    #[test]
    fn single_category_is_kept() {
        let session = graded((0..7).map(|_| question("Science", Difficulty::Hard)).collect());
        let config = derive_replay_config(&session).unwrap();
        assert_eq!(
            config,
            QuizRequest::new(7, Difficulty::Hard, CategorySelection::named("Science"))
        );
    }

    #[test]
    fn distinct_categories_become_mixed() {
        let session = graded(vec![
            question("Science", Difficulty::Easy),
            question("History", Difficulty::Medium),
        ]);
        let config = derive_replay_config(&session).unwrap();
        assert_eq!(config.category, CategorySelection::Mixed);
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.amount, 2);
    }

    #[test]
    fn active_session_has_no_replay_config() {
        let (session, _) =
            Session::initialize(QuestionSet::success(vec![question("Art", Difficulty::Easy)]), 0)
                .unwrap();
        assert_eq!(derive_replay_config(&session), Err(SessionError::NotGraded));
    }
}
