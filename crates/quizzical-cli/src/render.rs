//! Plain-text rendering of session snapshots.

use quizzical_core::session::QuestionView;
use quizzical_core::{Outcome, SessionSnapshot};

pub const PLAY_HELP: &str = "\
Commands:
  <question> <choice>   select an answer, e.g. `3 2`
  show                  print the questions again
  time                  print the time left
  submit                check answers
  quit                  leave the quiz";

pub const AFTER_HELP: &str = "Type `again` to play again, `home` to pick a new quiz, or `quit`.";

pub fn question(view: &QuestionView, total: usize) -> String {
    let mut out = format!(
        "Q{}/{} [{} | {}] {}\n",
        view.index + 1,
        total,
        view.category,
        view.difficulty,
        view.prompt
    );
    for (i, choice) in view.choices.iter().enumerate() {
        let marker = if view.selected.as_ref() == Some(choice) { "x" } else { " " };
        out.push_str(&format!("  [{marker}] {}) {choice}\n", i + 1));
    }
    out
}

pub fn questions(snapshot: &SessionSnapshot) -> String {
    snapshot
        .questions
        .iter()
        .map(|q| question(q, snapshot.total))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn status(snapshot: &SessionSnapshot) -> String {
    let answered = snapshot.questions.iter().filter(|q| q.selected.is_some()).count();
    if snapshot.timed {
        format!(
            "Time left: {} ({answered}/{} answered)",
            snapshot.clock, snapshot.total
        )
    } else {
        format!("{answered}/{} answered", snapshot.total)
    }
}

pub fn outcome(outcome: &Outcome) -> String {
    let mut out = format!(
        "You scored {}/{} correct answers ({:.0}%).",
        outcome.score,
        outcome.total,
        outcome.percentage()
    );
    match outcome.loss_reason_text() {
        None => out.push_str(" You win!"),
        Some(reason) => out.push_str(&format!(" {reason}. Better luck next time.")),
    }
    out
}

/// Per-question review plus the outcome line. Correct answers are shown
/// only when `reveal` is set.
pub fn results(snapshot: &SessionSnapshot, reveal: bool) -> String {
    let mut out = String::new();
    if snapshot.forced_submission {
        out.push_str("Time is up!\n");
    }
    for q in &snapshot.questions {
        let correct = q.correct_answer.as_deref();
        let is_right = q.selected.is_some() && q.selected.as_deref() == correct;
        let mark = if is_right { "+" } else { "-" };
        let answer = q.selected.as_deref().unwrap_or("(no answer)");
        out.push_str(&format!("{mark} Q{}: {answer}", q.index + 1));
        if reveal && !is_right {
            if let Some(correct) = correct {
                out.push_str(&format!(" (correct: {correct})"));
            }
        }
        out.push('\n');
    }
    if let Some(o) = &snapshot.outcome {
        out.push_str(&outcome(o));
    }
    out
}
