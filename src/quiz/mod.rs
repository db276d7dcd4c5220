//! Multiple-choice quiz
//!
//! - `bank` - the fixed question bank
//! - `engine` - session state machine and view data
//! - `result` - scoring, grades and the answer review

mod bank;
mod engine;
mod result;

#[cfg(test)]
mod tests;

pub use bank::{Question, QUESTION_BANK};
pub use engine::{QuestionView, QuizEngine, QuizSettings, Verdict, SESSION_LENGTH};
pub use result::{Grade, QuizResult, UNANSWERED};
