//! Core domain types for Termo
//!
//! Words and the guess evaluator. Everything here is pure and free of
//! terminal or storage concerns.

mod feedback;
mod word;

pub use feedback::{Attempt, GuessError, LetterResult, evaluate, parse_feedback};
pub use word::{Word, WordError};
