//! Check command
//!
//! Evaluates a single guess against a secret word.

use crate::core::{Attempt, GuessError, Word, WordError, parse_feedback};
use crate::game::parse_guess;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("invalid secret word: {0}")]
    Secret(#[from] WordError),
    #[error(transparent)]
    Guess(#[from] GuessError),
    #[error("invalid feedback '{0}': use G/Y/- or 🟩🟨⬜, one per letter")]
    Feedback(String),
}

/// Evaluate `guess` against `secret`, both given as raw input
///
/// # Errors
///
/// Returns an error if the secret is not a word, or the guess is not a word
/// of the secret's length.
///
/// # Examples
/// ```
/// use termo::commands::check_guess;
///
/// let attempt = check_guess("gatos", "GATOS").unwrap();
/// assert!(attempt.is_win());
/// ```
pub fn check_guess(secret: &str, guess: &str) -> Result<Attempt, CheckError> {
    let secret = Word::new(secret)?;
    let guess = parse_guess(&secret, guess)?;
    Ok(Attempt::evaluate(&secret, guess)?)
}

/// Compare an attempt with an expected feedback row
///
/// # Errors
///
/// Returns `CheckError::Feedback` if the row does not parse or its length
/// differs from the guess.
pub fn matches_feedback(attempt: &Attempt, expected: &str) -> Result<bool, CheckError> {
    let results = parse_feedback(expected)
        .filter(|r| r.len() == attempt.results().len())
        .ok_or_else(|| CheckError::Feedback(expected.to_string()))?;
    Ok(results == attempt.results())
}
