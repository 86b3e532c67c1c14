//! Game modes
//!
//! - `solo`: one secret, a bounded number of tries
//! - `duel`: lobby handshake, then a timed round scored by solved words
//! - `timer`: deferred events driving the duel clock

pub mod duel;
pub mod solo;
pub mod timer;

pub use duel::{Duel, DuelEvent, Opponent, Outcome, Phase, Player, Scoreboard};
pub use solo::{GameState, SoloGame};
pub use timer::{TimerId, Timers};

use crate::core::{GuessError, Word};

/// Turn raw player input into a guess for `secret`
///
/// The length is checked before anything else so a short or long entry is
/// always reported as `WrongLength`, whatever characters it holds.
///
/// # Errors
/// Returns `GuessError::WrongLength` or `GuessError::InvalidWord`.
pub fn parse_guess(secret: &Word, input: &str) -> Result<Word, GuessError> {
    let trimmed = input.trim();
    let actual = trimmed.chars().count();
    if actual != secret.len() {
        return Err(GuessError::WrongLength {
            expected: secret.len(),
            actual,
        });
    }
    Ok(Word::new(trimmed)?)
}
