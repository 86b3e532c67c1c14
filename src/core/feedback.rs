//! Guess evaluation and per-letter feedback
//!
//! Each position of a guess is classified as:
//! - `Correct`: same letter at the same position of the secret
//! - `Present`: letter occurs elsewhere in the secret, within its multiplicity
//! - `Absent`: letter does not occur, or every occurrence is already used

use super::{Word, WordError};
use thiserror::Error;

/// Classification of one guessed letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterResult {
    Correct,
    Present,
    Absent,
}

impl LetterResult {
    /// Emoji square used when sharing results
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }

    /// Parse one feedback symbol
    ///
    /// Accepts:
    /// - 'G'/'g'/🟩 for correct
    /// - 'Y'/'y'/🟨 for present
    /// - '-'/'.'/'X'/'x'/⬜/⬛ for absent
    #[must_use]
    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            'G' | 'g' | '🟩' => Some(Self::Correct),
            'Y' | 'y' | '🟨' => Some(Self::Present),
            '-' | '.' | 'X' | 'x' | '⬜' | '⬛' => Some(Self::Absent),
            _ => None,
        }
    }
}

/// Parse a feedback row such as "GY--G" or "🟩🟨⬜⬜🟩"
///
/// Returns `None` if the row is empty or holds an unknown symbol.
#[must_use]
pub fn parse_feedback(s: &str) -> Option<Vec<LetterResult>> {
    let results: Option<Vec<_>> = s.trim().chars().map(LetterResult::from_symbol).collect();
    results.filter(|r| !r.is_empty())
}

/// Why a guess was not evaluated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("guess must have {expected} letters, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("invalid guess: {0}")]
    InvalidWord(#[from] WordError),
    #[error("the game is already over")]
    GameOver,
    #[error("no round is in progress")]
    NotActive,
}

/// Evaluate `guess` against `secret`
///
/// # Algorithm
/// 1. Count the remaining occurrences of every letter of the secret
/// 2. First pass: exact position matches are `Correct` and consume a count
/// 3. Second pass: remaining positions are `Present` while counts last,
///    otherwise `Absent`
///
/// Exact matches must be consumed before partial ones, otherwise a repeated
/// letter could be reported as present more often than the secret holds it.
///
/// # Errors
/// Returns `GuessError::WrongLength` if the words differ in length.
///
/// # Examples
/// ```
/// use termo::core::{LetterResult::*, Word, evaluate};
///
/// let secret = Word::new("LIMAO").unwrap();
/// let guess = Word::new("MALOU").unwrap();
/// let results = evaluate(&secret, &guess).unwrap();
///
/// assert_eq!(results, vec![Present, Present, Present, Present, Absent]);
/// ```
pub fn evaluate(secret: &Word, guess: &Word) -> Result<Vec<LetterResult>, GuessError> {
    if secret.len() != guess.len() {
        return Err(GuessError::WrongLength {
            expected: secret.len(),
            actual: guess.len(),
        });
    }

    let mut results = vec![LetterResult::Absent; secret.len()];
    let mut matched = vec![false; secret.len()];
    let mut available = secret.char_counts();

    for (i, (&g, &s)) in guess.chars().iter().zip(secret.chars()).enumerate() {
        if g == s {
            results[i] = LetterResult::Correct;
            matched[i] = true;
            if let Some(count) = available.get_mut(&g) {
                *count = count.saturating_sub(1);
            }
        }
    }

    for (i, &g) in guess.chars().iter().enumerate() {
        if matched[i] {
            continue;
        }
        if let Some(count) = available.get_mut(&g)
            && *count > 0
        {
            results[i] = LetterResult::Present;
            *count -= 1;
        }
    }

    Ok(results)
}

/// One evaluated guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    guess: Word,
    results: Vec<LetterResult>,
}

impl Attempt {
    /// Evaluate `guess` against `secret` and keep both the guess and its feedback
    ///
    /// # Errors
    /// Returns `GuessError::WrongLength` if the words differ in length.
    pub fn evaluate(secret: &Word, guess: Word) -> Result<Self, GuessError> {
        let results = evaluate(secret, &guess)?;
        Ok(Self { guess, results })
    }

    #[inline]
    #[must_use]
    pub const fn guess(&self) -> &Word {
        &self.guess
    }

    #[inline]
    #[must_use]
    pub fn results(&self) -> &[LetterResult] {
        &self.results
    }

    /// Letters paired with their feedback, in position order
    pub fn letters(&self) -> impl Iterator<Item = (char, LetterResult)> + '_ {
        self.guess
            .chars()
            .iter()
            .map(|&b| char::from(b))
            .zip(self.results.iter().copied())
    }

    /// True if every letter is `Correct`
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.results.iter().all(|&r| r == LetterResult::Correct)
    }

    #[must_use]
    pub fn count(&self, kind: LetterResult) -> usize {
        self.results.iter().filter(|&&r| r == kind).count()
    }

    /// Feedback as a row of emoji squares, e.g. "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.results.iter().map(|r| r.emoji()).collect()
    }
}
