//! Termo word representation
//!
//! A Word is a non-empty run of ASCII letters, normalized to uppercase.
//! Secrets and guesses share this type; their lengths are compared at
//! evaluation time rather than fixed at compile time.

use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A validated, uppercase Termo word
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must not be empty")]
    Empty,
    #[error("word must contain only ASCII letters")]
    NonAscii,
    #[error("word contains invalid character '{0}'")]
    InvalidCharacter(char),
}

impl Word {
    /// Create a new Word from a string
    ///
    /// Surrounding whitespace is trimmed and letters are uppercased.
    ///
    /// # Errors
    /// Returns `WordError` if the trimmed input is empty, is not ASCII, or
    /// contains anything other than letters.
    ///
    /// # Examples
    /// ```
    /// use termo::core::Word;
    ///
    /// let word = Word::new(" limao ").unwrap();
    /// assert_eq!(word.text(), "LIMAO");
    ///
    /// assert!(Word::new("gat0s").is_err());
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, WordError> {
        let trimmed = text.as_ref().trim();

        if trimmed.is_empty() {
            return Err(WordError::Empty);
        }

        if !trimmed.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if let Some(bad) = trimmed.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(WordError::InvalidCharacter(bad));
        }

        Ok(Self {
            text: trimmed.to_ascii_uppercase(),
        })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as uppercase ASCII bytes
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Number of letters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Never true for a validated word
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get the count of each letter in the word
    ///
    /// Used by feedback evaluation to handle repeated letters.
    #[inline]
    pub(crate) fn char_counts(&self) -> FxHashMap<u8, usize> {
        let mut counts = FxHashMap::default();
        for &ch in self.chars() {
            *counts.entry(ch).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
