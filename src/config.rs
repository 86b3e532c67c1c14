//! Game configuration
//!
//! Values come from the command line (see `main.rs`); the defaults below are
//! the game's built-in constants.

use crate::core::{Word, WordError};
use crate::wordlists::{DUEL_WORDS, SOLO_SECRET, loader::words_from_slice};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Tries allowed in a solo game
pub const DEFAULT_MAX_TRIES: usize = 5;

/// Length of a duel round in seconds
pub const DEFAULT_ROUND_SECS: u32 = 180;

/// Delay before the mock opponent reports ready
pub const DEFAULT_OPPONENT_READY_DELAY: Duration = Duration::from_secs(2);

/// How long a finished duel result stays on screen before the reset
pub const DEFAULT_RESULT_DISPLAY: Duration = Duration::from_secs(2);

/// Directory holding persisted documents
pub const DEFAULT_DATA_DIR: &str = ".termo";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid secret word: {0}")]
    InvalidSecret(#[from] WordError),
    #[error("max tries must be at least 1")]
    ZeroTries,
    #[error("round duration must be at least 1 second")]
    ZeroDuration,
    #[error("duel word list is empty")]
    EmptyWordList,
    #[error("duel words must share one length: {first} has {expected} letters, {word} has {actual}")]
    MixedLengths {
        first: String,
        expected: usize,
        word: String,
        actual: usize,
    },
}

/// Solo mode settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoloConfig {
    pub secret: Word,
    pub max_tries: usize,
}

impl SoloConfig {
    /// # Errors
    /// Returns `ConfigError` if `secret` is not a word or `max_tries` is zero.
    pub fn new(secret: &str, max_tries: usize) -> Result<Self, ConfigError> {
        if max_tries == 0 {
            return Err(ConfigError::ZeroTries);
        }
        Ok(Self {
            secret: Word::new(secret)?,
            max_tries,
        })
    }
}

/// Duel mode settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuelConfig {
    pub words: Vec<Word>,
    pub round_secs: u32,
    pub opponent_ready_delay: Duration,
    pub result_display: Duration,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            words: words_from_slice(DUEL_WORDS),
            round_secs: DEFAULT_ROUND_SECS,
            opponent_ready_delay: DEFAULT_OPPONENT_READY_DELAY,
            result_display: DEFAULT_RESULT_DISPLAY,
        }
    }
}

impl DuelConfig {
    /// Check that a round can actually be played with these settings
    ///
    /// # Errors
    /// Returns `ConfigError` for an empty word list, words of different
    /// lengths, or a zero-length round.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }

        let first = self.words.first().ok_or(ConfigError::EmptyWordList)?;
        if let Some(odd) = self.words.iter().find(|w| w.len() != first.len()) {
            return Err(ConfigError::MixedLengths {
                first: first.to_string(),
                expected: first.len(),
                word: odd.to_string(),
                actual: odd.len(),
            });
        }

        Ok(())
    }
}

/// Everything the binary needs to start a session
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub solo: SoloConfig,
    pub duel: DuelConfig,
    pub data_dir: PathBuf,
}

impl GameConfig {
    /// Built-in defaults with the given data directory
    ///
    /// # Errors
    /// Only fails if the embedded constants are themselves invalid.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let config = Self {
            solo: SoloConfig::new(SOLO_SECRET, DEFAULT_MAX_TRIES)?,
            duel: DuelConfig::default(),
            data_dir: data_dir.into(),
        };
        config.duel.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::with_data_dir(DEFAULT_DATA_DIR).unwrap();
        assert_eq!(config.solo.secret.text(), "LIMAO");
        assert_eq!(config.solo.max_tries, 5);
        assert_eq!(config.duel.round_secs, 180);
        assert!(!config.duel.words.is_empty());
    }

    #[test]
    fn solo_rejects_zero_tries() {
        assert_eq!(SoloConfig::new("LIMAO", 0), Err(ConfigError::ZeroTries));
    }

    #[test]
    fn solo_rejects_bad_secret() {
        assert!(matches!(
            SoloConfig::new("lim4o", 5),
            Err(ConfigError::InvalidSecret(_))
        ));
    }

    #[test]
    fn duel_rejects_empty_list() {
        let config = DuelConfig {
            words: Vec::new(),
            ..DuelConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyWordList));
    }

    #[test]
    fn duel_rejects_mixed_lengths() {
        let config = DuelConfig {
            words: words_from_slice(&["termo", "casa"]),
            ..DuelConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MixedLengths { expected: 5, actual: 4, .. })
        ));
    }

    #[test]
    fn duel_rejects_zero_duration() {
        let config = DuelConfig {
            round_secs: 0,
            ..DuelConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));
    }
}
