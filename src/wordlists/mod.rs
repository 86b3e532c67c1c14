//! Word lists for Termo
//!
//! The solo secret and the duel word list, plus loading custom lists.

mod embedded;
pub mod loader;

pub use embedded::{DUEL_WORDS, DUEL_WORDS_COUNT};

/// Secret word of the solo game
pub const SOLO_SECRET: &str = "LIMAO";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duel_count_matches_const() {
        assert_eq!(DUEL_WORDS.len(), DUEL_WORDS_COUNT);
    }

    #[test]
    fn duel_words_are_uppercase_five_letters() {
        for &word in DUEL_WORDS {
            assert_eq!(word.len(), 5, "Word '{word}' is not 5 letters");
            assert!(
                word.chars().all(|c| c.is_ascii_uppercase()),
                "Word '{word}' contains non-uppercase chars"
            );
        }
    }

    #[test]
    fn solo_secret_matches_duel_length() {
        assert_eq!(SOLO_SECRET.len(), DUEL_WORDS[0].len());
    }

    #[test]
    fn expected_duel_words() {
        assert_eq!(DUEL_WORDS_COUNT, 8);
        assert!(DUEL_WORDS.contains(&"GATOS"));
        assert!(DUEL_WORDS.contains(&"LIMAO"));
    }
}
