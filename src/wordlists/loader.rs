//! Word list loading utilities
//!
//! Provides functions to load word lists from files or use embedded constants.

use crate::core::Word;
use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Load words from a file
///
/// One word per line. Blank lines and lines starting with `#` are skipped,
/// as are entries that are not valid words.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use termo::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/duel_words.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let content = fs::read_to_string(path.as_ref())?;
    let words = parse_word_list(&content);

    debug!("loaded {} words from {}", words.len(), path.as_ref().display());
    Ok(words)
}

fn parse_word_list(content: &str) -> Vec<Word> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| match Word::new(line) {
            Ok(word) => Some(word),
            Err(e) => {
                debug!("skipping word list entry {line:?}: {e}");
                None
            }
        })
        .collect()
}

/// Convert embedded string slice to Word vector
///
/// # Examples
/// ```
/// use termo::wordlists::loader::words_from_slice;
/// use termo::wordlists::DUEL_WORDS;
///
/// let words = words_from_slice(DUEL_WORDS);
/// assert_eq!(words.len(), DUEL_WORDS.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}
