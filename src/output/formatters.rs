//! Formatting utilities for terminal output

use crate::core::{Attempt, LetterResult};
use colored::{ColoredString, Colorize};

/// One letter as a colored tile, e.g. " A " on green
#[must_use]
pub fn tile(letter: char, result: LetterResult) -> ColoredString {
    let text = format!(" {letter} ").bold();
    match result {
        LetterResult::Correct => text.black().on_green(),
        LetterResult::Present => text.black().on_yellow(),
        LetterResult::Absent => text.white().on_bright_black(),
    }
}

/// A whole attempt as a row of tiles
#[must_use]
pub fn attempt_tiles(attempt: &Attempt) -> String {
    attempt
        .letters()
        .map(|(letter, result)| tile(letter, result).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }

    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Seconds as a `m:ss` countdown
#[must_use]
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;

    #[test]
    fn attempt_tiles_keep_letter_order() {
        colored::control::set_override(false);
        let secret = Word::new("LIMAO").unwrap();
        let attempt = Attempt::evaluate(&secret, Word::new("MALOU").unwrap()).unwrap();
        let tiles = attempt_tiles(&attempt);
        colored::control::unset_override();
        assert_eq!(tiles, " M   A   L   O   U ");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(180), "3:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(0), "0:00");
    }
}
