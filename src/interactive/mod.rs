//! Interactive TUI interface
//!
//! Solo board and duel screens drawn with ratatui over crossterm.

mod app;
mod rendering;

pub use app::{App, Message, MessageStyle, Screen, run_tui};
