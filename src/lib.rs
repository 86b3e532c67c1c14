//! Termo
//!
//! A word guessing game with a solo mode and a timed duel mode. Words are
//! five letters by default; custom secrets and word lists may use any length.
//!
//! # Quick Start
//!
//! ```rust
//! use termo::core::{LetterResult, Word, evaluate};
//!
//! let secret = Word::new("limao").unwrap();
//! let guess = Word::new("malou").unwrap();
//!
//! let results = evaluate(&secret, &guess).unwrap();
//! assert_eq!(results[0], LetterResult::Present);
//! assert_eq!(results[4], LetterResult::Absent);
//! ```

// Core domain types
pub mod core;

// Game modes and the duel clock
pub mod game;

// Game settings
pub mod config;

// Friends roster and statistics on disk
pub mod store;

// Logger setup
pub mod logging;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
