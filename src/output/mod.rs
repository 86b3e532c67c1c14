//! Terminal output formatting
//!
//! Display utilities for the line-based commands.

pub mod display;
pub mod formatters;

pub use display::{print_attempt, print_check_result, print_solo_result, print_stats};
