//! Command implementations

pub mod check;
pub mod simple;

pub use check::{CheckError, check_guess, matches_feedback};
pub use simple::run_simple;
