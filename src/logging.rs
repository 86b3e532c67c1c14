//! Logger setup
//!
//! `RUST_LOG` wins when set; otherwise `-v` flags pick the level. The TUI
//! owns the terminal, so interactive modes log to a file instead of stderr.

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

/// Where log records go
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Default filter for a number of `-v` flags
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global logger
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a logger is
/// already installed.
pub fn init(verbosity: u8, target: LogTarget) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(level_for(verbosity)));

    if let LogTarget::File(path) = target {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating log directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("installing logger")
}
