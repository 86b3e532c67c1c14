//! Simple interactive CLI mode
//!
//! Line-based solo game without TUI

use crate::config::SoloConfig;
use crate::core::GuessError;
use crate::game::{GameState, SoloGame};
use crate::output::{print_attempt, print_solo_result};
use crate::store::Store;
use anyhow::{Context, Result};
use colored::Colorize;
use log::warn;
use std::io::{self, Write};

/// Run the simple interactive CLI mode
///
/// Finished games are recorded in the store's statistics.
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input.
pub fn run_simple(config: &SoloConfig, store: &Store) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                     T E R M O  -  Solo                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let mut game = SoloGame::new(config);

    println!(
        "You have {} tries to guess a {}-letter word.",
        game.max_tries(),
        game.word_len()
    );
    println!(
        "  {} right letter, right spot   {} in the word, wrong spot   {} not in the word\n",
        " A ".black().on_green(),
        " A ".black().on_yellow(),
        " A ".white().on_bright_black()
    );
    println!("Commands: 'quit' to exit, 'new' to start over\n");

    loop {
        let Some(input) = get_user_input(&format!("Guess ({} left)", game.tries_left()))? else {
            return Ok(());
        };

        match input.to_lowercase().as_str() {
            "quit" | "q" | "exit" => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            "new" | "n" => {
                game.reset();
                println!("\n🔄 New game started!\n");
                continue;
            }
            _ => {}
        }

        match game.submit(&input) {
            Ok(state) => {
                let turn = game.history().len();
                if let Some(attempt) = game.history().last() {
                    print_attempt(turn, game.max_tries(), attempt);
                }

                if state.is_over() {
                    print_solo_result(&game);
                    record_result(store, state, turn);

                    match get_user_input("Play again? (yes/no)")?
                        .unwrap_or_default()
                        .to_lowercase()
                        .as_str()
                    {
                        "yes" | "y" => {
                            game.reset();
                            println!("\n🔄 New game started!\n");
                        }
                        _ => {
                            println!("\n👋 Thanks for playing!\n");
                            return Ok(());
                        }
                    }
                }
            }
            Err(GuessError::WrongLength { expected, .. }) => {
                println!("❌ The word has {expected} letters!\n");
            }
            Err(e) => println!("❌ {e}\n"),
        }
    }
}

fn record_result(store: &Store, state: GameState, tries: usize) {
    let mut stats = store.stats();
    stats.solo.record(state, tries);
    if let Err(e) = store.save_stats(&stats) {
        warn!("could not save stats: {e}");
    }
}

/// Get user input with a prompt; `None` at end of input
fn get_user_input(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush().context("flushing stdout")?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("reading from stdin")?;

    Ok((read > 0).then(|| input.trim().to_string()))
}
