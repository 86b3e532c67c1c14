//! Display functions for command results

use super::formatters::{attempt_tiles, create_progress_bar};
use crate::core::{Attempt, LetterResult};
use crate::game::{GameState, SoloGame};
use crate::store::Stats;
use colored::Colorize;

/// Print one evaluated guess with its turn number
pub fn print_attempt(turn: usize, max_tries: usize, attempt: &Attempt) {
    println!(
        "  {} {}",
        format!("{turn}/{max_tries}").bright_black(),
        attempt_tiles(attempt)
    );
}

/// Print the result of checking a single guess
pub fn print_check_result(attempt: &Attempt) {
    println!("\n{}", "─".repeat(40).cyan());
    println!("  {}", attempt_tiles(attempt));
    println!("  {}", attempt.to_emoji());
    println!("{}", "─".repeat(40).cyan());

    println!(
        "  Correct: {}  Present: {}  Absent: {}",
        attempt.count(LetterResult::Correct).to_string().green(),
        attempt.count(LetterResult::Present).to_string().yellow(),
        attempt.count(LetterResult::Absent).to_string().bright_black()
    );

    if attempt.is_win() {
        println!("\n{}", "✅ That's the word!".green().bold());
    }
}

/// Print the end of a solo game with a shareable emoji grid
pub fn print_solo_result(game: &SoloGame) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    match game.state() {
        GameState::Won => {
            let tries = game.history().len();
            println!(
                "{}",
                "    🎉 🎊 ✨  Y O U   G O T   I T !  ✨ 🎊 🎉    "
                    .bright_green()
                    .bold()
            );
            println!(
                "\n  Solved in {} {}",
                tries.to_string().bright_cyan().bold(),
                if tries == 1 { "try" } else { "tries" }
            );
        }
        GameState::Lost => {
            println!("{}", "    ⌛  Out of tries!  ".bright_red().bold());
        }
        GameState::Playing => return,
    }

    if let Some(secret) = game.revealed_secret() {
        println!("  The word was {}", secret.text().bright_yellow().bold());
    }

    println!();
    for attempt in game.history() {
        println!("    {}", attempt.to_emoji());
    }
    println!("{}", "═".repeat(60).bright_cyan());
}

/// Print saved statistics
pub fn print_stats(stats: &Stats) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "STATISTICS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    let solo = &stats.solo;
    println!("\n📊 {}", "Solo:".bright_cyan().bold());
    println!("   Games played:  {}", solo.games_played);
    println!(
        "   Win rate:      {}",
        format!("{:.0}%", solo.win_rate()).bright_yellow().bold()
    );

    if solo.games_won > 0 {
        println!("\n📈 {}", "Guess distribution:".bright_cyan().bold());
        let max = solo.distribution.iter().copied().max().unwrap_or(0);
        for (i, &count) in solo.distribution.iter().enumerate() {
            let bar = create_progress_bar(f64::from(count), f64::from(max), 30);
            println!("   {}: {} {count:4}", i + 1, bar.green());
        }
    }

    let duel = &stats.duel;
    println!("\n⚔️  {}", "Duel:".bright_cyan().bold());
    println!("   Rounds played: {}", duel.total());
    println!(
        "   Won / Lost / Tied: {} / {} / {}",
        duel.wins.to_string().green(),
        duel.losses.to_string().red(),
        duel.ties.to_string().yellow()
    );
}
