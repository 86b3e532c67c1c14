//! Termo - CLI
//!
//! Word guessing game with TUI and line-based modes.

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Duration;
use termo::{
    commands::{check_guess, matches_feedback, run_simple},
    config::{
        DEFAULT_DATA_DIR, DEFAULT_MAX_TRIES, DEFAULT_ROUND_SECS, DuelConfig, GameConfig,
        SoloConfig,
    },
    interactive::{App, Screen, run_tui},
    logging::{self, LogTarget},
    output::{print_check_result, print_stats},
    store::Store,
    wordlists::{SOLO_SECRET, loader::load_from_file},
};

#[derive(Parser)]
#[command(
    name = "termo",
    about = "Guess the secret word, alone or against the clock in a duel",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Secret word for solo games
    #[arg(short, long, global = true, default_value = SOLO_SECRET)]
    secret: String,

    /// Tries allowed in a solo game
    #[arg(short = 't', long, global = true, default_value_t = DEFAULT_MAX_TRIES)]
    max_tries: usize,

    /// Duel round length in seconds
    #[arg(short, long, global = true, default_value_t = DEFAULT_ROUND_SECS)]
    duration: u32,

    /// Seconds before the duel opponent reports ready
    #[arg(long, global = true, default_value_t = 2)]
    opponent_delay: u64,

    /// Duel word list file, one word per line (default: built-in list)
    #[arg(short = 'w', long, global = true)]
    words: Option<PathBuf>,

    /// Directory for the friends roster, statistics and logs
    #[arg(long, global = true, env = "TERMO_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI solo game (default)
    Play,

    /// Interactive TUI duel against a friend
    Duel,

    /// Simple CLI mode (solo game without TUI)
    Simple,

    /// Score one guess against a secret
    Check {
        /// The secret word
        secret: String,

        /// The guess to score
        guess: String,

        /// Expected feedback (e.g. "GY--G"); fails if the guess scores differently
        #[arg(short, long)]
        expect: Option<String>,
    },

    /// Show saved statistics
    Stats,
}

/// Build game settings from command-line flags
fn build_config(cli: &Cli) -> Result<GameConfig> {
    let solo = SoloConfig::new(&cli.secret, cli.max_tries)?;

    let mut duel = DuelConfig {
        round_secs: cli.duration,
        opponent_ready_delay: Duration::from_secs(cli.opponent_delay),
        ..DuelConfig::default()
    };
    if let Some(path) = &cli.words {
        duel.words = load_from_file(path)
            .with_context(|| format!("loading word list {}", path.display()))?;
    }
    duel.validate()?;

    Ok(GameConfig {
        solo,
        duel,
        data_dir: cli.data_dir.clone(),
    })
}

fn log_target(command: &Commands, data_dir: &Path) -> LogTarget {
    match command {
        Commands::Play | Commands::Duel => LogTarget::File(data_dir.join("termo.log")),
        Commands::Simple | Commands::Check { .. } | Commands::Stats => LogTarget::Stderr,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.as_ref().unwrap_or(&Commands::Play);

    logging::init(cli.verbose, log_target(command, &cli.data_dir))?;

    match command {
        Commands::Check {
            secret,
            guess,
            expect,
        } => run_check_command(secret, guess, expect.as_deref()),
        Commands::Stats => {
            print_stats(&Store::new(&cli.data_dir).stats());
            Ok(())
        }
        Commands::Play => run_play_command(&cli, Screen::Solo),
        Commands::Duel => run_play_command(&cli, Screen::Duel),
        Commands::Simple => {
            let config = build_config(&cli)?;
            run_simple(&config.solo, &Store::new(&config.data_dir))
        }
    }
}

fn run_check_command(secret: &str, guess: &str, expect: Option<&str>) -> Result<()> {
    let attempt = check_guess(secret, guess)?;
    print_check_result(&attempt);

    if let Some(expected) = expect
        && !matches_feedback(&attempt, expected)?
    {
        bail!("feedback {} does not match {expected}", attempt.to_emoji());
    }
    Ok(())
}

fn run_play_command(cli: &Cli, screen: Screen) -> Result<()> {
    let config = build_config(cli)?;
    let store = Store::new(&config.data_dir);
    info!("starting {screen:?} session, data in {}", store.dir().display());

    let app = App::new(&config, store, screen)?;
    run_tui(app)
}
