//! TUI application state and logic

use crate::config::GameConfig;
use crate::core::GuessError;
use crate::game::{Duel, DuelEvent, GameState, Outcome, Phase, Player, SoloGame};
use crate::output::formatters::format_clock;
use crate::store::{Friend, Stats, Store};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

/// Longest wait for input before the duel clock is advanced
const MAX_POLL: Duration = Duration::from_millis(250);

/// Messages kept on screen
const MESSAGE_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Solo,
    Duel,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Application state
pub struct App {
    pub screen: Screen,
    pub solo: SoloGame,
    pub duel: Duel<StdRng>,
    pub round_secs: u32,
    pub friends: Vec<Friend>,
    pub selected_friend: usize,
    pub input: String,
    pub messages: Vec<Message>,
    pub stats: Stats,
    pub should_quit: bool,
    store: Store,
}

impl App {
    /// # Errors
    ///
    /// Returns an error if the duel configuration is unusable.
    pub fn new(config: &GameConfig, store: Store, screen: Screen) -> Result<Self> {
        let duel = Duel::new(config.duel.clone(), StdRng::from_os_rng())?;
        let friends: Vec<Friend> = store.friends().into_iter().filter(|f| f.online).collect();
        let stats = store.stats();

        let mut app = Self {
            screen,
            solo: SoloGame::new(&config.solo),
            duel,
            round_secs: config.duel.round_secs,
            friends,
            selected_friend: 0,
            input: String::new(),
            messages: Vec::new(),
            stats,
            should_quit: false,
            store,
        };
        app.greet();
        Ok(app)
    }

    fn greet(&mut self) {
        match self.screen {
            Screen::Solo => {
                let text = format!(
                    "Guess the {}-letter word in {} tries!",
                    self.solo.word_len(),
                    self.solo.max_tries()
                );
                self.add_message(&text, MessageStyle::Info);
            }
            Screen::Duel => {
                let text = if self.friends.is_empty() {
                    "No friends online right now.".to_string()
                } else {
                    format!(
                        "Pick a friend for a {} duel!",
                        format_clock(self.round_secs)
                    )
                };
                self.add_message(&text, MessageStyle::Info);
            }
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MESSAGE_LIMIT {
            self.messages.remove(0);
        }
    }

    /// Length the input line is capped at on the current screen
    #[must_use]
    pub fn input_limit(&self) -> Option<usize> {
        match self.screen {
            Screen::Solo => (!self.solo.state().is_over()).then(|| self.solo.word_len()),
            Screen::Duel => match self.duel.phase() {
                Phase::Active => self.duel.word_len(),
                _ => None,
            },
        }
    }

    /// Switch between solo and duel; leaving the duel abandons it
    pub fn toggle_screen(&mut self) {
        self.input.clear();
        self.screen = match self.screen {
            Screen::Solo => Screen::Duel,
            Screen::Duel => {
                self.duel.abandon();
                Screen::Solo
            }
        };
        self.messages.clear();
        self.greet();
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::Tab {
            self.toggle_screen();
            return;
        }

        match self.screen {
            Screen::Solo => self.on_solo_key(key.code),
            Screen::Duel => self.on_duel_key(key.code),
        }
    }

    fn edit_input(&mut self, code: KeyCode) {
        let Some(limit) = self.input_limit() else {
            return;
        };
        match code {
            KeyCode::Char(c) if c.is_ascii_alphabetic() && self.input.len() < limit => {
                self.input.push(c.to_ascii_uppercase());
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            _ => {}
        }
    }

    fn on_solo_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter if self.solo.state().is_over() => self.new_solo_game(),
            KeyCode::Enter => self.submit_solo(),
            other => self.edit_input(other),
        }
    }

    fn on_duel_key(&mut self, code: KeyCode) {
        match self.duel.phase() {
            Phase::SelectingOpponent => match code {
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Up => self.selected_friend = self.selected_friend.saturating_sub(1),
                KeyCode::Down if self.selected_friend + 1 < self.friends.len() => {
                    self.selected_friend += 1;
                }
                KeyCode::Enter => self.challenge_selected(),
                _ => {}
            },
            Phase::Lobby => match code {
                KeyCode::Esc => {
                    self.duel.leave_lobby();
                    self.add_message("Left the lobby", MessageStyle::Info);
                }
                KeyCode::Enter | KeyCode::Char('r' | 'R') => {
                    let events = self.duel.set_ready();
                    self.add_message("You are ready!", MessageStyle::Success);
                    self.handle_duel_events(events);
                }
                _ => {}
            },
            Phase::Active => match code {
                KeyCode::Esc => {
                    self.duel.abandon();
                    self.input.clear();
                    self.add_message("Duel abandoned", MessageStyle::Error);
                }
                KeyCode::Enter => self.submit_duel(),
                other => self.edit_input(other),
            },
            Phase::Finished(_) => {
                if matches!(code, KeyCode::Enter | KeyCode::Esc) && self.duel.dismiss() {
                    self.handle_duel_events(vec![DuelEvent::Reset]);
                }
            }
        }
    }

    fn submit_solo(&mut self) {
        let input = self.input.clone();
        match self.solo.submit(&input) {
            Ok(state) => {
                self.input.clear();
                match state {
                    GameState::Won => {
                        let tries = self.solo.history().len();
                        self.add_message(
                            &format!("🎉 You got it in {tries}! Enter for a new game."),
                            MessageStyle::Success,
                        );
                        self.record_solo(state, tries);
                    }
                    GameState::Lost => {
                        let secret = self
                            .solo
                            .revealed_secret()
                            .map(ToString::to_string)
                            .unwrap_or_default();
                        self.add_message(
                            &format!("Out of tries. The word was {secret}."),
                            MessageStyle::Error,
                        );
                        self.record_solo(state, self.solo.history().len());
                    }
                    GameState::Playing => {}
                }
            }
            // Incomplete words simply aren't submitted.
            Err(GuessError::WrongLength { .. }) => {}
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    fn new_solo_game(&mut self) {
        self.solo.reset();
        self.input.clear();
        self.add_message("New game started!", MessageStyle::Info);
    }

    fn challenge_selected(&mut self) {
        let Some(opponent) = self
            .friends
            .get(self.selected_friend)
            .and_then(Friend::challenge)
        else {
            return;
        };

        let name = opponent.name.clone();
        if self.duel.select_opponent(opponent) {
            self.add_message(
                &format!("Lobby with {name}. Press Enter when ready."),
                MessageStyle::Info,
            );
        }
    }

    fn submit_duel(&mut self) {
        let input = self.input.clone();
        match self.duel.submit(Player::Local, &input) {
            Ok((_, Some(event))) => {
                self.input.clear();
                self.handle_duel_events(vec![event]);
            }
            Ok((_, None)) => self.input.clear(),
            Err(GuessError::WrongLength { .. }) => {}
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    /// Advance the duel clock to `now` (time since the app started)
    pub fn on_clock(&mut self, now: Duration) {
        let events = self.duel.advance(now);
        self.handle_duel_events(events);
    }

    fn handle_duel_events(&mut self, events: Vec<DuelEvent>) {
        for event in events {
            match event {
                DuelEvent::OpponentReady => {
                    let name = self.opponent_name();
                    self.add_message(&format!("{name} is ready!"), MessageStyle::Info);
                }
                DuelEvent::RoundStarted { seconds, .. } => {
                    self.input.clear();
                    self.add_message(
                        &format!("Go! {} on the clock.", format_clock(seconds)),
                        MessageStyle::Success,
                    );
                }
                DuelEvent::Scored {
                    player: Player::Local,
                    score,
                } => {
                    self.add_message(
                        &format!("✓ Correct! Score: {score}. Next word..."),
                        MessageStyle::Success,
                    );
                }
                DuelEvent::Scored {
                    player: Player::Opponent,
                    score,
                } => {
                    let name = self.opponent_name();
                    self.add_message(&format!("{name} scored ({score})"), MessageStyle::Error);
                }
                DuelEvent::Tick { .. } => {}
                DuelEvent::RoundFinished { outcome, scores } => {
                    self.input.clear();
                    let name = self.opponent_name();
                    let verdict = match outcome {
                        Outcome::PlayerWins => "🏆 You win!".to_string(),
                        Outcome::OpponentWins => format!("🏆 {name} wins!"),
                        Outcome::Tie => "🤝 It's a tie!".to_string(),
                    };
                    self.add_message(
                        &format!(
                            "⏳ Time's up! You {} x {} {name}. {verdict}",
                            scores.local, scores.opponent
                        ),
                        MessageStyle::Success,
                    );
                    self.stats.duel.record(outcome);
                    self.save_stats();
                }
                DuelEvent::Reset => {
                    self.add_message("Pick a friend for another duel!", MessageStyle::Info);
                }
            }
        }
    }

    fn opponent_name(&self) -> String {
        self.duel
            .opponent()
            .map_or_else(|| "Opponent".to_string(), |o| o.name.clone())
    }

    fn record_solo(&mut self, state: GameState, tries: usize) {
        self.stats.solo.record(state, tries);
        self.save_stats();
    }

    fn save_stats(&mut self) {
        if let Err(e) = self.store.save_stats(&self.stats) {
            warn!("could not save stats: {e}");
            self.add_message("Could not save statistics", MessageStyle::Error);
        }
    }

    /// How long the loop may block on input before the clock needs a turn
    #[must_use]
    pub fn poll_timeout(&self, now: Duration) -> Duration {
        self.duel
            .next_deadline()
            .map_or(MAX_POLL, |due| due.saturating_sub(now).min(MAX_POLL))
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let started = Instant::now();
    info!("tui started on {:?} screen", app.screen);

    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(app.poll_timeout(started.elapsed()))?
            && let Event::Key(key) = event::read()?
            // Only process key press events (fixes Windows double-input bug)
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        app.on_clock(started.elapsed());

        if app.should_quit {
            break;
        }
    }

    info!("tui closed");
    Ok(())
}
