//! Duel mode: a timed round against a mock opponent
//!
//! Phases run `SelectingOpponent → Lobby → Active → Finished` and back to
//! `SelectingOpponent`. Player actions are method calls; everything that
//! happens "later" (the opponent getting ready, the countdown, the reset
//! after the result) is a timer event fired from `advance`.
//!
//! The opponent is local: it reports ready after a fixed delay and never
//! guesses on its own. Submissions are accepted for either player so a real
//! peer could be wired in through the same API.

use super::parse_guess;
use super::timer::{TimerId, Timers};
use crate::config::{ConfigError, DuelConfig};
use crate::core::{Attempt, GuessError, Word};
use log::{debug, info};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Local,
    Opponent,
}

/// Result of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerWins,
    OpponentWins,
    Tie,
}

/// Where the duel currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SelectingOpponent,
    Lobby,
    Active,
    Finished(Outcome),
}

/// The player being challenged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opponent {
    pub name: String,
    pub avatar: char,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub local: u32,
    pub opponent: u32,
}

impl Scoreboard {
    #[must_use]
    pub const fn get(&self, player: Player) -> u32 {
        match player {
            Player::Local => self.local,
            Player::Opponent => self.opponent,
        }
    }

    fn bump(&mut self, player: Player) -> u32 {
        let score = match player {
            Player::Local => &mut self.local,
            Player::Opponent => &mut self.opponent,
        };
        *score += 1;
        *score
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self.local.cmp(&self.opponent) {
            std::cmp::Ordering::Greater => Outcome::PlayerWins,
            std::cmp::Ordering::Less => Outcome::OpponentWins,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }
}

/// Notifications for the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuelEvent {
    OpponentReady,
    RoundStarted { word_len: usize, seconds: u32 },
    Tick { remaining: u32 },
    Scored { player: Player, score: u32 },
    RoundFinished { outcome: Outcome, scores: Scoreboard },
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DuelTimer {
    OpponentReady,
    Tick,
    Reset,
}

/// Duel state machine
pub struct Duel<R> {
    config: DuelConfig,
    rng: R,
    now: Duration,
    timers: Timers<DuelTimer>,
    ready_timer: Option<TimerId>,
    phase: Phase,
    opponent: Option<Opponent>,
    local_ready: bool,
    opponent_ready: bool,
    remaining_secs: u32,
    scores: Scoreboard,
    secret: Option<Word>,
    last_attempt: Option<Attempt>,
}

impl<R: Rng> Duel<R> {
    /// # Errors
    /// Returns `ConfigError` if the configuration cannot produce a round.
    pub fn new(config: DuelConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let remaining_secs = config.round_secs;
        Ok(Self {
            config,
            rng,
            now: Duration::ZERO,
            timers: Timers::new(),
            ready_timer: None,
            phase: Phase::SelectingOpponent,
            opponent: None,
            local_ready: false,
            opponent_ready: false,
            remaining_secs,
            scores: Scoreboard::default(),
            secret: None,
            last_attempt: None,
        })
    }

    /// Challenge `opponent`; only valid while selecting
    ///
    /// Returns false if a duel is already under way.
    pub fn select_opponent(&mut self, opponent: Opponent) -> bool {
        if self.phase != Phase::SelectingOpponent {
            return false;
        }

        info!("duel lobby opened against {}", opponent.name);
        self.opponent = Some(opponent);
        self.local_ready = false;
        self.opponent_ready = false;
        self.phase = Phase::Lobby;
        let due = self.now + self.config.opponent_ready_delay;
        self.ready_timer = Some(self.timers.schedule(due, DuelTimer::OpponentReady));
        true
    }

    /// Mark the local player ready; starts the round if the opponent is too
    pub fn set_ready(&mut self) -> Vec<DuelEvent> {
        let mut events = Vec::new();
        if self.phase == Phase::Lobby {
            self.local_ready = true;
            self.try_start(&mut events);
        }
        events
    }

    /// Back out of the lobby to opponent selection
    pub fn leave_lobby(&mut self) -> bool {
        if self.phase != Phase::Lobby {
            return false;
        }
        if let Some(id) = self.ready_timer.take() {
            self.timers.cancel(id);
        }
        self.opponent = None;
        self.local_ready = false;
        self.opponent_ready = false;
        self.phase = Phase::SelectingOpponent;
        true
    }

    /// Submit a guess for `player` against the current secret
    ///
    /// A full match scores a point and draws the next secret; anything else
    /// only updates the feedback. Rejected guesses change nothing.
    ///
    /// # Errors
    /// - `GuessError::NotActive` outside an active round
    /// - `GuessError::WrongLength` / `GuessError::InvalidWord` for malformed input
    pub fn submit(
        &mut self,
        player: Player,
        input: &str,
    ) -> Result<(Attempt, Option<DuelEvent>), GuessError> {
        let secret = match (&self.phase, &self.secret) {
            (Phase::Active, Some(secret)) => secret,
            _ => return Err(GuessError::NotActive),
        };

        let guess = parse_guess(secret, input)?;
        let attempt = Attempt::evaluate(secret, guess)?;

        if attempt.is_win() {
            let score = self.scores.bump(player);
            debug!("{player:?} solved {} (score {score})", attempt.guess());
            self.last_attempt = None;
            self.draw_secret();
            Ok((attempt, Some(DuelEvent::Scored { player, score })))
        } else {
            self.last_attempt = Some(attempt.clone());
            Ok((attempt, None))
        }
    }

    /// Move the clock to `now` and fire every timer that became due
    ///
    /// Time never runs backwards: an earlier `now` is ignored.
    pub fn advance(&mut self, now: Duration) -> Vec<DuelEvent> {
        self.now = self.now.max(now);
        let mut events = Vec::new();

        while let Some((due, timer)) = self.timers.pop_due(self.now) {
            match timer {
                DuelTimer::OpponentReady => {
                    self.ready_timer = None;
                    if self.phase == Phase::Lobby && !self.opponent_ready {
                        self.opponent_ready = true;
                        events.push(DuelEvent::OpponentReady);
                        self.try_start(&mut events);
                    }
                }
                DuelTimer::Tick => self.on_tick(due, &mut events),
                DuelTimer::Reset => {
                    if matches!(self.phase, Phase::Finished(_)) {
                        self.reset();
                        events.push(DuelEvent::Reset);
                    }
                }
            }
        }

        events
    }

    /// Leave the result screen without waiting for the reset timer
    pub fn dismiss(&mut self) -> bool {
        if matches!(self.phase, Phase::Finished(_)) {
            self.reset();
            true
        } else {
            false
        }
    }

    /// Drop the duel wherever it is, cancelling every pending timer
    pub fn abandon(&mut self) {
        if self.phase != Phase::SelectingOpponent {
            info!("duel abandoned in {:?}", self.phase);
        }
        self.reset();
    }

    fn try_start(&mut self, events: &mut Vec<DuelEvent>) {
        if self.phase != Phase::Lobby || !(self.local_ready && self.opponent_ready) {
            return;
        }

        self.phase = Phase::Active;
        self.remaining_secs = self.config.round_secs;
        self.scores = Scoreboard::default();
        self.draw_secret();
        self.timers.schedule(self.now + TICK, DuelTimer::Tick);

        let word_len = self.secret.as_ref().map_or(0, Word::len);
        info!(
            "duel round started: {}s, {word_len}-letter words",
            self.remaining_secs
        );
        events.push(DuelEvent::RoundStarted {
            word_len,
            seconds: self.remaining_secs,
        });
    }

    fn on_tick(&mut self, due: Duration, events: &mut Vec<DuelEvent>) {
        if self.phase != Phase::Active {
            return;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        events.push(DuelEvent::Tick {
            remaining: self.remaining_secs,
        });

        if self.remaining_secs > 0 {
            self.timers.schedule(due + TICK, DuelTimer::Tick);
            return;
        }

        let outcome = self.scores.outcome();
        info!(
            "duel round finished: {outcome:?} ({} x {})",
            self.scores.local, self.scores.opponent
        );
        self.phase = Phase::Finished(outcome);
        self.secret = None;
        self.last_attempt = None;
        self.timers.cancel_all();
        self.timers
            .schedule(due + self.config.result_display, DuelTimer::Reset);
        events.push(DuelEvent::RoundFinished {
            outcome,
            scores: self.scores,
        });
    }

    /// Pick the next secret, avoiding an immediate repeat when possible
    fn draw_secret(&mut self) {
        let current = self.secret.take();
        let candidates: Vec<&Word> = self
            .config
            .words
            .iter()
            .filter(|w| Some(*w) != current.as_ref())
            .collect();

        let next = candidates
            .choose(&mut self.rng)
            .map(|w| (*w).clone())
            .or(current);
        self.secret = next;
    }

    fn reset(&mut self) {
        self.timers.cancel_all();
        self.ready_timer = None;
        self.phase = Phase::SelectingOpponent;
        self.opponent = None;
        self.local_ready = false;
        self.opponent_ready = false;
        self.remaining_secs = self.config.round_secs;
        self.scores = Scoreboard::default();
        self.secret = None;
        self.last_attempt = None;
    }

    #[inline]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn opponent(&self) -> Option<&Opponent> {
        self.opponent.as_ref()
    }

    #[must_use]
    pub const fn is_ready(&self, player: Player) -> bool {
        match player {
            Player::Local => self.local_ready,
            Player::Opponent => self.opponent_ready,
        }
    }

    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub const fn scores(&self) -> Scoreboard {
        self.scores
    }

    /// Feedback for the latest miss on the current secret
    #[must_use]
    pub const fn last_attempt(&self) -> Option<&Attempt> {
        self.last_attempt.as_ref()
    }

    #[must_use]
    pub fn word_len(&self) -> Option<usize> {
        self.secret.as_ref().map(Word::len)
    }

    #[must_use]
    pub const fn secret(&self) -> Option<&Word> {
        self.secret.as_ref()
    }

    /// When `advance` next has work to do
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_due()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn config(round_secs: u32) -> DuelConfig {
        DuelConfig {
            words: words_from_slice(&["LIMAO", "TERMO", "PEDRA", "GATOS"]),
            round_secs,
            opponent_ready_delay: secs(2),
            result_display: secs(2),
        }
    }

    fn duel(round_secs: u32) -> Duel<StdRng> {
        Duel::new(config(round_secs), StdRng::seed_from_u64(7)).unwrap()
    }

    fn seki() -> Opponent {
        Opponent {
            name: "Seki".to_string(),
            avatar: 'S',
        }
    }

    /// Lobby with both players ready at t=2s
    fn active_duel(round_secs: u32) -> Duel<StdRng> {
        let mut duel = duel(round_secs);
        duel.select_opponent(seki());
        duel.set_ready();
        duel.advance(secs(2));
        assert_eq!(duel.phase(), Phase::Active);
        duel
    }

    // Not in the test word list, so never the secret.
    const WRONG_GUESS: &str = "CASAS";

    #[test]
    fn rejects_invalid_config() {
        let config = DuelConfig {
            words: Vec::new(),
            ..config(10)
        };
        assert!(Duel::new(config, StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn selecting_opponent_opens_lobby() {
        let mut duel = duel(180);
        assert_eq!(duel.phase(), Phase::SelectingOpponent);
        assert!(duel.select_opponent(seki()));
        assert_eq!(duel.phase(), Phase::Lobby);
        assert_eq!(duel.opponent().map(|o| o.name.as_str()), Some("Seki"));
        assert!(!duel.is_ready(Player::Local));
        assert!(!duel.is_ready(Player::Opponent));
        assert!(!duel.select_opponent(seki()));
    }

    #[test]
    fn opponent_gets_ready_after_delay() {
        let mut duel = duel(180);
        duel.select_opponent(seki());
        assert!(duel.advance(secs(1)).is_empty());
        assert!(!duel.is_ready(Player::Opponent));

        assert_eq!(duel.advance(secs(2)), vec![DuelEvent::OpponentReady]);
        assert!(duel.is_ready(Player::Opponent));
        assert_eq!(duel.phase(), Phase::Lobby);
    }

    #[test]
    fn round_starts_when_opponent_is_ready_last() {
        let mut duel = duel(180);
        duel.select_opponent(seki());
        assert!(duel.set_ready().is_empty());

        let events = duel.advance(secs(2));
        assert_eq!(
            events,
            vec![
                DuelEvent::OpponentReady,
                DuelEvent::RoundStarted {
                    word_len: 5,
                    seconds: 180
                }
            ]
        );
        assert_eq!(duel.phase(), Phase::Active);
        assert!(duel.secret().is_some());
        assert_eq!(duel.remaining_secs(), 180);
    }

    #[test]
    fn round_starts_exactly_once() {
        let mut duel = duel(180);
        duel.select_opponent(seki());
        duel.advance(secs(2));

        let mut started = 0;
        for _ in 0..3 {
            started += duel
                .set_ready()
                .iter()
                .filter(|e| matches!(e, DuelEvent::RoundStarted { .. }))
                .count();
            started += duel
                .advance(secs(2))
                .iter()
                .filter(|e| matches!(e, DuelEvent::RoundStarted { .. }))
                .count();
        }
        assert_eq!(started, 1);
        assert_eq!(duel.phase(), Phase::Active);
    }

    #[test]
    fn leaving_lobby_cancels_opponent_timer() {
        let mut duel = duel(180);
        duel.select_opponent(seki());
        assert!(duel.leave_lobby());
        assert_eq!(duel.phase(), Phase::SelectingOpponent);
        assert!(duel.opponent().is_none());
        assert!(duel.advance(secs(10)).is_empty());
        assert_eq!(duel.next_deadline(), None);
        assert!(!duel.leave_lobby());
    }

    #[test]
    fn countdown_ticks_once_per_second() {
        let mut duel = active_duel(180);
        assert_eq!(
            duel.advance(secs(3)),
            vec![DuelEvent::Tick { remaining: 179 }]
        );
        assert_eq!(duel.remaining_secs(), 179);

        // A late poll catches up on every missed second.
        let events = duel.advance(secs(6));
        assert_eq!(events.len(), 3);
        assert_eq!(duel.remaining_secs(), 176);
    }

    #[test]
    fn remaining_time_never_increases() {
        let mut duel = active_duel(30);
        let mut last = duel.remaining_secs();
        for t in [3, 2, 10, 10, 9, 20] {
            duel.advance(secs(t));
            assert!(duel.remaining_secs() <= last);
            last = duel.remaining_secs();
        }
        assert_eq!(duel.remaining_secs(), 12);
        assert_eq!(duel.phase(), Phase::Active);
    }

    #[test]
    fn correct_guess_scores_and_draws_new_word() {
        let mut duel = active_duel(180);
        let secret = duel.secret().cloned().unwrap();

        let (attempt, event) = duel.submit(Player::Local, secret.text()).unwrap();
        assert!(attempt.is_win());
        assert_eq!(
            event,
            Some(DuelEvent::Scored {
                player: Player::Local,
                score: 1
            })
        );
        assert_eq!(duel.scores().local, 1);
        assert_ne!(duel.secret(), Some(&secret));
        assert!(duel.last_attempt().is_none());
    }

    #[test]
    fn wrong_guess_only_updates_feedback() {
        let mut duel = active_duel(180);
        let secret = duel.secret().cloned().unwrap();
        let (attempt, event) = duel.submit(Player::Local, WRONG_GUESS).unwrap();
        assert!(!attempt.is_win());
        assert_eq!(event, None);
        assert_eq!(duel.scores(), Scoreboard::default());
        assert_eq!(duel.secret(), Some(&secret));
        assert_eq!(duel.last_attempt(), Some(&attempt));
    }

    #[test]
    fn unlimited_attempts_per_word() {
        let mut duel = active_duel(180);
        for _ in 0..50 {
            assert!(duel.submit(Player::Local, WRONG_GUESS).is_ok());
        }
        assert_eq!(duel.phase(), Phase::Active);
    }

    #[test]
    fn malformed_guess_changes_nothing() {
        let mut duel = active_duel(180);
        let secret = duel.secret().cloned();
        assert!(matches!(
            duel.submit(Player::Local, "ABC"),
            Err(GuessError::WrongLength { .. })
        ));
        assert_eq!(duel.secret().cloned(), secret);
        assert!(duel.last_attempt().is_none());
    }

    #[test]
    fn guesses_outside_round_are_rejected() {
        let mut duel = duel(180);
        assert_eq!(
            duel.submit(Player::Local, "LIMAO").unwrap_err(),
            GuessError::NotActive
        );
        duel.select_opponent(seki());
        assert_eq!(
            duel.submit(Player::Local, "LIMAO").unwrap_err(),
            GuessError::NotActive
        );
    }

    #[test]
    fn round_finishes_with_outcome_then_resets() {
        let mut duel = active_duel(3);
        let secret = duel.secret().cloned().unwrap();
        duel.submit(Player::Local, secret.text()).unwrap();

        let events = duel.advance(secs(5));
        assert_eq!(
            events.last(),
            Some(&DuelEvent::RoundFinished {
                outcome: Outcome::PlayerWins,
                scores: Scoreboard {
                    local: 1,
                    opponent: 0
                }
            })
        );
        assert_eq!(duel.phase(), Phase::Finished(Outcome::PlayerWins));
        assert_eq!(duel.remaining_secs(), 0);
        assert!(duel.submit(Player::Local, "LIMAO").is_err());

        assert_eq!(duel.advance(secs(7)), vec![DuelEvent::Reset]);
        assert_eq!(duel.phase(), Phase::SelectingOpponent);
        assert_eq!(duel.scores(), Scoreboard::default());
        assert_eq!(duel.remaining_secs(), 3);
    }

    #[test]
    fn remaining_time_stops_at_zero() {
        let mut duel = active_duel(2);
        duel.advance(secs(4));
        assert_eq!(duel.remaining_secs(), 0);
        assert_eq!(duel.phase(), Phase::Finished(Outcome::Tie));
        assert!(
            !duel
                .advance(secs(5))
                .iter()
                .any(|e| matches!(e, DuelEvent::Tick { .. }))
        );
    }

    #[test]
    fn opponent_points_count_toward_outcome() {
        let mut duel = active_duel(1);
        let secret = duel.secret().cloned().unwrap();
        duel.submit(Player::Opponent, secret.text()).unwrap();
        duel.advance(secs(3));
        assert_eq!(duel.phase(), Phase::Finished(Outcome::OpponentWins));
    }

    #[test]
    fn dismiss_skips_result_delay() {
        let mut duel = active_duel(1);
        duel.advance(secs(3));
        assert!(duel.dismiss());
        assert_eq!(duel.phase(), Phase::SelectingOpponent);
        assert!(duel.advance(secs(10)).is_empty());
        assert!(!duel.dismiss());
    }

    #[test]
    fn abandon_cancels_everything() {
        let mut duel = active_duel(180);
        duel.abandon();
        assert_eq!(duel.phase(), Phase::SelectingOpponent);
        assert_eq!(duel.next_deadline(), None);
        assert!(duel.advance(secs(500)).is_empty());
    }

    #[test]
    fn scoreboard_outcomes() {
        let tie = Scoreboard::default();
        assert_eq!(tie.outcome(), Outcome::Tie);
        let win = Scoreboard {
            local: 3,
            opponent: 1,
        };
        assert_eq!(win.outcome(), Outcome::PlayerWins);
        assert_eq!(win.get(Player::Opponent), 1);
    }

    #[test]
    fn single_word_list_repeats_word() {
        let config = DuelConfig {
            words: words_from_slice(&["TERMO"]),
            ..config(60)
        };
        let mut duel = Duel::new(config, StdRng::seed_from_u64(3)).unwrap();
        duel.select_opponent(seki());
        duel.set_ready();
        duel.advance(secs(2));
        duel.submit(Player::Local, "termo").unwrap();
        assert_eq!(duel.secret().map(Word::text), Some("TERMO"));
    }
}
