//! Solo game: attempt tracking with a fixed number of tries

use super::parse_guess;
use crate::config::SoloConfig;
use crate::core::{Attempt, GuessError, Word};
use log::{debug, info};

/// Progress of a solo game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// A solo game against one secret word
#[derive(Debug, Clone)]
pub struct SoloGame {
    secret: Word,
    max_tries: usize,
    history: Vec<Attempt>,
    state: GameState,
}

impl SoloGame {
    #[must_use]
    pub fn new(config: &SoloConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            max_tries: config.max_tries,
            history: Vec::new(),
            state: GameState::Playing,
        }
    }

    /// Submit a guess
    ///
    /// On success the attempt is appended to the history and the new state
    /// is returned. A rejected guess leaves the game untouched and does not
    /// count as a try.
    ///
    /// # Errors
    /// - `GuessError::GameOver` once the game is won or lost
    /// - `GuessError::WrongLength` / `GuessError::InvalidWord` for malformed input
    ///
    /// # Examples
    /// ```
    /// use termo::config::SoloConfig;
    /// use termo::game::{GameState, SoloGame};
    ///
    /// let mut game = SoloGame::new(&SoloConfig::new("GATOS", 5).unwrap());
    /// assert!(game.submit("gato").is_err());
    /// assert_eq!(game.submit("gatos").unwrap(), GameState::Won);
    /// ```
    pub fn submit(&mut self, input: &str) -> Result<GameState, GuessError> {
        if self.state.is_over() {
            return Err(GuessError::GameOver);
        }

        let guess = parse_guess(&self.secret, input)?;
        let attempt = Attempt::evaluate(&self.secret, guess)?;
        let won = attempt.is_win();
        debug!("solo guess {} -> {}", attempt.guess(), attempt.to_emoji());
        self.history.push(attempt);

        self.state = if won {
            GameState::Won
        } else if self.history.len() >= self.max_tries {
            GameState::Lost
        } else {
            GameState::Playing
        };

        if self.state.is_over() {
            info!(
                "solo game over: {:?} after {} tries",
                self.state,
                self.history.len()
            );
        }

        Ok(self.state)
    }

    /// Start over with the same secret
    pub fn reset(&mut self) {
        self.history.clear();
        self.state = GameState::Playing;
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    #[inline]
    #[must_use]
    pub const fn max_tries(&self) -> usize {
        self.max_tries
    }

    #[must_use]
    pub fn tries_left(&self) -> usize {
        self.max_tries.saturating_sub(self.history.len())
    }

    /// Letters per word, for input hints
    #[must_use]
    pub fn word_len(&self) -> usize {
        self.secret.len()
    }

    /// The secret, once there is nothing left to guess
    #[must_use]
    pub fn revealed_secret(&self) -> Option<&Word> {
        self.state.is_over().then_some(&self.secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LetterResult;

    fn game(secret: &str, max_tries: usize) -> SoloGame {
        SoloGame::new(&SoloConfig::new(secret, max_tries).unwrap())
    }

    #[test]
    fn starts_playing_with_empty_history() {
        let game = game("LIMAO", 5);
        assert_eq!(game.state(), GameState::Playing);
        assert!(game.history().is_empty());
        assert_eq!(game.tries_left(), 5);
        assert_eq!(game.revealed_secret(), None);
    }

    #[test]
    fn winning_guess_ends_game() {
        let mut game = game("GATOS", 5);
        assert_eq!(game.submit("GATOS"), Ok(GameState::Won));
        assert!(game.history()[0].is_win());
        assert_eq!(game.revealed_secret().map(Word::text), Some("GATOS"));
    }

    #[test]
    fn non_winning_guess_keeps_playing() {
        let mut game = game("LIMAO", 5);
        assert_eq!(game.submit("MALOU"), Ok(GameState::Playing));
        assert_eq!(game.tries_left(), 4);
        assert_eq!(
            game.history()[0].results(),
            &[
                LetterResult::Present,
                LetterResult::Present,
                LetterResult::Present,
                LetterResult::Present,
                LetterResult::Absent,
            ]
        );
    }

    #[test]
    fn exhausting_tries_loses() {
        let mut game = game("LIMAO", 3);
        assert_eq!(game.submit("PEDRA"), Ok(GameState::Playing));
        assert_eq!(game.submit("FESTA"), Ok(GameState::Playing));
        assert_eq!(game.submit("LIVRO"), Ok(GameState::Lost));
        assert_eq!(game.history().len(), 3);
        assert_eq!(game.revealed_secret().map(Word::text), Some("LIMAO"));
    }

    #[test]
    fn win_on_last_try_is_a_win() {
        let mut game = game("LIMAO", 2);
        game.submit("PEDRA").unwrap();
        assert_eq!(game.submit("LIMAO"), Ok(GameState::Won));
    }

    #[test]
    fn terminal_states_reject_submissions() {
        let mut won = game("GATOS", 5);
        won.submit("GATOS").unwrap();
        assert_eq!(won.submit("CASAS"), Err(GuessError::GameOver));
        assert_eq!(won.history().len(), 1);

        let mut lost = game("GATOS", 1);
        lost.submit("CASAS").unwrap();
        assert_eq!(lost.state(), GameState::Lost);
        assert_eq!(lost.submit("GATOS"), Err(GuessError::GameOver));
        assert_eq!(lost.history().len(), 1);
    }

    #[test]
    fn wrong_length_is_not_counted() {
        let mut game = game("LIMAO", 1);
        assert!(matches!(
            game.submit("LIMA"),
            Err(GuessError::WrongLength { .. })
        ));
        assert!(matches!(
            game.submit("LIMOES"),
            Err(GuessError::WrongLength { .. })
        ));
        assert_eq!(game.state(), GameState::Playing);
        assert!(game.history().is_empty());
        assert_eq!(game.tries_left(), 1);
    }

    #[test]
    fn history_never_exceeds_max_tries() {
        let mut game = game("LIMAO", 4);
        for guess in ["PEDRA", "FESTA", "LIVRO", "MOUSE", "GATOS", "CASAS"] {
            let _ = game.submit(guess);
            assert!(game.history().len() <= 4);
        }
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn reset_starts_over() {
        let mut game = game("LIMAO", 1);
        game.submit("PEDRA").unwrap();
        game.reset();
        assert_eq!(game.state(), GameState::Playing);
        assert!(game.history().is_empty());
        assert_eq!(game.submit("limao"), Ok(GameState::Won));
    }
}
