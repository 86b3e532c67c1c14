//! Local persistence
//!
//! Documents are JSON files named after fixed keys inside a data directory,
//! one file per key. Reads never fail from the caller's point of view: an
//! unreadable or malformed document is logged and treated as empty, so a
//! broken file costs the player their stats, not the game.

use crate::game::{GameState, Opponent, Outcome};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key of the friends roster document
pub const FRIENDS_KEY: &str = "termo_friends";

/// Key of the statistics document
pub const STATS_KEY: &str = "termo_stats";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access document {key}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed document {key}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Someone on the roster who can be challenged to a duel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub avatar: char,
    pub online: bool,
}

impl Friend {
    fn new(id: u32, name: &str, email: &str, online: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            avatar: name.chars().next().unwrap_or('?'),
            online,
        }
    }

    /// Duel opponent for this friend, if they are online
    #[must_use]
    pub fn challenge(&self) -> Option<Opponent> {
        self.online.then(|| Opponent {
            name: self.name.clone(),
            avatar: self.avatar,
        })
    }
}

/// Roster written the first time the store is used
#[must_use]
pub fn default_roster() -> Vec<Friend> {
    vec![
        Friend::new(1, "Seki", "seki@email.com", true),
        Friend::new(2, "Mantovani", "mantovani@email.com", true),
        Friend::new(3, "Ana", "ana@email.com", false),
        Friend::new(4, "Carlos", "carlos@email.com", true),
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoloStats {
    pub games_played: u32,
    pub games_won: u32,
    /// `distribution[n]` counts wins that took `n + 1` tries
    pub distribution: Vec<u32>,
}

impl SoloStats {
    /// Record a finished game; ignored while still playing
    pub fn record(&mut self, state: GameState, tries: usize) {
        match state {
            GameState::Playing => return,
            GameState::Won => {
                self.games_won += 1;
                if tries > 0 {
                    if self.distribution.len() < tries {
                        self.distribution.resize(tries, 0);
                    }
                    self.distribution[tries - 1] += 1;
                }
            }
            GameState::Lost => {}
        }
        self.games_played += 1;
    }

    /// Percentage of games won, 0 when nothing has been played
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.games_won) / f64::from(self.games_played) * 100.0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelStats {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl DuelStats {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWins => self.wins += 1,
            Outcome::OpponentWins => self.losses += 1,
            Outcome::Tie => self.ties += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub solo: SoloStats,
    pub duel: DuelStats,
}

/// JSON documents under a data directory
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read a document; `Ok(None)` if it does not exist yet
    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let raw = match fs::read_to_string(self.path(key)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Json {
                key: key.to_string(),
                source,
            })
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        let raw = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })?;
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(self.path(key), raw).map_err(io_err)?;

        debug!("saved {}", self.path(key).display());
        Ok(())
    }

    /// The friends roster
    ///
    /// A missing roster is seeded with `default_roster`; an unreadable one
    /// yields no friends.
    #[must_use]
    pub fn friends(&self) -> Vec<Friend> {
        match self.read(FRIENDS_KEY) {
            Ok(Some(friends)) => friends,
            Ok(None) => {
                let roster = default_roster();
                if let Err(e) = self.write(FRIENDS_KEY, &roster) {
                    warn!("could not seed friends roster: {e}");
                }
                roster
            }
            Err(e) => {
                warn!("could not load friends: {e}");
                Vec::new()
            }
        }
    }

    /// Saved statistics, or fresh ones if none can be read
    #[must_use]
    pub fn stats(&self) -> Stats {
        match self.read(STATS_KEY) {
            Ok(stats) => stats.unwrap_or_default(),
            Err(e) => {
                warn!("could not load stats: {e}");
                Stats::default()
            }
        }
    }

    /// # Errors
    /// Returns `StoreError` if the document cannot be written.
    pub fn save_stats(&self, stats: &Stats) -> Result<(), StoreError> {
        self.write(STATS_KEY, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_roster_is_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());

        let friends = store.friends();
        assert_eq!(friends, default_roster());
        assert!(dir.path().join("termo_friends.json").exists());
        assert_eq!(store.friends(), friends);
    }

    #[test]
    fn malformed_roster_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("termo_friends.json"), "{not json").unwrap();

        assert!(Store::new(dir.path()).friends().is_empty());
    }

    #[test]
    fn stats_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("nested"));
        assert_eq!(store.stats(), Stats::default());

        let mut stats = Stats::default();
        stats.solo.record(GameState::Won, 3);
        stats.duel.record(Outcome::Tie);
        store.save_stats(&stats).unwrap();

        assert_eq!(store.stats(), stats);
    }

    #[test]
    fn malformed_stats_degrade_to_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("termo_stats.json"), "[1, 2").unwrap();

        assert_eq!(Store::new(dir.path()).stats(), Stats::default());
    }

    #[test]
    fn partial_stats_fill_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("termo_stats.json"),
            r#"{"duel": {"wins": 4}}"#,
        )
        .unwrap();

        let stats = Store::new(dir.path()).stats();
        assert_eq!(stats.duel.wins, 4);
        assert_eq!(stats.duel.losses, 0);
        assert_eq!(stats.solo, SoloStats::default());
    }

    #[test]
    fn write_into_a_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let store = Store::new(&blocker);
        assert!(matches!(
            store.save_stats(&Stats::default()),
            Err(StoreError::Io { .. })
        ));
    }

    #[test]
    fn only_online_friends_can_be_challenged() {
        let roster = default_roster();
        let seki = roster[0].challenge().unwrap();
        assert_eq!(seki.name, "Seki");
        assert_eq!(seki.avatar, 'S');
        assert!(roster[2].challenge().is_none());
    }

    #[test]
    fn solo_stats_track_distribution() {
        let mut stats = SoloStats::default();
        stats.record(GameState::Won, 2);
        stats.record(GameState::Won, 2);
        stats.record(GameState::Lost, 5);
        stats.record(GameState::Playing, 1);

        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.distribution, vec![0, 2]);
        assert!((stats.win_rate() - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn duel_stats_count_outcomes() {
        let mut stats = DuelStats::default();
        stats.record(Outcome::PlayerWins);
        stats.record(Outcome::OpponentWins);
        stats.record(Outcome::OpponentWins);
        assert_eq!((stats.wins, stats.losses, stats.ties), (1, 2, 0));
        assert_eq!(stats.total(), 3);
    }
}
