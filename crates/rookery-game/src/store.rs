//! Saved-game records and the keyed repository they persist through.
//!
//! All slots are stored together as one JSON array under [`SAVED_GAMES_KEY`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::GameMode;
use crate::error::StoreError;

/// Repository key holding the saved-game list.
pub const SAVED_GAMES_KEY: &str = "savedGames";

/// Format of [`SavedGame::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Keyed string storage backing the save slots.
pub trait SaveRepository: Send {
    /// Read the value stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Repository that lives and dies with the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    entries: HashMap<String, String>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, as if an earlier run had saved it.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl SaveRepository for InMemoryRepository {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One ply of a saved game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMove {
    /// Origin square index.
    pub from: u8,
    /// Destination square index.
    pub to: u8,
    /// Compact position before the move.
    pub before: String,
}

/// A saved game as stored in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub name: String,
    /// Local time of the save, `YYYY-MM-DD HH:MM`.
    pub date: String,
    pub game_mode: GameMode,
    /// Difficulty level, 1 to 3.
    pub difficulty: u8,
    /// Status label at the time of the save.
    pub status: String,
    /// Compact position string.
    pub position: String,
    #[serde(default)]
    pub moves: Vec<SavedMove>,
}

/// The save slots of a session, mirrored to a [`SaveRepository`].
pub struct SaveSlots {
    repository: Box<dyn SaveRepository>,
    games: Vec<SavedGame>,
    limit: usize,
}

impl SaveSlots {
    /// Read the slot list from `repository`.
    ///
    /// An unreadable list is logged and replaced by an empty one; the next
    /// save overwrites it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the repository itself fails.
    pub fn open(repository: Box<dyn SaveRepository>, limit: usize) -> Result<Self, StoreError> {
        let games = match repository.load(SAVED_GAMES_KEY)? {
            Some(text) => match serde_json::from_str::<Vec<SavedGame>>(&text) {
                Ok(games) => games,
                Err(err) => {
                    warn!(%err, "discarding unreadable saved-game list");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        debug!(count = games.len(), limit, "save slots opened");
        Ok(Self { repository, games, limit })
    }

    /// Empty slots kept only in memory.
    pub fn in_memory(limit: usize) -> Self {
        Self { repository: Box::new(InMemoryRepository::new()), games: Vec::new(), limit }
    }

    pub fn games(&self) -> &[SavedGame] {
        &self.games
    }

    pub fn get(&self, slot: usize) -> Option<&SavedGame> {
        self.games.get(slot)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_full(&self) -> bool {
        self.games.len() >= self.limit
    }

    /// Append `game` and write the list back. Returns the new slot index.
    ///
    /// The slots are unchanged when the write fails.
    pub fn push(&mut self, game: SavedGame) -> Result<usize, StoreError> {
        let mut games = self.games.clone();
        games.push(game);
        self.commit(games)?;
        Ok(self.games.len() - 1)
    }

    /// Remove the game in `slot` and write the list back.
    ///
    /// The slots are unchanged when the write fails.
    pub fn remove(&mut self, slot: usize) -> Result<Option<SavedGame>, StoreError> {
        if slot >= self.games.len() {
            return Ok(None);
        }
        let mut games = self.games.clone();
        let game = games.remove(slot);
        self.commit(games)?;
        Ok(Some(game))
    }

    /// Write `games` to the repository, then adopt them.
    fn commit(&mut self, games: Vec<SavedGame>) -> Result<(), StoreError> {
        let text = serde_json::to_string(&games)?;
        if let Err(err) = self.repository.save(SAVED_GAMES_KEY, &text) {
            warn!(%err, "saved-game list not written");
            return Err(err);
        }
        self.games = games;
        Ok(())
    }
}

impl fmt::Debug for SaveSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveSlots").field("games", &self.games).field("limit", &self.limit).finish_non_exhaustive()
    }
}
