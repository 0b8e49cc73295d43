//! Session configuration.

use std::fmt;
use std::time::Duration;

use rookery_engine::Difficulty;
use serde::{Deserialize, Serialize};

/// Number of save slots unless configured otherwise.
pub const DEFAULT_SAVE_SLOTS: usize = 3;

/// Who plays the black pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    /// Both sides are human.
    #[default]
    TwoPlayers,
    /// The human plays White and the computer plays Black.
    VsComputer,
}

impl GameMode {
    /// Parse `"twoPlayers"` or `"vsComputer"`.
    pub fn from_name(name: &str) -> Option<GameMode> {
        match name {
            "twoPlayers" => Some(GameMode::TwoPlayers),
            "vsComputer" => Some(GameMode::VsComputer),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            GameMode::TwoPlayers => "twoPlayers",
            GameMode::VsComputer => "vsComputer",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Knobs of a [`GameSession`](crate::GameSession).
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Maximum number of saved games.
    pub save_slots: usize,
    /// Search budget per difficulty, indexed by `level - 1`.
    pub think_times: [Duration; 3],
}

impl GameConfig {
    /// Search budget for `difficulty`.
    pub fn think_time(&self, difficulty: Difficulty) -> Duration {
        self.think_times[difficulty.level() as usize - 1]
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            save_slots: DEFAULT_SAVE_SLOTS,
            think_times: Difficulty::ALL.map(Difficulty::think_time),
        }
    }
}
