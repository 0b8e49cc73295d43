//! Game sessions for rookery: turn handling, undo, computer moves and saved
//! games.

pub mod config;
pub mod error;
pub mod session;
pub mod store;

pub use config::{GameConfig, GameMode};
pub use error::{GameError, StoreError};
pub use session::{
    GameEvent, GameSession, LoadReport, MoveOutcome, PlacedPiece, SearchReply, SearchTicket, end_message,
    status_label,
};
pub use store::{InMemoryRepository, SaveRepository, SaveSlots, SavedGame, SavedMove};
