//! Session and save-store errors.

use rookery_core::Square;

/// Errors raised by [`GameSession`](crate::GameSession) operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The requested move is not in the legal list of the current position.
    #[error("illegal move: {from}{to}")]
    IllegalMove {
        /// Origin square of the rejected move.
        from: Square,
        /// Destination square of the rejected move.
        to: Square,
    },

    /// The game has already ended.
    #[error("game is over: {status}")]
    GameOver {
        /// Status label at the time of the request.
        status: &'static str,
    },

    /// A human move was attempted while the computer is to move.
    #[error("it is the computer's turn")]
    NotYourTurn,

    /// A computer move was requested while a human is to move.
    #[error("it is not the computer's turn")]
    NotComputerTurn,

    /// A search reply arrived for a position the session has left.
    #[error("stale search reply (generation {reply}, current {current})")]
    StaleSearch {
        /// Generation the reply was issued for.
        reply: u64,
        /// Generation of the session when the reply arrived.
        current: u64,
    },

    /// The search found no move to play.
    #[error("search returned no move")]
    NoMove,

    /// The undo stack is empty.
    #[error("nothing to undo")]
    NothingToUndo,

    /// The slot index does not name a saved game.
    #[error("no saved game in slot {slot} ({count} saved)")]
    NoSuchSlot {
        /// Requested slot.
        slot: usize,
        /// Number of saved games.
        count: usize,
    },

    /// Every save slot is taken.
    #[error("all {limit} save slots are in use")]
    SlotsFull {
        /// Configured slot limit.
        limit: usize,
    },

    /// The save store failed.
    #[error("save store: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },
}

/// Errors raised while reading or writing saved games.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A saved-game record could not be encoded or decoded.
    #[error("saved-game JSON: {source}")]
    Json {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },

    /// The repository backend refused the operation.
    #[error("repository: {message}")]
    Repository {
        /// Backend-provided description.
        message: String,
    },
}
