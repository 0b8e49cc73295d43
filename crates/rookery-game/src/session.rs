//! An interactive game: moves, undo, computer replies and save slots.
//!
//! Every operation that changes the game returns the [`GameEvent`]s a front
//! end needs to redraw.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rookery_core::{
    GameStatus, LayoutError, Move, PieceKind, Position, Side, Square, classify, decode_or_default,
};
use rookery_engine::{Difficulty, search_best_move};
use tracing::{debug, info, warn};

use crate::config::{GameConfig, GameMode};
use crate::error::GameError;
use crate::store::{DATE_FORMAT, SaveRepository, SaveSlots, SavedGame, SavedMove};

/// Something a front end should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The board contents changed.
    PiecesChanged,
    StatusChanged(GameStatus),
    MoveApplied { from: Square, to: Square },
    /// The game finished; carries the announcement, e.g. `"White wins!"`.
    GameEnded(String),
    ModeChanged(GameMode),
    DifficultyChanged(Difficulty),
    SavedGamesChanged,
}

/// Result of [`GameSession::play`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was played.
    Played {
        events: Vec<GameEvent>,
        /// The computer should answer next.
        computer_to_move: bool,
    },
    /// A pawn reaches the last rank and no piece was chosen. Nothing changed.
    PromotionRequired { from: Square, to: Square },
}

/// A piece on the board, as a front end draws it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPiece {
    pub square: Square,
    pub side: Side,
    pub kind: PieceKind,
}

impl PlacedPiece {
    /// Texture-style name such as `"whiteKnight"`.
    pub fn name(&self) -> String {
        format!("{}{}", self.side.name(), self.kind.name())
    }
}

/// Outcome of [`GameSession::load_game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub events: Vec<GameEvent>,
    /// Set when the stored position was unreadable and the standard start
    /// was loaded instead.
    pub fallback: Option<LayoutError>,
}

/// A request to search for the computer's move.
///
/// Tickets carry their own copy of the position, so they can run on any
/// thread. The reply is only accepted by the session while the game is still
/// where the ticket left it.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: u64,
    position: Position,
    side: Side,
    budget: Duration,
}

/// The answer to a [`SearchTicket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReply {
    pub generation: u64,
    /// Fingerprint of the searched position.
    pub fingerprint: u64,
    /// `None` when the side had no legal move.
    pub best: Option<Move>,
}

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Search on the calling thread.
    pub fn run(&self) -> SearchReply {
        SearchReply {
            generation: self.generation,
            fingerprint: self.position.fingerprint(),
            best: search_best_move(&self.position, self.side, self.budget),
        }
    }

    /// Search on a worker thread; the reply arrives on the returned channel.
    pub fn spawn(self) -> mpsc::Receiver<SearchReply> {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let reply = self.run();
            if tx.send(reply).is_err() {
                debug!(generation = reply.generation, "search reply dropped");
            }
        });
        rx
    }
}

#[derive(Debug, Clone)]
struct UndoEntry {
    before: Position,
    from: Square,
    to: Square,
}

/// Human-readable status, e.g. `"Black to move"`.
pub fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Ongoing(Side::White) => "White to move",
        GameStatus::Ongoing(Side::Black) => "Black to move",
        GameStatus::Win(Side::White) => "White won",
        GameStatus::Win(Side::Black) => "Black won",
        GameStatus::Draw(_) => "Draw",
    }
}

/// Announcement for a finished game; `None` while play continues.
pub fn end_message(status: GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::Ongoing(_) => None,
        GameStatus::Win(Side::White) => Some("White wins!"),
        GameStatus::Win(Side::Black) => Some("Black wins!"),
        GameStatus::Draw(_) => Some("Draw!"),
    }
}

/// One game in progress.
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    position: Position,
    status: GameStatus,
    mode: GameMode,
    difficulty: Difficulty,
    undo: Vec<UndoEntry>,
    last_move: Option<(Square, Square)>,
    /// Bumped whenever the game leaves the position a search was issued for.
    generation: u64,
    slots: SaveSlots,
}

impl GameSession {
    /// A fresh game whose saves live only in memory.
    pub fn new(config: GameConfig) -> Self {
        let slots = SaveSlots::in_memory(config.save_slots);
        Self::with_slots(config, slots)
    }

    /// A fresh game persisting its saves through `repository`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Store`] when the repository cannot be read.
    pub fn with_repository(config: GameConfig, repository: Box<dyn SaveRepository>) -> Result<Self, GameError> {
        let slots = SaveSlots::open(repository, config.save_slots)?;
        Ok(Self::with_slots(config, slots))
    }

    fn with_slots(config: GameConfig, slots: SaveSlots) -> Self {
        let position = Position::new();
        Self {
            status: classify(&position),
            mode: config.mode,
            difficulty: config.difficulty,
            config,
            position,
            undo: Vec::new(),
            last_move: None,
            generation: 0,
            slots,
        }
    }

    /// Reset to the standard start.
    pub fn new_game(&mut self) -> Vec<GameEvent> {
        self.position = Position::new();
        self.undo.clear();
        self.last_move = None;
        self.generation += 1;
        info!(mode = %self.mode, difficulty = %self.difficulty, "new game");
        let mut events = vec![GameEvent::PiecesChanged];
        events.extend(self.refresh_status());
        events
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn status_label(&self) -> &'static str {
        status_label(self.status)
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Origin and destination of the most recent move.
    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// The computer plays Black in [`GameMode::VsComputer`].
    pub fn is_computer_turn(&self) -> bool {
        self.mode == GameMode::VsComputer && self.status == GameStatus::Ongoing(Side::Black)
    }

    /// Switch between `"twoPlayers"` and `"vsComputer"`. Unknown names are
    /// ignored.
    pub fn set_mode(&mut self, name: &str) -> Vec<GameEvent> {
        let Some(mode) = GameMode::from_name(name) else {
            warn!(name, "ignoring unknown game mode");
            return Vec::new();
        };
        if mode == self.mode {
            return Vec::new();
        }
        self.mode = mode;
        self.generation += 1;
        info!(%mode, "game mode changed");
        vec![GameEvent::ModeChanged(mode)]
    }

    /// Set the difficulty from a 1-based level, clamped into `1..=3`.
    pub fn set_difficulty(&mut self, level: i64) -> Vec<GameEvent> {
        let difficulty = Difficulty::from_level(level);
        if difficulty == self.difficulty {
            return Vec::new();
        }
        self.difficulty = difficulty;
        info!(%difficulty, "difficulty changed");
        vec![GameEvent::DifficultyChanged(difficulty)]
    }

    /// Every piece on the board, in square order.
    pub fn pieces(&self) -> Vec<PlacedPiece> {
        self.position.pieces().iter().map(|(square, side, kind)| PlacedPiece { square, side, kind }).collect()
    }

    /// Squares the piece on `from` may move to. Empty unless `from` holds a
    /// piece of the side to move in an unfinished game.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        if self.status.is_over() {
            return Vec::new();
        }
        let mut targets: Vec<Square> =
            self.position.legal_moves().iter().filter(|mv| mv.from() == from).map(|mv| mv.to()).collect();
        targets.dedup();
        targets
    }

    /// Play the human move `from`-`to`.
    ///
    /// A pawn move to the last rank needs `promotion`; without it the
    /// session answers [`MoveOutcome::PromotionRequired`] and changes
    /// nothing. `promotion` is ignored for other moves.
    ///
    /// # Errors
    ///
    /// [`GameError::GameOver`], [`GameError::NotYourTurn`] or
    /// [`GameError::IllegalMove`]; the game is unchanged in each case.
    pub fn play(&mut self, from: Square, to: Square, promotion: Option<PieceKind>) -> Result<MoveOutcome, GameError> {
        self.ensure_ongoing()?;
        if self.is_computer_turn() {
            return Err(GameError::NotYourTurn);
        }

        let legal = self.position.legal_moves();
        let Some(first) = legal.find(from, to, None) else {
            return Err(GameError::IllegalMove { from, to });
        };
        let mv = match (first.promotion(), promotion) {
            (None, _) => first,
            (Some(_), None) => {
                debug!(%from, %to, "promotion piece required");
                return Ok(MoveOutcome::PromotionRequired { from, to });
            }
            (Some(_), Some(kind)) => legal.find(from, to, Some(kind)).ok_or(GameError::IllegalMove { from, to })?,
        };

        let events = self.commit(mv)?;
        Ok(MoveOutcome::Played { events, computer_to_move: self.is_computer_turn() })
    }

    /// Complete a promotion by piece name (`"queen"`, `"rook"`, `"bishop"`,
    /// `"knight"`). Anything else promotes to a queen.
    pub fn promote(&mut self, from: Square, to: Square, piece: &str) -> Result<MoveOutcome, GameError> {
        self.play(from, to, Some(PieceKind::from_promotion_name(piece)))
    }

    /// Take back the last ply.
    ///
    /// # Errors
    ///
    /// [`GameError::NothingToUndo`] when no move has been played.
    pub fn undo(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let entry = self.undo.pop().ok_or(GameError::NothingToUndo)?;
        self.position = entry.before;
        self.last_move = self.undo.last().map(|e| (e.from, e.to));
        self.generation += 1;
        info!(from = %entry.from, to = %entry.to, remaining = self.undo.len(), "move undone");

        let mut events = vec![GameEvent::PiecesChanged];
        events.extend(self.refresh_status());
        Ok(events)
    }

    /// Ticket for the computer's next move, or `None` when it is not the
    /// computer's turn.
    pub fn begin_search(&self) -> Option<SearchTicket> {
        if !self.is_computer_turn() {
            return None;
        }
        let ticket = SearchTicket {
            generation: self.generation,
            position: self.position.clone(),
            side: self.position.side_to_move(),
            budget: self.config.think_time(self.difficulty),
        };
        debug!(generation = ticket.generation, budget_ms = ticket.budget.as_millis() as u64, "search issued");
        Some(ticket)
    }

    /// Play the move in `reply`.
    ///
    /// # Errors
    ///
    /// [`GameError::StaleSearch`] when the game moved on since the ticket
    /// was issued; [`GameError::NoMove`] when the search found nothing.
    pub fn finish_search(&mut self, reply: SearchReply) -> Result<Vec<GameEvent>, GameError> {
        if reply.generation != self.generation || reply.fingerprint != self.position.fingerprint() {
            debug!(reply = reply.generation, current = self.generation, "discarding stale search reply");
            return Err(GameError::StaleSearch { reply: reply.generation, current: self.generation });
        }
        self.ensure_ongoing()?;
        let mv = reply.best.ok_or(GameError::NoMove)?;
        if !self.position.legal_moves().contains(mv) {
            return Err(GameError::IllegalMove { from: mv.from(), to: mv.to() });
        }
        self.commit(mv)
    }

    /// Search and play the computer's move on the calling thread.
    pub fn play_computer_move(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.ensure_ongoing()?;
        let ticket = self.begin_search().ok_or(GameError::NotComputerTurn)?;
        let reply = ticket.run();
        self.finish_search(reply)
    }

    /// Store the current game under `name`. Returns the slot index.
    ///
    /// # Errors
    ///
    /// [`GameError::SlotsFull`] when every slot is taken, or a store error.
    pub fn save_game(&mut self, name: &str) -> Result<usize, GameError> {
        if self.slots.is_full() {
            return Err(GameError::SlotsFull { limit: self.slots.limit() });
        }
        let record = SavedGame {
            name: name.to_string(),
            date: chrono::Local::now().format(DATE_FORMAT).to_string(),
            game_mode: self.mode,
            difficulty: self.difficulty.level(),
            status: self.status_label().to_string(),
            position: self.position.to_compact(),
            moves: self
                .undo
                .iter()
                .map(|e| SavedMove { from: e.from.index() as u8, to: e.to.index() as u8, before: e.before.to_compact() })
                .collect(),
        };
        let slot = self.slots.push(record)?;
        info!(name, slot, plies = self.undo.len(), "game saved");
        Ok(slot)
    }

    /// Restore the game in `slot`.
    ///
    /// An unreadable position loads the standard start instead; the fault
    /// is reported in [`LoadReport::fallback`].
    ///
    /// # Errors
    ///
    /// [`GameError::NoSuchSlot`] when `slot` is out of range.
    pub fn load_game(&mut self, slot: usize) -> Result<LoadReport, GameError> {
        let saved = self.slots.get(slot).cloned().ok_or(GameError::NoSuchSlot { slot, count: self.slots.len() })?;

        let (position, fallback) = decode_or_default(&saved.position);
        self.undo = if fallback.is_some() { Vec::new() } else { restore_undo(&saved.moves) };
        self.position = position;
        self.last_move = self.undo.last().map(|e| (e.from, e.to));
        self.mode = saved.game_mode;
        self.difficulty = Difficulty::from_level(i64::from(saved.difficulty));
        self.generation += 1;
        info!(name = %saved.name, slot, fallback = fallback.is_some(), "game loaded");

        let mut events = vec![
            GameEvent::ModeChanged(self.mode),
            GameEvent::DifficultyChanged(self.difficulty),
            GameEvent::PiecesChanged,
        ];
        events.extend(self.refresh_status());
        Ok(LoadReport { events, fallback })
    }

    /// Delete the game in `slot`; later slots shift down.
    pub fn delete_game(&mut self, slot: usize) -> Result<Vec<GameEvent>, GameError> {
        let count = self.slots.len();
        let removed = self.slots.remove(slot)?.ok_or(GameError::NoSuchSlot { slot, count })?;
        info!(name = %removed.name, slot, "saved game deleted");
        Ok(vec![GameEvent::SavedGamesChanged])
    }

    pub fn saved_games(&self) -> &[SavedGame] {
        self.slots.games()
    }

    fn ensure_ongoing(&self) -> Result<(), GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver { status: self.status_label() });
        }
        Ok(())
    }

    fn commit(&mut self, mv: Move) -> Result<Vec<GameEvent>, GameError> {
        let before = self.position.clone();
        let (from, to) = (mv.from(), mv.to());
        self.position.apply(mv).ok_or(GameError::IllegalMove { from, to })?;
        info!(mv = %mv, side = %before.side_to_move(), "move played");
        self.undo.push(UndoEntry { before, from, to });
        self.last_move = Some((from, to));
        self.generation += 1;

        let mut events = vec![GameEvent::MoveApplied { from, to }, GameEvent::PiecesChanged];
        events.extend(self.refresh_status());
        Ok(events)
    }

    fn refresh_status(&mut self) -> Vec<GameEvent> {
        self.status = classify(&self.position);
        let mut events = vec![GameEvent::StatusChanged(self.status)];
        if let Some(message) = end_message(self.status) {
            if let GameStatus::Draw(reason) = self.status {
                info!(%reason, "game drawn");
            } else {
                info!(outcome = message, "game over");
            }
            events.push(GameEvent::GameEnded(message.to_string()));
        }
        events
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

fn restore_undo(moves: &[SavedMove]) -> Vec<UndoEntry> {
    let entries: Option<Vec<UndoEntry>> = moves
        .iter()
        .map(|m| {
            Some(UndoEntry {
                before: Position::from_compact(&m.before).ok()?,
                from: Square::from_index(m.from)?,
                to: Square::from_index(m.to)?,
            })
        })
        .collect();
    entries.unwrap_or_else(|| {
        warn!(plies = moves.len(), "saved move list unreadable, undo history dropped");
        Vec::new()
    })
}

