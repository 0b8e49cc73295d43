//! A game position: the current board plus its fingerprint history.

use tracing::debug;

use crate::board::{Board, MoveEffects};
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::error::LayoutError;
use crate::layout::parse_layout;
use crate::movegen::{MoveList, legal_moves};
use crate::pieces::Pieces;
use crate::side::Side;
use crate::square::Square;

/// Board state together with the fingerprints of every position reached so
/// far, the current one included. Cloning a `Position` is how callers keep
/// per-ply snapshots for undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    history: Vec<u64>,
}

impl Position {
    /// The standard starting position.
    pub fn new() -> Position {
        Self::from_board(Board::new(Pieces::standard(), Side::White, CastleRights::ALL, None))
    }

    /// Start a history from a single board.
    pub fn from_board(board: Board) -> Position {
        Position { history: vec![board.hash()], board }
    }

    /// Build a position from a board layout and the remaining state fields.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the layout is malformed or a side lacks
    /// exactly one king.
    pub fn from_layout(
        layout: &str,
        en_passant: Option<Square>,
        castling: CastleRights,
        side_to_move: Side,
    ) -> Result<Position, LayoutError> {
        let pieces: Pieces = parse_layout(layout)?;
        debug!(layout, ?en_passant, ?castling, %side_to_move, "position from layout");
        Ok(Self::from_board(Board::new(pieces, side_to_move, castling, en_passant)))
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn pieces(&self) -> &Pieces {
        self.board.pieces()
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.board.side_to_move()
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.board.castling()
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.board.en_passant()
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.board.halfmove_clock()
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.board.fullmove_number()
    }

    /// Fingerprint of the current position.
    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.board.hash()
    }

    /// Fingerprints of every position so far, oldest first.
    #[inline]
    pub fn history(&self) -> &[u64] {
        &self.history
    }

    /// How many times the current position has occurred.
    pub fn repetitions(&self) -> usize {
        let current = self.fingerprint();
        self.history.iter().filter(|&&h| h == current).count()
    }

    pub fn in_check(&self) -> bool {
        self.board.in_check(self.side_to_move())
    }

    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        legal_moves(&self.board, self.side_to_move())
    }

    /// Play `mv` and record the new fingerprint.
    ///
    /// `mv` must come from this position's legal move list. Returns `None`
    /// and changes nothing when the origin square is empty.
    pub fn apply(&mut self, mv: Move) -> Option<MoveEffects> {
        let effects = self.board.apply_move(mv)?;
        self.history.push(self.board.hash());
        Some(effects)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}
