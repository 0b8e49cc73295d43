//! Terminal-state classification.

use std::fmt;

use crate::piece_kind::PieceKind;
use crate::pieces::Pieces;
use crate::position::Position;
use crate::side::Side;

/// Half-move clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Why a game was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
    Stalemate,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::ThreefoldRepetition => "threefold repetition",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::Stalemate => "stalemate",
        })
    }
}

/// Outcome of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Play continues with the given side to move.
    Ongoing(Side),
    /// The given side has delivered mate.
    Win(Side),
    Draw(DrawReason),
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing(_))
    }
}

/// Classify `position`.
///
/// Draws by rule are checked first, in order: fifty-move rule, threefold
/// repetition, insufficient material. Only then are mate and stalemate
/// considered, so a mating move that also completes a repetition is a draw.
pub fn classify(position: &Position) -> GameStatus {
    if position.halfmove_clock() >= FIFTY_MOVE_PLIES {
        return GameStatus::Draw(DrawReason::FiftyMoveRule);
    }
    if position.repetitions() >= 3 {
        return GameStatus::Draw(DrawReason::ThreefoldRepetition);
    }
    if insufficient_material(position.pieces()) {
        return GameStatus::Draw(DrawReason::InsufficientMaterial);
    }

    let side = position.side_to_move();
    if position.legal_moves().is_empty() {
        if position.in_check() {
            GameStatus::Win(side.opponent())
        } else {
            GameStatus::Draw(DrawReason::Stalemate)
        }
    } else {
        GameStatus::Ongoing(side)
    }
}

/// No pawns, rooks or queens anywhere and fewer than two minor pieces per side.
pub fn insufficient_material(pieces: &Pieces) -> bool {
    let heavy = pieces.kind(PieceKind::Pawn) | pieces.kind(PieceKind::Rook) | pieces.kind(PieceKind::Queen);
    if heavy.is_nonempty() {
        return false;
    }
    Side::ALL.into_iter().all(|side| {
        let minors = pieces.of(side, PieceKind::Knight) | pieces.of(side, PieceKind::Bishop);
        minors.count() < 2
    })
}
