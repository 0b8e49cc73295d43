//! Single-ply board state and copy-make move application.

use tracing::debug;

use crate::castle_rights::{CastleRights, CastleSide};
use crate::chess_move::{Move, MoveFlag};
use crate::movegen::is_attacked;
use crate::piece_kind::PieceKind;
use crate::pieces::Pieces;
use crate::side::Side;
use crate::square::Square;
use crate::zobrist;

/// Everything about a position except its repetition history.
///
/// `Board` is `Copy`, so search and legality checks work on independent
/// values. The fingerprint in `hash` is kept in sync by [`Board::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    pieces: Pieces,
    side_to_move: Side,
    castling: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    hash: u64,
}

/// Observable facts changed by one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEffects {
    pub side: Side,
    pub moved: PieceKind,
    pub captured: Option<PieceKind>,
    pub promoted: Option<PieceKind>,
    pub castled: Option<CastleSide>,
    pub castling_changed: bool,
    pub en_passant: Option<Square>,
}

impl Board {
    /// Assemble a board with fresh clocks (half-move 0, full-move 1).
    ///
    /// An en passant target is kept only if an enemy pawn could just have
    /// double-stepped past it; anything else is dropped.
    pub fn new(pieces: Pieces, side_to_move: Side, castling: CastleRights, en_passant: Option<Square>) -> Board {
        let en_passant = en_passant.filter(|&target| {
            let plausible = en_passant_plausible(&pieces, side_to_move, target);
            if !plausible {
                debug!(%target, %side_to_move, "dropping implausible en passant target");
            }
            plausible
        });
        Board {
            pieces,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: zobrist::full(&pieces, side_to_move, castling, en_passant),
        }
    }

    /// Override the move counters, e.g. when restoring a saved game.
    pub fn with_clocks(mut self, halfmove_clock: u32, fullmove_number: u32) -> Board {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number.max(1);
        self
    }

    /// The same placement with `side` to move.
    ///
    /// Switching sides drops the en passant target, which only ever belongs
    /// to the side that was to move.
    pub fn with_side_to_move(self, side: Side) -> Board {
        if side == self.side_to_move {
            return self;
        }
        Board { en_passant: None, side_to_move: side, ..self }.rehashed()
    }

    fn rehashed(mut self) -> Board {
        self.hash = self.recompute_hash();
        self
    }

    #[inline]
    pub fn pieces(&self) -> &Pieces {
        &self.pieces
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Zobrist fingerprint of placement, side to move, rights and en passant file.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Whether the king of `side` is currently attacked.
    pub fn in_check(&self, side: Side) -> bool {
        self.pieces
            .king_square(side)
            .is_some_and(|king| is_attacked(&self.pieces, king, side.opponent()))
    }

    /// Return the board after `mv`, leaving `self` untouched.
    pub fn make_move(&self, mv: Move) -> Board {
        let mut next = *self;
        next.apply_move(mv);
        next
    }

    /// Play `mv` in place.
    ///
    /// `mv` must come from this board's legal move list. Returns `None` and
    /// leaves the board unchanged when the origin square is empty.
    pub fn apply_move(&mut self, mv: Move) -> Option<MoveEffects> {
        let before = self.pieces;
        let placement = self.pieces.play(mv)?;
        let mut hash = self.hash ^ zobrist::placement_delta(&before, &self.pieces);

        let rights = self.castling.revoke_at(mv.from()).revoke_at(mv.to());
        hash ^= zobrist::castling(self.castling) ^ zobrist::castling(rights);
        let castling_changed = rights != self.castling;
        self.castling = rights;

        let en_passant = if mv.flag() == MoveFlag::DoublePush {
            Some(Square::new(mv.from().file(), (mv.from().rank() + mv.to().rank()) / 2))
        } else {
            None
        };
        hash ^= zobrist::en_passant(self.en_passant) ^ zobrist::en_passant(en_passant);
        self.en_passant = en_passant;

        let captured = placement.captured.map(|(kind, _)| kind);
        if placement.moved == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if placement.side == Side::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = placement.side.opponent();
        hash ^= zobrist::black_to_move();
        self.hash = hash;

        Some(MoveEffects {
            side: placement.side,
            moved: placement.moved,
            captured,
            promoted: mv.promotion(),
            castled: mv.castle(),
            castling_changed,
            en_passant,
        })
    }

    /// Recompute the fingerprint from scratch.
    pub fn recompute_hash(&self) -> u64 {
        zobrist::full(&self.pieces, self.side_to_move, self.castling, self.en_passant)
    }
}

/// `target` lies on the rank a `side_to_move` opponent pawn skips, is empty,
/// has that pawn directly beyond it and an empty square it came from.
fn en_passant_plausible(pieces: &Pieces, side_to_move: Side, target: Square) -> bool {
    let them = side_to_move.opponent();
    let skipped_rank = them.pawn_rank() as i8 + them.forward();
    let (Some(pawn), Some(origin)) = (target.offset(0, them.forward()), target.offset(0, -them.forward())) else {
        return false;
    };
    target.rank() as i8 == skipped_rank
        && pieces.piece_at(target).is_none()
        && pieces.piece_at(pawn) == Some((them, PieceKind::Pawn))
        && pieces.piece_at(origin).is_none()
}
