//! The piece-set: twelve disjoint bitboards plus cached unions.

use crate::bitboard::Bitboard;
use crate::chess_move::{Move, MoveFlag};
use crate::piece_kind::PieceKind;
use crate::side::Side;
use crate::square::Square;

/// Piece placement for both sides.
///
/// `by_side[s]` is always the union of `by_kind[s][..]` and `all` the union of
/// both sides. The twelve kind boards never overlap.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pieces {
    by_kind: [[Bitboard; PieceKind::COUNT]; Side::COUNT],
    by_side: [Bitboard; Side::COUNT],
    all: Bitboard,
}

/// Result of moving pieces on a [`Pieces`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub side: Side,
    pub moved: PieceKind,
    pub captured: Option<(PieceKind, Square)>,
}

impl Pieces {
    pub const fn empty() -> Pieces {
        Pieces {
            by_kind: [[Bitboard::EMPTY; PieceKind::COUNT]; Side::COUNT],
            by_side: [Bitboard::EMPTY; Side::COUNT],
            all: Bitboard::EMPTY,
        }
    }

    /// The standard starting placement.
    pub fn standard() -> Pieces {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut pieces = Pieces::empty();
        for side in Side::ALL {
            let home = if side == Side::White { 0 } else { 7 };
            for (file, kind) in BACK_RANK.into_iter().enumerate() {
                pieces.put(side, kind, Square::new(file as u8, home));
                pieces.put(side, PieceKind::Pawn, Square::new(file as u8, side.pawn_rank()));
            }
        }
        pieces
    }

    /// Pieces of one side and kind.
    #[inline]
    pub fn of(&self, side: Side, kind: PieceKind) -> Bitboard {
        self.by_kind[side.index()][kind.index()]
    }

    /// Pieces of one kind for both sides.
    #[inline]
    pub fn kind(&self, kind: PieceKind) -> Bitboard {
        self.by_kind[0][kind.index()] | self.by_kind[1][kind.index()]
    }

    #[inline]
    pub fn side(&self, side: Side) -> Bitboard {
        self.by_side[side.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.all
    }

    pub fn piece_at(&self, sq: Square) -> Option<(Side, PieceKind)> {
        if !self.all.contains(sq) {
            return None;
        }
        let side = if self.by_side[0].contains(sq) { Side::White } else { Side::Black };
        PieceKind::ALL
            .into_iter()
            .find(|&kind| self.of(side, kind).contains(sq))
            .map(|kind| (side, kind))
    }

    /// The king square of `side`, or `None` if the side has no king.
    #[inline]
    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.of(side, PieceKind::King).lsb()
    }

    #[inline]
    pub fn put(&mut self, side: Side, kind: PieceKind, sq: Square) {
        self.by_kind[side.index()][kind.index()].set(sq);
        self.by_side[side.index()].set(sq);
        self.all.set(sq);
    }

    #[inline]
    pub fn remove(&mut self, side: Side, kind: PieceKind, sq: Square) {
        self.by_kind[side.index()][kind.index()].clear(sq);
        self.by_side[side.index()].clear(sq);
        self.all.clear(sq);
    }

    /// Relocate the pieces named by `mv`.
    ///
    /// Handles captures (the passed-over pawn for en passant), promotion and
    /// the rook hop of castling. Returns `None`, changing nothing, when `from`
    /// is empty or an en passant move has no enemy pawn to take.
    pub fn play(&mut self, mv: Move) -> Option<Placement> {
        let (from, to) = (mv.from(), mv.to());
        let (side, moved) = self.piece_at(from)?;
        let them = side.opponent();

        let captured = if mv.flag() == MoveFlag::EnPassant {
            let victim = Square::new(to.file(), from.rank());
            if self.piece_at(victim) != Some((them, PieceKind::Pawn)) {
                return None;
            }
            self.remove(them, PieceKind::Pawn, victim);
            Some((PieceKind::Pawn, victim))
        } else {
            match self.piece_at(to) {
                Some((owner, kind)) if owner == them => {
                    self.remove(them, kind, to);
                    Some((kind, to))
                }
                _ => None,
            }
        };

        self.remove(side, moved, from);
        self.put(side, mv.promotion().unwrap_or(moved), to);

        if let Some(castle) = mv.castle() {
            let squares = castle.squares(side);
            self.remove(side, PieceKind::Rook, squares.rook_from);
            self.put(side, PieceKind::Rook, squares.rook_to);
        }

        Some(Placement { side, moved, captured })
    }

    /// Total number of pieces on the board.
    #[inline]
    pub fn count(&self) -> u32 {
        self.all.count()
    }

    /// Every occupied square with its owner and kind, in square order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Side, PieceKind)> + '_ {
        self.all
            .filter_map(move |sq| self.piece_at(sq).map(|(side, kind)| (sq, side, kind)))
    }

    /// Check the disjointness and union invariants.
    pub fn is_consistent(&self) -> bool {
        let mut seen = Bitboard::EMPTY;
        for side in Side::ALL {
            let mut union = Bitboard::EMPTY;
            for kind in PieceKind::ALL {
                let bb = self.of(side, kind);
                if (seen & bb).is_nonempty() {
                    return false;
                }
                seen |= bb;
                union |= bb;
            }
            if union != self.side(side) {
                return false;
            }
        }
        seen == self.all
    }
}

impl std::fmt::Debug for Pieces {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Pieces")?;
        for rank in (0..8u8).rev() {
            write!(f, "  {} ", rank + 1)?;
            for file in 0..8u8 {
                let c = match self.piece_at(Square::new(file, rank)) {
                    Some((side, kind)) => kind.letter_for(side),
                    None => '.',
                };
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "    a b c d e f g h")
    }
}
