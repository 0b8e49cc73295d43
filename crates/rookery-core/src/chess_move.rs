//! Moves packed into 16 bits.

use std::fmt;

use crate::castle_rights::CastleSide;
use crate::piece_kind::PieceKind;
use crate::square::Square;

const FROM_SHIFT: u16 = 10;
const TO_SHIFT: u16 = 4;
const FLAG_MASK: u16 = 0xF;

/// What a move does besides relocating one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    Quiet = 0,
    DoublePush = 1,
    Capture = 2,
    EnPassant = 3,
    CastleKingside = 4,
    CastleQueenside = 5,
    PromoteQueen = 6,
    PromoteRook = 7,
    PromoteBishop = 8,
    PromoteKnight = 9,
    PromoteQueenCapture = 10,
    PromoteRookCapture = 11,
    PromoteBishopCapture = 12,
    PromoteKnightCapture = 13,
}

impl MoveFlag {
    const ALL: [MoveFlag; 14] = [
        MoveFlag::Quiet,
        MoveFlag::DoublePush,
        MoveFlag::Capture,
        MoveFlag::EnPassant,
        MoveFlag::CastleKingside,
        MoveFlag::CastleQueenside,
        MoveFlag::PromoteQueen,
        MoveFlag::PromoteRook,
        MoveFlag::PromoteBishop,
        MoveFlag::PromoteKnight,
        MoveFlag::PromoteQueenCapture,
        MoveFlag::PromoteRookCapture,
        MoveFlag::PromoteBishopCapture,
        MoveFlag::PromoteKnightCapture,
    ];

    /// The promotion flag for `kind`, with or without a capture.
    pub const fn promotion(kind: PieceKind, capture: bool) -> MoveFlag {
        let base = match kind {
            PieceKind::Rook => 1,
            PieceKind::Bishop => 2,
            PieceKind::Knight => 3,
            _ => 0,
        };
        Self::ALL[6 + base + if capture { 4 } else { 0 }]
    }

    /// Promotion flags in list order, queen first.
    pub const PROMOTIONS: [PieceKind; 4] = [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight];
}

/// A move: `from << 10 | to << 4 | flag`.
///
/// The packing makes the derived ordering sort by origin, then destination,
/// then flag.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Move(u16);

impl Move {
    /// Placeholder for unused list slots; never produced by the generator.
    pub const NULL: Move = Move(0);

    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Move {
        Move((from.index() as u16) << FROM_SHIFT | (to.index() as u16) << TO_SHIFT | flag as u16)
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square::from_index_unchecked((self.0 >> FROM_SHIFT) as u8)
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square::from_index_unchecked((self.0 >> TO_SHIFT & 0x3F) as u8)
    }

    #[inline]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag::ALL[(self.0 & FLAG_MASK) as usize]
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// True for every move that removes an enemy piece, en passant included.
    pub const fn is_capture(self) -> bool {
        matches!(
            self.flag(),
            MoveFlag::Capture
                | MoveFlag::EnPassant
                | MoveFlag::PromoteQueenCapture
                | MoveFlag::PromoteRookCapture
                | MoveFlag::PromoteBishopCapture
                | MoveFlag::PromoteKnightCapture
        )
    }

    pub const fn promotion(self) -> Option<PieceKind> {
        match self.flag() {
            MoveFlag::PromoteQueen | MoveFlag::PromoteQueenCapture => Some(PieceKind::Queen),
            MoveFlag::PromoteRook | MoveFlag::PromoteRookCapture => Some(PieceKind::Rook),
            MoveFlag::PromoteBishop | MoveFlag::PromoteBishopCapture => Some(PieceKind::Bishop),
            MoveFlag::PromoteKnight | MoveFlag::PromoteKnightCapture => Some(PieceKind::Knight),
            _ => None,
        }
    }

    pub const fn castle(self) -> Option<CastleSide> {
        match self.flag() {
            MoveFlag::CastleKingside => Some(CastleSide::Kingside),
            MoveFlag::CastleQueenside => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

/// Coordinate notation, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(kind) = self.promotion() {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self}, {:?})", self.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, MoveFlag};
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn fields_unpack() {
        let mv = Move::new(sq("e7"), sq("d8"), MoveFlag::PromoteKnightCapture);
        assert_eq!(mv.from(), sq("e7"));
        assert_eq!(mv.to(), sq("d8"));
        assert_eq!(mv.flag(), MoveFlag::PromoteKnightCapture);
        assert_eq!(mv.promotion(), Some(PieceKind::Knight));
        assert!(mv.is_capture());
        assert_eq!(mv.to_string(), "e7d8n");
    }

    #[test]
    fn ordering_is_from_then_to_then_flag() {
        let a = Move::new(sq("b1"), sq("c3"), MoveFlag::Quiet);
        let b = Move::new(sq("b1"), sq("a3"), MoveFlag::Quiet);
        let c = Move::new(sq("e2"), sq("e4"), MoveFlag::DoublePush);
        let q = Move::new(sq("a7"), sq("a8"), MoveFlag::PromoteQueen);
        let n = Move::new(sq("a7"), sq("a8"), MoveFlag::PromoteKnight);
        assert!(b < a);
        assert!(a < c);
        assert!(q < n);
    }

    #[test]
    fn promotion_flags() {
        for kind in MoveFlag::PROMOTIONS {
            let quiet = MoveFlag::promotion(kind, false);
            let capture = MoveFlag::promotion(kind, true);
            let from = sq("b7");
            assert_eq!(Move::new(from, sq("b8"), quiet).promotion(), Some(kind));
            assert!(!Move::new(from, sq("b8"), quiet).is_capture());
            assert!(Move::new(from, sq("a8"), capture).is_capture());
        }
    }

    #[test]
    fn en_passant_counts_as_capture() {
        assert!(Move::new(sq("e5"), sq("d6"), MoveFlag::EnPassant).is_capture());
        assert!(!Move::new(sq("e2"), sq("e4"), MoveFlag::DoublePush).is_capture());
    }
}
