//! Castling rights and the fixed castling geometry.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::side::Side;
use crate::square::Square;

/// Which rook a king castles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// Squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleSquares {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub between: Bitboard,
    /// King start, transit and destination; none may be attacked.
    pub king_path: [Square; 3],
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Castling squares for `side`, mirrored from White's home rank.
    pub const fn squares(self, side: Side) -> CastleSquares {
        let white = match self {
            CastleSide::Kingside => CastleSquares {
                king_from: Square::E1,
                king_to: Square::G1,
                rook_from: Square::H1,
                rook_to: Square::F1,
                between: Bitboard::new(0x60),
                king_path: [Square::E1, Square::F1, Square::G1],
            },
            CastleSide::Queenside => CastleSquares {
                king_from: Square::E1,
                king_to: Square::C1,
                rook_from: Square::A1,
                rook_to: Square::D1,
                between: Bitboard::new(0x0E),
                king_path: [Square::E1, Square::D1, Square::C1],
            },
        };
        match side {
            Side::White => white,
            Side::Black => CastleSquares {
                king_from: white.king_from.flip_rank(),
                king_to: white.king_to.flip_rank(),
                rook_from: white.rook_from.flip_rank(),
                rook_to: white.rook_to.flip_rank(),
                between: Bitboard::new(white.between.bits() << 56),
                king_path: [
                    white.king_path[0].flip_rank(),
                    white.king_path[1].flip_rank(),
                    white.king_path[2].flip_rank(),
                ],
            },
        }
    }
}

/// Four castling flags packed as bit 0 = White kingside, 1 = White queenside,
/// 2 = Black kingside, 3 = Black queenside.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(0b1111);

    /// Build rights from the four individual flags.
    pub const fn from_flags(
        white_kingside: bool,
        white_queenside: bool,
        black_kingside: bool,
        black_queenside: bool,
    ) -> CastleRights {
        CastleRights(
            white_kingside as u8
                | (white_queenside as u8) << 1
                | (black_kingside as u8) << 2
                | (black_queenside as u8) << 3,
        )
    }

    const fn bit(side: Side, castle: CastleSide) -> u8 {
        let shift = match castle {
            CastleSide::Kingside => 0,
            CastleSide::Queenside => 1,
        };
        1 << (side as u8 * 2 + shift)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn has(self, side: Side, castle: CastleSide) -> bool {
        self.0 & Self::bit(side, castle) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Drop every right that depends on a piece standing on `sq`.
    #[inline]
    pub const fn revoke_at(self, sq: Square) -> CastleRights {
        CastleRights(self.0 & !REVOKE[sq.index()])
    }
}

/// Rights lost when a given square is vacated or captured on.
const REVOKE: [u8; 64] = {
    let mut table = [0u8; 64];
    let sides = [Side::White, Side::Black];
    let mut s = 0;
    while s < 2 {
        let side = sides[s];
        let king = CastleSide::Kingside.squares(side);
        let queen = CastleSide::Queenside.squares(side);
        table[king.king_from.index()] =
            CastleRights::bit(side, CastleSide::Kingside) | CastleRights::bit(side, CastleSide::Queenside);
        table[king.rook_from.index()] = CastleRights::bit(side, CastleSide::Kingside);
        table[queen.rook_from.index()] = CastleRights::bit(side, CastleSide::Queenside);
        s += 1;
    }
    table
};

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = String::new();
        for (side, castle, c) in [
            (Side::White, CastleSide::Kingside, 'K'),
            (Side::White, CastleSide::Queenside, 'Q'),
            (Side::Black, CastleSide::Kingside, 'k'),
            (Side::Black, CastleSide::Queenside, 'q'),
        ] {
            if self.has(side, castle) {
                flags.push(c);
            }
        }
        if flags.is_empty() {
            flags.push('-');
        }
        write!(f, "CastleRights({flags})")
    }
}

#[cfg(test)]
mod tests {
    use super::{CastleRights, CastleSide};
    use crate::side::Side;
    use crate::square::Square;

    #[test]
    fn flags_map_to_sides() {
        let rights = CastleRights::from_flags(true, false, false, true);
        assert!(rights.has(Side::White, CastleSide::Kingside));
        assert!(!rights.has(Side::White, CastleSide::Queenside));
        assert!(!rights.has(Side::Black, CastleSide::Kingside));
        assert!(rights.has(Side::Black, CastleSide::Queenside));
        assert_eq!(CastleRights::from_flags(true, true, true, true), CastleRights::ALL);
    }

    #[test]
    fn king_square_revokes_both_rights() {
        let rights = CastleRights::ALL.revoke_at(Square::E1);
        assert!(!rights.has(Side::White, CastleSide::Kingside));
        assert!(!rights.has(Side::White, CastleSide::Queenside));
        assert!(rights.has(Side::Black, CastleSide::Kingside));
    }

    #[test]
    fn rook_square_revokes_one_right() {
        let rights = CastleRights::ALL.revoke_at(Square::A8);
        assert!(!rights.has(Side::Black, CastleSide::Queenside));
        assert!(rights.has(Side::Black, CastleSide::Kingside));
        assert_eq!(CastleRights::ALL.revoke_at(Square::from_algebraic("d4").unwrap()), CastleRights::ALL);
    }

    #[test]
    fn black_geometry_is_mirrored() {
        let sq = CastleSide::Queenside.squares(Side::Black);
        assert_eq!(sq.king_to, Square::C8);
        assert_eq!(sq.rook_from, Square::A8);
        assert_eq!(sq.rook_to, Square::D8);
        assert_eq!(sq.between.count(), 3);
        assert!(sq.between.contains(Square::B8));
    }
}
