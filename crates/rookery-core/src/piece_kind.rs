//! Piece kinds, independent of side.

use std::fmt;

use crate::side::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub const COUNT: usize = 6;

    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case layout letter.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Layout letter for a piece of `side`: upper case for White.
    pub const fn letter_for(self, side: Side) -> char {
        match side {
            Side::White => self.letter().to_ascii_uppercase(),
            Side::Black => self.letter(),
        }
    }

    /// Decode a layout letter into its side and kind.
    pub fn from_letter(c: char) -> Option<(Side, PieceKind)> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let side = if c.is_ascii_uppercase() { Side::White } else { Side::Black };
        Some((side, kind))
    }

    /// Resolve a promotion choice such as `"rook"`. Anything unrecognised
    /// promotes to a queen.
    pub fn from_promotion_name(name: &str) -> PieceKind {
        match name.trim().to_ascii_lowercase().as_str() {
            "rook" | "r" => PieceKind::Rook,
            "bishop" | "b" => PieceKind::Bishop,
            "knight" | "n" => PieceKind::Knight,
            _ => PieceKind::Queen,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    #[inline]
    pub const fn is_minor(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::PieceKind;
    use crate::side::Side;

    #[test]
    fn letters_roundtrip_for_both_sides() {
        for kind in PieceKind::ALL {
            for side in Side::ALL {
                assert_eq!(PieceKind::from_letter(kind.letter_for(side)), Some((side, kind)));
            }
        }
        assert_eq!(PieceKind::from_letter('x'), None);
        assert_eq!(PieceKind::from_letter('3'), None);
    }

    #[test]
    fn unknown_promotion_defaults_to_queen() {
        assert_eq!(PieceKind::from_promotion_name("knight"), PieceKind::Knight);
        assert_eq!(PieceKind::from_promotion_name("Rook"), PieceKind::Rook);
        assert_eq!(PieceKind::from_promotion_name("bishop"), PieceKind::Bishop);
        assert_eq!(PieceKind::from_promotion_name("queen"), PieceKind::Queen);
        assert_eq!(PieceKind::from_promotion_name("dragon"), PieceKind::Queen);
        assert_eq!(PieceKind::from_promotion_name(""), PieceKind::Queen);
    }
}
