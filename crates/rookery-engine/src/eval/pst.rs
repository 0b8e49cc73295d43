//! Piece-square tables.
//!
//! Tables are written from White's side in square order, a1 first. Black
//! reads the rank-mirrored square.

use rookery_core::{PieceKind, Pieces, Side, Square};

use crate::eval::score::{S, Score};

#[rustfmt::skip]
const PAWN: [Score; 64] = [
    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),
    S(0,0),    S(5,0),    S(5,0),    S(-15,0),  S(-15,0),  S(5,0),    S(5,0),    S(0,0),
    S(0,5),    S(0,5),    S(-5,5),   S(5,5),    S(5,5),    S(-5,5),   S(0,5),    S(0,5),
    S(0,10),   S(0,10),   S(5,10),   S(20,15),  S(20,15),  S(5,10),   S(0,10),   S(0,10),
    S(5,20),   S(5,20),   S(10,25),  S(25,30),  S(25,30),  S(10,25),  S(5,20),   S(5,20),
    S(15,45),  S(15,45),  S(20,50),  S(30,55),  S(30,55),  S(20,50),  S(15,45),  S(15,45),
    S(60,110), S(60,110), S(60,110), S(60,110), S(60,110), S(60,110), S(60,110), S(60,110),
    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,0),
];

#[rustfmt::skip]
const KNIGHT: [Score; 64] = [
    S(-45,-40),S(-30,-30),S(-25,-25),S(-25,-20),S(-25,-20),S(-25,-25),S(-30,-30),S(-45,-40),
    S(-30,-30),S(-15,-15),S(0,-5),   S(5,0),    S(5,0),    S(0,-5),   S(-15,-15),S(-30,-30),
    S(-25,-20),S(5,0),    S(10,5),   S(15,10),  S(15,10),  S(10,5),   S(5,0),    S(-25,-20),
    S(-20,-20),S(5,0),    S(15,10),  S(20,15),  S(20,15),  S(15,10),  S(5,0),    S(-20,-20),
    S(-20,-20),S(10,0),   S(15,10),  S(25,15),  S(25,15),  S(15,10),  S(10,0),   S(-20,-20),
    S(-25,-20),S(5,-5),   S(15,5),   S(15,10),  S(15,10),  S(15,5),   S(5,-5),   S(-25,-20),
    S(-30,-30),S(-15,-15),S(0,-5),   S(0,0),    S(0,0),    S(0,-5),   S(-15,-15),S(-30,-30),
    S(-45,-40),S(-30,-30),S(-25,-25),S(-25,-20),S(-25,-20),S(-25,-25),S(-30,-30),S(-45,-40),
];

#[rustfmt::skip]
const BISHOP: [Score; 64] = [
    S(-15,-15),S(-10,-10),S(-10,-10),S(-10,-5), S(-10,-5), S(-10,-10),S(-10,-10),S(-15,-15),
    S(-5,-10), S(10,-5),  S(0,0),    S(5,0),    S(5,0),    S(0,0),    S(10,-5),  S(-5,-10),
    S(-5,-5),  S(5,0),    S(10,5),   S(5,5),    S(5,5),    S(10,5),   S(5,0),    S(-5,-5),
    S(-5,-5),  S(5,0),    S(5,5),    S(15,10),  S(15,10),  S(5,5),    S(5,0),    S(-5,-5),
    S(-5,-5),  S(5,0),    S(10,5),   S(15,10),  S(15,10),  S(10,5),   S(5,0),    S(-5,-5),
    S(-5,-5),  S(5,0),    S(5,5),    S(5,5),    S(5,5),    S(5,5),    S(5,0),    S(-5,-5),
    S(-10,-10),S(0,-5),   S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(0,-5),   S(-10,-10),
    S(-15,-15),S(-10,-10),S(-10,-10),S(-10,-5), S(-10,-5), S(-10,-10),S(-10,-10),S(-15,-15),
];

#[rustfmt::skip]
const ROOK: [Score; 64] = [
    S(-5,0),   S(0,0),    S(5,0),    S(10,0),   S(10,0),   S(5,0),    S(0,0),    S(-5,0),
    S(-10,0),  S(-5,0),   S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(-5,0),   S(-10,0),
    S(-10,0),  S(-5,0),   S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(-5,0),   S(-10,0),
    S(-10,0),  S(-5,0),   S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(-5,0),   S(-10,0),
    S(-10,5),  S(-5,5),   S(0,5),    S(0,5),    S(0,5),    S(0,5),    S(-5,5),   S(-10,5),
    S(-5,5),   S(0,5),    S(5,5),    S(5,5),    S(5,5),    S(5,5),    S(0,5),    S(-5,5),
    S(15,15),  S(20,15),  S(20,15),  S(20,15),  S(20,15),  S(20,15),  S(20,15),  S(15,15),
    S(5,10),   S(5,10),   S(5,10),   S(5,10),   S(5,10),   S(5,10),   S(5,10),   S(5,10),
];

#[rustfmt::skip]
const QUEEN: [Score; 64] = [
    S(-15,-25),S(-10,-15),S(-5,-10), S(0,-10),  S(0,-10),  S(-5,-10), S(-10,-15),S(-15,-25),
    S(-10,-15),S(0,-5),   S(5,0),    S(5,0),    S(5,0),    S(5,0),    S(0,-5),   S(-10,-15),
    S(-5,-10), S(5,0),    S(5,5),    S(5,5),    S(5,5),    S(5,5),    S(5,0),    S(-5,-10),
    S(-5,-5),  S(0,5),    S(5,10),   S(5,15),   S(5,15),   S(5,10),   S(0,5),    S(-5,-5),
    S(-5,-5),  S(0,5),    S(5,10),   S(5,15),   S(5,15),   S(5,10),   S(0,5),    S(-5,-5),
    S(-10,-10),S(0,0),    S(5,5),    S(5,10),   S(5,10),   S(5,5),    S(0,0),    S(-10,-10),
    S(-10,-15),S(-5,-5),  S(0,0),    S(0,0),    S(0,0),    S(0,0),    S(-5,-5),  S(-10,-15),
    S(-20,-25),S(-10,-15),S(-10,-10),S(-5,-10), S(-5,-10), S(-10,-10),S(-10,-15),S(-20,-25),
];

/// Middlegame halves favour a castled king; endgame halves the centre.
#[rustfmt::skip]
const KING: [Score; 64] = [
    S(15,-35), S(25,-20), S(5,-15),  S(-10,-10),S(-5,-10), S(0,-15),  S(25,-20), S(15,-35),
    S(10,-20), S(10,-10), S(-5,0),   S(-15,5),  S(-15,5),  S(-5,0),   S(10,-10), S(10,-20),
    S(-15,-15),S(-20,0),  S(-25,10), S(-30,15), S(-30,15), S(-25,10), S(-20,0),  S(-15,-15),
    S(-25,-10),S(-30,5),  S(-35,15), S(-45,25), S(-45,25), S(-35,15), S(-30,5),  S(-25,-10),
    S(-35,-10),S(-40,5),  S(-45,20), S(-55,25), S(-55,25), S(-45,20), S(-40,5),  S(-35,-10),
    S(-35,-15),S(-40,0),  S(-45,10), S(-55,15), S(-55,15), S(-45,10), S(-40,0),  S(-35,-15),
    S(-35,-25),S(-40,-10),S(-45,-5), S(-55,0),  S(-55,0),  S(-45,-5), S(-40,-10),S(-35,-25),
    S(-35,-45),S(-40,-30),S(-45,-25),S(-55,-20),S(-55,-20),S(-45,-25),S(-40,-30),S(-35,-45),
];

/// Tables indexed by [`PieceKind::index`].
static PST: [[Score; 64]; PieceKind::COUNT] = [PAWN, KNIGHT, BISHOP, ROOK, QUEEN, KING];

/// Table bonus for a `side` piece of `kind` on `sq`.
#[inline]
pub fn pst_value(kind: PieceKind, side: Side, sq: Square) -> Score {
    let sq = match side {
        Side::White => sq,
        Side::Black => sq.flip_rank(),
    };
    PST[kind.index()][sq.index()]
}

/// Sum of White's table bonuses minus Black's.
pub fn placement(pieces: &Pieces) -> Score {
    let mut score = Score::ZERO;
    for (sq, side, kind) in pieces.iter() {
        match side {
            Side::White => score += pst_value(kind, side, sq),
            Side::Black => score -= pst_value(kind, side, sq),
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use rookery_core::{PieceKind, Position, Side, Square};

    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn black_reads_mirrored_square() {
        assert_eq!(
            pst_value(PieceKind::Pawn, Side::White, sq("e4")),
            pst_value(PieceKind::Pawn, Side::Black, sq("e5"))
        );
        assert_eq!(
            pst_value(PieceKind::King, Side::White, sq("g1")),
            pst_value(PieceKind::King, Side::Black, sq("g8"))
        );
    }

    #[test]
    fn centre_knight_beats_rim_knight() {
        let centre = pst_value(PieceKind::Knight, Side::White, sq("d4"));
        let rim = pst_value(PieceKind::Knight, Side::White, sq("a4"));
        assert!(centre.mg() > rim.mg());
        assert!(centre.eg() > rim.eg());
    }

    #[test]
    fn start_placement_is_symmetric() {
        assert_eq!(placement(Position::new().pieces()), Score::ZERO);
    }
}
