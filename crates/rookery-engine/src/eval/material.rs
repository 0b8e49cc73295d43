//! Material balance, White's point of view.

use rookery_core::{PieceKind, Pieces, Side};

use crate::eval::score::{S, Score};

/// Piece values indexed by [`PieceKind::index`]. Kings are not counted.
pub const MATERIAL_VALUE: [Score; PieceKind::COUNT] = [
    S(100, 125), // Pawn
    S(315, 300), // Knight
    S(330, 315), // Bishop
    S(500, 530), // Rook
    S(925, 960), // Queen
    S(0, 0),     // King
];

const BISHOP_PAIR: Score = S(40, 55);

/// Weighted piece count difference plus a bishop-pair bonus.
pub fn material(pieces: &Pieces) -> Score {
    let mut score = Score::ZERO;
    for kind in PieceKind::ALL {
        let white = pieces.of(Side::White, kind).count() as i16;
        let black = pieces.of(Side::Black, kind).count() as i16;
        score += MATERIAL_VALUE[kind.index()] * (white - black);
    }
    if pieces.of(Side::White, PieceKind::Bishop).count() >= 2 {
        score += BISHOP_PAIR;
    }
    if pieces.of(Side::Black, PieceKind::Bishop).count() >= 2 {
        score -= BISHOP_PAIR;
    }
    score
}

#[cfg(test)]
mod tests {
    use rookery_core::{CastleRights, Position, Side};

    use super::*;

    fn material_of(layout: &str) -> Score {
        material(Position::from_layout(layout, None, CastleRights::NONE, Side::White).unwrap().pieces())
    }

    #[test]
    fn start_is_balanced() {
        assert_eq!(material(Position::new().pieces()), Score::ZERO);
    }

    #[test]
    fn extra_rook_for_black() {
        assert_eq!(material_of("r3k3/8/8/8/8/8/8/4K3"), -MATERIAL_VALUE[PieceKind::Rook.index()]);
    }

    #[test]
    fn bishop_pair_counts_once() {
        let one = material_of("4k3/8/8/8/8/8/8/2B1K3");
        let two = material_of("4k3/8/8/8/8/8/8/2B1KB2");
        assert_eq!(two - one, MATERIAL_VALUE[PieceKind::Bishop.index()] + BISHOP_PAIR);
    }
}
