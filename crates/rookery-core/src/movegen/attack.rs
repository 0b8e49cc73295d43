//! Single-square attack queries.

use crate::masks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::piece_kind::PieceKind;
use crate::pieces::Pieces;
use crate::side::Side;
use crate::square::Square;

/// Return `true` if any piece of `by` attacks `sq`.
///
/// Casts each attack pattern outward from `sq` and intersects it with the
/// matching attackers, so no move list is built.
pub fn is_attacked(pieces: &Pieces, sq: Square, by: Side) -> bool {
    let occupied = pieces.occupied();
    let queens = pieces.of(by, PieceKind::Queen);

    (pawn_attacks(by.opponent(), sq) & pieces.of(by, PieceKind::Pawn)).is_nonempty()
        || (knight_attacks(sq) & pieces.of(by, PieceKind::Knight)).is_nonempty()
        || (king_attacks(sq) & pieces.of(by, PieceKind::King)).is_nonempty()
        || (bishop_attacks(sq, occupied) & (pieces.of(by, PieceKind::Bishop) | queens)).is_nonempty()
        || (rook_attacks(sq, occupied) & (pieces.of(by, PieceKind::Rook) | queens)).is_nonempty()
}

#[cfg(test)]
mod tests {
    use super::is_attacked;
    use crate::piece_kind::PieceKind;
    use crate::pieces::Pieces;
    use crate::side::Side;
    use crate::square::Square;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn pawn_attacks_diagonally_forward_only() {
        let mut pieces = Pieces::empty();
        pieces.put(Side::White, PieceKind::Pawn, sq("e4"));
        assert!(is_attacked(&pieces, sq("d5"), Side::White));
        assert!(is_attacked(&pieces, sq("f5"), Side::White));
        assert!(!is_attacked(&pieces, sq("e5"), Side::White));
        assert!(!is_attacked(&pieces, sq("d3"), Side::White));
    }

    #[test]
    fn sliders_are_blocked() {
        let mut pieces = Pieces::empty();
        pieces.put(Side::Black, PieceKind::Rook, sq("a8"));
        pieces.put(Side::Black, PieceKind::Bishop, sq("h8"));
        assert!(is_attacked(&pieces, sq("a1"), Side::Black));
        assert!(is_attacked(&pieces, sq("b2"), Side::Black));
        pieces.put(Side::White, PieceKind::Knight, sq("a4"));
        pieces.put(Side::White, PieceKind::Knight, sq("d4"));
        assert!(!is_attacked(&pieces, sq("a1"), Side::Black));
        assert!(is_attacked(&pieces, sq("e5"), Side::Black));
    }

    #[test]
    fn queen_and_knight_and_king() {
        let mut pieces = Pieces::empty();
        pieces.put(Side::White, PieceKind::Queen, sq("d1"));
        pieces.put(Side::White, PieceKind::Knight, sq("g1"));
        pieces.put(Side::White, PieceKind::King, sq("e1"));
        assert!(is_attacked(&pieces, sq("h5"), Side::White));
        assert!(is_attacked(&pieces, sq("f3"), Side::White));
        assert!(is_attacked(&pieces, sq("f2"), Side::White));
        assert!(!is_attacked(&pieces, sq("h4"), Side::White));
        assert!(!is_attacked(&pieces, sq("f3"), Side::Black));
    }
}
