//! Game phase from the remaining non-pawn material.

use rookery_core::{PieceKind, Pieces};

/// Phase of a full set of pieces. Minors weigh 1, rooks 2, queens 4.
pub const MAX_PHASE: i32 = 24;

/// Phase in `0..=MAX_PHASE`; 0 is a bare king-and-pawn ending.
///
/// Promotions cannot push the result past [`MAX_PHASE`].
pub fn game_phase(pieces: &Pieces) -> i32 {
    let count = |kind| pieces.kind(kind).count() as i32;
    let phase = count(PieceKind::Knight)
        + count(PieceKind::Bishop)
        + 2 * count(PieceKind::Rook)
        + 4 * count(PieceKind::Queen);
    phase.min(MAX_PHASE)
}

#[cfg(test)]
mod tests {
    use rookery_core::{CastleRights, Position, Side};

    use super::{MAX_PHASE, game_phase};

    fn phase_of(layout: &str) -> i32 {
        game_phase(Position::from_layout(layout, None, CastleRights::NONE, Side::White).unwrap().pieces())
    }

    #[test]
    fn start_is_full_phase() {
        assert_eq!(game_phase(Position::new().pieces()), MAX_PHASE);
    }

    #[test]
    fn pawn_ending_is_zero() {
        assert_eq!(phase_of("4k3/pppp4/8/8/8/8/PPPP4/4K3"), 0);
    }

    #[test]
    fn rook_and_minor() {
        assert_eq!(phase_of("4k3/8/8/8/8/8/8/R3KN2"), 3);
    }

    #[test]
    fn promoted_queens_are_clamped() {
        assert_eq!(phase_of("qqqqk3/8/8/8/8/8/8/QQQQK3"), MAX_PHASE);
    }
}
