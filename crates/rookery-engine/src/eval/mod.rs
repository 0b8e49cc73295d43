//! Static evaluation: material plus piece-square tables, tapered by phase.

pub mod material;
pub mod phase;
pub mod pst;
pub mod score;

use rookery_core::{Board, Side};

use material::material;
use phase::{MAX_PHASE, game_phase};
use pst::placement;

/// Evaluate `board` in centipawns from the side to move's point of view.
pub fn evaluate(board: &Board) -> i32 {
    let pieces = board.pieces();
    let white = (material(pieces) + placement(pieces)).taper(game_phase(pieces), MAX_PHASE);
    match board.side_to_move() {
        Side::White => white,
        Side::Black => -white,
    }
}

#[cfg(test)]
mod tests {
    use rookery_core::{CastleRights, Position, Side};

    use super::evaluate;

    fn eval(layout: &str, side: Side) -> i32 {
        evaluate(Position::from_layout(layout, None, CastleRights::NONE, side).unwrap().board())
    }

    #[test]
    fn start_is_level() {
        assert_eq!(evaluate(Position::new().board()), 0);
    }

    #[test]
    fn sign_follows_side_to_move() {
        let layout = "4k3/8/8/8/8/8/8/Q3K3";
        let white = eval(layout, Side::White);
        assert!(white > 800);
        assert_eq!(eval(layout, Side::Black), -white);
    }
}
