//! Perft node counting for move-generator verification.

use crate::board::Board;
use crate::movegen::legal_moves;

/// Count leaf nodes `depth` plies below `board`.
///
/// Depth 0 returns 1. Depth 1 bulk-counts the legal list.
pub fn perft(board: &Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(board, board.side_to_move());
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|&mv| perft(&board.make_move(mv), depth - 1))
        .sum()
}

/// Per-move breakdown of [`perft`], in legal-list order.
pub fn divide(board: &Board, depth: usize) -> Vec<(String, u64)> {
    legal_moves(board, board.side_to_move())
        .iter()
        .map(|&mv| {
            let count = if depth <= 1 { 1 } else { perft(&board.make_move(mv), depth - 1) };
            (mv.to_string(), count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::castle_rights::CastleRights;
    use crate::position::Position;
    use crate::side::Side;

    fn board(layout: &str, rights: CastleRights) -> Board {
        *Position::from_layout(layout, None, rights, Side::White).unwrap().board()
    }

    #[test]
    fn startpos() {
        let b = *Position::new().board();
        assert_eq!(perft(&b, 1), 20);
        assert_eq!(perft(&b, 2), 400);
        assert_eq!(perft(&b, 3), 8_902);
    }

    #[test]
    fn kiwipete() {
        let b = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R", CastleRights::ALL);
        assert_eq!(perft(&b, 1), 48);
        assert_eq!(perft(&b, 2), 2_039);
        assert_eq!(perft(&b, 3), 97_862);
    }

    #[test]
    fn rook_endgame() {
        let b = board("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", CastleRights::NONE);
        assert_eq!(perft(&b, 1), 14);
        assert_eq!(perft(&b, 2), 191);
        assert_eq!(perft(&b, 3), 2_812);
    }

    #[test]
    fn promotions_and_castling() {
        let b = board(
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1",
            CastleRights::from_flags(false, false, true, true),
        );
        assert_eq!(perft(&b, 1), 6);
        assert_eq!(perft(&b, 2), 264);
        assert_eq!(perft(&b, 3), 9_467);
    }

    #[test]
    fn discovered_checks() {
        let b = board(
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R",
            CastleRights::from_flags(true, true, false, false),
        );
        assert_eq!(perft(&b, 1), 44);
        assert_eq!(perft(&b, 2), 1_486);
        assert_eq!(perft(&b, 3), 62_379);
    }

    #[test]
    fn divide_sums_to_perft() {
        let b = *Position::new().board();
        let parts = divide(&b, 3);
        assert_eq!(parts.len(), 20);
        assert_eq!(parts[0].0, "b1a3");
        assert_eq!(parts.iter().map(|(_, n)| n).sum::<u64>(), perft(&b, 3));
    }
}
