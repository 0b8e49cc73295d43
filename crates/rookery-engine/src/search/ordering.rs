//! Move ordering by MVV-LVA.

use rookery_core::{Board, Move, MoveFlag, MoveList, PieceKind};

/// Scores indexed by `[victim][attacker]`: `victim_weight * 16 - attacker_weight`
/// with Pawn=1, Knight=3, Bishop=3, Rook=5, Queen=9, King=0.
const MVV_LVA: [[i32; 6]; 6] = [
    [15, 13, 13, 11, 7, 16],
    [47, 45, 45, 43, 39, 48],
    [47, 45, 45, 43, 39, 48],
    [79, 77, 77, 75, 71, 80],
    [143, 141, 141, 139, 135, 144],
    [-1, -3, -3, -5, -9, 0],
];

/// Ordering score; higher is searched first. Quiet moves score 0.
pub fn score_move(board: &Board, mv: Move) -> i32 {
    let pieces = board.pieces();
    let attacker = pieces.piece_at(mv.from()).map_or(PieceKind::Pawn, |(_, kind)| kind);
    let promotion = match mv.promotion() {
        Some(PieceKind::Queen) => 2_000,
        Some(_) => 100,
        None => 0,
    };
    let capture = match mv.flag() {
        MoveFlag::EnPassant => 1_000 + MVV_LVA[PieceKind::Pawn.index()][PieceKind::Pawn.index()],
        _ if mv.is_capture() => match pieces.piece_at(mv.to()) {
            Some((_, victim)) => 1_000 + MVV_LVA[victim.index()][attacker.index()],
            None => 0,
        },
        _ => 0,
    };
    promotion + capture
}

/// Yields moves best-first by selection sort.
///
/// Equal scores come out in list order.
pub struct MovePicker {
    moves: [Move; 256],
    scores: [i32; 256],
    len: usize,
    cursor: usize,
    min_score: i32,
}

impl MovePicker {
    /// All moves of `moves`.
    pub fn new(moves: &MoveList, board: &Board) -> Self {
        Self::build(moves, board, i32::MIN)
    }

    /// Captures and promotions only, for quiescence.
    pub fn new_qsearch(moves: &MoveList, board: &Board) -> Self {
        Self::build(moves, board, 1)
    }

    fn build(moves: &MoveList, board: &Board, min_score: i32) -> Self {
        let mut picker = Self {
            moves: [Move::NULL; 256],
            scores: [0; 256],
            len: moves.len(),
            cursor: 0,
            min_score,
        };
        for (i, &mv) in moves.iter().enumerate() {
            picker.moves[i] = mv;
            picker.scores[i] = score_move(board, mv);
        }
        picker
    }

    /// Next best move, or `None` once the rest score below the minimum.
    pub fn pick_next(&mut self) -> Option<Move> {
        if self.cursor >= self.len {
            return None;
        }
        let mut best = self.cursor;
        for i in self.cursor + 1..self.len {
            if self.scores[i] > self.scores[best] {
                best = i;
            }
        }
        if self.scores[best] < self.min_score {
            return None;
        }
        // Shift rather than swap so ties keep their list order.
        self.moves[self.cursor..=best].rotate_right(1);
        self.scores[self.cursor..=best].rotate_right(1);
        let mv = self.moves[self.cursor];
        self.cursor += 1;
        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use rookery_core::{CastleRights, Position, Side, Square};

    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn bigger_victim_first_then_cheaper_attacker() {
        let pos = Position::from_layout("3qk3/8/4N3/2p5/1P6/8/8/3RK3", None, CastleRights::NONE, Side::White).unwrap();
        let moves = pos.legal_moves();
        let mut picker = MovePicker::new(&moves, pos.board());
        let first = picker.pick_next().unwrap();
        assert_eq!((first.from(), first.to()), (sq("e6"), sq("d8")));
        let second = picker.pick_next().unwrap();
        assert_eq!((second.from(), second.to()), (sq("d1"), sq("d8")));
        let third = picker.pick_next().unwrap();
        assert_eq!((third.from(), third.to()), (sq("b4"), sq("c5")));
    }

    #[test]
    fn qsearch_skips_quiet_moves() {
        let pos = Position::new();
        let moves = pos.legal_moves();
        assert!(MovePicker::new_qsearch(&moves, pos.board()).pick_next().is_none());
    }

    #[test]
    fn quiet_moves_keep_list_order() {
        let pos = Position::new();
        let moves = pos.legal_moves();
        let mut picker = MovePicker::new(&moves, pos.board());
        let mut picked = Vec::new();
        while let Some(mv) = picker.pick_next() {
            picked.push(mv);
        }
        assert_eq!(picked.as_slice(), moves.as_slice());
    }
}
