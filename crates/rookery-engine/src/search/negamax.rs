//! Negamax alpha-beta search with quiescence.

use rookery_core::{Board, Move, insufficient_material, legal_moves};

use crate::eval::evaluate;
use crate::search::control::SearchControl;
use crate::search::ordering::MovePicker;

/// Bound no real score reaches.
pub const INF: i32 = 30_000;

/// Score of delivering mate at the root; shortened by one per ply.
pub const MATE_SCORE: i32 = 29_000;

/// Scores beyond this magnitude are forced mates.
pub const MATE_THRESHOLD: i32 = 28_000;

/// Recursion ceiling in plies.
pub const MAX_PLY: usize = 128;

/// Negamax with alpha-beta pruning. Returns the score for the side to move.
///
/// The root searches moves in legal-list order so that, among equal scores,
/// the earliest move is kept. Inner nodes use MVV-LVA ordering.
pub(super) fn negamax(
    board: &Board,
    depth: u8,
    ply: usize,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.pv.clear_ply(ply);
    ctx.nodes += 1;

    if ctx.control.should_stop(ctx.nodes) {
        return 0;
    }
    if ply > 0 && is_draw(board, ctx) {
        return 0;
    }
    if depth == 0 || ply >= MAX_PLY - 1 {
        return qsearch(board, ply, alpha, beta, ctx);
    }

    let side = board.side_to_move();
    let moves = legal_moves(board, side);
    if moves.is_empty() {
        return if board.in_check(side) { -(MATE_SCORE - ply as i32) } else { 0 };
    }

    let mut best_score = -INF;
    let mut picker = (ply > 0).then(|| MovePicker::new(&moves, board));
    let mut root_moves = moves.iter().copied();

    loop {
        let next = match picker.as_mut() {
            Some(picker) => picker.pick_next(),
            None => root_moves.next(),
        };
        let Some(mv) = next else { break };

        let child = board.make_move(mv);
        ctx.history.push(board.hash());
        let score = -negamax(&child, depth - 1, ply + 1, -beta, -alpha, ctx);
        ctx.history.pop();

        if score > best_score {
            best_score = score;
            if score > alpha {
                alpha = score;
                ctx.pv.update(ply, mv);
            }
        }
        if alpha >= beta {
            break;
        }
    }

    best_score
}

/// Resolve captures and promotions before trusting the static evaluation.
fn qsearch(board: &Board, ply: usize, mut alpha: i32, beta: i32, ctx: &mut SearchContext<'_>) -> i32 {
    ctx.nodes += 1;

    if ctx.control.should_stop(ctx.nodes) {
        return 0;
    }
    if ply >= MAX_PLY {
        return evaluate(board);
    }

    let stand_pat = evaluate(board);
    if stand_pat >= beta {
        return stand_pat;
    }
    alpha = alpha.max(stand_pat);

    let moves = legal_moves(board, board.side_to_move());
    let mut picker = MovePicker::new_qsearch(&moves, board);
    while let Some(mv) = picker.pick_next() {
        let score = -qsearch(&board.make_move(mv), ply + 1, -beta, -alpha, ctx);
        if score >= beta {
            return score;
        }
        alpha = alpha.max(score);
    }

    alpha
}

/// Draw by rule below the root: fifty-move clock, any earlier occurrence of
/// this position, or material that cannot mate.
fn is_draw(board: &Board, ctx: &SearchContext<'_>) -> bool {
    if board.halfmove_clock() >= 100 {
        return true;
    }
    let window = (board.halfmove_clock() as usize).min(ctx.history.len());
    let hash = board.hash();
    if ctx.history[ctx.history.len() - window..].contains(&hash) {
        return true;
    }
    insufficient_material(board.pieces())
}

/// Triangular principal-variation table.
pub struct PvTable {
    moves: [[Move; MAX_PLY]; MAX_PLY],
    len: [usize; MAX_PLY],
}

impl PvTable {
    pub fn new() -> Self {
        Self { moves: [[Move::NULL; MAX_PLY]; MAX_PLY], len: [0; MAX_PLY] }
    }

    pub fn clear_ply(&mut self, ply: usize) {
        if ply < MAX_PLY {
            self.len[ply] = 0;
        }
    }

    /// Make `mv` the head of the line at `ply`, followed by the line at `ply + 1`.
    pub fn update(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        self.moves[ply][0] = mv;
        let child = ply + 1;
        if child < MAX_PLY {
            let copy_len = self.len[child].min(MAX_PLY - 1);
            let (top, bottom) = self.moves.split_at_mut(child);
            top[ply][1..1 + copy_len].copy_from_slice(&bottom[0][..copy_len]);
            self.len[ply] = 1 + copy_len;
        } else {
            self.len[ply] = 1;
        }
    }

    pub fn root_pv(&self) -> &[Move] {
        &self.moves[0][..self.len[0]]
    }
}

impl Default for PvTable {
    fn default() -> Self {
        Self::new()
    }
}

/// State threaded through the recursion.
pub(super) struct SearchContext<'a> {
    pub nodes: u64,
    pub pv: PvTable,
    pub control: &'a SearchControl,
    /// Fingerprints of the game so far plus the current search path.
    pub history: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    use rookery_core::{CastleRights, Position, Side};

    use super::*;

    fn run(board: &Board, depth: u8, history: Vec<u64>) -> (i32, Vec<Move>) {
        let control = SearchControl::new_infinite(Arc::new(AtomicBool::new(false)));
        let mut ctx = SearchContext { nodes: 0, pv: PvTable::new(), control: &control, history };
        let score = negamax(board, depth, 0, -INF, INF, &mut ctx);
        (score, ctx.pv.root_pv().to_vec())
    }

    #[test]
    fn mate_in_one_scores_as_mate() {
        let pos = Position::from_layout("6k1/5ppp/8/8/8/8/8/R5K1", None, CastleRights::NONE, Side::White).unwrap();
        let (score, pv) = run(pos.board(), 2, Vec::new());
        assert_eq!(score, MATE_SCORE - 1);
        assert_eq!(pv[0].to_string(), "a1a8");
    }

    #[test]
    fn pv_line_is_playable() {
        let pos = Position::new();
        let (_, pv) = run(pos.board(), 3, Vec::new());
        assert_eq!(pv.len(), 3);
        let mut board = *pos.board();
        for mv in pv {
            assert!(legal_moves(&board, board.side_to_move()).contains(mv));
            board = board.make_move(mv);
        }
    }

    #[test]
    fn repetition_below_root_is_a_draw() {
        let pos = Position::from_layout("7k/8/8/8/8/8/8/K6Q", None, CastleRights::NONE, Side::White).unwrap();
        let board = *pos.board();
        let control = SearchControl::new_infinite(Arc::new(AtomicBool::new(false)));
        let ctx = SearchContext { nodes: 0, pv: PvTable::new(), control: &control, history: vec![board.hash()] };
        let repeated = board.with_clocks(4, 1);
        assert!(is_draw(&repeated, &ctx));
        assert!(!is_draw(&board.with_clocks(0, 1), &ctx));
    }
}
