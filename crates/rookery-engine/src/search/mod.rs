//! Iterative-deepening search.

pub mod control;
pub mod negamax;
pub mod ordering;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use rookery_core::{Board, Move, Position, Side, legal_moves};
use tracing::{debug, info};

use control::SearchControl;
use negamax::{INF, MATE_THRESHOLD, MAX_PLY, PvTable, SearchContext, negamax};

/// Outcome of an iterative-deepening run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move of the deepest completed iteration.
    pub best_move: Move,
    pub pv: Vec<Move>,
    /// Centipawns for the side to move.
    pub score: i32,
    pub nodes: u64,
    /// Deepest completed iteration; 0 when none finished.
    pub depth: u8,
}

/// Iterative-deepening driver.
#[derive(Debug, Clone)]
pub struct Searcher {
    max_depth: u8,
}

impl Searcher {
    pub fn new() -> Self {
        Self { max_depth: (MAX_PLY / 2) as u8 }
    }

    /// Cap the iteration depth.
    pub fn with_max_depth(max_depth: u8) -> Self {
        Self { max_depth: max_depth.clamp(1, (MAX_PLY / 2) as u8) }
    }

    /// Search `board` one depth at a time until `control` says stop.
    ///
    /// `history` holds the fingerprints of earlier positions of the game,
    /// not including `board` itself. An iteration cut short by the hard
    /// limit is thrown away; the result always comes from the last complete
    /// one. `on_iter(depth, score, nodes, pv)` runs after each completed
    /// iteration.
    pub fn search<F>(&self, board: &Board, history: &[u64], control: &SearchControl, mut on_iter: F) -> SearchResult
    where
        F: FnMut(u8, i32, u64, &[Move]),
    {
        let mut ctx = SearchContext { nodes: 0, pv: PvTable::new(), control, history: history.to_vec() };

        let mut completed = SearchResult { best_move: Move::NULL, pv: Vec::new(), score: -INF, nodes: 0, depth: 0 };

        for depth in 1..=self.max_depth {
            if depth > 1 && control.should_stop_iterating() {
                break;
            }

            let score = negamax(board, depth, 0, -INF, INF, &mut ctx);
            if control.is_stopped() {
                debug!(depth, "iteration aborted");
                break;
            }

            let pv = ctx.pv.root_pv();
            let Some(&best) = pv.first() else { break };
            completed = SearchResult { best_move: best, pv: pv.to_vec(), score, nodes: ctx.nodes, depth };
            debug!(depth, score, nodes = ctx.nodes, best = %best, "iteration complete");
            on_iter(depth, score, ctx.nodes, &completed.pv);

            if score.abs() > MATE_THRESHOLD {
                break;
            }
        }

        completed.nodes = ctx.nodes;
        completed
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick a move for `side` within `budget`.
///
/// Returns `None` when `side` has no legal move. A lone legal move is
/// returned without searching. The answer is always a member of
/// `side`'s legal list; if not even depth 1 completes in time, the first
/// legal move is played.
pub fn search_best_move(position: &Position, side: Side, budget: Duration) -> Option<Move> {
    let board = position.board().with_side_to_move(side);
    let legal = legal_moves(&board, side);
    match legal.len() {
        0 => return None,
        1 => return Some(legal[0]),
        _ => {}
    }

    // Earlier positions only count when the real side to move is searching.
    let history = match position.history().split_last() {
        Some((_, earlier)) if side == position.side_to_move() => earlier,
        _ => &[],
    };

    let control = SearchControl::for_budget(Arc::new(AtomicBool::new(false)), budget);
    let result = Searcher::new().search(&board, history, &control, |_, _, _, _| {});

    let best = if legal.contains(result.best_move) { result.best_move } else { legal[0] };
    info!(
        %side,
        best = %best,
        score = result.score,
        depth = result.depth,
        nodes = result.nodes,
        elapsed_ms = control.elapsed().as_millis() as u64,
        "search finished"
    );
    Some(best)
}
