//! Evaluation and time-bounded search for rookery.

pub mod eval;
pub mod search;
pub mod time;

pub use eval::evaluate;
pub use search::control::SearchControl;
pub use search::negamax::{MATE_SCORE, MATE_THRESHOLD};
pub use search::{SearchResult, Searcher, search_best_move};
pub use time::Difficulty;
