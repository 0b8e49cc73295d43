//! Self-play demo: the engine plays both sides of a game.
//!
//! Usage: `rookery [PLY_LIMIT] [DIFFICULTY 1-3]`. Set `RUST_LOG=debug` to
//! watch the search.

use std::env;

use anyhow::{Context, Result, bail};
use rookery_engine::{Difficulty, search_best_move};
use rookery_game::{GameConfig, GameMode, GameSession, MoveOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_PLY_LIMIT: usize = 40;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let ply_limit = match args.next() {
        Some(arg) => arg.parse::<usize>().with_context(|| format!("invalid ply limit: {arg}"))?,
        None => DEFAULT_PLY_LIMIT,
    };
    let difficulty = match args.next() {
        Some(arg) => Difficulty::from_level(arg.parse().with_context(|| format!("invalid difficulty: {arg}"))?),
        None => Difficulty::Easy,
    };

    let config = GameConfig { mode: GameMode::TwoPlayers, difficulty, ..GameConfig::default() };
    let budget = config.think_time(difficulty);
    let mut session = GameSession::new(config);
    info!(ply_limit, %difficulty, "self-play starting");

    for ply in 1..=ply_limit {
        if session.status().is_over() {
            break;
        }
        let side = session.position().side_to_move();
        let Some(mv) = search_best_move(session.position(), side, budget) else {
            break;
        };
        match session.play(mv.from(), mv.to(), mv.promotion())? {
            MoveOutcome::Played { .. } => println!("{ply:>3}. {:<5} {mv}", side.to_string()),
            MoveOutcome::PromotionRequired { from, to } => bail!("no promotion piece for {from}{to}"),
        }
    }

    println!("{}", session.position().to_compact());
    println!("{}", session.status_label());
    Ok(())
}
