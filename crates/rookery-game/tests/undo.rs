//! Random games unwound move by move.

use proptest::prelude::*;
use rookery_core::Position;
use rookery_game::{GameConfig, GameSession, MoveOutcome};

proptest! {
    #[test]
    fn undo_returns_to_each_earlier_position(choices in proptest::collection::vec(0usize..256, 1..40)) {
        let mut session = GameSession::new(GameConfig::default());
        let mut snapshots: Vec<(Position, Option<_>)> = Vec::new();

        for choice in choices {
            if session.status().is_over() {
                break;
            }
            let moves = session.position().legal_moves();
            let mv = moves[choice % moves.len()];
            snapshots.push((session.position().clone(), session.last_move()));
            let outcome = session.play(mv.from(), mv.to(), mv.promotion()).unwrap();
            prop_assert!(matches!(outcome, MoveOutcome::Played { .. }), "{} not played", mv);
            prop_assert!(session.position().pieces().is_consistent());
        }

        while let Some((before, last_move)) = snapshots.pop() {
            session.undo().unwrap();
            prop_assert_eq!(session.position(), &before);
            prop_assert_eq!(session.position().fingerprint(), before.board().recompute_hash());
            prop_assert_eq!(session.last_move(), last_move);
        }
        prop_assert!(!session.can_undo());
        prop_assert_eq!(session.position(), &Position::new());
    }
}
