//! Legal move generation by simulation.

mod attack;
mod pseudo;

pub use attack::is_attacked;
pub use pseudo::{castle_allowed, destinations, generate_pseudo_legal};

use crate::board::Board;
use crate::chess_move::Move;
use crate::piece_kind::PieceKind;
use crate::position::Position;
use crate::side::Side;
use crate::square::Square;

/// Fixed-capacity move buffer. 256 slots cover the 218-move maximum.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; 256],
    len: u16,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList { moves: [Move::NULL; 256], len: 0 }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!((self.len as usize) < self.moves.len());
        self.moves[self.len as usize] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len as usize]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    /// Find the move between two squares. For promotions `promotion` picks
    /// the variant; `None` matches the first (queen) variant.
    pub fn find(&self, from: Square, to: Square, promotion: Option<PieceKind>) -> Option<Move> {
        self.iter()
            .copied()
            .filter(|mv| mv.from() == from && mv.to() == to)
            .find(|mv| promotion.is_none() || mv.promotion() == promotion)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Legal moves of `side` in `position`, ascending by origin, destination, flag.
pub fn generate_legal_moves(position: &Position, side: Side) -> MoveList {
    legal_moves(position.board(), side)
}

/// Board-level form of [`generate_legal_moves`].
///
/// Each pseudo-legal move is played on a copy of the piece-set and kept only
/// if the mover's king is not attacked afterwards.
pub fn legal_moves(board: &Board, side: Side) -> MoveList {
    let mut pseudo = MoveList::new();
    generate_pseudo_legal(board, side, &mut pseudo);

    let mut legal = MoveList::new();
    for &mv in &pseudo {
        if leaves_king_safe(board, side, mv) {
            legal.push(mv);
        }
    }
    debug_assert!(legal.as_slice().is_sorted());
    legal
}

fn leaves_king_safe(board: &Board, side: Side, mv: Move) -> bool {
    if let Some(castle) = mv.castle()
        && !castle_allowed(board, side, castle)
    {
        return false;
    }
    let mut after = *board.pieces();
    if after.play(mv).is_none() {
        return false;
    }
    match after.king_square(side) {
        Some(king) => !is_attacked(&after, king, side.opponent()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::castle_rights::CastleRights;
    use crate::chess_move::MoveFlag;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn position(layout: &str, ep: Option<&str>, rights: CastleRights, side: Side) -> Position {
        Position::from_layout(layout, ep.map(sq), rights, side).unwrap()
    }

    #[test]
    fn starting_position_has_20_moves() {
        let pos = Position::new();
        assert_eq!(generate_legal_moves(&pos, Side::White).len(), 20);
        assert_eq!(generate_legal_moves(&pos, Side::Black).len(), 20);
    }

    #[test]
    fn first_moves_are_in_square_order() {
        let moves = generate_legal_moves(&Position::new(), Side::White);
        assert_eq!(moves[0].to_string(), "b1a3");
        assert_eq!(moves[1].to_string(), "b1c3");
        assert_eq!(moves[2].to_string(), "g1f3");
        assert_eq!(moves[moves.len() - 1].to_string(), "h2h4");
    }

    #[test]
    fn pinned_piece_cannot_leave_line() {
        let pos = position("4k3/4r3/8/8/8/8/4N3/4K3", None, CastleRights::NONE, Side::White);
        let moves = generate_legal_moves(&pos, Side::White);
        assert!(moves.iter().all(|mv| mv.from() != sq("e2")));
    }

    #[test]
    fn must_answer_check() {
        let pos = position("4k3/8/8/8/8/8/3q4/R3K3", None, CastleRights::from_flags(false, true, false, false), Side::White);
        let moves = generate_legal_moves(&pos, Side::White);
        assert!(moves.iter().all(|mv| mv.from() == sq("e1")));
        assert_eq!(moves.find(sq("e1"), sq("d2"), None).map(|m| m.flag()), Some(MoveFlag::Capture));
        assert!(moves.iter().all(|mv| mv.castle().is_none()));
    }

    #[test]
    fn castling_rules() {
        let rights = CastleRights::ALL;
        let free = position("r3k2r/8/8/8/8/8/8/R3K2R", None, rights, Side::White);
        let moves = generate_legal_moves(&free, Side::White);
        assert!(moves.contains(Move::new(Square::E1, Square::G1, MoveFlag::CastleKingside)));
        assert!(moves.contains(Move::new(Square::E1, Square::C1, MoveFlag::CastleQueenside)));

        let in_check = position("r3k2r/8/8/8/8/8/4r3/R3K2R", None, rights, Side::White);
        assert!(generate_legal_moves(&in_check, Side::White).iter().all(|mv| mv.castle().is_none()));

        let transit = position("r3k2r/8/8/8/8/8/3r4/R3K2R", None, rights, Side::White);
        let moves = generate_legal_moves(&transit, Side::White);
        assert!(!moves.contains(Move::new(Square::E1, Square::C1, MoveFlag::CastleQueenside)));
        assert!(moves.contains(Move::new(Square::E1, Square::G1, MoveFlag::CastleKingside)));

        let revoked = position("r3k2r/8/8/8/8/8/8/R3K2R", None, CastleRights::from_flags(false, true, true, true), Side::White);
        let moves = generate_legal_moves(&revoked, Side::White);
        assert!(!moves.contains(Move::new(Square::E1, Square::G1, MoveFlag::CastleKingside)));
    }

    #[test]
    fn queenside_castle_allows_attacked_b_file() {
        let pos = position("1r2k3/8/8/8/8/8/8/R3K3", None, CastleRights::from_flags(false, true, false, false), Side::White);
        let moves = generate_legal_moves(&pos, Side::White);
        assert!(moves.contains(Move::new(Square::E1, Square::C1, MoveFlag::CastleQueenside)));
    }

    #[test]
    fn en_passant_only_against_target() {
        let with_target = position("4k3/8/8/3pP3/8/8/8/4K3", Some("d6"), CastleRights::NONE, Side::White);
        let ep = Move::new(sq("e5"), sq("d6"), MoveFlag::EnPassant);
        assert!(generate_legal_moves(&with_target, Side::White).contains(ep));

        let without = position("4k3/8/8/3pP3/8/8/8/4K3", None, CastleRights::NONE, Side::White);
        assert!(!generate_legal_moves(&without, Side::White).contains(ep));
    }

    #[test]
    fn en_passant_exposing_king_is_illegal() {
        let pos = position("8/8/8/K2pP2r/8/8/8/4k3", Some("d6"), CastleRights::NONE, Side::White);
        let ep = Move::new(sq("e5"), sq("d6"), MoveFlag::EnPassant);
        assert!(!generate_legal_moves(&pos, Side::White).contains(ep));
    }

    #[test]
    fn promotions_come_in_fours() {
        let pos = position("1n2k3/P7/8/8/8/8/8/4K3", None, CastleRights::NONE, Side::White);
        let moves = generate_legal_moves(&pos, Side::White);
        let from_a7: Vec<_> = moves.iter().filter(|mv| mv.from() == sq("a7")).collect();
        assert_eq!(from_a7.len(), 8);
        assert_eq!(from_a7.iter().filter(|mv| mv.is_capture()).count(), 4);
        assert_eq!(
            moves.find(sq("a7"), sq("a8"), None).map(|m| m.flag()),
            Some(MoveFlag::PromoteQueen)
        );
        assert_eq!(
            moves.find(sq("a7"), sq("b8"), Some(PieceKind::Knight)).map(|m| m.flag()),
            Some(MoveFlag::PromoteKnightCapture)
        );
    }

    #[test]
    fn legal_list_for_other_side() {
        let pos = position("4k3/8/8/8/8/8/8/4K2R", None, CastleRights::NONE, Side::White);
        assert_eq!(generate_legal_moves(&pos, Side::Black).len(), 5);
    }
}
