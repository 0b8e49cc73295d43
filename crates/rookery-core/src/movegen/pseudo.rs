//! Pseudo-legal destinations: movement rules and occupancy, self-check ignored.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::castle_rights::CastleSide;
use crate::chess_move::{Move, MoveFlag};
use crate::masks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, pawn_push, queen_attacks, rook_attacks};
use crate::piece_kind::PieceKind;
use crate::side::Side;
use crate::square::Square;

use super::MoveList;
use super::attack::is_attacked;

/// Squares the `side` piece on `from` may move to, ignoring self-check.
///
/// Empty when `from` does not hold a piece of `side`. The enemy king's square
/// is never included. Castling destinations
/// are included for the king when [`castle_allowed`] holds.
pub fn destinations(board: &Board, side: Side, from: Square) -> Bitboard {
    let pieces = board.pieces();
    let kind = match pieces.piece_at(from) {
        Some((owner, kind)) if owner == side => kind,
        _ => return Bitboard::EMPTY,
    };
    // Own pieces block; the enemy king can never be taken.
    let blocked = pieces.side(side) | pieces.of(side.opponent(), PieceKind::King);
    let occupied = pieces.occupied();

    match kind {
        PieceKind::Pawn => pawn_destinations(board, side, from),
        PieceKind::Knight => knight_attacks(from) & !blocked,
        PieceKind::Bishop => bishop_attacks(from, occupied) & !blocked,
        PieceKind::Rook => rook_attacks(from, occupied) & !blocked,
        PieceKind::Queen => queen_attacks(from, occupied) & !blocked,
        PieceKind::King => {
            let mut targets = king_attacks(from) & !blocked;
            for castle in CastleSide::ALL {
                if castle_allowed(board, side, castle) {
                    targets.set(castle.squares(side).king_to);
                }
            }
            targets
        }
    }
}

fn pawn_destinations(board: &Board, side: Side, from: Square) -> Bitboard {
    let pieces = board.pieces();
    let empty = !pieces.occupied();

    let single = pawn_push(side, from) & empty;
    let mut targets = single;
    if from.rank() == side.pawn_rank()
        && let Some(step) = single.lsb()
    {
        targets |= pawn_push(side, step) & empty;
    }

    let them = side.opponent();
    let mut victims = pieces.side(them) & !pieces.of(them, PieceKind::King);
    if side == board.side_to_move()
        && let Some(ep) = board.en_passant()
    {
        victims.set(ep);
    }
    targets | (pawn_attacks(side, from) & victims)
}

/// Whether `side` may castle towards `castle` right now.
///
/// Requires the right, king and rook on their home squares, empty squares
/// between them and no attack on the king's start, transit or destination.
pub fn castle_allowed(board: &Board, side: Side, castle: CastleSide) -> bool {
    let pieces = board.pieces();
    let squares = castle.squares(side);
    board.castling().has(side, castle)
        && pieces.of(side, PieceKind::King).contains(squares.king_from)
        && pieces.of(side, PieceKind::Rook).contains(squares.rook_from)
        && (pieces.occupied() & squares.between).is_empty()
        && !squares
            .king_path
            .iter()
            .any(|&sq| is_attacked(pieces, sq, side.opponent()))
}

/// Append every pseudo-legal move of `side`, ascending by origin, then
/// destination, then flag.
pub fn generate_pseudo_legal(board: &Board, side: Side, list: &mut MoveList) {
    let pieces = board.pieces();
    let enemy = pieces.side(side.opponent());

    for from in pieces.side(side) {
        let is_pawn = pieces.of(side, PieceKind::Pawn).contains(from);
        let is_king = pieces.of(side, PieceKind::King).contains(from);

        for to in destinations(board, side, from) {
            let capture = enemy.contains(to);
            if is_pawn {
                push_pawn_move(board, side, from, to, capture, list);
            } else if is_king && from.file().abs_diff(to.file()) == 2 {
                let flag = if to.file() > from.file() { MoveFlag::CastleKingside } else { MoveFlag::CastleQueenside };
                list.push(Move::new(from, to, flag));
            } else {
                let flag = if capture { MoveFlag::Capture } else { MoveFlag::Quiet };
                list.push(Move::new(from, to, flag));
            }
        }
    }
}

fn push_pawn_move(board: &Board, side: Side, from: Square, to: Square, capture: bool, list: &mut MoveList) {
    if to.rank() == side.promotion_rank() {
        for kind in MoveFlag::PROMOTIONS {
            list.push(Move::new(from, to, MoveFlag::promotion(kind, capture)));
        }
        return;
    }
    let flag = if capture {
        MoveFlag::Capture
    } else if from.file() != to.file() && board.en_passant() == Some(to) {
        MoveFlag::EnPassant
    } else if from.rank().abs_diff(to.rank()) == 2 {
        MoveFlag::DoublePush
    } else {
        MoveFlag::Quiet
    };
    list.push(Move::new(from, to, flag));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::castle_rights::CastleRights;
    use crate::position::Position;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn board(layout: &str, ep: Option<&str>, rights: CastleRights, side: Side) -> Board {
        *Position::from_layout(layout, ep.map(sq), rights, side).unwrap().board()
    }

    #[test]
    fn pawn_pushes_and_double_step() {
        let b = *Position::new().board();
        let targets = destinations(&b, Side::White, sq("e2"));
        assert_eq!(targets, Bitboard::EMPTY.with(sq("e3")).with(sq("e4")));
    }

    #[test]
    fn blocked_pawn_has_no_double_step() {
        let b = board("4k3/8/8/8/8/4n3/4P3/4K3", None, CastleRights::NONE, Side::White);
        assert_eq!(destinations(&b, Side::White, sq("e2")), Bitboard::EMPTY);
        let b = board("4k3/8/8/8/4n3/8/4P3/4K3", None, CastleRights::NONE, Side::White);
        assert_eq!(destinations(&b, Side::White, sq("e2")), Bitboard::EMPTY.with(sq("e3")));
    }

    #[test]
    fn pawn_captures_only_enemies_or_target() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3", Some("d6"), CastleRights::NONE, Side::White);
        let targets = destinations(&b, Side::White, sq("e5"));
        assert!(targets.contains(sq("d6")));
        assert!(targets.contains(sq("e6")));
        assert!(!targets.contains(sq("f6")));
    }

    #[test]
    fn en_passant_target_ignored_for_side_not_to_move() {
        let b = board("4k3/8/8/3pP3/8/8/8/4K3", Some("d6"), CastleRights::NONE, Side::Black);
        assert!(!destinations(&b, Side::White, sq("e5")).contains(sq("d6")));
    }

    #[test]
    fn enemy_king_square_is_excluded() {
        let b = board("8/8/8/3k4/2P5/4N3/8/4K3", None, CastleRights::NONE, Side::Black);
        assert!(!destinations(&b, Side::White, sq("c4")).contains(sq("d5")));
        assert!(!destinations(&b, Side::White, sq("e3")).contains(sq("d5")));
        assert!(destinations(&b, Side::White, sq("e3")).contains(sq("f5")));
    }

    #[test]
    fn slider_includes_enemy_blocker_but_not_own() {
        let b = board("4k3/8/8/3p4/8/8/3R4/3QK3", None, CastleRights::NONE, Side::White);
        let targets = destinations(&b, Side::White, sq("d2"));
        assert!(targets.contains(sq("d5")));
        assert!(!targets.contains(sq("d6")));
        assert!(!targets.contains(sq("d1")));
    }

    #[test]
    fn castling_needs_empty_and_safe_path() {
        let open = board("r3k2r/8/8/8/8/8/8/R3K2R", None, CastleRights::ALL, Side::White);
        assert!(castle_allowed(&open, Side::White, CastleSide::Kingside));
        assert!(castle_allowed(&open, Side::White, CastleSide::Queenside));

        let blocked = board("r3k2r/8/8/8/8/8/8/RN2K2R", None, CastleRights::ALL, Side::White);
        assert!(!castle_allowed(&blocked, Side::White, CastleSide::Queenside));

        let attacked = board("r3k2r/8/8/8/8/8/5r2/R3K2R", None, CastleRights::ALL, Side::White);
        assert!(!castle_allowed(&attacked, Side::White, CastleSide::Kingside));

        let no_rook = board("r3k2r/8/8/8/8/8/8/4K2R", None, CastleRights::ALL, Side::White);
        assert!(!castle_allowed(&no_rook, Side::White, CastleSide::Queenside));
    }

    #[test]
    fn moves_come_out_sorted() {
        let b = *Position::new().board();
        let mut list = MoveList::new();
        generate_pseudo_legal(&b, Side::White, &mut list);
        assert_eq!(list.len(), 20);
        assert!(list.as_slice().is_sorted());
    }
}
