//! Attack masks computed at compile time.
//!
//! Leaper masks come straight from file/rank deltas. Sliding attacks are
//! produced by marching the eight direction rays and cutting each one at its
//! first blocker.

use crate::bitboard::Bitboard;
use crate::side::Side;
use crate::square::Square;

/// Sliding directions. The first four step towards higher square indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    NorthEast = 2,
    NorthWest = 3,
    South = 4,
    West = 5,
    SouthWest = 6,
    SouthEast = 7,
}

impl Direction {
    pub const ORTHOGONAL: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];
    pub const DIAGONAL: [Direction; 4] =
        [Direction::NorthEast, Direction::NorthWest, Direction::SouthWest, Direction::SouthEast];

    const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::SouthEast => (1, -1),
        }
    }

    #[inline]
    const fn ascending(self) -> bool {
        (self as u8) < 4
    }
}

const fn abs_diff(a: u8, b: u8) -> u8 {
    if a > b { a - b } else { b - a }
}

const fn leaper_table(knight: bool) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut from = 0u8;
    while from < 64 {
        let mut bits = 0u64;
        let mut to = 0u8;
        while to < 64 {
            let df = abs_diff(from % 8, to % 8);
            let dr = abs_diff(from / 8, to / 8);
            let hit = if knight {
                (df == 1 && dr == 2) || (df == 2 && dr == 1)
            } else {
                df <= 1 && dr <= 1 && df + dr > 0
            };
            if hit {
                bits |= 1u64 << to;
            }
            to += 1;
        }
        table[from as usize] = Bitboard::new(bits);
        from += 1;
    }
    table
}

const fn pawn_table(capture: bool) -> [[Bitboard; 64]; 2] {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    let sides = [Side::White, Side::Black];
    let mut s = 0;
    while s < 2 {
        let side = sides[s];
        let mut i = 0u8;
        while i < 64 {
            let sq = Square::from_index_unchecked(i);
            let mut bits = 0u64;
            if capture {
                if let Some(t) = sq.offset(-1, side.forward()) {
                    bits |= 1u64 << t.index();
                }
                if let Some(t) = sq.offset(1, side.forward()) {
                    bits |= 1u64 << t.index();
                }
            } else if let Some(t) = sq.offset(0, side.forward()) {
                bits |= 1u64 << t.index();
            }
            table[s][i as usize] = Bitboard::new(bits);
            i += 1;
        }
        s += 1;
    }
    table
}

const fn ray_table() -> [[Bitboard; 64]; 8] {
    let dirs = [
        Direction::North,
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::South,
        Direction::West,
        Direction::SouthWest,
        Direction::SouthEast,
    ];
    let mut table = [[Bitboard::EMPTY; 64]; 8];
    let mut d = 0;
    while d < 8 {
        let (df, dr) = dirs[d].delta();
        let mut i = 0u8;
        while i < 64 {
            let mut bits = 0u64;
            let mut cur = Square::from_index_unchecked(i);
            while let Some(next) = cur.offset(df, dr) {
                bits |= 1u64 << next.index();
                cur = next;
            }
            table[d][i as usize] = Bitboard::new(bits);
            i += 1;
        }
        d += 1;
    }
    table
}

static KNIGHT: [Bitboard; 64] = leaper_table(true);
static KING: [Bitboard; 64] = leaper_table(false);
static PAWN_CAPTURES: [[Bitboard; 64]; 2] = pawn_table(true);
static PAWN_PUSHES: [[Bitboard; 64]; 2] = pawn_table(false);
static RAYS: [[Bitboard; 64]; 8] = ray_table();

#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT[sq.index()]
}

#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING[sq.index()]
}

/// Diagonal capture squares of a `side` pawn on `sq`.
#[inline]
pub fn pawn_attacks(side: Side, sq: Square) -> Bitboard {
    PAWN_CAPTURES[side.index()][sq.index()]
}

/// Single-step push square of a `side` pawn on `sq`.
#[inline]
pub fn pawn_push(side: Side, sq: Square) -> Bitboard {
    PAWN_PUSHES[side.index()][sq.index()]
}

/// Full ray from `sq` towards `dir`, ignoring occupancy.
#[inline]
pub fn ray(dir: Direction, sq: Square) -> Bitboard {
    RAYS[dir as usize][sq.index()]
}

/// Ray from `sq` towards `dir` up to and including the first occupied square.
#[inline]
pub fn ray_attacks(dir: Direction, sq: Square, occupied: Bitboard) -> Bitboard {
    let full = ray(dir, sq);
    let blockers = full & occupied;
    let first = if dir.ascending() { blockers.lsb() } else { blockers.msb() };
    match first {
        Some(blocker) => full ^ ray(dir, blocker),
        None => full,
    }
}

pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    Direction::DIAGONAL
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray_attacks(dir, sq, occupied))
}

pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    Direction::ORTHOGONAL
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray_attacks(dir, sq, occupied))
}

#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn knight_counts() {
        assert_eq!(knight_attacks(sq("e4")).count(), 8);
        assert_eq!(knight_attacks(Square::A1).count(), 2);
        assert_eq!(knight_attacks(sq("b1")).count(), 3);
        assert!(knight_attacks(Square::A1).contains(sq("b3")));
        assert!(knight_attacks(Square::A1).contains(sq("c2")));
    }

    #[test]
    fn king_counts() {
        assert_eq!(king_attacks(sq("e4")).count(), 8);
        assert_eq!(king_attacks(Square::H8).count(), 3);
        assert!(!king_attacks(sq("e4")).contains(sq("e4")));
    }

    #[test]
    fn pawn_masks_depend_on_side() {
        let e4 = sq("e4");
        assert_eq!(pawn_attacks(Side::White, e4), Bitboard::EMPTY.with(sq("d5")).with(sq("f5")));
        assert_eq!(pawn_attacks(Side::Black, e4), Bitboard::EMPTY.with(sq("d3")).with(sq("f3")));
        assert_eq!(pawn_attacks(Side::White, sq("a2")).count(), 1);
        assert_eq!(pawn_push(Side::White, e4).lsb(), Some(sq("e5")));
        assert_eq!(pawn_push(Side::Black, e4).lsb(), Some(sq("e3")));
    }

    #[test]
    fn rays_do_not_wrap() {
        assert_eq!(ray(Direction::East, sq("g3")).count(), 1);
        assert_eq!(ray(Direction::West, sq("a3")), Bitboard::EMPTY);
        assert_eq!(ray(Direction::NorthEast, Square::A1).count(), 7);
    }

    #[test]
    fn sliders_stop_at_first_blocker() {
        let occupied = Bitboard::EMPTY.with(sq("d6")).with(sq("d2")).with(sq("f4"));
        let attacks = rook_attacks(sq("d4"), occupied);
        assert!(attacks.contains(sq("d6")));
        assert!(!attacks.contains(sq("d7")));
        assert!(attacks.contains(sq("d2")));
        assert!(!attacks.contains(sq("d1")));
        assert!(attacks.contains(sq("a4")));
        assert!(attacks.contains(sq("f4")));
        assert!(!attacks.contains(sq("g4")));
        assert_eq!(attacks.count(), 2 + 2 + 3 + 2);
    }

    #[test]
    fn empty_board_slider_counts() {
        assert_eq!(rook_attacks(sq("e4"), Bitboard::EMPTY).count(), 14);
        assert_eq!(bishop_attacks(sq("e4"), Bitboard::EMPTY).count(), 13);
        assert_eq!(queen_attacks(Square::A1, Bitboard::EMPTY).count(), 21);
    }

    proptest! {
        #[test]
        fn knight_relation_is_symmetric(a in 0u8..64, b in 0u8..64) {
            let (x, y) = (Square::from_index(a).unwrap(), Square::from_index(b).unwrap());
            prop_assert_eq!(knight_attacks(x).contains(y), knight_attacks(y).contains(x));
        }

        #[test]
        fn rook_relation_is_symmetric_on_empty_board(a in 0u8..64, b in 0u8..64) {
            let (x, y) = (Square::from_index(a).unwrap(), Square::from_index(b).unwrap());
            prop_assert_eq!(
                rook_attacks(x, Bitboard::EMPTY).contains(y),
                rook_attacks(y, Bitboard::EMPTY).contains(x)
            );
        }
    }
}
