//! Position fingerprints for repetition detection.

use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::piece_kind::PieceKind;
use crate::pieces::Pieces;
use crate::side::Side;
use crate::square::Square;

struct Keys {
    piece: [[[u64; 64]; PieceKind::COUNT]; Side::COUNT],
    black_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

/// SplitMix64 step. Returns (output, next state).
const fn splitmix(state: u64) -> (u64, u64) {
    let next = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = next;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (z ^ (z >> 31), next)
}

static KEYS: Keys = {
    let mut keys = Keys {
        piece: [[[0; 64]; PieceKind::COUNT]; Side::COUNT],
        black_to_move: 0,
        castling: [0; 16],
        en_passant_file: [0; 8],
    };
    let mut state = 0x726F_6F6B_6572_7921;
    let mut s = 0;
    while s < Side::COUNT {
        let mut k = 0;
        while k < PieceKind::COUNT {
            let mut sq = 0;
            while sq < 64 {
                let (key, next) = splitmix(state);
                keys.piece[s][k][sq] = key;
                state = next;
                sq += 1;
            }
            k += 1;
        }
        s += 1;
    }
    let (key, next) = splitmix(state);
    keys.black_to_move = key;
    state = next;
    let mut i = 0;
    while i < 16 {
        let (key, next) = splitmix(state);
        keys.castling[i] = key;
        state = next;
        i += 1;
    }
    let mut f = 0;
    while f < 8 {
        let (key, next) = splitmix(state);
        keys.en_passant_file[f] = key;
        state = next;
        f += 1;
    }
    keys
};

#[inline]
pub(crate) fn piece(side: Side, kind: PieceKind, sq: Square) -> u64 {
    KEYS.piece[side.index()][kind.index()][sq.index()]
}

#[inline]
pub(crate) fn black_to_move() -> u64 {
    KEYS.black_to_move
}

#[inline]
pub(crate) fn castling(rights: CastleRights) -> u64 {
    KEYS.castling[rights.bits() as usize]
}

#[inline]
pub(crate) fn en_passant(target: Option<Square>) -> u64 {
    target.map_or(0, |sq| KEYS.en_passant_file[sq.file() as usize])
}

/// Fingerprint contribution of the squares that differ between two placements.
pub(crate) fn placement_delta(before: &Pieces, after: &Pieces) -> u64 {
    let mut hash = 0;
    for side in Side::ALL {
        for kind in PieceKind::ALL {
            let changed: Bitboard = before.of(side, kind) ^ after.of(side, kind);
            for sq in changed {
                hash ^= piece(side, kind, sq);
            }
        }
    }
    hash
}

/// Fingerprint computed from every component of a position.
pub(crate) fn full(pieces: &Pieces, side: Side, rights: CastleRights, ep: Option<Square>) -> u64 {
    let mut hash = placement_delta(&Pieces::empty(), pieces) ^ castling(rights) ^ en_passant(ep);
    if side == Side::Black {
        hash ^= black_to_move();
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_distinct() {
        let mut all: Vec<u64> = KEYS.piece.iter().flatten().flatten().copied().collect();
        all.push(KEYS.black_to_move);
        all.extend(KEYS.castling);
        all.extend(KEYS.en_passant_file);
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total);
        assert!(!all.contains(&0));
    }

    #[test]
    fn delta_matches_full_difference() {
        let mut before = Pieces::empty();
        before.put(Side::White, PieceKind::Rook, Square::A1);
        before.put(Side::Black, PieceKind::King, Square::E8);
        let mut after = before;
        after.remove(Side::White, PieceKind::Rook, Square::A1);
        after.put(Side::White, PieceKind::Rook, Square::D1);
        let rights = CastleRights::NONE;
        assert_eq!(
            full(&before, Side::White, rights, None) ^ placement_delta(&before, &after),
            full(&after, Side::White, rights, None)
        );
    }
}
