//! Board layout strings and the compact position format.
//!
//! A layout lists the ranks from 8 down to 1 separated by `/`. Upper-case
//! letters are White pieces, lower-case Black, digits are runs of empty
//! squares. The compact format appends the remaining position state:
//!
//! ```text
//! <layout>|<ep>|<wq>|<wk>|<bq>|<bk>|<white_to_move>
//! ```
//!
//! `<ep>` is the target square index or `255` for none; the flags are `0` or
//! `1` (any non-zero integer reads as set).

use std::fmt::Write as _;

use tracing::warn;

use crate::board::Board;
use crate::castle_rights::{CastleRights, CastleSide};
use crate::error::LayoutError;
use crate::piece_kind::PieceKind;
use crate::pieces::Pieces;
use crate::position::Position;
use crate::side::Side;
use crate::square::Square;

/// Layout of the standard starting position.
pub const STANDARD_LAYOUT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Compact-format marker for "no en passant target".
pub const NO_EN_PASSANT: u8 = 255;

/// Decode a layout into a piece-set.
///
/// Faults are reported in a fixed order: separator count, unknown
/// characters, rank lengths, an empty board, then king counts.
pub fn parse_layout(layout: &str) -> Result<Pieces, LayoutError> {
    let separators = layout.matches('/').count();
    if separators != 7 {
        return Err(LayoutError::SeparatorCount { found: separators });
    }
    if let Some(character) = layout
        .chars()
        .find(|&c| c != '/' && !matches!(c, '1'..='8') && PieceKind::from_letter(c).is_none())
    {
        return Err(LayoutError::UnknownCharacter { character });
    }

    let mut pieces = Pieces::empty();
    for (row, text) in layout.split('/').enumerate() {
        let rank = 7 - row as u8;
        let squares: usize = text
            .chars()
            .map(|c| c.to_digit(10).map_or(1, |run| run as usize))
            .sum();
        if squares != 8 {
            return Err(LayoutError::RankLength { rank: rank + 1, squares });
        }

        let mut file = 0u8;
        for c in text.chars() {
            match c.to_digit(10) {
                Some(run) => file += run as u8,
                None => {
                    if let Some((side, kind)) = PieceKind::from_letter(c) {
                        pieces.put(side, kind, Square::new(file, rank));
                    }
                    file += 1;
                }
            }
        }
    }

    if pieces.count() == 0 {
        return Err(LayoutError::NoPieces);
    }
    for side in Side::ALL {
        let count = pieces.of(side, PieceKind::King).count();
        if count != 1 {
            return Err(LayoutError::KingCount { side, count });
        }
    }
    Ok(pieces)
}

/// Encode a piece-set as a layout string.
pub fn encode_layout(pieces: &Pieces) -> String {
    let mut out = String::with_capacity(71);
    for rank in (0..8u8).rev() {
        let mut empty = 0;
        for file in 0..8u8 {
            match pieces.piece_at(Square::new(file, rank)) {
                Some((side, kind)) => {
                    if empty > 0 {
                        let _ = write!(out, "{empty}");
                        empty = 0;
                    }
                    out.push(kind.letter_for(side));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            let _ = write!(out, "{empty}");
        }
        if rank > 0 {
            out.push('/');
        }
    }
    out
}

impl Position {
    /// Encode the layout, en passant target, castling flags and side to move.
    pub fn to_compact(&self) -> String {
        let rights = self.castling();
        let flag = |side, castle| u8::from(rights.has(side, castle));
        format!(
            "{}|{}|{}|{}|{}|{}|{}",
            encode_layout(self.pieces()),
            self.en_passant().map_or(NO_EN_PASSANT, |sq| sq.index() as u8),
            flag(Side::White, CastleSide::Queenside),
            flag(Side::White, CastleSide::Kingside),
            flag(Side::Black, CastleSide::Queenside),
            flag(Side::Black, CastleSide::Kingside),
            u8::from(self.side_to_move() == Side::White),
        )
    }

    /// Decode a compact position string. Clocks start fresh.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] for a malformed layout, a wrong field count or
    /// a field that is not a valid integer.
    pub fn from_compact(text: &str) -> Result<Position, LayoutError> {
        let fields: Vec<&str> = text.trim().split('|').collect();
        let [layout, ep, wq, wk, bq, bk, white] = fields[..] else {
            return Err(LayoutError::FieldCount { found: fields.len() });
        };

        let pieces = parse_layout(layout)?;
        let en_passant = parse_en_passant(ep)?;
        let castling = CastleRights::from_flags(
            parse_flag("white kingside flag", wk)?,
            parse_flag("white queenside flag", wq)?,
            parse_flag("black kingside flag", bk)?,
            parse_flag("black queenside flag", bq)?,
        );
        let side = if parse_flag("side to move", white)? { Side::White } else { Side::Black };

        Ok(Position::from_board(Board::new(pieces, side, castling, en_passant)))
    }
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, LayoutError> {
    let invalid = || LayoutError::InvalidField { field: "en passant square", value: field.to_string() };
    let index: i32 = field.trim().parse().map_err(|_| invalid())?;
    match index {
        -1 | 255 => Ok(None),
        0..=63 => Ok(Square::from_index(index as u8)),
        _ => Err(invalid()),
    }
}

fn parse_flag(field: &'static str, value: &str) -> Result<bool, LayoutError> {
    value
        .trim()
        .parse::<i64>()
        .map(|n| n != 0)
        .map_err(|_| LayoutError::InvalidField { field, value: value.to_string() })
}

/// Decode a compact string, falling back to the standard start.
///
/// The fault is returned next to the fallback position so callers can
/// surface it.
pub fn decode_or_default(text: &str) -> (Position, Option<LayoutError>) {
    match Position::from_compact(text) {
        Ok(position) => (position, None),
        Err(err) => {
            warn!(%err, "malformed position, using the standard start");
            (Position::new(), Some(err))
        }
    }
}
