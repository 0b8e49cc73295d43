//! Errors raised while decoding board layouts and compact position strings.

use crate::side::Side;

/// A board layout or compact position string could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The layout does not contain exactly seven `/` separators.
    #[error("expected 7 rank separators, found {found}")]
    SeparatorCount { found: usize },

    /// A character that is neither a piece letter, a digit 1-8 nor `/`.
    #[error("unrecognised layout character '{character}'")]
    UnknownCharacter { character: char },

    /// The layout places no pieces at all.
    #[error("layout contains no pieces")]
    NoPieces,

    /// A rank describes more or fewer than eight squares.
    #[error("rank {rank} describes {squares} squares, expected 8")]
    RankLength { rank: u8, squares: usize },

    /// A side does not have exactly one king.
    #[error("{side} has {count} kings, expected 1")]
    KingCount { side: Side, count: u32 },

    /// The compact string does not have seven `|`-separated fields.
    #[error("expected 7 position fields, found {found}")]
    FieldCount { found: usize },

    /// A compact-string field is not a valid value.
    #[error("invalid {field}: \"{value}\"")]
    InvalidField { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::LayoutError;
    use crate::side::Side;

    #[test]
    fn messages_name_the_fault() {
        assert_eq!(
            LayoutError::SeparatorCount { found: 6 }.to_string(),
            "expected 7 rank separators, found 6"
        );
        assert_eq!(
            LayoutError::KingCount { side: Side::Black, count: 0 }.to_string(),
            "Black has 0 kings, expected 1"
        );
        assert_eq!(
            LayoutError::InvalidField { field: "en passant square", value: "99".into() }.to_string(),
            "invalid en passant square: \"99\""
        );
    }
}
