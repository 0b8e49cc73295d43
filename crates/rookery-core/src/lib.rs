//! Core chess types: bitboards, position model, legal move generation and
//! game-end classification.

mod bitboard;
mod board;
mod castle_rights;
mod chess_move;
mod classify;
mod error;
mod layout;
pub mod masks;
pub mod movegen;
mod perft;
mod piece_kind;
mod pieces;
mod position;
mod side;
mod square;
mod zobrist;

pub use bitboard::Bitboard;
pub use board::{Board, MoveEffects};
pub use castle_rights::{CastleRights, CastleSide, CastleSquares};
pub use chess_move::{Move, MoveFlag};
pub use classify::{DrawReason, FIFTY_MOVE_PLIES, GameStatus, classify, insufficient_material};
pub use error::LayoutError;
pub use layout::{NO_EN_PASSANT, STANDARD_LAYOUT, decode_or_default, encode_layout, parse_layout};
pub use movegen::{MoveList, destinations, generate_legal_moves, is_attacked, legal_moves};
pub use perft::{divide, perft};
pub use piece_kind::PieceKind;
pub use pieces::{Pieces, Placement};
pub use position::Position;
pub use side::Side;
pub use square::Square;
