//! Chess board representation and game logic.
//!
//! Bitboard positions with copy-make move application, legal move
//! generation, static evaluation and the alpha-beta search built on them.
//!
//! # Example
//! ```
//! use bitboard_engine::board::Position;
//!
//! let pos = Position::new();
//! let moves = pos.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod apply;
pub(crate) mod attack_tables;
mod error;
mod eval;
mod fen;
mod movegen;
pub mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, FenField, MoveParseError, SquareError};
pub use eval::{material_balance, Evaluator, MaterialEvaluator};
pub use fen::START_FEN;
pub use state::Position;
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, DisplayMove, Move, MoveList, MoveListIntoIter,
    Piece, Square,
};

pub use search::{
    SearchInfoCallback, SearchIterationInfo, SearchLimits, SearchOutcome, SearchReport, Searcher,
    INFINITE_SCORE, MATE_SCORE,
};

pub(crate) use types::PROMOTION_PIECES;
