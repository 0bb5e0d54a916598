pub mod board;
pub mod cli;
pub mod engine;
pub mod perft;
pub mod sync;
pub mod tt;
pub mod uci;
pub(crate) mod zobrist;

pub use board::{Color, Move, Piece, Position, Square};
pub use engine::{EngineConfig, EngineError, EngineSession};
pub use sync::CalculationController;
pub use tt::TranspositionTable;
