use thiserror::Error;

use crate::board::{FenError, MoveParseError};

/// Errors a session command can fail with. The session is unchanged after any of them.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid FEN: {0}")]
    Fen(#[from] FenError),
    #[error("invalid move: {0}")]
    Move(#[from] MoveParseError),
    #[error("{command}: {reason}")]
    InvalidArgument {
        command: &'static str,
        reason: String,
    },
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("could not start worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn invalid(command: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidArgument {
            command,
            reason: reason.into(),
        }
    }
}
