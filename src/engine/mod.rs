//! Engine session and the protocol plumbing around it.
//!
//! The session holds the state a protocol front end drives: the live
//! position, the shared transposition table and calculation controller, and
//! the background search thread.

mod config;
mod error;
mod output;
mod protocol;
mod session;

pub use config::{EngineConfig, MAX_HASH_MB};
pub use error::EngineError;
pub use output::{Output, SharedBuffer};
pub use protocol::{protocol_for, run_command_loop, split_command, Control, Protocol, ProtocolKind};
pub use session::EngineSession;
