//! Search constants.

/// Score of a checkmate against the side to move, negated. Not adjusted by ply.
pub const MATE_SCORE: i32 = 1_000_000;

/// Bound used for the full root window. Strictly outside every reachable score.
pub const INFINITE_SCORE: i32 = 2 * MATE_SCORE;

/// Depth searched when no limit is given
pub const DEFAULT_DEPTH: u32 = 8;

/// Depth cap for infinite and time-limited searches
pub const MAX_DEPTH: u32 = 100;
