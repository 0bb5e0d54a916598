//! Negamax alpha-beta search with iterative deepening.
//!
//! Features:
//! - Fail-soft alpha-beta over copy-made positions
//! - Quiescence search over captures with stand-pat
//! - Transposition table cutoffs and hash move ordering
//! - Cooperative cancellation through a [`CalculationController`]
//!
//! Scores are centipawns from the side to move's point of view. A side that
//! is checkmated scores `-MATE_SCORE` regardless of distance to mate.

mod alphabeta;
mod constants;
mod iterative;
mod move_order;
mod quiescence;

use std::cell::Cell;
use std::sync::Arc;

use crate::sync::CalculationController;
use crate::tt::{GameResult, TranspositionTable};

use super::{Evaluator, Move};

pub use constants::{DEFAULT_DEPTH, INFINITE_SCORE, MATE_SCORE, MAX_DEPTH};

/// Result of searching one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub score: i32,
    /// Nodes visited below and including this one
    pub nodes: u64,
    /// How the principal variation ends
    pub result: GameResult,
    /// Principal variation starting with this node's best move
    pub pv: Vec<Move>,
}

impl SearchOutcome {
    fn leaf(score: i32, result: GameResult) -> Self {
        SearchOutcome {
            score,
            nodes: 1,
            result,
            pv: Vec::new(),
        }
    }
}

/// How deep or how long a search may run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub depth: Option<u32>,
    pub movetime_ms: Option<u64>,
    pub infinite: bool,
}

impl SearchLimits {
    #[must_use]
    pub fn depth(depth: u32) -> Self {
        SearchLimits {
            depth: Some(depth),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn movetime(ms: u64) -> Self {
        SearchLimits {
            movetime_ms: Some(ms),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn infinite() -> Self {
        SearchLimits {
            infinite: true,
            ..Self::default()
        }
    }

    /// Target depth for these limits.
    ///
    /// Infinite searches run to `max_depth` unless stopped. Otherwise an
    /// explicit depth is used, then `max_depth` for a time-limited search,
    /// then `default_depth`.
    #[must_use]
    pub fn target_depth(&self, default_depth: u32, max_depth: u32) -> u32 {
        if self.infinite {
            return max_depth;
        }
        match self.depth {
            Some(depth) => depth.clamp(1, max_depth),
            None if self.movetime_ms.is_some() => max_depth,
            None => default_depth,
        }
    }
}

/// Information about a completed iteration, reported to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchIterationInfo {
    pub depth: u32,
    pub score: i32,
    pub result: GameResult,
    pub nodes: u64,
    pub nps: u64,
    pub time_ms: u64,
    pub hashfull: u32,
    pub pv: Vec<Move>,
}

impl SearchIterationInfo {
    /// Moves until mate along the PV, negative when the side to move is mated.
    #[must_use]
    pub fn mate_in(&self) -> Option<i32> {
        if self.result != GameResult::Checkmate || self.score.abs() < MATE_SCORE {
            return None;
        }
        let moves = (self.pv.len() as i32 + 1) / 2;
        Some(if self.score > 0 { moves } else { -moves })
    }

    /// PV in coordinate notation, space separated
    #[must_use]
    pub fn pv_string(&self) -> String {
        self.pv
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Callback type for iteration info.
pub type SearchInfoCallback = Arc<dyn Fn(&SearchIterationInfo) + Send + Sync>;

/// Final result of an iterative deepening run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    pub score: i32,
    /// Deepest completed iteration
    pub depth: u32,
    /// Nodes over every iteration
    pub nodes: u64,
    pub result: GameResult,
    pub pv: Vec<Move>,
}

/// Borrowed search environment: table, controller and evaluator.
///
/// A searcher belongs to one thread; concurrent searches each build their own
/// over the same shared table and controller.
pub struct Searcher<'a> {
    tt: &'a TranspositionTable,
    controller: &'a CalculationController,
    evaluator: &'a dyn Evaluator,
    interrupted: Cell<bool>,
}

impl<'a> Searcher<'a> {
    #[must_use]
    pub fn new(
        tt: &'a TranspositionTable,
        controller: &'a CalculationController,
        evaluator: &'a dyn Evaluator,
    ) -> Self {
        Searcher {
            tt,
            controller,
            evaluator,
            interrupted: Cell::new(false),
        }
    }

    /// True if a move loop was cut short by cancellation since the last reset
    #[must_use]
    pub fn was_interrupted(&self) -> bool {
        self.interrupted.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_resolve_to_depth() {
        assert_eq!(SearchLimits::default().target_depth(8, 100), 8);
        assert_eq!(SearchLimits::depth(5).target_depth(8, 100), 5);
        assert_eq!(SearchLimits::depth(0).target_depth(8, 100), 1);
        assert_eq!(SearchLimits::infinite().target_depth(8, 100), 100);
        assert_eq!(SearchLimits::movetime(500).target_depth(8, 100), 100);

        let both = SearchLimits {
            depth: Some(3),
            movetime_ms: Some(500),
            infinite: false,
        };
        assert_eq!(both.target_depth(8, 100), 3);

        let unbounded = SearchLimits {
            depth: Some(3),
            movetime_ms: None,
            infinite: true,
        };
        assert_eq!(unbounded.target_depth(8, 100), 100);
    }

    #[test]
    fn mate_distance_from_pv() {
        let mut info = SearchIterationInfo {
            depth: 3,
            score: MATE_SCORE,
            result: GameResult::Checkmate,
            nodes: 10,
            nps: 0,
            time_ms: 0,
            hashfull: 0,
            pv: vec![Move::null()],
        };
        assert_eq!(info.mate_in(), Some(1));

        info.pv = vec![Move::null(); 3];
        assert_eq!(info.mate_in(), Some(2));

        info.score = -MATE_SCORE;
        info.pv = vec![Move::null(); 2];
        assert_eq!(info.mate_in(), Some(-1));

        info.result = GameResult::None;
        assert_eq!(info.mate_in(), None);
    }
}
