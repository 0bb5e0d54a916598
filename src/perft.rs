//! Perft: exhaustive leaf counting used to verify move generation.
//!
//! The parallel variants split at the root, one rayon task per legal move,
//! each counting its subtree on its own copy of the position.

use rayon::prelude::*;

use crate::board::{Move, Position};
use crate::sync::CalculationController;

impl Position {
    /// Number of leaf positions `depth` plies below this one.
    #[must_use]
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        moves
            .iter()
            .map(|&mv| self.apply_move(mv).perft(depth - 1))
            .sum()
    }

    /// Leaf counts below each legal move, in generation order.
    #[must_use]
    pub fn divide(&self, depth: u32) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        self.legal_moves()
            .iter()
            .map(|&mv| (mv, self.apply_move(mv).perft(depth - 1)))
            .collect()
    }
}

/// Perft that gives up with `None` as soon as `controller` asks to stop.
fn perft_until_stopped(pos: &Position, depth: u32, controller: &CalculationController) -> Option<u64> {
    if depth <= 1 {
        return Some(pos.perft(depth));
    }
    if controller.need_to_stop() {
        return None;
    }
    let mut nodes = 0;
    for &mv in pos.legal_moves().iter() {
        nodes += perft_until_stopped(&pos.apply_move(mv), depth - 1, controller)?;
    }
    Some(nodes)
}

/// Per-root-move counts computed in parallel. `None` if stopped.
pub fn parallel_divide(
    pos: &Position,
    depth: u32,
    controller: &CalculationController,
) -> Option<Vec<(Move, u64)>> {
    let _calculating = controller.begin();
    if depth == 0 {
        return Some(Vec::new());
    }
    let moves: Vec<Move> = pos.legal_moves().iter().copied().collect();
    let counts: Option<Vec<(Move, u64)>> = moves
        .par_iter()
        .map(|&mv| {
            perft_until_stopped(&pos.apply_move(mv), depth - 1, controller).map(|n| (mv, n))
        })
        .collect();

    // A task that finished before the stop still leaves the total incomplete
    if controller.need_to_stop() {
        return None;
    }
    counts
}

/// Leaf count computed in parallel across root moves. `None` if stopped.
pub fn parallel_perft(pos: &Position, depth: u32, controller: &CalculationController) -> Option<u64> {
    if depth == 0 {
        return Some(1);
    }
    parallel_divide(pos, depth, controller).map(|counts| counts.iter().map(|(_, n)| n).sum())
}
