use std::iter;

use super::constants::{INFINITE_SCORE, MATE_SCORE};
use super::move_order::promote_hash_move;
use super::{SearchOutcome, Searcher};
use crate::board::{Move, Position};
use crate::tt::{BoundType, GameResult};

impl Searcher<'_> {
    /// Fail-soft negamax search of `pos` to `depth` plies inside `(alpha, beta)`.
    ///
    /// Depth zero and below switch to quiescence. A position without legal
    /// moves scores `-MATE_SCORE` when in check and zero otherwise.
    pub fn search(&self, pos: &Position, depth: i32, mut alpha: i32, beta: i32) -> SearchOutcome {
        let hash = pos.hash();
        let mut hash_move = None;

        if let Some(entry) = self.tt.probe(hash) {
            hash_move = entry.best_move;
            if entry.depth >= depth {
                let cutoff = match entry.bound_type {
                    BoundType::Exact => true,
                    BoundType::LowerBound => {
                        alpha = alpha.max(entry.score);
                        alpha >= beta
                    }
                    BoundType::UpperBound => false,
                };
                if cutoff {
                    return SearchOutcome {
                        score: entry.score,
                        nodes: 1,
                        result: entry.result,
                        pv: entry.best_move.into_iter().collect(),
                    };
                }
            }
        }

        let (mut moves, capture_count) = pos.generate();
        if moves.is_empty() {
            return if pos.in_check() {
                SearchOutcome::leaf(-MATE_SCORE, GameResult::Checkmate)
            } else {
                SearchOutcome::leaf(0, GameResult::Stalemate)
            };
        }

        if let Some(mv) = hash_move {
            promote_hash_move(moves.as_mut_slice(), mv);
        }

        if depth <= 0 {
            return self.quiesce(pos, depth, alpha, beta, &moves, capture_count);
        }

        let baseline = SearchOutcome {
            score: -INFINITE_SCORE,
            nodes: 1,
            result: GameResult::None,
            pv: Vec::new(),
        };
        self.search_moves(pos, depth, alpha, beta, moves.iter().copied(), baseline)
    }

    /// Search each move in turn, starting from `best`, and store the outcome.
    ///
    /// The loop ends on a beta cutoff or when the controller asks to stop. A
    /// node whose loop or any child's loop was cancelled is not stored.
    pub(super) fn search_moves(
        &self,
        pos: &Position,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        moves: impl Iterator<Item = Move>,
        mut best: SearchOutcome,
    ) -> SearchOutcome {
        let mut raised_alpha = false;
        let mut cancelled = false;

        for mv in moves {
            let child = pos.apply_move(mv);
            let interrupted_before = self.interrupted.get();
            let reply = self.search(&child, depth - 1, -beta, -alpha);
            best.nodes += reply.nodes;
            // A reply cut short below this node only bounds a partial subtree
            let child_cancelled = !interrupted_before && self.interrupted.get();

            let score = -reply.score;
            if score > best.score {
                best.score = score;
                best.result = reply.result;
                best.pv = iter::once(mv).chain(reply.pv).collect();
            }
            if score > alpha {
                alpha = score;
                raised_alpha = true;
            }
            if child_cancelled {
                cancelled = true;
                break;
            }
            if alpha >= beta {
                break;
            }
            if self.controller.need_to_stop() {
                cancelled = true;
                break;
            }
        }

        if cancelled {
            self.interrupted.set(true);
            return best;
        }

        let (bound, best_move) = if !raised_alpha {
            (BoundType::UpperBound, None)
        } else if alpha >= beta {
            (BoundType::LowerBound, best.pv.first().copied())
        } else {
            (BoundType::Exact, best.pv.first().copied())
        };
        self.tt
            .store(pos.hash(), depth, best_move, best.score, bound, best.result);
        best
    }
}
