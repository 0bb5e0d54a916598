use std::time::Instant;

use super::constants::INFINITE_SCORE;
use super::{SearchInfoCallback, SearchIterationInfo, SearchReport, Searcher};
use crate::board::Position;
use crate::tt::GameResult;

impl Searcher<'_> {
    /// Search depths 1 through `target_depth`, reporting each completed depth.
    ///
    /// The searcher registers with its controller for the whole run. When a
    /// depth is cancelled part way its result is discarded and the previous
    /// depth stands, except at depth 1 where the partial result is kept so a
    /// move is always available.
    pub fn iterative_deepening(
        &self,
        pos: &Position,
        target_depth: u32,
        on_info: Option<&SearchInfoCallback>,
    ) -> SearchReport {
        let _calculating = self.controller.begin();
        let start = Instant::now();
        let mut report = SearchReport::default();
        let mut total_nodes = 0u64;

        if pos.legal_moves().is_empty() {
            report.result = if pos.in_check() {
                GameResult::Checkmate
            } else {
                GameResult::Stalemate
            };
            report.score = self.search(pos, 0, -INFINITE_SCORE, INFINITE_SCORE).score;
            return report;
        }

        for depth in 1..=target_depth.max(1) {
            self.interrupted.set(false);
            let outcome = self.search(pos, depth as i32, -INFINITE_SCORE, INFINITE_SCORE);
            total_nodes += outcome.nodes;

            let cancelled = self.was_interrupted();
            if cancelled && depth > 1 {
                log::debug!("depth {depth} cancelled, keeping depth {}", report.depth);
                break;
            }

            let elapsed_ms = start.elapsed().as_millis() as u64;
            let info = SearchIterationInfo {
                depth,
                score: outcome.score,
                result: outcome.result,
                nodes: total_nodes,
                nps: total_nodes * 1000 / elapsed_ms.max(1),
                time_ms: elapsed_ms,
                hashfull: self.tt.hashfull_per_mille(),
                pv: outcome.pv.clone(),
            };
            log::debug!(
                "depth {} score {} nodes {} pv {}",
                depth,
                info.score,
                info.nodes,
                info.pv_string()
            );
            if let Some(callback) = on_info {
                callback(&info);
            }

            report = SearchReport {
                best_move: outcome.pv.first().copied(),
                score: outcome.score,
                depth,
                nodes: total_nodes,
                result: outcome.result,
                pv: outcome.pv,
            };

            if cancelled || self.controller.need_to_stop() {
                break;
            }
        }

        report.nodes = total_nodes;
        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::board::MaterialEvaluator;
    use crate::sync::CalculationController;
    use crate::tt::TranspositionTable;

    #[test]
    fn reports_every_depth_in_order() {
        let tt = TranspositionTable::new(1);
        let controller = CalculationController::new();
        let searcher = Searcher::new(&tt, &controller, &MaterialEvaluator);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let callback: SearchInfoCallback = {
            let seen = Arc::clone(&seen);
            Arc::new(move |info: &SearchIterationInfo| seen.lock().unwrap().push(info.depth))
        };

        let report = searcher.iterative_deepening(&Position::new(), 3, Some(&callback));
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
        assert_eq!(report.depth, 3);
        assert!(report.best_move.is_some());
        assert!(!controller.is_calculating());
    }

    #[test]
    fn nodes_accumulate_across_depths() {
        let tt = TranspositionTable::new(1);
        let controller = CalculationController::new();
        let searcher = Searcher::new(&tt, &controller, &MaterialEvaluator);
        let last_nodes = Arc::new(Mutex::new(Vec::new()));
        let callback: SearchInfoCallback = {
            let last_nodes = Arc::clone(&last_nodes);
            Arc::new(move |info: &SearchIterationInfo| last_nodes.lock().unwrap().push(info.nodes))
        };

        let report = searcher.iterative_deepening(&Position::new(), 3, Some(&callback));
        let nodes = last_nodes.lock().unwrap().clone();
        assert!(nodes.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(report.nodes, *nodes.last().unwrap());
    }

    #[test]
    fn mated_root_has_no_move() {
        let tt = TranspositionTable::new(1);
        let controller = CalculationController::new();
        let searcher = Searcher::new(&tt, &controller, &MaterialEvaluator);
        let pos = Position::from_fen("4Q1k1/5ppp/8/8/8/8/8/7K b - - 1 1").unwrap();
        let report = searcher.iterative_deepening(&pos, 4, None);
        assert_eq!(report.best_move, None);
        assert_eq!(report.result, GameResult::Checkmate);
        assert_eq!(report.score, -super::super::MATE_SCORE);
    }

    #[test]
    fn time_budget_still_yields_a_move() {
        let tt = TranspositionTable::new(1);
        let controller = CalculationController::new();
        controller.set_time_budget(Some(50));
        let searcher = Searcher::new(&tt, &controller, &MaterialEvaluator);
        let report = searcher.iterative_deepening(&Position::new(), 100, None);
        assert!(report.best_move.is_some());
        assert!(report.depth < 100);
        assert!(!controller.is_calculating());
    }
}
