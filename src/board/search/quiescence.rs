use super::{SearchOutcome, Searcher};
use crate::board::{MoveList, Position};
use crate::tt::GameResult;

impl Searcher<'_> {
    /// Capture-only search below the nominal horizon.
    ///
    /// With no captures available the static evaluation is returned. Otherwise
    /// the evaluation is taken as a stand-pat score: it can fail high on its
    /// own and it raises alpha before any capture is tried.
    pub(super) fn quiesce(
        &self,
        pos: &Position,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        moves: &MoveList,
        capture_count: usize,
    ) -> SearchOutcome {
        let stand_pat = self.evaluator.evaluate(pos);
        if capture_count == 0 || stand_pat >= beta {
            return SearchOutcome::leaf(stand_pat, GameResult::None);
        }
        alpha = alpha.max(stand_pat);

        let captures = moves.iter().copied().filter(|mv| mv.is_capture());
        self.search_moves(
            pos,
            depth,
            alpha,
            beta,
            captures,
            SearchOutcome::leaf(stand_pat, GameResult::None),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::INFINITE_SCORE;
    use super::*;
    use crate::board::MaterialEvaluator;
    use crate::sync::CalculationController;
    use crate::tt::TranspositionTable;

    fn quiet_score(fen: &str) -> i32 {
        let tt = TranspositionTable::disabled();
        let controller = CalculationController::new();
        let searcher = Searcher::new(&tt, &controller, &MaterialEvaluator);
        let pos = Position::from_fen(fen).unwrap();
        searcher.search(&pos, 0, -INFINITE_SCORE, INFINITE_SCORE).score
    }

    #[test]
    fn quiet_position_returns_evaluation() {
        assert_eq!(quiet_score("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"), 100);
    }

    #[test]
    fn takes_free_material() {
        // Rook takes an undefended knight
        assert_eq!(quiet_score("4k3/8/8/8/8/2n5/8/2R1K3 w - - 0 1"), 500);
    }

    #[test]
    fn declines_losing_capture() {
        // Queen takes a defended pawn only to be recaptured: stand pat instead
        assert_eq!(quiet_score("4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1"), 700);
    }

    #[test]
    fn stand_pat_fails_high() {
        let tt = TranspositionTable::disabled();
        let controller = CalculationController::new();
        let searcher = Searcher::new(&tt, &controller, &MaterialEvaluator);
        let pos = Position::from_fen("4k3/8/8/3p4/8/8/8/3QK3 w - - 0 1").unwrap();
        let out = searcher.search(&pos, 0, -INFINITE_SCORE, 500);
        assert_eq!(out.score, 800);
        assert_eq!(out.nodes, 1);
        assert!(out.pv.is_empty());
    }
}
