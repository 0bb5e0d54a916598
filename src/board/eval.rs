//! Static evaluation.
//!
//! Search calls an [`Evaluator`] at quiescent leaves and never looks inside it,
//! so any scoring function can be plugged into a session.

use super::{Color, Piece, Position};

/// Scores a position in centipawns from the side to move's point of view.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, pos: &Position) -> i32;
}

/// Counts material only: pawn 100, knight 300, bishop 300, rook 500, queen 900.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, pos: &Position) -> i32 {
        let us = pos.side_to_move();
        let them = us.opponent();
        Piece::ALL
            .iter()
            .map(|&piece| {
                let diff = pos.pieces_of(us, piece).popcount() as i32
                    - pos.pieces_of(them, piece).popcount() as i32;
                diff * piece.value()
            })
            .sum()
    }
}

impl<F> Evaluator for F
where
    F: Fn(&Position) -> i32 + Send + Sync,
{
    fn evaluate(&self, pos: &Position) -> i32 {
        self(pos)
    }
}

/// Material balance from White's point of view
#[must_use]
pub fn material_balance(pos: &Position) -> i32 {
    let score = MaterialEvaluator.evaluate(pos);
    match pos.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_is_balanced() {
        assert_eq!(MaterialEvaluator.evaluate(&Position::new()), 0);
    }

    #[test]
    fn score_is_relative_to_side_to_move() {
        let white = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        let black = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").unwrap();
        assert_eq!(MaterialEvaluator.evaluate(&white), 900);
        assert_eq!(MaterialEvaluator.evaluate(&black), -900);
        assert_eq!(material_balance(&black), 900);
    }

    #[test]
    fn closures_are_evaluators() {
        let flat = |_: &Position| 7;
        assert_eq!(flat.evaluate(&Position::new()), 7);
    }
}
