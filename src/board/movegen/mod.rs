//! Legal move generation.
//!
//! Each piece type produces pseudo-legal candidates from the attack tables.
//! Candidates are filtered through [`Position::leaves_king_safe`] as they are
//! produced, and captures are collected separately so the final list holds
//! every capture ahead of every quiet move.

mod attacks;
mod kings;
mod knights;
mod pawns;
mod sliders;

use super::{Move, MoveList, Piece, Position, Square};

/// Legal moves split by kind while they are generated.
pub(crate) struct MoveSink {
    captures: MoveList,
    quiets: MoveList,
}

impl MoveSink {
    fn new() -> Self {
        MoveSink {
            captures: MoveList::new(),
            quiets: MoveList::new(),
        }
    }

    /// Keep `mv` if it does not leave the mover in check
    #[inline]
    pub(crate) fn push(&mut self, pos: &Position, mv: Move) {
        if !pos.leaves_king_safe(mv) {
            return;
        }
        if mv.is_capture() {
            self.captures.push(mv);
        } else {
            self.quiets.push(mv);
        }
    }

    /// Concatenate captures then quiets, returning the list and the capture count
    fn finish(self) -> (MoveList, usize) {
        let capture_count = self.captures.len();
        let mut moves = self.captures;
        for &mv in self.quiets.iter() {
            moves.push(mv);
        }
        (moves, capture_count)
    }
}

impl Position {
    /// Generate all strictly legal moves.
    ///
    /// Returns the moves and the number of captures. The first `capture_count`
    /// entries are exactly the capturing moves (en passant included); order
    /// within each group is unspecified.
    #[must_use]
    pub fn generate(&self) -> (MoveList, usize) {
        let mut sink = MoveSink::new();
        self.generate_pawn_moves(&mut sink);
        self.generate_knight_moves(&mut sink);
        self.generate_slider_moves(&mut sink);
        self.generate_king_moves(&mut sink);
        sink.finish()
    }

    /// Legal moves without the capture count
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        self.generate().0
    }

    /// Build a move from `from` to `to`, tagging the captured piece if the
    /// destination is occupied by the opponent.
    #[inline]
    pub(crate) fn create_move(&self, from: Square, to: Square, piece: Piece) -> Move {
        let mv = Move::new(from, to, piece, self.side_to_move);
        if self.occupied[self.side_to_move.opponent().index()].contains(to) {
            match self.piece_type_at(to) {
                Some(captured) => mv.with_capture(captured),
                None => mv,
            }
        } else {
            mv
        }
    }
}
