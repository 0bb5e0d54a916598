use super::super::attack_tables::knight_attacks;
use super::super::{Piece, Position};
use super::MoveSink;

impl Position {
    pub(crate) fn generate_knight_moves(&self, sink: &mut MoveSink) {
        let us = self.side_to_move;
        let own = self.occupied[us.index()];
        for from in self.pieces_of(us, Piece::Knight).iter() {
            for to in (knight_attacks(from) & !own).iter() {
                sink.push(self, self.create_move(from, to, Piece::Knight));
            }
        }
    }
}
