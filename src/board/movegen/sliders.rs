use super::super::attack_tables::{ray_attacks, BISHOP_DIRS, ROOK_DIRS};
use super::super::{Bitboard, Piece, Position, Square};
use super::MoveSink;

impl Position {
    /// Bishop, rook and queen moves. Each ray stops at its nearest blocker,
    /// which is a capture only when it belongs to the opponent.
    pub(crate) fn generate_slider_moves(&self, sink: &mut MoveSink) {
        let us = self.side_to_move;
        let own = self.occupied[us.index()];
        let occupied = self.all_occupied();

        for piece in [Piece::Bishop, Piece::Rook, Piece::Queen] {
            for from in self.pieces_of(us, piece).iter() {
                for to in (slider_targets(piece, from, occupied) & !own).iter() {
                    sink.push(self, self.create_move(from, to, piece));
                }
            }
        }
    }
}

fn slider_targets(piece: Piece, from: Square, occupied: Bitboard) -> Bitboard {
    let mut targets = Bitboard::EMPTY;
    if matches!(piece, Piece::Rook | Piece::Queen) {
        for dir in ROOK_DIRS {
            targets |= ray_attacks(dir, from, occupied);
        }
    }
    if matches!(piece, Piece::Bishop | Piece::Queen) {
        for dir in BISHOP_DIRS {
            targets |= ray_attacks(dir, from, occupied);
        }
    }
    targets
}
