use super::super::attack_tables::{pawn_attacks, pawn_pushes};
use super::super::{Color, Move, Piece, Position, PROMOTION_PIECES};
use super::MoveSink;

impl Position {
    pub(crate) fn generate_pawn_moves(&self, sink: &mut MoveSink) {
        let us = self.side_to_move;
        let theirs = self.occupied[us.opponent().index()];
        let empty = !self.all_occupied();
        let (forward, last_rank): (i8, usize) = match us {
            Color::White => (8, 7),
            Color::Black => (-8, 0),
        };

        for from in self.pieces_of(us, Piece::Pawn).iter() {
            let single = from.offset(forward);
            if empty.contains(single) {
                let targets = pawn_pushes(us, from) & empty;
                for to in targets.iter() {
                    let mv = Move::new(from, to, Piece::Pawn, us);
                    if to == single {
                        self.push_pawn_move(sink, mv, last_rank);
                    } else {
                        sink.push(self, mv.with_double_push());
                    }
                }
            }

            let attacks = pawn_attacks(us, from);
            for to in (attacks & theirs).iter() {
                let mv = self.create_move(from, to, Piece::Pawn);
                self.push_pawn_move(sink, mv, last_rank);
            }

            if let Some(ep) = self.en_passant {
                if attacks.contains(ep) {
                    sink.push(self, Move::new(from, ep, Piece::Pawn, us).with_en_passant());
                }
            }
        }
    }

    /// Push a pawn move, expanding arrivals on the last rank into the four promotions
    fn push_pawn_move(&self, sink: &mut MoveSink, mv: Move, last_rank: usize) {
        if mv.to().rank() == last_rank {
            for piece in PROMOTION_PIECES {
                sink.push(self, mv.with_promotion(piece));
            }
        } else {
            sink.push(self, mv);
        }
    }
}
