use super::super::attack_tables::king_attacks;
use super::super::{Bitboard, Move, Piece, Position, Square};
use super::MoveSink;

impl Position {
    pub(crate) fn generate_king_moves(&self, sink: &mut MoveSink) {
        let us = self.side_to_move;
        let own = self.occupied[us.index()];
        let from = self.king_square(us);

        for to in (king_attacks(from) & !own).iter() {
            sink.push(self, self.create_move(from, to, Piece::King));
        }

        self.generate_castling(sink, from);
    }

    /// Castling needs the right, empty squares between king and rook, the rook
    /// on its corner, and no attack on the king's start, transit or destination.
    fn generate_castling(&self, sink: &mut MoveSink, king: Square) {
        let us = self.side_to_move;
        let them = us.opponent();
        let base = us.back_rank() * 8;
        if king.index() != base + 4 {
            return;
        }
        let occupied = self.all_occupied();
        let rooks = self.pieces_of(us, Piece::Rook);

        for kingside in [true, false] {
            if !self.castling.has(us, kingside) {
                continue;
            }
            let (rook, between, transit, dest) = if kingside {
                (base + 7, &[base + 5, base + 6][..], base + 5, base + 6)
            } else {
                (base, &[base + 1, base + 2, base + 3][..], base + 3, base + 2)
            };
            if !rooks.contains(Square::from_index(rook)) {
                continue;
            }
            let between_mask = between.iter().fold(Bitboard::EMPTY, |acc, &i| {
                acc | Bitboard::from_square(Square::from_index(i))
            });
            if !(between_mask & occupied).is_empty() {
                continue;
            }
            let safe = [king.index(), transit, dest]
                .iter()
                .all(|&i| !self.is_square_attacked(Square::from_index(i), them));
            if safe {
                let dest = Square::from_index(dest);
                sink.push(self, Move::new(king, dest, Piece::King, us).with_castle(kingside));
            }
        }
    }
}
