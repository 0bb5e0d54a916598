//! Copy-make move application.

use crate::zobrist::ZOBRIST;

use super::{Color, Move, Piece, Position, Square};

impl Position {
    /// Return the position reached by playing `mv`.
    ///
    /// `mv` must be a legal move generated from this position; it is not
    /// re-validated. The hash is updated incrementally and always equals
    /// [`Position::compute_hash`] of the result.
    #[must_use]
    pub fn apply_move(&self, mv: Move) -> Position {
        let keys = &*ZOBRIST;
        let mut next = *self;
        let us = self.side_to_move;
        let them = us.opponent();
        let from = mv.from();
        let to = mv.to();
        let piece = mv.piece();

        next.hash ^= keys.castling(self.castling) ^ keys.en_passant(self.en_passant);

        if let Some(captured) = mv.captured() {
            let target = if mv.is_en_passant() {
                Square::from_index(from.rank() * 8 + to.file())
            } else {
                to
            };
            next.remove_piece(them, captured, target);
            next.hash ^= keys.piece(them, captured, target);
            if captured == Piece::Rook {
                next.castling.remove_for_rook_square(target);
            }
        }

        next.remove_piece(us, piece, from);
        next.hash ^= keys.piece(us, piece, from);
        let placed = mv.promotion().unwrap_or(piece);
        next.put_piece(us, placed, to);
        next.hash ^= keys.piece(us, placed, to);

        if mv.is_castling() {
            let rank = us.back_rank() * 8;
            let (rook_from, rook_to) = if mv.is_castle_kingside() {
                (Square::from_index(rank + 7), Square::from_index(rank + 5))
            } else {
                (Square::from_index(rank), Square::from_index(rank + 3))
            };
            next.remove_piece(us, Piece::Rook, rook_from);
            next.put_piece(us, Piece::Rook, rook_to);
            next.hash ^= keys.piece(us, Piece::Rook, rook_from);
            next.hash ^= keys.piece(us, Piece::Rook, rook_to);
        }

        match piece {
            Piece::King => next.castling.remove_color(us),
            Piece::Rook => next.castling.remove_for_rook_square(from),
            _ => {}
        }

        next.en_passant = if mv.is_double_pawn_push() {
            Some(Square::from_index((from.index() + to.index()) / 2))
        } else {
            None
        };

        if piece == Piece::Pawn || mv.is_capture() {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock += 1;
        }
        if us == Color::Black {
            next.fullmove_number += 1;
        }

        next.side_to_move = them;
        next.hash ^= keys.black_to_move();
        next.hash ^= keys.castling(next.castling) ^ keys.en_passant(next.en_passant);
        next
    }

    /// Parse a coordinate move and apply it. The position is left untouched on error.
    pub fn make_move(&mut self, coords: &str) -> Result<Move, super::MoveParseError> {
        let mv = self.parse_move(coords)?;
        *self = self.apply_move(mv);
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(pos: &Position, coords: &str) -> Position {
        pos.apply_move(pos.parse_move(coords).unwrap())
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let pos = play(&Position::new(), "e2e4");
        assert_eq!(pos.en_passant(), Some("e3".parse().unwrap()));
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.fullmove_number(), 1);
        assert_eq!(pos.hash(), pos.compute_hash());

        let pos = play(&pos, "g8f6");
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.fullmove_number(), 2);
        assert_eq!(pos.halfmove_clock(), 1);
    }

    #[test]
    fn en_passant_removes_pawn_behind_target() {
        let pos =
            Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        let next = play(&pos, "e5f6");
        assert_eq!(next.piece_at("f5".parse().unwrap()), None);
        assert_eq!(
            next.piece_at("f6".parse().unwrap()),
            Some((Color::White, Piece::Pawn))
        );
        assert_eq!(next.halfmove_clock(), 0);
        assert!(next.is_consistent());
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let next = play(&pos, "e1g1");
        assert_eq!(next.piece_at(Square::F1), Some((Color::White, Piece::Rook)));
        assert_eq!(next.piece_at(Square::H1), None);
        assert!(!next.castling_rights().has(Color::White, true));
        assert!(!next.castling_rights().has(Color::White, false));
        assert!(next.castling_rights().has(Color::Black, true));
        assert!(next.is_consistent());

        let next = play(&next, "e8c8");
        assert_eq!(next.piece_at(Square::D8), Some((Color::Black, Piece::Rook)));
        assert_eq!(next.castling_rights().as_u8(), 0);
        assert!(next.is_consistent());
    }

    #[test]
    fn rook_capture_on_corner_clears_right() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let next = play(&pos, "a1a8");
        assert!(!next.castling_rights().has(Color::Black, false));
        assert!(!next.castling_rights().has(Color::White, false));
        assert!(next.castling_rights().has(Color::Black, true));
        assert!(next.is_consistent());
    }

    #[test]
    fn promotion_replaces_pawn() {
        let pos = Position::from_fen("1n5k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let next = play(&pos, "a7b8r");
        assert_eq!(
            next.piece_at("b8".parse().unwrap()),
            Some((Color::White, Piece::Rook))
        );
        assert!(next.pieces_of(Color::White, Piece::Pawn).is_empty());
        assert!(next.is_consistent());
    }

    #[test]
    fn make_move_reports_illegal_coordinates() {
        let mut pos = Position::new();
        let before = pos;
        assert!(pos.make_move("e1e2").is_err());
        assert_eq!(pos, before);
        assert!(pos.make_move("e2e4").is_ok());
        assert_ne!(pos, before);
    }
}
