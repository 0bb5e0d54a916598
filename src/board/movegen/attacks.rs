use super::super::attack_tables::{
    king_attacks, knight_attacks, nearest_blocker, pawn_attacks, BISHOP_DIRS, ROOK_DIRS,
};
use super::super::{Bitboard, Color, Move, Piece, Position, Square};

impl Position {
    /// Returns true if `sq` is attacked by any piece of color `by`.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.attacked_with(sq, by, self.occupied[by.index()], self.all_occupied())
    }

    /// Returns true if the side to move is in check.
    #[must_use]
    pub fn in_check(&self) -> bool {
        let us = self.side_to_move;
        self.is_square_attacked(self.king_square(us), us.opponent())
    }

    /// Attack test against hypothetical occupancy: `attackers` are the squares
    /// still held by `by`, `occupied` is everything that blocks sliders.
    pub(crate) fn attacked_with(
        &self,
        sq: Square,
        by: Color,
        attackers: Bitboard,
        occupied: Bitboard,
    ) -> bool {
        let pawns = self.pieces[Piece::Pawn.index()] & attackers;
        if !(pawn_attacks(by.opponent(), sq) & pawns).is_empty() {
            return true;
        }
        let knights = self.pieces[Piece::Knight.index()] & attackers;
        if !(knight_attacks(sq) & knights).is_empty() {
            return true;
        }
        let kings = self.pieces[Piece::King.index()] & attackers;
        if !(king_attacks(sq) & kings).is_empty() {
            return true;
        }

        let queens = self.pieces[Piece::Queen.index()];
        let straight = (self.pieces[Piece::Rook.index()] | queens) & attackers;
        if !straight.is_empty() {
            for dir in ROOK_DIRS {
                if let Some(blocker) = nearest_blocker(dir, sq, occupied) {
                    if straight.contains(blocker) {
                        return true;
                    }
                }
            }
        }
        let diagonal = (self.pieces[Piece::Bishop.index()] | queens) & attackers;
        if !diagonal.is_empty() {
            for dir in BISHOP_DIRS {
                if let Some(blocker) = nearest_blocker(dir, sq, occupied) {
                    if diagonal.contains(blocker) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Whether a pseudo-legal move leaves the mover's king safe.
    ///
    /// Only scratch copies of the two occupancy sets are updated; piece sets
    /// are read through them, so a captured piece drops out with its square.
    pub(crate) fn leaves_king_safe(&self, mv: Move) -> bool {
        let us = self.side_to_move;
        let them = us.opponent();
        let from = Bitboard::from_square(mv.from());
        let to = Bitboard::from_square(mv.to());

        let own = (self.occupied[us.index()] & !from) | to;
        let mut theirs = self.occupied[them.index()];
        if mv.is_en_passant() {
            theirs.clear(Square::from_index(mv.from().rank() * 8 + mv.to().file()));
        } else {
            theirs &= !to;
        }

        let king = if mv.piece() == Piece::King {
            mv.to()
        } else {
            self.king_square(us)
        };
        !self.attacked_with(king, them, theirs, own | theirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn attacks_in_initial_position() {
        let pos = Position::new();
        assert!(pos.is_square_attacked(sq("f3"), Color::White));
        assert!(pos.is_square_attacked(sq("d6"), Color::Black));
        assert!(!pos.is_square_attacked(sq("e4"), Color::White));
        assert!(!pos.in_check());
    }

    #[test]
    fn sliders_are_blocked() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/4P3/4R1K1 w - - 0 1").unwrap();
        assert!(pos.is_square_attacked(sq("e2"), Color::White));
        assert!(!pos.is_square_attacked(sq("e3"), Color::White));
        assert!(pos.is_square_attacked(sq("a1"), Color::White));
    }

    #[test]
    fn detects_check() {
        let pos = Position::from_fen("4k3/8/8/b7/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(pos.in_check());
    }
}
