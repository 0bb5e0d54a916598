use crate::zobrist::ZOBRIST;

use super::{Bitboard, CastlingRights, Color, Piece, Square};

/// A complete game state: bitboards, side to move, rights, counters and hash.
///
/// Positions are small `Copy` values. Applying a move produces a new position,
/// so every search frame owns its own copy and nothing is ever undone in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) pieces: [Bitboard; 6],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
}

impl Position {
    /// The standard initial position
    #[must_use]
    pub fn new() -> Self {
        let mut pos = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, &piece) in back_rank.iter().enumerate() {
            pos.put_piece(Color::White, piece, Square::from_index(file));
            pos.put_piece(Color::White, Piece::Pawn, Square::from_index(8 + file));
            pos.put_piece(Color::Black, Piece::Pawn, Square::from_index(48 + file));
            pos.put_piece(Color::Black, piece, Square::from_index(56 + file));
        }
        pos.castling = CastlingRights::all();
        pos.hash = pos.compute_hash();
        pos
    }

    /// A board with no pieces, White to move and no rights
    #[must_use]
    pub(crate) fn empty() -> Self {
        Position {
            pieces: [Bitboard::EMPTY; 6],
            occupied: [Bitboard::EMPTY; 2],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Incrementally maintained Zobrist hash
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// All squares holding a piece of `color`
    #[inline]
    #[must_use]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn all_occupied(&self) -> Bitboard {
        self.occupied[0] | self.occupied[1]
    }

    /// All squares holding `piece`, both colors
    #[inline]
    #[must_use]
    pub fn piece_set(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[piece.index()] & self.occupied[color.index()]
    }

    /// Piece type standing on `sq`, if any
    #[must_use]
    pub fn piece_type_at(&self, sq: Square) -> Option<Piece> {
        Piece::ALL
            .into_iter()
            .find(|p| self.pieces[p.index()].contains(sq))
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let piece = self.piece_type_at(sq)?;
        let color = if self.occupied[Color::White.index()].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        Some((color, piece))
    }

    /// Square of `color`'s king. Positions always hold exactly one king per side.
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces_of(color, Piece::King).lsb()
    }

    pub(crate) fn put_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        self.pieces[piece.index()].set(sq);
        self.occupied[color.index()].set(sq);
    }

    pub(crate) fn remove_piece(&mut self, color: Color, piece: Piece, sq: Square) {
        self.pieces[piece.index()].clear(sq);
        self.occupied[color.index()].clear(sq);
    }

    /// Hash recomputed from scratch over pieces, rights, en passant square and side to move
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let keys = &*ZOBRIST;
        let mut hash = 0u64;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces_of(color, piece).iter() {
                    hash ^= keys.piece(color, piece, sq);
                }
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= keys.black_to_move();
        }
        hash ^= keys.castling(self.castling);
        hash ^= keys.en_passant(self.en_passant);
        hash
    }

    /// Structural invariants: disjoint side sets, matching unions, consistent hash
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let white = self.occupied[Color::White.index()];
        let black = self.occupied[Color::Black.index()];
        let piece_union = self
            .pieces
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
        let piece_total: u32 = self.pieces.iter().map(|bb| bb.popcount()).sum();

        (white & black).is_empty()
            && (white | black) == piece_union
            && piece_total == piece_union.popcount()
            && self.hash == self.compute_hash()
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_layout() {
        let pos = Position::new();
        assert_eq!(pos.all_occupied().popcount(), 32);
        assert_eq!(pos.king_square(Color::White), Square::E1);
        assert_eq!(pos.king_square(Color::Black), Square::E8);
        assert_eq!(pos.piece_at(Square::D1), Some((Color::White, Piece::Queen)));
        assert_eq!(pos.piece_at(Square::G8), Some((Color::Black, Piece::Knight)));
        assert!(pos.is_consistent());
    }

    #[test]
    fn hash_depends_on_side_to_move() {
        let pos = Position::new();
        let mut flipped = pos;
        flipped.side_to_move = Color::Black;
        assert_ne!(pos.compute_hash(), flipped.compute_hash());
    }
}
