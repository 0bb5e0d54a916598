//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece};
use super::square::Square;

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const PROMOTION_SHIFT: u32 = 15;
const CAPTURED_SHIFT: u32 = 18;
const SQUARE_MASK: u32 = 0x3F;
const PIECE_MASK: u32 = 0x7;

const FLAG_DOUBLE_PUSH: u32 = 1 << 21;
const FLAG_CASTLE_KINGSIDE: u32 = 1 << 22;
const FLAG_CASTLE_QUEENSIDE: u32 = 1 << 23;
const FLAG_EN_PASSANT: u32 = 1 << 24;
const FLAG_BLACK: u32 = 1 << 25;

/// Bit-packed 32-bit move.
///
/// Encoding:
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bits 12-14: moving piece
/// - bits 15-17: promotion piece + 1 (0 = none)
/// - bits 18-20: captured piece + 1 (0 = none)
/// - bit 21: pawn double push
/// - bit 22: kingside castle
/// - bit 23: queenside castle
/// - bit 24: en passant capture
/// - bit 25: side that moved (set for Black)
///
/// A move only has meaning relative to the position it was generated from.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    /// Create a null/empty move (used for initialization)
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Move(0)
    }

    /// Create a plain move of `piece` by `side`
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square, piece: Piece, side: Color) -> Self {
        let mut bits = ((from.index() as u32) << FROM_SHIFT)
            | ((to.index() as u32) << TO_SHIFT)
            | ((piece.index() as u32) << PIECE_SHIFT);
        if let Color::Black = side {
            bits |= FLAG_BLACK;
        }
        Move(bits)
    }

    /// Same move, now capturing `captured`
    #[inline]
    #[must_use]
    pub const fn with_capture(self, captured: Piece) -> Self {
        Move(self.0 | ((captured.index() as u32 + 1) << CAPTURED_SHIFT))
    }

    /// Same move, promoting to `piece`
    #[inline]
    #[must_use]
    pub const fn with_promotion(self, piece: Piece) -> Self {
        let cleared = self.0 & !(PIECE_MASK << PROMOTION_SHIFT);
        Move(cleared | ((piece.index() as u32 + 1) << PROMOTION_SHIFT))
    }

    #[inline]
    #[must_use]
    pub(crate) const fn with_double_push(self) -> Self {
        Move(self.0 | FLAG_DOUBLE_PUSH)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn with_en_passant(self) -> Self {
        Move(self.with_capture(Piece::Pawn).0 | FLAG_EN_PASSANT)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn with_castle(self, kingside: bool) -> Self {
        if kingside {
            Move(self.0 | FLAG_CASTLE_KINGSIDE)
        } else {
            Move(self.0 | FLAG_CASTLE_QUEENSIDE)
        }
    }

    /// Get the source square
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index(((self.0 >> FROM_SHIFT) & SQUARE_MASK) as usize)
    }

    /// Get the destination square
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index(((self.0 >> TO_SHIFT) & SQUARE_MASK) as usize)
    }

    /// The moving piece
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        match Piece::from_index(((self.0 >> PIECE_SHIFT) & PIECE_MASK) as usize) {
            Some(p) => p,
            None => Piece::Pawn,
        }
    }

    /// Get the promotion piece, if this is a promotion move
    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        let raw = ((self.0 >> PROMOTION_SHIFT) & PIECE_MASK) as usize;
        if raw == 0 {
            None
        } else {
            Piece::from_index(raw - 1)
        }
    }

    /// The captured piece, if any (a pawn for en passant)
    #[inline]
    #[must_use]
    pub const fn captured(self) -> Option<Piece> {
        let raw = ((self.0 >> CAPTURED_SHIFT) & PIECE_MASK) as usize;
        if raw == 0 {
            None
        } else {
            Piece::from_index(raw - 1)
        }
    }

    /// Side that made the move
    #[inline]
    #[must_use]
    pub const fn side(self) -> Color {
        if self.0 & FLAG_BLACK != 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Returns true if this move captures a piece (including en passant)
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        (self.0 >> CAPTURED_SHIFT) & PIECE_MASK != 0
    }

    /// Returns true if this move is a pawn promotion
    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        (self.0 >> PROMOTION_SHIFT) & PIECE_MASK != 0
    }

    /// Returns true if this move is a double pawn push
    #[inline]
    #[must_use]
    pub const fn is_double_pawn_push(self) -> bool {
        self.0 & FLAG_DOUBLE_PUSH != 0
    }

    /// Returns true if this move is en passant
    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    /// Returns true if this is kingside castling (O-O)
    #[inline]
    #[must_use]
    pub const fn is_castle_kingside(self) -> bool {
        self.0 & FLAG_CASTLE_KINGSIDE != 0
    }

    /// Returns true if this is queenside castling (O-O-O)
    #[inline]
    #[must_use]
    pub const fn is_castle_queenside(self) -> bool {
        self.0 & FLAG_CASTLE_QUEENSIDE != 0
    }

    /// Returns true if this move is castling (kingside or queenside)
    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        self.0 & (FLAG_CASTLE_KINGSIDE | FLAG_CASTLE_QUEENSIDE) != 0
    }

    /// Display form: piece letter, origin, capture marker, destination, promotion suffix
    #[must_use]
    pub fn display(self) -> DisplayMove {
        DisplayMove(self)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.display())
    }
}

/// Coordinate form used by the protocols (e2e4, e7e8q)
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

/// Human-readable move (e2e4, Nb1xc3, e7e8=Q, O-O)
pub struct DisplayMove(Move);

impl fmt::Display for DisplayMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mv = self.0;
        if mv.is_castle_kingside() {
            return write!(f, "O-O");
        }
        if mv.is_castle_queenside() {
            return write!(f, "O-O-O");
        }
        if mv.piece() != Piece::Pawn {
            write!(f, "{}", mv.piece().to_fen_char(Color::White))?;
        }
        write!(f, "{}", mv.from())?;
        if mv.is_capture() {
            write!(f, "x")?;
        }
        write!(f, "{}", mv.to())?;
        if let Some(promo) = mv.promotion() {
            write!(f, "={}", promo.to_fen_char(Color::White))?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;
pub(crate) const EMPTY_MOVE: Move = Move::null();

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [EMPTY_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        self.as_slice().get(idx).copied()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

/// Owning iterator over moves in a `MoveList`
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx < self.list.len {
            let mv = self.list.moves[self.idx];
            self.idx += 1;
            Some(mv)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.as_slice()[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn fields_survive_packing() {
        let mv = Move::new(sq("b7"), sq("a8"), Piece::Pawn, Color::Black)
            .with_capture(Piece::Rook)
            .with_promotion(Piece::Queen);
        assert_eq!(mv.from(), sq("b7"));
        assert_eq!(mv.to(), sq("a8"));
        assert_eq!(mv.piece(), Piece::Pawn);
        assert_eq!(mv.captured(), Some(Piece::Rook));
        assert_eq!(mv.promotion(), Some(Piece::Queen));
        assert_eq!(mv.side(), Color::Black);
        assert!(mv.is_capture());
        assert!(mv.is_promotion());
        assert!(!mv.is_castling());
    }

    #[test]
    fn coordinate_and_display_forms() {
        let push = Move::new(sq("e2"), sq("e4"), Piece::Pawn, Color::White).with_double_push();
        assert_eq!(push.to_string(), "e2e4");
        assert_eq!(push.display().to_string(), "e2e4");

        let capture =
            Move::new(sq("b1"), sq("c3"), Piece::Knight, Color::White).with_capture(Piece::Bishop);
        assert_eq!(capture.display().to_string(), "Nb1xc3");

        let promo = Move::new(sq("e7"), sq("e8"), Piece::Pawn, Color::White)
            .with_promotion(Piece::Knight);
        assert_eq!(promo.to_string(), "e7e8n");
        assert_eq!(promo.display().to_string(), "e7e8=N");

        let castle = Move::new(Square::E8, Square::C8, Piece::King, Color::Black).with_castle(false);
        assert_eq!(castle.to_string(), "e8c8");
        assert_eq!(castle.display().to_string(), "O-O-O");
    }

    #[test]
    fn en_passant_counts_as_pawn_capture() {
        let ep = Move::new(sq("e5"), sq("d6"), Piece::Pawn, Color::White).with_en_passant();
        assert!(ep.is_en_passant());
        assert_eq!(ep.captured(), Some(Piece::Pawn));
    }
}
