use std::fmt;
use std::str::FromStr;

use super::error::{FenError, FenField, MoveParseError};
use super::{Bitboard, Color, Move, Piece, Position, Square};

/// Standard starting position in FEN notation
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// An en-passant target must sit empty on the mover's capture rank, directly
/// in front of the pawn that just made a double push.
fn en_passant_is_plausible(pos: &Position, sq: Square) -> bool {
    let (rank, pushed) = match pos.side_to_move {
        Color::White => (5, sq.index().checked_sub(8)),
        Color::Black => (2, Some(sq.index() + 8).filter(|&idx| idx < 64)),
    };
    let Some(pushed) = pushed else {
        return false;
    };
    let them = pos.side_to_move.opponent();
    sq.rank() == rank
        && pos.piece_at(sq).is_none()
        && pos.pieces_of(them, Piece::Pawn).contains(Square::from_index(pushed))
}

impl Position {
    /// Parse a position from FEN notation.
    ///
    /// The halfmove clock and fullmove number may be omitted (defaulting to 0 and 1).
    /// An empty string selects the standard initial position. Every failure names
    /// the offending field.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(Position::new());
        }
        if parts.len() < 4 {
            return Err(FenError::MissingFields { found: parts.len() });
        }
        if parts.len() > 6 {
            return Err(FenError::TooManyFields { found: parts.len() });
        }

        let mut pos = Position::empty();
        parse_placement(&mut pos, parts[0])?;

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidValue {
                    field: FenField::SideToMove,
                    found: other.to_string(),
                })
            }
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => pos.castling.set(Color::White, true),
                    'Q' => pos.castling.set(Color::White, false),
                    'k' => pos.castling.set(Color::Black, true),
                    'q' => pos.castling.set(Color::Black, false),
                    _ => {
                        return Err(FenError::InvalidChar {
                            field: FenField::Castling,
                            found: c,
                        })
                    }
                }
            }
        }

        pos.en_passant = if parts[3] == "-" {
            None
        } else {
            let sq = Square::from_str(parts[3]).map_err(|_| FenError::InvalidValue {
                field: FenField::EnPassant,
                found: parts[3].to_string(),
            })?;
            if !en_passant_is_plausible(&pos, sq) {
                return Err(FenError::InvalidValue {
                    field: FenField::EnPassant,
                    found: parts[3].to_string(),
                });
            }
            Some(sq)
        };

        if let Some(clock) = parts.get(4) {
            pos.halfmove_clock = clock.parse().map_err(|_| FenError::InvalidValue {
                field: FenField::HalfmoveClock,
                found: (*clock).to_string(),
            })?;
        }
        if let Some(number) = parts.get(5) {
            pos.fullmove_number = number.parse().map_err(|_| FenError::InvalidValue {
                field: FenField::FullmoveNumber,
                found: (*number).to_string(),
            })?;
        }

        pos.hash = pos.compute_hash();
        Ok(pos)
    }

    /// Convert the position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::from_index(rank * 8 + file);
                if let Some((color, piece)) = self.piece_at(sq) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let mut castling = String::new();
        for (color, kingside, c) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if self.castling.has(color, kingside) {
                castling.push(c);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in coordinate notation (e.g., "e2e4", "e7e8q").
    ///
    /// The move is matched against the legal moves of this position. A promotion
    /// without a piece letter selects the queen.
    ///
    /// # Example
    /// ```
    /// use bitboard_engine::board::Position;
    ///
    /// let pos = Position::new();
    /// let mv = pos.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&self, coords: &str) -> Result<Move, MoveParseError> {
        let coords = coords.trim();
        if !coords.is_ascii() || coords.len() < 4 || coords.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: coords.len() });
        }

        let from = Square::from_str(&coords[0..2])?;
        let to = Square::from_str(&coords[2..4])?;
        let promotion = match coords[4..].chars().next() {
            None => None,
            Some(c) => match Piece::from_char(c) {
                Some(p @ (Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen)) => Some(p),
                _ => return Err(MoveParseError::InvalidPromotion { found: c }),
            },
        };

        let (moves, _) = self.generate();
        moves
            .iter()
            .copied()
            .find(|mv| {
                mv.from() == from
                    && mv.to() == to
                    && match mv.promotion() {
                        None => promotion.is_none(),
                        Some(p) => p == promotion.unwrap_or(Piece::Queen),
                    }
            })
            .ok_or_else(|| MoveParseError::NoMatchingMove {
                notation: coords.to_string(),
            })
    }
}

fn parse_placement(pos: &mut Position, placement: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::BadRankCount { found: ranks.len() });
    }

    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(FenError::InvalidChar {
                        field: FenField::Placement,
                        found: c,
                    });
                }
                file += skip as usize;
            } else {
                let piece = Piece::from_char(c).ok_or(FenError::InvalidChar {
                    field: FenField::Placement,
                    found: c,
                })?;
                if file >= 8 {
                    return Err(FenError::BadRankLength {
                        rank: rank + 1,
                        files: file + 1,
                    });
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                pos.put_piece(color, piece, Square::from_index(rank * 8 + file));
                file += 1;
            }
        }
        if file != 8 {
            return Err(FenError::BadRankLength {
                rank: rank + 1,
                files: file,
            });
        }
    }

    let back_ranks = Bitboard::RANK_1 | Bitboard::RANK_8;
    if let Some(square) = (pos.piece_set(Piece::Pawn) & back_ranks).iter().next() {
        return Err(FenError::PawnOnBackRank { square });
    }

    for color in Color::BOTH {
        let kings = pos.pieces_of(color, Piece::King).popcount();
        if kings != 1 {
            return Err(FenError::KingCount {
                color,
                found: kings,
            });
        }
    }
    Ok(())
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

/// ASCII diagram followed by the state that is not visible on the board
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SEPARATOR: &str = "+---+---+---+---+---+---+---+---+";
        for rank in (0..8).rev() {
            writeln!(f, "{SEPARATOR}")?;
            write!(f, "|")?;
            for file in 0..8 {
                match self.piece_at(Square::from_index(rank * 8 + file)) {
                    Some((color, piece)) => write!(f, " {} |", piece.to_fen_char(color))?,
                    None => write!(f, "   |")?,
                }
            }
            writeln!(f, " {}", rank + 1)?;
        }
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "  a   b   c   d   e   f   g   h")?;
        writeln!(f, "{} to move, move {}", self.side_to_move, self.fullmove_number)?;
        let fen = self.to_fen();
        let fields: Vec<&str> = fen.split(' ').collect();
        writeln!(f, "Castling: {}", fields[2])?;
        writeln!(f, "En passant: {}", fields[3])?;
        write!(f, "Fifty-move counter: {}", self.halfmove_clock)
    }
}
