//! Error types for board notation.

use thiserror::Error;

/// Error type for square notation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    #[error("invalid square notation '{notation}'")]
    InvalidNotation { notation: String },
}

/// The FEN field a parse failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenField {
    Placement,
    SideToMove,
    Castling,
    EnPassant,
    HalfmoveClock,
    FullmoveNumber,
}

impl std::fmt::Display for FenField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FenField::Placement => "piece placement",
            FenField::SideToMove => "side to move",
            FenField::Castling => "castling rights",
            FenField::EnPassant => "en passant square",
            FenField::HalfmoveClock => "halfmove clock",
            FenField::FullmoveNumber => "fullmove number",
        };
        f.write_str(name)
    }
}

/// Error type for FEN parsing failures. Every variant names the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN must have at least 4 fields, found {found}")]
    MissingFields { found: usize },
    #[error("FEN has {found} fields, at most 6 are allowed")]
    TooManyFields { found: usize },
    #[error("invalid {field}: unexpected '{found}'")]
    InvalidChar { field: FenField, found: char },
    #[error("invalid {field}: '{found}'")]
    InvalidValue { field: FenField, found: String },
    #[error("invalid piece placement: rank {rank} covers {files} files")]
    BadRankLength { rank: usize, files: usize },
    #[error("invalid piece placement: expected 8 ranks, found {found}")]
    BadRankCount { found: usize },
    #[error("invalid piece placement: pawn on back rank square {square}")]
    PawnOnBackRank { square: crate::board::Square },
    #[error("invalid piece placement: {color} must have exactly one king, found {found}")]
    KingCount { color: crate::board::Color, found: u32 },
}

impl FenError {
    /// The field this error refers to
    #[must_use]
    pub fn field(&self) -> Option<FenField> {
        match self {
            FenError::MissingFields { .. } | FenError::TooManyFields { .. } => None,
            FenError::InvalidChar { field, .. } | FenError::InvalidValue { field, .. } => {
                Some(*field)
            }
            FenError::BadRankLength { .. }
            | FenError::BadRankCount { .. }
            | FenError::PawnOnBackRank { .. }
            | FenError::KingCount { .. } => Some(FenField::Placement),
        }
    }
}

/// Error type for coordinate move parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move must be 4-5 characters, found {len}")]
    InvalidLength { len: usize },
    #[error("invalid square notation in '{notation}'")]
    InvalidSquare { notation: String },
    #[error("invalid promotion piece '{found}'")]
    InvalidPromotion { found: char },
    #[error("no matching legal move for '{notation}'")]
    NoMatchingMove { notation: String },
}

impl From<SquareError> for MoveParseError {
    fn from(err: SquareError) -> Self {
        match err {
            SquareError::InvalidNotation { notation } => MoveParseError::InvalidSquare { notation },
        }
    }
}
