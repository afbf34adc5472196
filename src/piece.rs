use serde::{Deserialize, Serialize};
use std::fmt;

/// Contents of a single board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Piece {
    Empty,
    /// An attacker.
    Black,
    /// A defender.
    White,
    King,
}

/// One of the two competing factions. The king fights for White.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Single-character marker used in board encodings.
    pub fn glyph(&self) -> char {
        match self {
            Side::Black => 'B',
            Side::White => 'W',
        }
    }
}

impl Piece {
    /// The side a piece belongs to; `None` for an empty square.
    pub fn side(&self) -> Option<Side> {
        match self {
            Piece::Empty => None,
            Piece::Black => Some(Side::Black),
            Piece::White | Piece::King => Some(Side::White),
        }
    }

    /// Single-character glyph used in board encodings and text rendering.
    pub fn glyph(&self) -> char {
        match self {
            Piece::Empty => '-',
            Piece::Black => 'B',
            Piece::White => 'W',
            Piece::King => 'K',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => write!(f, "Black"),
            Side::White => write!(f, "White"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_is_white_side() {
        assert_eq!(Piece::King.side(), Some(Side::White));
        assert_eq!(Piece::White.side(), Some(Side::White));
        assert_eq!(Piece::Black.side(), Some(Side::Black));
        assert_eq!(Piece::Empty.side(), None);
    }

    #[test]
    fn opponent_is_involutive() {
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.opponent().opponent(), Side::White);
    }
}
