use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::moves::ParseMoveError;

/// The number of squares on a side of the board.
pub const SIZE: u8 = 9;

/// The throne (castle) square and its four orthogonal neighbors.
pub const THRONE: Square = Square { col: 4, row: 4 };
pub const NTHRONE: Square = Square { col: 4, row: 5 };
pub const STHRONE: Square = Square { col: 4, row: 3 };
pub const WTHRONE: Square = Square { col: 3, row: 4 };
pub const ETHRONE: Square = Square { col: 5, row: 4 };

pub const THRONE_NEIGHBORS: [Square; 4] = [NTHRONE, ETHRONE, STHRONE, WTHRONE];

/// A board square as a 0-indexed (column, row) pair. Column `a`..`i` maps
/// to 0..8, row `1`..`9` maps to 0..8. Values are always in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    col: u8,
    row: u8,
}

impl Square {
    /// Build a square from in-bounds coordinates. Panics on out-of-range
    /// input; use [`Square::try_new`] for unchecked arithmetic.
    pub const fn new(col: u8, row: u8) -> Self {
        assert!(col < SIZE && row < SIZE, "square coordinates off board");
        Square { col, row }
    }

    /// Build a square from possibly off-board coordinates.
    pub fn try_new(col: i16, row: i16) -> Option<Self> {
        if (0..SIZE as i16).contains(&col) && (0..SIZE as i16).contains(&row) {
            Some(Square {
                col: col as u8,
                row: row as u8,
            })
        } else {
            None
        }
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    /// Row-major index, `row * 9 + col`.
    pub fn index(&self) -> usize {
        self.row as usize * SIZE as usize + self.col as usize
    }

    pub fn from_index(index: usize) -> Self {
        assert!(index < (SIZE as usize * SIZE as usize));
        Square {
            col: (index % SIZE as usize) as u8,
            row: (index / SIZE as usize) as u8,
        }
    }

    /// True iff `self` and `other` share a row or a column and differ.
    pub fn is_rook_move(&self, other: Square) -> bool {
        *self != other && (self.col == other.col || self.row == other.row)
    }

    pub fn is_throne(&self) -> bool {
        *self == THRONE
    }

    /// True for the throne and its four orthogonal neighbors.
    pub fn in_throne_neighborhood(&self) -> bool {
        *self == THRONE || THRONE_NEIGHBORS.contains(self)
    }

    /// Iterate over all 81 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SIZE as usize * SIZE as usize).map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Square {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(c), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseMoveError::BadSquare(s.to_string()));
        };
        if !('a'..='i').contains(&c) || !('1'..='9').contains(&r) {
            return Err(ParseMoveError::BadSquare(s.to_string()));
        }
        Ok(Square {
            col: c as u8 - b'a',
            row: r as u8 - b'1',
        })
    }
}
