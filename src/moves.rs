use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::square::Square;

/// A from-square / to-square pair. Legality is the board's business;
/// a `Move` only promises that both squares are on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Errors from parsing move text like `"e4-e6"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("bad square: {0:?}")]
    BadSquare(String),
    #[error("bad move (expected \"e4-e6\"): {0:?}")]
    BadFormat(String),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once('-')
            .ok_or_else(|| ParseMoveError::BadFormat(s.to_string()))?;
        Ok(Move {
            from: from.trim().parse()?,
            to: to.trim().parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let mv: Move = "e4-e6".parse().unwrap();
        assert_eq!(mv, Move::new(Square::new(4, 3), Square::new(4, 5)));
        assert_eq!(mv.to_string(), "e4-e6");
        assert_eq!("a1-i1".parse::<Move>().unwrap().to_string(), "a1-i1");
    }

    #[test]
    fn parse_rejects_malformed_text() {
        assert_eq!(
            "e4e6".parse::<Move>(),
            Err(ParseMoveError::BadFormat("e4e6".to_string()))
        );
        assert_eq!(
            "e4-j6".parse::<Move>(),
            Err(ParseMoveError::BadSquare("j6".to_string()))
        );
        assert!("".parse::<Move>().is_err());
        assert!("e4-".parse::<Move>().is_err());
    }
}
