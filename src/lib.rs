pub mod board;
pub mod geometry;
pub mod moves;
pub mod piece;
pub mod square;

pub use board::*;
pub use moves::*;
pub use piece::*;
pub use square::*;
