//! Precomputed board geometry.
//!
//! Pure lookups over square coordinates: rook-move target lists, the
//! square between two flanking squares, diagonal pairs, edge membership.
//! The rook tables are built once on first use and never change.

use std::sync::LazyLock;

use crate::square::{SIZE, Square};

/// Unit offsets (dcol, drow) for the four rook directions:
/// north, east, south, west.
pub const DIRECTIONS: [(i16, i16); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// For every square and direction, the squares reachable by a rook,
/// ordered outward from the origin (origin excluded).
static ROOK_TARGETS: LazyLock<Vec<[Vec<Square>; 4]>> = LazyLock::new(|| {
    Square::all()
        .map(|from| {
            std::array::from_fn(|dir| {
                let (dc, dr) = DIRECTIONS[dir];
                let mut targets = Vec::new();
                let mut step = 1;
                while let Some(sq) =
                    Square::try_new(from.col() as i16 + dc * step, from.row() as i16 + dr * step)
                {
                    targets.push(sq);
                    step += 1;
                }
                targets
            })
        })
        .collect()
});

/// The ordered rook targets from `from` in direction `dir` (0..4).
pub fn rook_targets(from: Square, dir: usize) -> &'static [Square] {
    &ROOK_TARGETS[from.index()][dir]
}

/// The square `steps` rook steps from `from` in direction `dir`, if on
/// the board.
pub fn rook_move(from: Square, dir: usize, steps: u16) -> Option<Square> {
    let (dc, dr) = DIRECTIONS[dir];
    Square::try_new(
        from.col() as i16 + dc * steps as i16,
        from.row() as i16 + dr * steps as i16,
    )
}

/// The direction index of the rook move `from` -> `to`, if any.
pub fn direction(from: Square, to: Square) -> Option<usize> {
    if !from.is_rook_move(to) {
        return None;
    }
    let dc = (to.col() as i16 - from.col() as i16).signum();
    let dr = (to.row() as i16 - from.row() as i16).signum();
    DIRECTIONS.iter().position(|&d| d == (dc, dr))
}

/// The single square strictly between `a` and `b`, defined when the two
/// sit two rook steps apart.
pub fn between(a: Square, b: Square) -> Option<Square> {
    let dc = b.col() as i16 - a.col() as i16;
    let dr = b.row() as i16 - a.row() as i16;
    if (dc.abs() == 2 && dr == 0) || (dc == 0 && dr.abs() == 2) {
        Square::try_new(a.col() as i16 + dc / 2, a.row() as i16 + dr / 2)
    } else {
        None
    }
}

/// For `a` and `b` two rook steps apart, the two squares diagonally
/// adjacent to both (the perpendicular neighbors of the middle square).
/// `None` if the squares are not two apart or a diagonal falls off the
/// board.
pub fn diagonal_pair(a: Square, b: Square) -> Option<(Square, Square)> {
    let mid = between(a, b)?;
    let (d1, d2) = if a.col() == b.col() {
        (
            Square::try_new(mid.col() as i16 - 1, mid.row() as i16),
            Square::try_new(mid.col() as i16 + 1, mid.row() as i16),
        )
    } else {
        (
            Square::try_new(mid.col() as i16, mid.row() as i16 - 1),
            Square::try_new(mid.col() as i16, mid.row() as i16 + 1),
        )
    };
    Some((d1?, d2?))
}

/// True iff the square lies on the outer rim of the board.
pub fn is_edge(sq: Square) -> bool {
    sq.col() == 0 || sq.col() == SIZE - 1 || sq.row() == 0 || sq.row() == SIZE - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::THRONE;

    #[test]
    fn rook_targets_are_ordered_outward() {
        let from = Square::new(4, 4);
        let north = rook_targets(from, 0);
        assert_eq!(
            north,
            &[Square::new(4, 5), Square::new(4, 6), Square::new(4, 7), Square::new(4, 8)]
        );
        let west = rook_targets(from, 3);
        assert_eq!(west[0], Square::new(3, 4));
        assert_eq!(west.len(), 4);

        // A corner has two empty rays.
        let corner = Square::new(8, 8);
        assert!(rook_targets(corner, 0).is_empty());
        assert!(rook_targets(corner, 1).is_empty());
        assert_eq!(rook_targets(corner, 2).len(), 8);
        assert_eq!(rook_targets(corner, 3).len(), 8);
    }

    #[test]
    fn rook_move_steps() {
        let from = Square::new(4, 1);
        assert_eq!(rook_move(from, 0, 2), Some(Square::new(4, 3)));
        assert_eq!(rook_move(from, 2, 2), None);
        assert_eq!(rook_move(from, 1, 4), Some(Square::new(8, 1)));
        assert_eq!(rook_move(from, 1, 5), None);
    }

    #[test]
    fn direction_of_rook_moves() {
        let from = Square::new(4, 4);
        assert_eq!(direction(from, Square::new(4, 8)), Some(0));
        assert_eq!(direction(from, Square::new(6, 4)), Some(1));
        assert_eq!(direction(from, Square::new(4, 0)), Some(2));
        assert_eq!(direction(from, Square::new(0, 4)), Some(3));
        assert_eq!(direction(from, Square::new(5, 5)), None);
        assert_eq!(direction(from, from), None);
    }

    #[test]
    fn betweenness() {
        assert_eq!(
            between(Square::new(4, 2), Square::new(4, 4)),
            Some(Square::new(4, 3))
        );
        assert_eq!(
            between(Square::new(6, 4), Square::new(4, 4)),
            Some(Square::new(5, 4))
        );
        assert_eq!(between(Square::new(4, 2), Square::new(4, 5)), None);
        assert_eq!(between(Square::new(4, 2), Square::new(5, 4)), None);
    }

    #[test]
    fn diagonal_pairs_flank_the_middle() {
        let (d1, d2) = diagonal_pair(Square::new(4, 3), Square::new(4, 5)).unwrap();
        assert_eq!((d1, d2), (Square::new(3, 4), Square::new(5, 4)));

        let (d1, d2) = diagonal_pair(Square::new(3, 4), Square::new(5, 4)).unwrap();
        assert_eq!((d1, d2), (Square::new(4, 3), Square::new(4, 5)));

        // Along the rim one diagonal falls off the board.
        assert_eq!(diagonal_pair(Square::new(0, 0), Square::new(2, 0)), None);
        assert_eq!(diagonal_pair(THRONE, Square::new(4, 5)), None);
    }

    #[test]
    fn edge_membership() {
        assert!(is_edge(Square::new(0, 4)));
        assert!(is_edge(Square::new(8, 4)));
        assert!(is_edge(Square::new(3, 0)));
        assert!(is_edge(Square::new(3, 8)));
        assert!(is_edge(Square::new(0, 0)));
        assert!(!is_edge(THRONE));
        assert!(!is_edge(Square::new(1, 1)));
    }
}
