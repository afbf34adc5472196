//! The state of a Tablut game: grid, turn, winner, undo log, and every
//! rule of the game (legality, captures, repetition, move limit).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::geometry;
use crate::moves::Move;
use crate::piece::{Piece, Side};
use crate::square::{ETHRONE, NTHRONE, SIZE, STHRONE, Square, THRONE, THRONE_NEIGHBORS, WTHRONE};

/// Initial positions of the attackers.
const INITIAL_ATTACKERS: [Square; 16] = [
    Square::new(0, 3),
    Square::new(0, 4),
    Square::new(0, 5),
    Square::new(1, 4),
    Square::new(8, 3),
    Square::new(8, 4),
    Square::new(8, 5),
    Square::new(7, 4),
    Square::new(3, 0),
    Square::new(4, 0),
    Square::new(5, 0),
    Square::new(4, 1),
    Square::new(3, 8),
    Square::new(4, 8),
    Square::new(5, 8),
    Square::new(4, 7),
];

/// Initial positions of the defenders of the king.
const INITIAL_DEFENDERS: [Square; 8] = [
    NTHRONE,
    ETHRONE,
    STHRONE,
    WTHRONE,
    Square::new(4, 6),
    Square::new(4, 2),
    Square::new(2, 4),
    Square::new(6, 4),
];

#[derive(Debug, Error)]
pub enum GameError {
    #[error("illegal move: {0}")]
    IllegalMove(Move),
    #[error("move limit {limit} is too low: {move_count} moves already played")]
    LimitTooLow { limit: usize, move_count: usize },
    #[error("no moves to undo")]
    NothingToUndo,
    #[error("no king on the board")]
    MissingKing,
}

/// One reversible grid mutation. A move contributes one `Move` entry
/// followed by an entry per captured piece; the per-move capture count
/// lives in its own stack so undo pops the right number of entries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum UndoEntry {
    Move {
        from: Square,
        to: Square,
        moved: Piece,
        displaced: Piece,
    },
    Capture {
        square: Square,
        piece: Piece,
    },
}

/// A Tablut game in progress.
///
/// The grid is the single source of truth; turn, winner, and move count
/// are bookkeeping updated atomically with each [`GameState::make_move`].
/// Every mutation is logged so [`GameState::undo`] restores the previous
/// state bit for bit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    board: [[Piece; SIZE as usize]; SIZE as usize],
    turn: Side,
    winner: Option<Side>,
    repeated: bool,
    move_count: usize,
    move_limit: Option<usize>,
    log: Vec<UndoEntry>,
    capture_counts: Vec<usize>,
    /// Canonical encodings of every position reached, for repetition
    /// detection. Holds `move_count + 1` entries unless a repetition
    /// ended the game.
    positions: Vec<String>,
}

impl GameState {
    /// A game in the canonical initial layout, Black to move.
    pub fn new() -> Self {
        let mut state = GameState {
            board: [[Piece::Empty; SIZE as usize]; SIZE as usize],
            turn: Side::Black,
            winner: None,
            repeated: false,
            move_count: 0,
            move_limit: None,
            log: Vec::new(),
            capture_counts: Vec::new(),
            positions: Vec::new(),
        };
        state.init();
        state
    }

    /// Reset to the canonical initial layout, discarding all history.
    pub fn init(&mut self) {
        self.board = [[Piece::Empty; SIZE as usize]; SIZE as usize];
        for sq in INITIAL_ATTACKERS {
            self.put(Piece::Black, sq);
        }
        for sq in INITIAL_DEFENDERS {
            self.put(Piece::White, sq);
        }
        self.put(Piece::King, THRONE);
        self.turn = Side::Black;
        self.winner = None;
        self.repeated = false;
        self.move_count = 0;
        self.move_limit = None;
        self.log.clear();
        self.capture_counts.clear();
        self.positions.clear();
        let encoded = self.encoded();
        self.positions.push(encoded);
    }

    /// Become a structural copy of `other`, sharing nothing with it.
    pub fn copy_from(&mut self, other: &GameState) {
        self.clone_from(other);
    }

    /// The side whose turn it is.
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// The winner, or `None` while the game is running.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    /// True iff the game ended because a position repeated.
    pub fn repeated_position(&self) -> bool {
        self.repeated
    }

    /// Moves applied since the initial position, minus moves undone.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn move_limit(&self) -> Option<usize> {
        self.move_limit
    }

    /// Cap the game at `limit` move pairs. Fails if that many moves have
    /// already been played.
    pub fn set_move_limit(&mut self, limit: usize) -> Result<(), GameError> {
        if 2 * limit <= self.move_count {
            self.move_limit = None;
            Err(GameError::LimitTooLow {
                limit,
                move_count: self.move_count,
            })
        } else {
            self.move_limit = Some(limit);
            Ok(())
        }
    }

    /// Contents of a square.
    pub fn get(&self, sq: Square) -> Piece {
        self.board[sq.row() as usize][sq.col() as usize]
    }

    fn put(&mut self, piece: Piece, sq: Square) {
        self.board[sq.row() as usize][sq.col() as usize] = piece;
    }

    /// Where the king stands. The king's capture ends the game, so this
    /// only fails if a terminal position is queried after the fact.
    pub fn king_position(&self) -> Result<Square, GameError> {
        Square::all()
            .find(|&sq| self.get(sq) == Piece::King)
            .ok_or(GameError::MissingKing)
    }

    /// True iff the piece at `from` belongs to the side whose turn it is.
    pub fn is_legal_origin(&self, from: Square) -> bool {
        self.get(from).side() == Some(self.turn)
    }

    /// True iff `from`-`to` is a legal move for the side to move.
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        self.is_legal_origin(from) && self.is_open_path(from, to)
    }

    /// The turn-independent part of legality: destination empty, rook
    /// path unblocked, and only the king may land on the throne.
    fn is_open_path(&self, from: Square, to: Square) -> bool {
        if self.get(to) != Piece::Empty {
            return false;
        }
        if !self.is_unblocked_move(from, to) {
            return false;
        }
        !(to == THRONE && self.get(from) != Piece::King)
    }

    /// True iff `from`-`to` is a rook move with every square along it,
    /// `to` included, empty.
    pub fn is_unblocked_move(&self, from: Square, to: Square) -> bool {
        let Some(dir) = geometry::direction(from, to) else {
            return false;
        };
        for &sq in geometry::rook_targets(from, dir) {
            if self.get(sq) != Piece::Empty {
                return false;
            }
            if sq == to {
                return true;
            }
        }
        false
    }

    /// All moves `side` could make on the current grid, whoever's turn
    /// it is. Enumeration order follows the rook-target tables; callers
    /// needing determinism beyond that must sort.
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        let mut moves = Vec::new();
        for from in Square::all() {
            if self.get(from).side() != Some(side) {
                continue;
            }
            let is_king = self.get(from) == Piece::King;
            for dir in 0..4 {
                for &to in geometry::rook_targets(from, dir) {
                    if self.get(to) != Piece::Empty {
                        break;
                    }
                    // Non-kings may pass over the empty throne but not stop.
                    if to == THRONE && !is_king {
                        continue;
                    }
                    moves.push(Move::new(from, to));
                }
            }
        }
        moves
    }

    /// True iff `side` has at least one legal move.
    pub fn has_move(&self, side: Side) -> bool {
        !self.legal_moves(side).is_empty()
    }

    /// Apply a move. The move must be legal; an illegal move is rejected
    /// without touching the state.
    ///
    /// If a move limit is configured and exhausted, the side to move
    /// forfeits instead: the opponent wins and nothing else changes.
    pub fn make_move(&mut self, mv: Move) -> Result<(), GameError> {
        if !self.is_legal(mv.from, mv.to) {
            return Err(GameError::IllegalMove(mv));
        }
        if let Some(limit) = self.move_limit {
            if self.move_count / 2 >= limit {
                self.winner = Some(self.turn.opponent());
                return Ok(());
            }
        }
        let moved = self.get(mv.from);
        let displaced = self.get(mv.to);
        self.put(moved, mv.to);
        self.put(Piece::Empty, mv.from);
        self.log.push(UndoEntry::Move {
            from: mv.from,
            to: mv.to,
            moved,
            displaced,
        });
        self.check_repeated();
        let mut captures = 0;
        for dir in 0..4 {
            if let Some(far) = geometry::rook_move(mv.to, dir, 2) {
                if self.try_capture(mv.to, far) {
                    captures += 1;
                }
            }
        }
        self.capture_counts.push(captures);
        if self.winner.is_none() && geometry::is_edge(self.king_position()?) {
            self.winner = Some(Side::White);
        }
        self.move_count += 1;
        self.turn = self.turn.opponent();
        Ok(())
    }

    /// Record the position just reached; if it was already seen, the
    /// game ends and the side that just moved wins.
    fn check_repeated(&mut self) {
        let encoded = self.encoded();
        if self.positions.contains(&encoded) {
            self.repeated = true;
            self.winner = Some(self.turn);
        } else {
            self.positions.push(encoded);
        }
    }

    /// Try to capture the piece between `sq0` (the square just moved to)
    /// and `sq2` (two rook steps away).
    fn try_capture(&mut self, sq0: Square, sq2: Square) -> bool {
        let Some(middle) = geometry::between(sq0, sq2) else {
            return false;
        };
        let mover = self.get(sq0);
        let far = self.get(sq2);
        let victim = self.get(middle);
        let captured = match victim {
            Piece::Empty => false,
            Piece::Black => {
                // The throne anchors White captures whether or not the
                // king is on it.
                mover.side() == Some(Side::White)
                    && (far.side() == Some(Side::White) || sq2 == THRONE)
            }
            Piece::White => {
                if mover.side() != Some(Side::Black) {
                    false
                } else if far.side() == Some(Side::Black) {
                    true
                } else if sq2 == THRONE {
                    match far {
                        Piece::Empty => true,
                        Piece::King => self.hostile_occupied_throne(),
                        _ => false,
                    }
                } else {
                    false
                }
            }
            Piece::King => {
                let fell = if middle.in_throne_neighborhood() {
                    self.surrounded_king(middle, sq0, sq2)
                } else {
                    mover.side() == Some(Side::Black) && far.side() == Some(Side::Black)
                };
                if fell {
                    self.winner = Some(Side::Black);
                }
                fell
            }
        };
        if captured {
            self.log.push(UndoEntry::Capture {
                square: middle,
                piece: victim,
            });
            self.put(Piece::Empty, middle);
        }
        captured
    }

    /// The occupied throne is hostile to a white piece iff exactly three
    /// of its neighbors hold attackers.
    fn hostile_occupied_throne(&self) -> bool {
        let hostile = THRONE_NEIGHBORS
            .iter()
            .filter(|&&sq| self.get(sq) == Piece::Black)
            .count();
        hostile == 3
    }

    /// Whether the king at `middle` (on the throne or beside it) is
    /// surrounded: all four throne neighbors on the throne itself,
    /// otherwise at least three of the flankers and their diagonal pair.
    fn surrounded_king(&self, middle: Square, sq0: Square, sq2: Square) -> bool {
        if middle == THRONE {
            THRONE_NEIGHBORS
                .iter()
                .all(|&sq| self.get(sq) == Piece::Black)
        } else {
            let Some((d1, d2)) = geometry::diagonal_pair(sq0, sq2) else {
                return false;
            };
            let hostile = [sq0, sq2, d1, d2]
                .iter()
                .filter(|&&sq| self.get(sq) == Piece::Black)
                .count();
            hostile >= 3
        }
    }

    /// Reverse the most recent move and its captures exactly.
    pub fn undo(&mut self) -> Result<(), GameError> {
        if self.move_count == 0 {
            return Err(GameError::NothingToUndo);
        }
        let Some(captures) = self.capture_counts.pop() else {
            // The log was cleared since this position became the baseline.
            return Err(GameError::NothingToUndo);
        };
        self.winner = None;
        if self.repeated {
            // The repeating move never recorded its position.
            self.repeated = false;
        } else {
            self.positions.pop();
        }
        for _ in 0..captures {
            match self.log.pop() {
                Some(UndoEntry::Capture { square, piece }) => self.put(piece, square),
                _ => unreachable!("undo log out of sync with capture counts"),
            }
        }
        match self.log.pop() {
            Some(UndoEntry::Move {
                from,
                to,
                moved,
                displaced,
            }) => {
                self.put(moved, from);
                self.put(displaced, to);
            }
            _ => unreachable!("undo log out of sync with capture counts"),
        }
        self.move_count -= 1;
        self.turn = self.turn.opponent();
        Ok(())
    }

    /// Forget all undo and repetition history, adopting the current
    /// position as a new baseline. The position itself is untouched.
    pub fn clear_undo(&mut self) {
        self.positions.clear();
        self.log.clear();
        self.capture_counts.clear();
    }

    /// The canonical position encoding: the turn marker followed by one
    /// glyph per square in row-major order.
    fn encoded(&self) -> String {
        let mut out = String::with_capacity(SIZE as usize * SIZE as usize + 1);
        out.push(self.turn.glyph());
        for sq in Square::all() {
            out.push(self.get(sq).glyph());
        }
        out
    }

    /// Fixed-width text rendering, rows printed high to low. With
    /// `coordinates`, row numbers run down the left and column letters
    /// along the bottom.
    pub fn to_text(&self, coordinates: bool) -> String {
        let mut out = String::new();
        for row in (0..SIZE).rev() {
            if coordinates {
                out.push_str(&format!("{:2}", row + 1));
            } else {
                out.push_str("  ");
            }
            for col in 0..SIZE {
                out.push(' ');
                out.push(self.get(Square::new(col, row)).glyph());
            }
            out.push('\n');
        }
        if coordinates {
            out.push_str("  ");
            for c in 'a'..='i' {
                out.push(' ');
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text(true))
    }
}
