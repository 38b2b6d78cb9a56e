//! Bitboard Connect 4 game state.
//!
//! The board is 7 columns by 6 rows. Each side's discs are stored in a
//! 64-bit bitboard where cell (col, row) occupies bit `col * 7 + row`,
//! with row 0 at the bottom:
//!
//! ```text
//! guard:  [ 6][13][20][27][34][41][48]  <- never occupied
//! Row 5:  [ 5][12][19][26][33][40][47]  <- Top
//! Row 4:  [ 4][11][18][25][32][39][46]
//! Row 3:  [ 3][10][17][24][31][38][45]
//! Row 2:  [ 2][ 9][16][23][30][37][44]
//! Row 1:  [ 1][ 8][15][22][29][36][43]
//! Row 0:  [ 0][ 7][14][21][28][35][42]  <- Bottom
//!          Col 0   1   2   3   4   5   6
//! ```
//!
//! Each column carries one guard bit above its top cell. The guard bit
//! is never set, which keeps the shift-and-AND line test from bleeding
//! runs across column boundaries and makes the column-full check a
//! single mask test.
//!
//! # Usage
//!
//! ```rust
//! use game_connect4::{Board, Side, Status};
//!
//! let mut board = Board::new();
//! board.apply(3).unwrap();
//! board.apply(4).unwrap();
//! assert_eq!(board.side_to_move(), Side::X);
//! assert_eq!(board.status(), Status::InProgress);
//! ```

use thiserror::Error;

pub mod tactics;

#[cfg(test)]
mod tests;

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// Bits per column: ROWS cells plus one guard bit.
const BITS_PER_COL: u32 = ROWS as u32 + 1;

/// Shift amounts for the four line directions: vertical, horizontal,
/// falling diagonal, rising diagonal.
const LINE_SHIFTS: [u32; 4] = [1, BITS_PER_COL, BITS_PER_COL - 1, BITS_PER_COL + 1];

/// Errors raised by board mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("column {0} is out of range")]
    ColumnOutOfRange(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("no moves to undo")]
    EmptyHistory,
}

/// One of the two players. `X` moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    X,
    O,
}

impl Side {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }

    /// Bitboard array index for this side.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::X => 0,
            Side::O => 1,
        }
    }

    fn from_index(i: usize) -> Side {
        if i % 2 == 0 {
            Side::X
        } else {
            Side::O
        }
    }
}

/// Terminal status of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won(Side),
    Draw,
}

impl Status {
    /// Whether the game has ended.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::InProgress)
    }

    /// The winner, if any.
    #[inline]
    pub fn winner(self) -> Option<Side> {
        match self {
            Status::Won(side) => Some(side),
            _ => None,
        }
    }
}

/// Canonical transposition key for a position.
///
/// The bitboards are stored relative to the side to move (mover first,
/// opponent second), so positions reached through different move orders
/// collapse to the same key. The column heights are implied by the two
/// bitboards and carry no extra information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pub mover: u64,
    pub opponent: u64,
}

/// Connect 4 board state.
///
/// Mutation goes through [`Board::apply`] and [`Board::undo`] only;
/// clones are cheap value snapshots that search code uses to explore
/// variations without disturbing the caller's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// One bitboard per side, indexed by `Side::index`.
    bitboards: [u64; 2],
    /// Next free bit index per column.
    heights: [u32; COLS],
    /// Played columns, oldest first.
    history: Vec<u8>,
}

impl Board {
    /// Create an empty board. `X` is to move.
    pub fn new() -> Self {
        let mut heights = [0u32; COLS];
        for (col, h) in heights.iter_mut().enumerate() {
            *h = col as u32 * BITS_PER_COL;
        }
        Self {
            bitboards: [0, 0],
            heights,
            history: Vec::with_capacity(BOARD_SIZE),
        }
    }

    /// The side whose turn it is.
    #[inline]
    pub fn side_to_move(&self) -> Side {
        Side::from_index(self.history.len())
    }

    /// Number of moves played so far.
    #[inline]
    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// The last played column, if any.
    #[inline]
    pub fn last_move(&self) -> Option<usize> {
        self.history.last().map(|&c| c as usize)
    }

    /// Bitboard of the given side.
    #[inline]
    pub fn bitboard(&self, side: Side) -> u64 {
        self.bitboards[side.index()]
    }

    /// Whether a disc can be dropped in the column.
    #[inline]
    pub fn is_legal(&self, col: usize) -> bool {
        col < COLS && (self.occupied() & top_mask(col)) == 0
    }

    /// Legal columns in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        let occ = self.occupied();
        (0..COLS).filter(|&c| occ & top_mask(c) == 0).collect()
    }

    /// Drop a disc for the side to move.
    pub fn apply(&mut self, col: usize) -> Result<(), BoardError> {
        if col >= COLS {
            return Err(BoardError::ColumnOutOfRange(col));
        }
        if self.occupied() & top_mask(col) != 0 {
            return Err(BoardError::ColumnFull(col));
        }
        let side = self.side_to_move();
        self.bitboards[side.index()] |= 1u64 << self.heights[col];
        self.heights[col] += 1;
        self.history.push(col as u8);
        Ok(())
    }

    /// Take back the last move. Returns the column it was played in.
    pub fn undo(&mut self) -> Result<usize, BoardError> {
        let col = self.history.pop().ok_or(BoardError::EmptyHistory)? as usize;
        let side = self.side_to_move();
        self.heights[col] -= 1;
        self.bitboards[side.index()] &= !(1u64 << self.heights[col]);
        Ok(col)
    }

    /// Terminal status of the position.
    ///
    /// Only the side that moved last can have completed a line; the
    /// mover before them would already have ended the game.
    pub fn status(&self) -> Status {
        if self.history.is_empty() {
            return Status::InProgress;
        }
        let last = Side::from_index(self.history.len() - 1);
        if has_line(self.bitboards[last.index()]) {
            return Status::Won(last);
        }
        if self.history.len() == BOARD_SIZE {
            return Status::Draw;
        }
        Status::InProgress
    }

    /// Whether dropping in `col` would complete four in a row for
    /// `side`, without mutating the board.
    ///
    /// `col` must be a legal move; for a full column the probe bit is
    /// the guard bit and the answer is meaningless.
    #[inline]
    pub fn is_winning_move(&self, side: Side, col: usize) -> bool {
        debug_assert!(self.is_legal(col));
        has_line(self.bitboards[side.index()] | (1u64 << self.heights[col]))
    }

    /// The occupant of a cell, if any. Row 0 is the bottom.
    pub fn cell(&self, col: usize, row: usize) -> Option<Side> {
        if col >= COLS || row >= ROWS {
            return None;
        }
        let bit = 1u64 << (col as u32 * BITS_PER_COL + row as u32);
        if self.bitboards[0] & bit != 0 {
            Some(Side::X)
        } else if self.bitboards[1] & bit != 0 {
            Some(Side::O)
        } else {
            None
        }
    }

    /// Canonical transposition key, relative to the side to move.
    pub fn key(&self) -> PositionKey {
        let mover = self.side_to_move();
        PositionKey {
            mover: self.bitboards[mover.index()],
            opponent: self.bitboards[mover.opponent().index()],
        }
    }

    #[inline]
    fn occupied(&self) -> u64 {
        self.bitboards[0] | self.bitboards[1]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Mask of the topmost cell of a column; set iff the column is full.
#[inline]
fn top_mask(col: usize) -> u64 {
    1u64 << (col as u32 * BITS_PER_COL + ROWS as u32 - 1)
}

/// O(1) four-in-a-row test over one side's bitboard.
///
/// For each direction shift `s`, `m = bb & (bb >> s)` marks pairs; a
/// run of four exists iff `m & (m >> 2s)` is non-zero.
#[inline]
pub fn has_line(bb: u64) -> bool {
    LINE_SHIFTS.iter().any(|&s| {
        let m = bb & (bb >> s);
        m & (m >> (2 * s)) != 0
    })
}
