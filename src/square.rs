//! Board coordinates and queen-move geometry.
//!
//! A [`Square`] is a (column, row) pair on the 10x10 board, stored as the
//! linear index `row * SIZE + col`. Squares are ordered by that index, which
//! is the order every enumerator on the board walks them in.
//!
//! Text form is a column letter `a`-`j` followed by a row number `1`-`10`,
//! so `a1` is (0, 0) and `j10` is (9, 9).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{DIRECTION_DELTAS, NUM_DIRECTIONS, NUM_SQUARES, SIZE};

/// Error produced when parsing squares or moves from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid square: {0}")]
    Square(String),
    #[error("invalid move: {0}")]
    Move(String),
    #[error("invalid board layout: {0}")]
    Layout(String),
}

/// A square on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// The square at (`col`, `row`). Panics if either is off the board.
    pub fn new(col: usize, row: usize) -> Self {
        assert!(col < SIZE && row < SIZE, "square ({col}, {row}) is off the board");
        Square((row * SIZE + col) as u8)
    }

    /// The square with linear index `index`. Panics if `index >= 100`.
    pub fn from_index(index: usize) -> Self {
        assert!(index < NUM_SQUARES, "square index {index} is off the board");
        Square(index as u8)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn col(self) -> usize {
        self.index() % SIZE
    }

    #[inline]
    pub fn row(self) -> usize {
        self.index() / SIZE
    }

    /// All 100 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES).map(|i| Square(i as u8))
    }

    /// The square `steps` queen steps from here in direction `dir`
    /// (0 = north, clockwise), or `None` if that leaves the board.
    pub fn queen_move(self, dir: usize, steps: usize) -> Option<Square> {
        debug_assert!(dir < NUM_DIRECTIONS, "bad direction {dir}");
        let (dc, dr) = DIRECTION_DELTAS[dir];
        let col = self.col() as isize + dc as isize * steps as isize;
        let row = self.row() as isize + dr as isize * steps as isize;
        if (0..SIZE as isize).contains(&col) && (0..SIZE as isize).contains(&row) {
            Some(Square::new(col as usize, row as usize))
        } else {
            None
        }
    }

    /// True iff `to` is a different square on the same row, column, or
    /// diagonal.
    pub fn is_queen_move(self, to: Square) -> bool {
        if self == to {
            return false;
        }
        let dc = self.col().abs_diff(to.col());
        let dr = self.row().abs_diff(to.row());
        dc == 0 || dr == 0 || dc == dr
    }

    /// Direction index of the queen move from here to `to`.
    ///
    /// Panics unless `self.is_queen_move(to)`.
    pub fn direction(self, to: Square) -> usize {
        assert!(self.is_queen_move(to), "{self}-{to} is not a queen move");
        let dc = (to.col() as isize - self.col() as isize).signum() as i8;
        let dr = (to.row() as isize - self.row() as isize).signum() as i8;
        match DIRECTION_DELTAS.iter().position(|&d| d == (dc, dr)) {
            Some(dir) => dir,
            None => unreachable!("{self}-{to} has no direction"),
        }
    }

    /// Number of queen steps from here to an aligned square `to`.
    pub fn distance(self, to: Square) -> usize {
        self.col().abs_diff(to.col()).max(self.row().abs_diff(to.row()))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = (b'a' + self.col() as u8) as char;
        write!(f, "{col}{}", self.row() + 1)
    }
}

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseError::Square(s.to_string());
        let s_lower = s.trim().to_ascii_lowercase();
        let mut chars = s_lower.chars();
        let col = match chars.next() {
            Some(c @ 'a'..='j') => c as usize - 'a' as usize,
            _ => return Err(bad()),
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let row: usize = digits.parse().map_err(|_| bad())?;
        if !(1..=SIZE).contains(&row) {
            return Err(bad());
        }
        Ok(Square::new(col, row - 1))
    }
}
