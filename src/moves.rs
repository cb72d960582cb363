//! Amazons moves.
//!
//! A [`Move`] slides a piece from `from` to `to` and then throws a spear from
//! `to` onto `spear`. It carries no color: which piece moves is whatever
//! occupies `from` on the board it is applied to.

use std::fmt;
use std::str::FromStr;

use crate::square::{ParseError, Square};

/// A move: origin, destination, and spear-landing square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    spear: Square,
}

impl Move {
    pub fn new(from: Square, to: Square, spear: Square) -> Self {
        Self { from, to, spear }
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }

    #[inline]
    pub fn spear(&self) -> Square {
        self.spear
    }
}

/// Formats as `a1-b2(c3)`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}({})", self.from, self.to, self.spear)
    }
}

/// Parses either `a1-b2(c3)` or the whitespace-separated `a1 b2 c3`.
impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseError::Move(s.to_string());
        let s = s.trim();

        let parts: Vec<&str> = if s.contains('-') {
            let (from, rest) = s.split_once('-').ok_or_else(bad)?;
            let rest = rest.strip_suffix(')').ok_or_else(bad)?;
            let (to, spear) = rest.split_once('(').ok_or_else(bad)?;
            vec![from, to, spear]
        } else {
            s.split_whitespace().collect()
        };

        match parts.as_slice() {
            [from, to, spear] => Ok(Move::new(
                from.parse().map_err(|_| bad())?,
                to.parse().map_err(|_| bad())?,
                spear.parse().map_err(|_| bad())?,
            )),
            _ => Err(bad()),
        }
    }
}
