use crate::chess::{Color, Direction};
use derive_more::{Constructor, Display, Error};
use std::ops::{Add, AddAssign};
use std::{fmt, str::FromStr};

/// A square on the chess board addressed by row and column.
///
/// Row 0 is the eighth rank, from Black's side, and column 0 is the a-file.
/// Coordinates are not bounds checked, see [`Board::is_inside`].
///
/// [`Board::is_inside`]: crate::chess::Board::is_inside
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Constructor)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Position {
    #[cfg_attr(test, strategy(0i8..8))]
    pub row: i8,
    #[cfg_attr(test, strategy(0i8..8))]
    pub col: i8,
}

impl Position {
    /// The color of this square.
    ///
    /// The corner at row 0 and column 0 is a light square.
    pub fn color(&self) -> Color {
        if (self.row + self.col) % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}

impl Add<Direction> for Position {
    type Output = Self;

    fn add(self, d: Direction) -> Self::Output {
        Position::new(self.row + d.row, self.col + d.col)
    }
}

impl AddAssign<Direction> for Position {
    fn add_assign(&mut self, d: Direction) {
        *self = *self + d
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (0..8).contains(&self.row) && (0..8).contains(&self.col) {
            let file = char::from(b'a' + self.col as u8);
            let rank = char::from(b'8' - self.row as u8);
            write!(f, "{file}{rank}")
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// The reason why parsing [`Position`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse square, expected a file `[a-h]` followed by a rank `[1-8]`")]
pub struct ParsePositionError;

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            &[f @ b'a'..=b'h', r @ b'1'..=b'8'] => {
                Ok(Position::new((b'8' - r) as i8, (f - b'a') as i8))
            }

            _ => Err(ParsePositionError),
        }
    }
}
