use crate::chess::{Color, Figure, Position, PromotionRule, Role};
use derive_more::{Display, Error};
use std::fmt::{self, Write};
use std::ops::{Index, IndexMut};

/// The king of a [`Color`] is not on the board.
///
/// This never happens in a game that started from the standard position.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "the {_0} king is missing from the board")]
pub struct KingNotFound(#[error(not(source))] pub Color);

/// The chess board.
///
/// This type does not validate whether the placement it holds is reachable
/// according to the rules of chess.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [[Option<Figure>; 8]; 8],
    skips: [Option<Position>; 2],
    rule: PromotionRule,
}

impl Default for Board {
    /// The standard starting position.
    fn default() -> Self {
        use Role::*;

        let mut board = Board::empty();
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        for (col, role) in (0..8).zip(back) {
            board[Position::new(0, col)] = Some(Figure::new(role, Color::Black));
            board[Position::new(1, col)] = Some(Figure::new(Pawn, Color::Black));
            board[Position::new(6, col)] = Some(Figure::new(Pawn, Color::White));
            board[Position::new(7, col)] = Some(Figure::new(role, Color::White));
        }

        board
    }
}

impl Board {
    /// A board without any figures.
    pub fn empty() -> Self {
        Board {
            squares: Default::default(),
            skips: [None; 2],
            rule: PromotionRule::default(),
        }
    }

    /// This board under a different [`PromotionRule`].
    pub fn with_rule(mut self, rule: PromotionRule) -> Self {
        self.rule = rule;
        self
    }

    /// The [`PromotionRule`] in effect.
    pub fn rule(&self) -> PromotionRule {
        self.rule
    }

    /// Whether the [`Position`] lies on the board.
    pub fn is_inside(p: Position) -> bool {
        (0..8).contains(&p.row) && (0..8).contains(&p.col)
    }

    /// Whether no figure stands on the [`Position`].
    pub fn is_empty(&self, p: Position) -> bool {
        self[p].is_none()
    }

    /// The square passed over by the last double pawn push of a [`Color`], if still capturable.
    pub fn pawn_skip(&self, c: Color) -> Option<Position> {
        self.skips[c as usize]
    }

    /// Records or clears the square passed over by a double pawn push.
    pub fn set_pawn_skip(&mut self, c: Color, p: Option<Position>) {
        self.skips[c as usize] = p;
    }

    /// An iterator over all figures on the board and where they stand.
    pub fn figures(&self) -> impl Iterator<Item = (Position, Figure)> + '_ {
        (0..8i8)
            .flat_map(|row| (0..8i8).map(move |col| Position::new(row, col)))
            .filter_map(|p| self[p].map(|f| (p, f)))
    }

    /// An iterator over the figures of a [`Color`] and where they stand.
    pub fn figures_of(&self, c: Color) -> impl Iterator<Item = (Position, Figure)> + '_ {
        self.figures().filter(move |(_, f)| f.color() == c)
    }

    /// Where the king of a [`Color`] stands, if anywhere.
    pub fn find_king(&self, c: Color) -> Option<Position> {
        self.figures_of(c)
            .find(|(_, f)| f.role() == Role::King)
            .map(|(p, _)| p)
    }

    /// Where the king of a [`Color`] stands.
    pub fn king(&self, c: Color) -> Result<Position, KingNotFound> {
        self.find_king(c).ok_or(KingNotFound(c))
    }

    /// Whether the king of a [`Color`] is attacked by any of the opponent's figures.
    pub fn is_in_check(&self, c: Color) -> bool {
        self.figures_of(!c)
            .any(|(p, f)| f.can_capture_opponent_king(p, self))
    }

    /// A copy of this board for simulating a single move.
    ///
    /// Unlike [`Clone`], the copy forgets which pawns may be captured en passant.
    pub fn copy(&self) -> Self {
        Board {
            squares: self.squares,
            skips: [None; 2],
            rule: self.rule,
        }
    }
}

impl Index<Position> for Board {
    type Output = Option<Figure>;

    fn index(&self, p: Position) -> &Self::Output {
        &self.squares[p.row as usize][p.col as usize]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, p: Position) -> &mut Self::Output {
        &mut self.squares[p.row as usize][p.col as usize]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const FILES: &str = "abcdefgh";

        f.write_str("  ")?;
        for file in FILES.chars() {
            write!(f, "   {file}")?;
        }

        writeln!(f)?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;

        for (row, cells) in (0..8).zip(&self.squares) {
            let rank = 8 - row;
            write!(f, " {rank} |")?;

            for cell in cells {
                match cell {
                    Some(figure) => write!(f, " {figure} |")?,
                    None => f.write_str("   |")?,
                }
            }

            writeln!(f, " {rank}")?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        f.write_str("  ")?;
        for file in FILES.chars() {
            f.write_str("   ")?;
            f.write_char(file)?;
        }

        Ok(())
    }
}
