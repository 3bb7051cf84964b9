use crate::chess::Color;
use derive_more::Display;

/// Why a game ended.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Reason {
    #[display(fmt = "checkmate")]
    Checkmate,
    #[display(fmt = "stalemate")]
    Stalemate,
}

/// One of the possible outcomes of a chess game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    /// The given side won by checkmating the opponent.
    #[display(fmt = "checkmate by the {_0} player")]
    Checkmate(Color),

    #[display(fmt = "stalemate")]
    Stalemate,
}

impl Outcome {
    /// The outcome of a game won by a [`Color`].
    pub fn win(winner: Color) -> Self {
        Outcome::Checkmate(winner)
    }

    /// The outcome of a drawn game.
    pub fn draw() -> Self {
        Outcome::Stalemate
    }

    /// Whether the outcome is a [draw] and neither side has won.
    ///
    /// [draw]: https://www.chessprogramming.org/Draw
    pub fn is_draw(&self) -> bool {
        !self.is_decisive()
    }

    /// Whether the outcome is a decisive and one of the sides has won.
    pub fn is_decisive(&self) -> bool {
        matches!(self, Outcome::Checkmate(_))
    }

    /// The winning side, if the outcome is [decisive](`Self::is_decisive`).
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Checkmate(c) => Some(c),
            Outcome::Stalemate => None,
        }
    }

    /// Why the game ended.
    pub fn reason(&self) -> Reason {
        match self {
            Outcome::Checkmate(_) => Reason::Checkmate,
            Outcome::Stalemate => Reason::Stalemate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn outcome_is_either_draw_or_decisive(o: Outcome) {
        assert_ne!(o.is_draw(), o.is_decisive());
    }

    #[proptest]
    fn neither_side_wins_if_draw(#[filter(#o.is_draw())] o: Outcome) {
        assert_eq!(o.winner(), None);
        assert_eq!(o.reason(), Reason::Stalemate);
    }

    #[proptest]
    fn side_that_checkmates_wins(c: Color) {
        assert_eq!(Outcome::win(c).winner(), Some(c));
        assert_eq!(Outcome::win(c).reason(), Reason::Checkmate);
    }

    #[test]
    fn draw_is_a_stalemate() {
        assert_eq!(Outcome::draw(), Outcome::Stalemate);
        assert_eq!(Outcome::draw().to_string(), "stalemate");
    }
}
