use crate::chess::{Color, Position};
use derive_more::{Display, Error};
use std::str::FromStr;

/// Which squares make a pawn promote.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum PromotionRule {
    /// A pawn promotes on the farthest rank from where its side starts.
    #[default]
    #[display(fmt = "last-rank")]
    LastRank,

    /// A pawn promotes on row 0 or column 0, regardless of its color.
    ///
    /// Only a White pawn reaching the eighth rank behaves as in standard chess,
    /// pawns moving into the a-file promote too, while Black pawns never promote
    /// on the first rank.
    #[display(fmt = "row-or-file-zero")]
    RowOrFileZero,
}

impl PromotionRule {
    /// Whether a pawn of the given [`Color`] promotes on arrival at `whither`.
    pub fn promotes(&self, c: Color, whither: Position) -> bool {
        match self {
            PromotionRule::LastRank => match c {
                Color::White => whither.row == 0,
                Color::Black => whither.row == 7,
            },

            PromotionRule::RowOrFileZero => whither.row == 0 || whither.col == 0,
        }
    }
}

/// The reason why parsing [`PromotionRule`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse promotion rule, expected `last-rank` or `row-or-file-zero`")]
pub struct ParsePromotionRuleError;

impl FromStr for PromotionRule {
    type Err = ParsePromotionRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-rank" => Ok(PromotionRule::LastRank),
            "row-or-file-zero" => Ok(PromotionRule::RowOrFileZero),
            _ => Err(ParsePromotionRuleError),
        }
    }
}
