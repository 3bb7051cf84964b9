use crate::chess::{Board, Direction, Figure, ParsePositionError, Position, Promotion, Role};
use derive_more::{Display, Error, From};
use std::{fmt, str::FromStr};

/// The kind of a [`Move`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum MoveKind {
    #[display(fmt = "normal")]
    Normal,
    #[display(fmt = "double pawn push")]
    DoublePawn,
    #[display(fmt = "en passant")]
    EnPassant,
    #[display(fmt = "pawn promotion")]
    PawnPromotion,
    #[display(fmt = "kingside castle")]
    CastleKingside,
    #[display(fmt = "queenside castle")]
    CastleQueenside,
}

/// A chess move.
///
/// A move only describes how figures are displaced, it holds no board state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Move {
    /// Displaces a figure, possibly capturing whatever stands on the destination.
    Normal { whence: Position, whither: Position },

    /// Advances a pawn two squares, making it vulnerable to en passant.
    DoublePawn { whence: Position, whither: Position },

    /// Captures the pawn that just advanced two squares past `whither`.
    EnPassant { whence: Position, whither: Position },

    /// Replaces a pawn by a figure of the given [`Role`].
    PawnPromotion {
        whence: Position,
        whither: Position,
        role: Role,
    },

    /// Moves the king two squares towards the rook on column 7.
    CastleKingside { king: Position },

    /// Moves the king two squares towards the rook on column 0.
    CastleQueenside { king: Position },
}

impl Move {
    /// This move's [`MoveKind`].
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Normal { .. } => MoveKind::Normal,
            Move::DoublePawn { .. } => MoveKind::DoublePawn,
            Move::EnPassant { .. } => MoveKind::EnPassant,
            Move::PawnPromotion { .. } => MoveKind::PawnPromotion,
            Move::CastleKingside { .. } => MoveKind::CastleKingside,
            Move::CastleQueenside { .. } => MoveKind::CastleQueenside,
        }
    }

    /// The source [`Position`].
    pub fn whence(&self) -> Position {
        match *self {
            Move::Normal { whence, .. }
            | Move::DoublePawn { whence, .. }
            | Move::EnPassant { whence, .. }
            | Move::PawnPromotion { whence, .. } => whence,
            Move::CastleKingside { king } | Move::CastleQueenside { king } => king,
        }
    }

    /// The destination [`Position`].
    ///
    /// For castles, the square where the king lands.
    pub fn whither(&self) -> Position {
        match *self {
            Move::Normal { whither, .. }
            | Move::DoublePawn { whither, .. }
            | Move::EnPassant { whither, .. }
            | Move::PawnPromotion { whither, .. } => whither,
            Move::CastleKingside { king } => Position::new(king.row, 6),
            Move::CastleQueenside { king } => Position::new(king.row, 2),
        }
    }

    /// The [`Promotion`] specifier.
    pub fn promotion(&self) -> Promotion {
        match *self {
            Move::PawnPromotion { role, .. } => role.into(),
            _ => Promotion::None,
        }
    }

    /// Whether this is a promotion move.
    pub fn is_promotion(&self) -> bool {
        self.kind() == MoveKind::PawnPromotion
    }

    /// Whether this is a castling move.
    pub fn is_castling(&self) -> bool {
        matches!(
            self.kind(),
            MoveKind::CastleKingside | MoveKind::CastleQueenside
        )
    }

    /// The square a pawn passes over when advancing two squares.
    pub fn skipped(&self) -> Option<Position> {
        match *self {
            Move::DoublePawn { whence, whither } => {
                Some(Position::new((whence.row + whither.row) / 2, whence.col))
            }

            _ => None,
        }
    }

    /// Where the pawn captured en passant stands.
    pub fn captured(&self) -> Option<Position> {
        match *self {
            Move::EnPassant { whence, whither } => Some(Position::new(whence.row, whither.col)),
            _ => None,
        }
    }

    /// Where the rook moves from and to when castling.
    pub fn rook(&self) -> Option<(Position, Position)> {
        match *self {
            Move::CastleKingside { king } => Some((
                Position::new(king.row, 7),
                Position::new(king.row, 5),
            )),

            Move::CastleQueenside { king } => Some((
                Position::new(king.row, 0),
                Position::new(king.row, 3),
            )),

            _ => None,
        }
    }

    /// This move with the chosen [`Promotion`].
    ///
    /// Promotion moves require a choice, [`Promotion::None`] cancels them.
    /// Any other move only accepts [`Promotion::None`].
    pub fn promote(self, p: Promotion) -> Option<Self> {
        match self {
            Move::PawnPromotion {
                whence, whither, ..
            } => Option::<Role>::from(p).map(|role| Move::PawnPromotion {
                whence,
                whither,
                role,
            }),

            m if p == Promotion::None => Some(m),
            _ => None,
        }
    }

    /// Applies this move to the [`Board`].
    ///
    /// Nothing happens if there is no figure on [`Move::whence`].
    pub fn apply(&self, board: &mut Board) {
        match *self {
            Move::Normal { whence, whither } => relocate(board, whence, whither),

            Move::DoublePawn { whence, whither } => {
                if let Some(f) = board[whence] {
                    board.set_pawn_skip(f.color(), self.skipped());
                }

                relocate(board, whence, whither);
            }

            Move::EnPassant { whence, whither } => {
                if board[whence].is_some() {
                    relocate(board, whence, whither);
                    board[Position::new(whence.row, whither.col)] = None;
                }
            }

            Move::PawnPromotion {
                whence,
                whither,
                role,
            } => {
                if let Some(pawn) = board[whence].take() {
                    board[whither] = Some(Figure::new(role, pawn.color()).moved());
                }
            }

            Move::CastleKingside { king } | Move::CastleQueenside { king } => {
                if board[king].is_some() {
                    relocate(board, king, self.whither());
                    if let Some((whence, whither)) = self.rook() {
                        relocate(board, whence, whither);
                    }
                }
            }
        }
    }

    /// Whether this move leaves the own king out of check.
    ///
    /// Castles additionally require that the king is not in check to begin with
    /// and that it does not pass through an attacked square.
    pub fn is_legal(&self, board: &Board) -> bool {
        let color = match board[self.whence()] {
            Some(f) => f.color(),
            None => return false,
        };

        let towards = match self {
            Move::CastleKingside { .. } => Direction::EAST,
            Move::CastleQueenside { .. } => Direction::WEST,

            _ => {
                let mut copy = board.copy();
                self.apply(&mut copy);
                return !copy.is_in_check(color);
            }
        };

        if board.is_in_check(color) {
            return false;
        }

        let mut copy = board.copy();
        let mut king = self.whence();
        for _ in 0..2 {
            relocate(&mut copy, king, king + towards);
            king += towards;

            if copy.is_in_check(color) {
                return false;
            }
        }

        true
    }
}

fn relocate(board: &mut Board, whence: Position, whither: Position) {
    if let Some(mut f) = board[whence].take() {
        f.set_moved();
        board[whither] = Some(f);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.whence(), self.whither(), self.promotion())
    }
}

/// A request to move a figure, in [pure coordinate notation].
///
/// It only becomes a [`Move`] once matched against the legal moves of a game.
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{whence}{whither}{promotion}")]
pub struct MoveIntent {
    pub whence: Position,
    pub whither: Position,
    pub promotion: Promotion,
}

impl MoveIntent {
    /// Whether the [`Move`] fulfills this request.
    pub fn matches(&self, m: &Move) -> bool {
        m.whence() == self.whence && m.whither() == self.whither && m.promotion() == self.promotion
    }
}

impl From<Move> for MoveIntent {
    fn from(m: Move) -> Self {
        MoveIntent {
            whence: m.whence(),
            whither: m.whither(),
            promotion: m.promotion(),
        }
    }
}

/// The reason why parsing [`MoveIntent`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseMoveError {
    #[display(fmt = "failed to parse move, {_0}")]
    InvalidSquare(ParsePositionError),
    #[display(fmt = "failed to parse move, expected an optional promotion `[nbrq]`")]
    InvalidPromotion,
}

impl FromStr for MoveIntent {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let whence = s.get(..2).ok_or(ParsePositionError)?.parse::<Position>()?;
        let whither = s.get(2..4).ok_or(ParsePositionError)?.parse::<Position>()?;
        let promotion = s
            .get(4..)
            .and_then(|p| p.parse::<Promotion>().ok())
            .ok_or(ParseMoveError::InvalidPromotion)?;

        Ok(MoveIntent {
            whence,
            whither,
            promotion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Color, PromotionRule};
    use test_strategy::proptest;

    fn sq(s: &str) -> Position {
        s.parse().unwrap()
    }

    fn figure(r: Role, c: Color) -> Option<Figure> {
        Some(Figure::new(r, c))
    }

    #[test]
    fn normal_move_relocates_figure_and_marks_it_as_moved() {
        let mut board = Board::default();
        Move::Normal {
            whence: sq("g1"),
            whither: sq("f3"),
        }
        .apply(&mut board);

        assert_eq!(board[sq("g1")], None);
        assert_eq!(board[sq("f3")], Some(Figure::new(Role::Knight, Color::White).moved()));
    }

    #[test]
    fn double_pawn_push_records_the_skipped_square() {
        let mut board = Board::default();
        let m = Move::DoublePawn {
            whence: sq("d7"),
            whither: sq("d5"),
        };

        assert_eq!(m.skipped(), Some(sq("d6")));

        m.apply(&mut board);
        assert_eq!(board.pawn_skip(Color::Black), Some(sq("d6")));
        assert_eq!(board.pawn_skip(Color::White), None);
        assert_eq!(board[sq("d5")].map(|f| f.role()), Some(Role::Pawn));
    }

    #[test]
    fn en_passant_removes_the_pawn_beside_the_origin() {
        let mut board = Board::empty();
        board[sq("e5")] = figure(Role::Pawn, Color::White);
        board[sq("d5")] = figure(Role::Pawn, Color::Black);

        let m = Move::EnPassant {
            whence: sq("e5"),
            whither: sq("d6"),
        };

        assert_eq!(m.captured(), Some(sq("d5")));

        m.apply(&mut board);
        assert_eq!(board[sq("d5")], None);
        assert_eq!(board[sq("e5")], None);
        assert_eq!(board[sq("d6")].map(|f| f.role()), Some(Role::Pawn));
    }

    #[proptest]
    fn promotion_replaces_pawn_by_a_figure_that_has_moved(c: Color, #[strategy(0i8..8)] col: i8) {
        let mut board = Board::empty();
        let whence = Position::new(1, col);
        let whither = Position::new(0, col);
        board[whence] = figure(Role::Pawn, c);

        Move::PawnPromotion {
            whence,
            whither,
            role: Role::Queen,
        }
        .apply(&mut board);

        assert_eq!(board[whence], None);
        assert_eq!(board[whither], Some(Figure::new(Role::Queen, c).moved()));
    }

    #[test]
    fn castles_relocate_king_and_rook() {
        let mut board = Board::empty();
        board[sq("e8")] = figure(Role::King, Color::Black);
        board[sq("a8")] = figure(Role::Rook, Color::Black);
        board[sq("h8")] = figure(Role::Rook, Color::Black);

        let mut kingside = board.clone();
        Move::CastleKingside { king: sq("e8") }.apply(&mut kingside);
        assert_eq!(kingside[sq("g8")], Some(Figure::new(Role::King, Color::Black).moved()));
        assert_eq!(kingside[sq("f8")], Some(Figure::new(Role::Rook, Color::Black).moved()));
        assert_eq!(kingside[sq("e8")], None);
        assert_eq!(kingside[sq("h8")], None);

        let mut queenside = board.clone();
        Move::CastleQueenside { king: sq("e8") }.apply(&mut queenside);
        assert_eq!(queenside[sq("c8")], Some(Figure::new(Role::King, Color::Black).moved()));
        assert_eq!(queenside[sq("d8")], Some(Figure::new(Role::Rook, Color::Black).moved()));
        assert_eq!(queenside[sq("a8")], None);
        assert_eq!(queenside[sq("e8")], None);
    }

    #[proptest]
    fn applying_move_from_empty_square_is_a_noop(whence: Position, whither: Position) {
        let mut board = Board::empty();
        board[sq("a1")] = figure(Role::Rook, Color::White);
        let before = board.clone();

        let whence = if whence == sq("a1") { sq("h8") } else { whence };
        Move::Normal { whence, whither }.apply(&mut board);
        assert_eq!(board, before);
    }

    #[test]
    fn moves_that_expose_the_king_are_illegal() {
        let mut board = Board::empty();
        board[sq("e1")] = figure(Role::King, Color::White);
        board[sq("e2")] = figure(Role::Bishop, Color::White);
        board[sq("e8")] = figure(Role::Rook, Color::Black);

        let pinned = Move::Normal {
            whence: sq("e2"),
            whither: sq("d3"),
        };

        let sidestep = Move::Normal {
            whence: sq("e1"),
            whither: sq("d1"),
        };

        assert!(!pinned.is_legal(&board));
        assert!(sidestep.is_legal(&board));
    }

    #[test]
    fn moves_from_empty_squares_are_illegal() {
        let board = Board::default();
        let m = Move::Normal {
            whence: sq("e4"),
            whither: sq("e5"),
        };

        assert!(!m.is_legal(&board));
    }

    #[test]
    fn castling_through_an_attacked_square_is_illegal() {
        let mut board = Board::empty();
        board[sq("e1")] = figure(Role::King, Color::White);
        board[sq("a1")] = figure(Role::Rook, Color::White);
        board[sq("h1")] = figure(Role::Rook, Color::White);
        board[sq("f8")] = figure(Role::Rook, Color::Black);

        assert!(!Move::CastleKingside { king: sq("e1") }.is_legal(&board));
        assert!(Move::CastleQueenside { king: sq("e1") }.is_legal(&board));
    }

    #[test]
    fn castling_into_check_is_illegal() {
        let mut board = Board::empty();
        board[sq("e1")] = figure(Role::King, Color::White);
        board[sq("a1")] = figure(Role::Rook, Color::White);
        board[sq("c8")] = figure(Role::Rook, Color::Black);

        assert!(!Move::CastleQueenside { king: sq("e1") }.is_legal(&board));
    }

    #[test]
    fn castling_out_of_check_is_illegal() {
        let mut board = Board::empty();
        board[sq("e1")] = figure(Role::King, Color::White);
        board[sq("h1")] = figure(Role::Rook, Color::White);
        board[sq("e8")] = figure(Role::Rook, Color::Black);

        assert!(!Move::CastleKingside { king: sq("e1") }.is_legal(&board));
    }

    #[test]
    fn queenside_castle_ignores_attacks_on_the_square_next_to_the_rook() {
        let mut board = Board::empty();
        board[sq("e1")] = figure(Role::King, Color::White);
        board[sq("a1")] = figure(Role::Rook, Color::White);
        board[sq("b8")] = figure(Role::Rook, Color::Black);

        assert!(Move::CastleQueenside { king: sq("e1") }.is_legal(&board));
    }

    #[test]
    fn castles_land_the_king_on_column_six_or_two() {
        let ks = Move::CastleKingside { king: sq("e1") };
        let qs = Move::CastleQueenside { king: sq("e8") };

        assert_eq!(ks.whither(), sq("g1"));
        assert_eq!(ks.rook(), Some((sq("h1"), sq("f1"))));
        assert_eq!(qs.whither(), sq("c8"));
        assert_eq!(qs.rook(), Some((sq("a8"), sq("d8"))));
        assert_eq!(ks.to_string(), "e1g1");
    }

    #[test]
    fn promotion_moves_carry_the_chosen_role() {
        let m = Move::PawnPromotion {
            whence: sq("e7"),
            whither: sq("e8"),
            role: Role::Queen,
        };

        assert_eq!(m.kind(), MoveKind::PawnPromotion);
        assert_eq!(m.to_string(), "e7e8q");
        assert_eq!(m.promote(Promotion::Knight).map(|m| m.promotion()), Some(Promotion::Knight));
        assert_eq!(m.promote(Promotion::None), None);
    }

    #[proptest]
    fn only_promotions_accept_a_choice(whence: Position, whither: Position, #[filter(#p != Promotion::None)] p: Promotion) {
        let m = Move::Normal { whence, whither };
        assert_eq!(m.promote(Promotion::None), Some(m));
        assert_eq!(m.promote(p), None);
    }

    #[test]
    fn promotion_rule_is_carried_into_copies() {
        let board = Board::empty().with_rule(PromotionRule::RowOrFileZero);
        assert_eq!(board.copy().rule(), PromotionRule::RowOrFileZero);
    }

    #[proptest]
    fn parsing_printed_move_intent_is_an_identity(i: MoveIntent) {
        assert_eq!(i.to_string().parse(), Ok(i));
    }

    #[proptest]
    fn move_intent_matches_the_move_it_was_made_from(whence: Position, whither: Position, r: Role) {
        let m = Move::PawnPromotion { whence, whither, role: r };
        assert!(MoveIntent::from(m).matches(&m));
    }

    #[test]
    fn parsing_move_intent_fails_for_invalid_input() {
        use ParseMoveError::*;
        assert_eq!("e2".parse::<MoveIntent>(), Err(InvalidSquare(ParsePositionError)));
        assert_eq!("e2x4".parse::<MoveIntent>(), Err(InvalidSquare(ParsePositionError)));
        assert_eq!("e7e8k".parse::<MoveIntent>(), Err(InvalidPromotion));
        assert_eq!("e7e8qq".parse::<MoveIntent>(), Err(InvalidPromotion));
    }
}
