use crate::chess::{Board, Color, Direction, Move, Position, Promotion, Role};
use arrayvec::ArrayVec;
use std::fmt;

/// The raw candidate moves of a single [`Figure`].
///
/// A queen in the center of an empty board, the most mobile figure, has 27.
pub type Moves = ArrayVec<Move, 32>;

/// A chess piece of a certain [`Color`] that remembers whether it has moved.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Figure {
    role: Role,
    color: Color,
    moved: bool,
}

impl Figure {
    /// Constructs a [`Figure`] that has not moved yet.
    pub fn new(role: Role, color: Color) -> Self {
        Figure {
            role,
            color,
            moved: false,
        }
    }

    /// This figure, marked as having moved.
    pub fn moved(mut self) -> Self {
        self.moved = true;
        self
    }

    /// This figure's [`Role`].
    pub fn role(&self) -> Role {
        self.role
    }

    /// This figure's [`Color`].
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether this figure has moved since the game started.
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Marks this figure as having moved.
    pub fn set_moved(&mut self) {
        self.moved = true;
    }

    /// The candidate moves of this figure standing on `whence`.
    ///
    /// These follow how the figure moves, but ignore whether the move would
    /// leave the own king in check, see [`Move::is_legal`].
    ///
    /// A king offers castles only while unmoved on the `e` file, since castling
    /// always lands it on the `g` or `c` file next to the corner rook.
    pub fn moves(&self, whence: Position, board: &Board) -> Moves {
        let mut moves = Moves::new();

        match self.role {
            Role::Pawn => {
                self.advances(whence, board, &mut moves);
                self.captures(whence, board, &mut moves);
            }

            Role::Knight => self.leaps(whence, board, &Direction::KNIGHT, &mut moves),
            Role::Bishop => self.slides(whence, board, &Direction::DIAGONAL, &mut moves),
            Role::Rook => self.slides(whence, board, &Direction::ORTHOGONAL, &mut moves),
            Role::Queen => self.slides(whence, board, &Direction::ALL, &mut moves),

            Role::King => {
                self.leaps(whence, board, &Direction::ALL, &mut moves);
                self.castles(whence, board, &mut moves);
            }
        }

        moves
    }

    /// Whether this figure standing on `whence` attacks the opponent's king.
    ///
    /// Never checks for legality, which itself depends on whether kings are attacked.
    pub fn can_capture_opponent_king(&self, whence: Position, board: &Board) -> bool {
        let mut moves = Moves::new();

        match self.role {
            Role::Pawn => self.captures(whence, board, &mut moves),
            Role::King => self.leaps(whence, board, &Direction::ALL, &mut moves),
            _ => moves = self.moves(whence, board),
        }

        moves.iter().any(|m| {
            board[m.whither()].is_some_and(|f| f.role == Role::King && f.color != self.color)
        })
    }

    fn is_enemy(&self, f: &Figure) -> bool {
        f.color != self.color
    }

    fn slides(&self, whence: Position, board: &Board, dirs: &[Direction], moves: &mut Moves) {
        for &d in dirs {
            let mut whither = whence + d;
            while Board::is_inside(whither) {
                match board[whither] {
                    None => moves.push(Move::Normal { whence, whither }),

                    Some(f) => {
                        if self.is_enemy(&f) {
                            moves.push(Move::Normal { whence, whither });
                        }

                        break;
                    }
                }

                whither += d;
            }
        }
    }

    fn leaps(&self, whence: Position, board: &Board, dirs: &[Direction], moves: &mut Moves) {
        for &d in dirs {
            let whither = whence + d;
            if Board::is_inside(whither) && board[whither].map_or(true, |f| self.is_enemy(&f)) {
                moves.push(Move::Normal { whence, whither });
            }
        }
    }

    fn forward(&self) -> Direction {
        match self.color {
            Color::White => Direction::NORTH,
            Color::Black => Direction::SOUTH,
        }
    }

    fn advances(&self, whence: Position, board: &Board, moves: &mut Moves) {
        let once = whence + self.forward();
        if !Board::is_inside(once) || !board.is_empty(once) {
            return;
        }

        self.step(whence, once, board, moves);

        let twice = once + self.forward();
        if !self.moved && Board::is_inside(twice) && board.is_empty(twice) {
            moves.push(Move::DoublePawn {
                whence,
                whither: twice,
            });
        }
    }

    fn captures(&self, whence: Position, board: &Board, moves: &mut Moves) {
        for side in [Direction::EAST, Direction::WEST] {
            let whither = whence + self.forward() + side;

            if board.pawn_skip(!self.color) == Some(whither) {
                moves.push(Move::EnPassant { whence, whither });
            } else if Board::is_inside(whither)
                && board[whither].is_some_and(|f| self.is_enemy(&f))
            {
                self.step(whence, whither, board, moves);
            }
        }
    }

    fn step(&self, whence: Position, whither: Position, board: &Board, moves: &mut Moves) {
        if board.rule().promotes(self.color, whither) {
            moves.extend(
                Promotion::CHOICES
                    .into_iter()
                    .filter_map(Option::<Role>::from)
                    .map(|role| Move::PawnPromotion {
                        whence,
                        whither,
                        role,
                    }),
            );
        } else {
            moves.push(Move::Normal { whence, whither });
        }
    }

    fn castles(&self, whence: Position, board: &Board, moves: &mut Moves) {
        if self.moved || whence.col != 4 {
            return;
        }

        if self.can_castle_with(whence, board, 7) {
            moves.push(Move::CastleKingside { king: whence });
        }

        if self.can_castle_with(whence, board, 0) {
            moves.push(Move::CastleQueenside { king: whence });
        }
    }

    /// Whether the rook in the corner at column `col` has not moved and nothing stands between.
    fn can_castle_with(&self, whence: Position, board: &Board, col: i8) -> bool {
        let rook = Figure::new(Role::Rook, self.color);
        let between = if col > whence.col {
            whence.col + 1..col
        } else {
            col + 1..whence.col
        };

        board[Position::new(whence.row, col)] == Some(rook)
            && between.into_iter().all(|c| board.is_empty(Position::new(whence.row, c)))
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match (self.role, self.color) {
            (Role::Pawn, Color::White) => "♙",
            (Role::Knight, Color::White) => "♘",
            (Role::Bishop, Color::White) => "♗",
            (Role::Rook, Color::White) => "♖",
            (Role::Queen, Color::White) => "♕",
            (Role::King, Color::White) => "♔",
            (Role::Pawn, Color::Black) => "♟",
            (Role::Knight, Color::Black) => "♞",
            (Role::Bishop, Color::Black) => "♝",
            (Role::Rook, Color::Black) => "♜",
            (Role::Queen, Color::Black) => "♛",
            (Role::King, Color::Black) => "♚",
        };

        f.write_str(glyph)
    }
}
