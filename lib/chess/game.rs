use crate::chess::{Board, Color, KingNotFound, Move, MoveIntent, Outcome, Position, Role};
use std::collections::HashSet;
use tracing::{info, instrument, warn};

/// A game of chess under standard rules.
///
/// Resignation, draw offers, repetitions and the 50-move rule are not tracked.
#[derive(Debug, Clone)]
pub struct Game {
    player: Color,
    board: Board,
    outcome: Option<Outcome>,
    rejected: HashSet<Move>,
}

impl Default for Game {
    /// A new game from the standard starting position, White to move.
    fn default() -> Self {
        Game::from_board(Color::White, Board::default())
    }
}

impl Game {
    /// A new game from the standard starting position, White to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// A game that continues from an arbitrary [`Board`].
    ///
    /// The game is over right away if `player` has no legal moves.
    pub fn from_board(player: Color, board: Board) -> Self {
        let mut game = Game {
            player,
            board,
            outcome: None,
            rejected: HashSet::new(),
        };

        game.evaluate();
        game
    }

    /// The side to move.
    pub fn player(&self) -> Color {
        self.player
    }

    /// The current [`Board`].
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The result of the game if it has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The castles that were on offer during the last call to [`Game::legal_moves`],
    /// but are illegal because the king is in check or would pass through check.
    pub fn rejected_castles(&self) -> &HashSet<Move> {
        &self.rejected
    }

    /// The legal moves of the figure on `whence`.
    ///
    /// Empty unless a figure of the side to move stands there.
    #[instrument(level = "trace", skip(self), fields(%whence))]
    pub fn legal_moves(&mut self, whence: Position) -> Vec<Move> {
        self.rejected.clear();

        let figure = match Board::is_inside(whence).then(|| self.board[whence]) {
            Some(Some(f)) if f.color() == self.player => f,
            _ => return Vec::new(),
        };

        let (legal, illegal): (Vec<_>, Vec<_>) = figure
            .moves(whence, &self.board)
            .into_iter()
            .partition(|m| m.is_legal(&self.board));

        if figure.role() == Role::King {
            self.rejected
                .extend(illegal.into_iter().filter(Move::is_castling));
        }

        legal
    }

    /// The legal moves of all figures of a [`Color`].
    pub fn all_legal_moves(&self, c: Color) -> impl Iterator<Item = Move> + '_ {
        let board = &self.board;
        board
            .figures_of(c)
            .flat_map(move |(p, f)| f.moves(p, board))
            .filter(move |m| m.is_legal(board))
    }

    /// The legal move of the side to move that fulfills the [`MoveIntent`], if any.
    #[instrument(level = "trace", skip(self), fields(%intent), ret)]
    pub fn select(&mut self, intent: MoveIntent) -> Option<Move> {
        self.legal_moves(intent.whence)
            .into_iter()
            .find(|m| intent.matches(m))
    }

    /// Plays a [`Move`] for the side to move and passes the turn.
    ///
    /// The move is not validated, use [`Game::legal_moves`] or [`Game::select`]
    /// to obtain legal moves. Nothing happens once the game has ended.
    #[instrument(level = "debug", skip(self), fields(player = %self.player, %m))]
    pub fn make_move(&mut self, m: Move) {
        if let Some(outcome) = self.outcome {
            warn!(%outcome, "ignoring move after the game has ended");
            return;
        }

        self.board.set_pawn_skip(self.player, None);
        m.apply(&mut self.board);
        self.player = !self.player;
        self.evaluate();
    }

    /// Where the king of the side to move stands if it is in check.
    pub fn checked_king(&self) -> Result<Option<Position>, KingNotFound> {
        let king = self.board.king(self.player)?;
        Ok(self.board.is_in_check(self.player).then_some(king))
    }

    fn evaluate(&mut self) {
        if self.all_legal_moves(self.player).next().is_some() {
            return;
        }

        let outcome = if self.board.is_in_check(self.player) {
            Outcome::win(!self.player)
        } else {
            Outcome::draw()
        };

        info!(%outcome, "game over");
        self.outcome = Some(outcome);
    }
}
