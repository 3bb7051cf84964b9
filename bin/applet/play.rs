use crate::io::Io;
use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::chess::{Board, Color, Game, MoveIntent, Position, Promotion, PromotionRule};
use std::io::{stdin, stdout, Read, Write};
use tracing::{info, instrument};

/// A game of chess between two players sharing the terminal.
#[derive(Debug, Default, Parser)]
pub struct Play {
    /// Which squares make a pawn promote.
    #[clap(long, default_value_t)]
    promotion_rule: PromotionRule,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let io = Io::new(stdout(), stdin());
        Session::new(self.promotion_rule, io).run()
    }
}

/// Commands understood by the interactive session.
#[derive(Debug, Clone, Eq, PartialEq, Parser)]
#[clap(
    name = "",
    multicall = true,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
enum Cmd {
    /// Move a figure on the board.
    #[clap(after_help = r#"SYNTAX:
    <MOVE>          ::= <SQUARE:from><SQUARE:to>[<PROMOTION>]
    <SQUARE>        ::= <FILE><RANK>
    <FILE>          ::= a|b|c|d|e|f|g|h
    <RANK>          ::= 1|2|3|4|5|6|7|8
    <PROMOTION>     ::= q|r|b|n"#)]
    Move {
        /// A chess move in pure coordinate notation.
        intent: MoveIntent,
    },

    /// List the legal moves of the figure on a square.
    Moves {
        /// A square in coordinate notation, e.g. `e2`.
        square: Position,
    },

    /// Start over from the initial position.
    New,

    /// Leave the game.
    Quit,
}

struct Session<W: Write, R: Read> {
    rule: PromotionRule,
    game: Game,
    io: Io<W, R>,
}

impl<W: Write, R: Read> Session<W, R> {
    fn new(rule: PromotionRule, io: Io<W, R>) -> Self {
        Session {
            rule,
            game: Self::fresh(rule),
            io,
        }
    }

    fn fresh(rule: PromotionRule) -> Game {
        Game::from_board(Color::White, Board::default().with_rule(rule))
    }

    fn run(&mut self) -> Result<(), Anyhow> {
        self.show()?;

        loop {
            let question = format!("{} to move:", self.game.player());
            let line = match self.io.prompt(question).context("failed to read the next command")? {
                Some(line) => line,
                None => break,
            };

            if line.trim().is_empty() {
                continue;
            }

            match Cmd::try_parse_from(line.split_whitespace()) {
                Ok(Cmd::Quit) => break,
                Ok(Cmd::New) => {
                    self.game = Self::fresh(self.rule);
                    info!(rule = %self.rule, "new game");
                    self.show()?;
                }

                Ok(Cmd::Moves { square }) => self.list(square)?,
                Ok(Cmd::Move { intent }) => self.play(intent)?,
                Err(e) => self.io.send(e)?,
            }
        }

        Ok(self.io.flush()?)
    }

    fn show(&mut self) -> Result<(), Anyhow> {
        self.io.send(self.game.board())?;

        if let Some(outcome) = self.game.outcome() {
            self.io.send(format_args!("game over, {outcome}"))?;
        } else if let Some(king) = self.game.checked_king()? {
            let player = self.game.player();
            self.io.send(format_args!("the {player} king on {king} is in check"))?;
        }

        Ok(())
    }

    fn list(&mut self, square: Position) -> Result<(), Anyhow> {
        let moves = self.game.legal_moves(square);

        if moves.is_empty() {
            self.io.send(format_args!("no legal moves from {square}"))?;
        } else {
            let moves: Vec<_> = moves.iter().map(ToString::to_string).collect();
            self.io.send(moves.join(" "))?;
        }

        if !self.game.rejected_castles().is_empty() {
            let rejected: Vec<_> = self.game.rejected_castles().iter().map(ToString::to_string).collect();
            self.io.send(format_args!("cannot castle through check: {}", rejected.join(" ")))?;
        }

        Ok(())
    }

    fn play(&mut self, mut intent: MoveIntent) -> Result<(), Anyhow> {
        if let Some(outcome) = self.game.outcome() {
            self.io.send(format_args!("the game is over, {outcome}, type `new` to play again"))?;
            return Ok(());
        }

        let promotes = self
            .game
            .legal_moves(intent.whence)
            .iter()
            .any(|m| m.is_promotion() && m.whither() == intent.whither);

        if promotes && intent.promotion == Promotion::None {
            intent.promotion = match self.choose_promotion()? {
                Some(p) => p,
                None => {
                    self.io.send("promotion cancelled")?;
                    return Ok(());
                }
            };
        }

        match self.game.select(intent) {
            Some(m) => {
                self.game.make_move(m);
                self.show()
            }

            None => Ok(self.io.send(format_args!("illegal move `{intent}`"))?),
        }
    }

    fn choose_promotion(&mut self) -> Result<Option<Promotion>, Anyhow> {
        let answer = self
            .io
            .prompt("promote to (q|r|b|n)?")
            .context("failed to read the promotion choice")?;

        let choice = answer.and_then(|line| line.trim().parse::<Promotion>().ok());
        Ok(choice.filter(|&p| p != Promotion::None))
    }
}
