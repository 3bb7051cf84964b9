use crate::io::Io;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{Board, Color, Game, PromotionRule};
use rayon::prelude::*;
use std::io::{empty, stdout};
use std::time::Instant;
use tracing::{info, instrument};

/// Count the leaf nodes of the tree of legal moves from the initial position.
///
/// See <https://www.chessprogramming.org/Perft>.
#[derive(Debug, Parser)]
pub struct Perft {
    /// How many plies deep to expand the tree.
    depth: u8,

    /// Which squares make a pawn promote.
    #[clap(long, default_value_t)]
    promotion_rule: PromotionRule,
}

impl Perft {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let game = Game::from_board(Color::White, Board::default().with_rule(self.promotion_rule));

        let timer = Instant::now();
        let nodes = perft(&game, self.depth);
        info!(depth = self.depth, nodes, elapsed = ?timer.elapsed());

        let mut io = Io::new(stdout(), empty());
        io.send(nodes)?;
        Ok(io.flush()?)
    }
}

fn perft(game: &Game, depth: u8) -> usize {
    match depth {
        0 => 1,
        1 => game.all_legal_moves(game.player()).count(),
        d => game
            .all_legal_moves(game.player())
            .par_bridge()
            .map(|m| {
                let mut next = game.clone();
                next.make_move(m);
                perft(&next, d - 1)
            })
            .sum(),
    }
}
