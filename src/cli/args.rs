//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    best_move::BestMoveArgs, play::PlayArgs, solve_queens::SolveQueensArgs, watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "gamesearch",
    about = "Two-player game tree search (minimax, negamax, negascout, UCT) played out on tic-tac-toe"
)]
pub enum Gamesearch {
    #[structopt(
        name = "play",
        about = "Play tic-tac-toe against the computer. You play x unless you pass `--human o`. Enter moves as `row col`, counted from 1. The search is configured with the shared search flags, e.g. `--strategy negascout --depth 4`."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "watch",
        about = "Watch the computer play against itself. Each move is searched on a worker thread and its progress is printed as it runs."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "best-move",
        about = "Search a position given as nine cells of x, o and . in row-major order with `--position` (required), and print the chosen move, its value, the principal variation and search statistics."
    )]
    BestMove(BestMoveArgs),
    #[structopt(
        name = "solve-queens",
        about = "Solve the N-Queens puzzle for `--size` (default: 8) by brute force, spread over `--threads` workers unless `--sequential` is given."
    )]
    SolveQueens(SolveQueensArgs),
}

impl crate::cli::commands::Command for Gamesearch {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Play(cmd),
            Watch(cmd),
            BestMove(cmd),
            SolveQueens(cmd),
        }
    }
}
