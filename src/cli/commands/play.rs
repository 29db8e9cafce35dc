//! Play command - play a game against the computer.

use gamesearch::game::{ConditionalInput, Engine, GameLoop};
use gamesearch::tictactoe::{Player, TicTacToeBoard};
use structopt::StructOpt;

use super::search_args::SearchArgs;
use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(long = "human", default_value = "x", help = "The side you play, x or o")]
    pub human: Player,
    #[structopt(long = "position", default_value = ".........")]
    pub starting_position: TicTacToeBoard,
    #[structopt(flatten)]
    pub search: SearchArgs,
}

impl Command for PlayArgs {
    fn execute(self) {
        let engine = match Engine::new(self.starting_position, self.search.to_options()) {
            Ok(engine) => engine,
            Err(err) => {
                eprintln!("Invalid search options: {}", err);
                std::process::exit(1);
            }
        };

        let mut game = GameLoop::new(engine, ConditionalInput { human: self.human });
        if let Err(err) = game.run() {
            eprintln!("Game aborted: {}", err);
            std::process::exit(1);
        }
    }
}
