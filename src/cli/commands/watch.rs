//! Watch command - watch the computer play against itself.

use std::io::Write;
use std::time::Duration;

use gamesearch::game::{Engine, EngineInput, GameLoop};
use gamesearch::tictactoe::TicTacToeBoard;
use structopt::StructOpt;

use super::search_args::SearchArgs;
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(long = "position", default_value = ".........")]
    pub starting_position: TicTacToeBoard,
    #[structopt(
        long = "delay",
        default_value = "500",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
    #[structopt(flatten)]
    pub search: SearchArgs,
}

impl Command for WatchArgs {
    fn execute(self) {
        let engine = match Engine::new(self.starting_position, self.search.to_options()) {
            Ok(engine) => engine,
            Err(err) => {
                eprintln!("Invalid search options: {}", err);
                std::process::exit(1);
            }
        };
        let engine = engine.with_progress(|report| {
            eprint!(
                "\rsearching: {:>3}% ({} moves considered)",
                report.percent_done, report.num_moves_considered
            );
            if report.percent_done == 100 {
                eprintln!();
            }
            let _ = std::io::stderr().flush();
        });

        let mut game =
            GameLoop::new(engine, EngineInput).with_frame_delay(Duration::from_millis(self.delay_ms));
        if let Err(err) = game.run() {
            eprintln!("Game aborted: {}", err);
            std::process::exit(1);
        }
    }
}
