//! Best move command - search one position and report what was found.

use gamesearch::game::Engine;
use gamesearch::search::TwoPlayerMove;
use gamesearch::tictactoe::TicTacToeBoard;
use structopt::StructOpt;

use super::search_args::SearchArgs;
use super::Command;

#[derive(StructOpt)]
pub struct BestMoveArgs {
    #[structopt(long = "position")]
    pub starting_position: TicTacToeBoard,
    #[structopt(flatten)]
    pub search: SearchArgs,
}

impl Command for BestMoveArgs {
    fn execute(self) {
        let mut engine = match Engine::new(self.starting_position, self.search.to_options()) {
            Ok(engine) => engine,
            Err(err) => {
                eprintln!("Invalid search options: {}", err);
                std::process::exit(1);
            }
        };

        println!("{}\n", engine.board());
        match engine.get_best_move() {
            Ok(result) => {
                println!("best move: {}", result.best_move);
                println!("value:     {}", result.value);
                let line: Vec<String> = result
                    .principal_variation
                    .iter()
                    .map(|m| format!("{} [{}]", m, m.value()))
                    .collect();
                println!("line:      {}", line.join(", "));
                println!("\n{}", result.stats);
            }
            Err(err) => eprintln!("Failed to calculate best move: {}", err),
        }
    }
}
