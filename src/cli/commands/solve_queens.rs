//! Solve queens command - brute force the N-Queens puzzle.

use std::time::Instant;

use gamesearch::puzzle::{ConcurrentSolver, Queens, SequentialSolver};
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct SolveQueensArgs {
    #[structopt(short = "n", long, default_value = "8")]
    pub size: u8,
    #[structopt(short, long, default_value = "4")]
    pub threads: usize,
    #[structopt(long, help = "Search on one thread, always finding the same solution")]
    pub sequential: bool,
}

impl Command for SolveQueensArgs {
    fn execute(self) {
        let queens = Queens::new(self.size);
        let start = Instant::now();

        let solution = if self.sequential {
            SequentialSolver::new(&queens).solve()
        } else {
            match ConcurrentSolver::new(&queens, self.threads).solve() {
                Ok(solution) => solution,
                Err(err) => {
                    eprintln!("Failed to run solver: {}", err);
                    std::process::exit(1);
                }
            }
        };

        match solution {
            Some(solution) => {
                print!("{}", queens.render(&solution.position));
                println!(
                    "\nsolved in {:.2?}, {} positions examined",
                    start.elapsed(),
                    solution.positions_examined
                );
            }
            None => println!("no solution for {} queens", self.size),
        }
    }
}
