mod cli;

use cli::commands::Command;
use cli::Gamesearch;
use structopt::StructOpt;

fn main() {
    env_logger::init();

    #[cfg(feature = "instrumentation")]
    if let Err(err) = gamesearch::instrumentation::init_tracing() {
        eprintln!("Failed to set tracing subscriber: {}", err);
    }

    Gamesearch::from_args().execute();

    #[cfg(feature = "instrumentation")]
    gamesearch::instrumentation::print_timing_statistics();
}
