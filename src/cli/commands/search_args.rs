//! Search flags shared by every command that runs a search.

use gamesearch::search::{MonteCarloSearchOptions, SearchOptions, StrategyType, Weights};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
pub struct SearchArgs {
    #[structopt(short, long, default_value = "4", help = "Plies to look ahead")]
    pub depth: i32,
    #[structopt(
        short,
        long,
        default_value = "negascout",
        help = "One of minimax, negamax, negamax-memory, negascout, negascout-memory, uct"
    )]
    pub strategy: StrategyType,
    #[structopt(long = "no-alpha-beta", help = "Disable alpha-beta pruning")]
    pub no_alpha_beta: bool,
    #[structopt(long, help = "Extend the search past the depth limit while a line is threatened")]
    pub quiescence: bool,
    #[structopt(long = "max-quiescent-depth", default_value = "12")]
    pub max_quiescent_depth: i32,
    #[structopt(
        long = "percent-best-moves",
        default_value = "100",
        help = "Percentage of the generated moves to search at each ply"
    )]
    pub percent_best_moves: u32,
    #[structopt(long = "min-best-moves", default_value = "10")]
    pub min_best_moves: usize,
    #[structopt(
        long = "percent-less-than-best",
        default_value = "0",
        help = "Also keep moves within this percentage of the value spread below the best"
    )]
    pub percent_less_than_best: u32,
    #[structopt(long = "tt-capacity", default_value = "100000")]
    pub tt_capacity: usize,
    #[structopt(long, default_value = "10000", help = "UCT simulations per move")]
    pub simulations: usize,
    #[structopt(long = "explore-exploit", default_value = "1.0")]
    pub explore_exploit: f64,
    #[structopt(long = "random-look-ahead", default_value = "20")]
    pub random_look_ahead: usize,
    #[structopt(long, default_value = "0", help = "Seed for UCT playouts")]
    pub seed: u64,
    #[structopt(
        long,
        default_value = "1,10",
        help = "Comma separated weights of open lines holding one and two pieces"
    )]
    pub weights: Weights,
}

impl SearchArgs {
    pub fn to_options(&self) -> SearchOptions {
        SearchOptions::new(self.strategy)
            .with_look_ahead(self.depth)
            .with_alpha_beta(!self.no_alpha_beta)
            .with_quiescence(self.quiescence)
            .with_max_quiescent_depth(self.max_quiescent_depth)
            .with_transposition_table_capacity(self.tt_capacity)
            .with_best_moves(self.percent_best_moves, self.min_best_moves)
            .with_percent_less_than_best_thresh(self.percent_less_than_best)
            .with_monte_carlo(MonteCarloSearchOptions {
                max_simulations: self.simulations,
                explore_exploit_ratio: self.explore_exploit,
                random_look_ahead: self.random_look_ahead,
                seed: self.seed,
            })
            .with_weights(self.weights.clone())
    }
}
