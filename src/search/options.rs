//! Search configuration.

use super::strategy::StrategyType;
use super::transposition_table::DEFAULT_TRANSPOSITION_TABLE_CAPACITY;
use super::weights::Weights;
use super::SearchError;

pub const DEFAULT_LOOK_AHEAD: i32 = 4;
pub const DEFAULT_MAX_QUIESCENT_DEPTH: i32 = 12;
pub const DEFAULT_PERCENTAGE_BEST_MOVES: u32 = 100;
pub const DEFAULT_MIN_BEST_MOVES: usize = 10;
pub const DEFAULT_MAX_SIMULATIONS: usize = 10_000;
pub const DEFAULT_EXPLORE_EXPLOIT_RATIO: f64 = 1.0;
pub const DEFAULT_RANDOM_LOOK_AHEAD: usize = 20;

/// Options for the exhaustive (minimax family) strategies.
#[derive(Clone, Debug, PartialEq)]
pub struct BruteSearchOptions {
    pub look_ahead: i32,
    pub alpha_beta: bool,
    pub quiescence: bool,
    pub max_quiescent_depth: i32,
    pub transposition_table_capacity: usize,
}

impl Default for BruteSearchOptions {
    fn default() -> Self {
        Self {
            look_ahead: DEFAULT_LOOK_AHEAD,
            alpha_beta: true,
            quiescence: false,
            max_quiescent_depth: DEFAULT_MAX_QUIESCENT_DEPTH,
            transposition_table_capacity: DEFAULT_TRANSPOSITION_TABLE_CAPACITY,
        }
    }
}

/// How many of the generated moves are expanded at each ply.
#[derive(Clone, Debug, PartialEq)]
pub struct BestMovesSearchOptions {
    pub percentage_best_moves: u32,
    pub min_best_moves: usize,
    /// Moves whose value is within this percentage of the value spread below
    /// the best move are kept as well.
    pub percent_less_than_best_thresh: u32,
}

impl Default for BestMovesSearchOptions {
    fn default() -> Self {
        Self {
            percentage_best_moves: DEFAULT_PERCENTAGE_BEST_MOVES,
            min_best_moves: DEFAULT_MIN_BEST_MOVES,
            percent_less_than_best_thresh: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MonteCarloSearchOptions {
    pub max_simulations: usize,
    pub explore_exploit_ratio: f64,
    pub random_look_ahead: usize,
    pub seed: u64,
}

impl Default for MonteCarloSearchOptions {
    fn default() -> Self {
        Self {
            max_simulations: DEFAULT_MAX_SIMULATIONS,
            explore_exploit_ratio: DEFAULT_EXPLORE_EXPLOIT_RATIO,
            random_look_ahead: DEFAULT_RANDOM_LOOK_AHEAD,
            seed: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct SearchOptions {
    pub strategy: StrategyType,
    pub brute: BruteSearchOptions,
    pub best_moves: BestMovesSearchOptions,
    pub monte_carlo: MonteCarloSearchOptions,
    pub weights: Weights,
}

impl SearchOptions {
    pub fn new(strategy: StrategyType) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_look_ahead(mut self, look_ahead: i32) -> Self {
        self.brute.look_ahead = look_ahead;
        self
    }

    pub fn with_alpha_beta(mut self, alpha_beta: bool) -> Self {
        self.brute.alpha_beta = alpha_beta;
        self
    }

    pub fn with_quiescence(mut self, quiescence: bool) -> Self {
        self.brute.quiescence = quiescence;
        self
    }

    pub fn with_max_quiescent_depth(mut self, depth: i32) -> Self {
        self.brute.max_quiescent_depth = depth;
        self
    }

    pub fn with_transposition_table_capacity(mut self, capacity: usize) -> Self {
        self.brute.transposition_table_capacity = capacity;
        self
    }

    pub fn with_best_moves(mut self, percentage: u32, min_best_moves: usize) -> Self {
        self.best_moves.percentage_best_moves = percentage;
        self.best_moves.min_best_moves = min_best_moves;
        self
    }

    pub fn with_percent_less_than_best_thresh(mut self, percent: u32) -> Self {
        self.best_moves.percent_less_than_best_thresh = percent;
        self
    }

    pub fn with_monte_carlo(mut self, monte_carlo: MonteCarloSearchOptions) -> Self {
        self.monte_carlo = monte_carlo;
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Rejects option combinations no strategy can run with.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.brute.look_ahead < 1 {
            return Err(SearchError::DepthTooLow);
        }
        if self.brute.max_quiescent_depth < 0 {
            return Err(SearchError::InvalidOptions(
                "max quiescent depth cannot be negative".to_string(),
            ));
        }
        if self.best_moves.percentage_best_moves > 100 {
            return Err(SearchError::InvalidOptions(format!(
                "percentage of best moves must be at most 100, got {}",
                self.best_moves.percentage_best_moves
            )));
        }
        if self.best_moves.percent_less_than_best_thresh > 100 {
            return Err(SearchError::InvalidOptions(format!(
                "percent less than best must be at most 100, got {}",
                self.best_moves.percent_less_than_best_thresh
            )));
        }
        if self.strategy == StrategyType::Uct {
            if self.monte_carlo.max_simulations == 0 {
                return Err(SearchError::InvalidOptions(
                    "at least one simulation is required".to_string(),
                ));
            }
            if !(self.monte_carlo.explore_exploit_ratio >= 0.0
                && self.monte_carlo.explore_exploit_ratio.is_finite())
            {
                return Err(SearchError::InvalidOptions(
                    "explore/exploit ratio must be a non-negative number".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SearchOptions::default().validate().is_ok());
        assert!(SearchOptions::new(StrategyType::Uct).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_options() {
        assert!(matches!(
            SearchOptions::default().with_look_ahead(0).validate(),
            Err(SearchError::DepthTooLow)
        ));
        assert!(matches!(
            SearchOptions::default().with_best_moves(101, 1).validate(),
            Err(SearchError::InvalidOptions(_))
        ));
        assert!(matches!(
            SearchOptions::default()
                .with_max_quiescent_depth(-1)
                .validate(),
            Err(SearchError::InvalidOptions(_))
        ));

        let mut uct = SearchOptions::new(StrategyType::Uct);
        uct.monte_carlo.explore_exploit_ratio = f64::NAN;
        assert!(matches!(
            uct.validate(),
            Err(SearchError::InvalidOptions(_))
        ));
    }
}
