//! Generic two-player adversarial search.

mod best_moves;
pub mod error;
pub mod options;
pub mod progress;
pub mod requester;
pub mod strategy;
pub mod traits;
pub mod transposition_table;
pub mod weights;
pub mod window;
pub mod zobrist;

pub use error::{IllegalMoveError, SearchError};
pub use options::{
    BestMovesSearchOptions, BruteSearchOptions, MonteCarloSearchOptions, SearchOptions,
    DEFAULT_MAX_QUIESCENT_DEPTH,
};
pub use progress::{ProgressObserver, ProgressReport, SearchProgress};
pub use requester::{request_move, CompletedSearch, PendingMove};
pub use strategy::{
    create_strategy, MiniMaxStrategy, NegaMaxStrategy, NegaScoutStrategy, ParseStrategyError,
    SearchContext, SearchResult, SearchStatistics, SearchStrategy, StrategyType, UctStrategy,
};
pub use traits::{Searchable, TwoPlayerMove};
pub use transposition_table::{
    Entry, Probe, TableStatistics, TranspositionTable, DEFAULT_TRANSPOSITION_TABLE_CAPACITY,
};
pub use weights::{ParseWeightsError, Weights};
pub use window::SearchWindow;
pub use zobrist::{HashKey, ZobristHash};

/// Magnitude of a won position. `worth` never exceeds it.
pub const WINNING_VALUE: i32 = 1000;

/// Search window bound, larger than any value a position can have.
pub const INFINITY: i32 = 1_000_000;
