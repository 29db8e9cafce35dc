//! Common types re-exported for convenience.

pub use crate::search::{
    create_strategy, request_move, SearchError, SearchOptions, SearchResult, SearchStrategy,
    Searchable, StrategyType, TwoPlayerMove, Weights,
};
pub use crate::tictactoe::{default_weights, Location, Player, TicTacToeBoard, TicTacToeMove};
