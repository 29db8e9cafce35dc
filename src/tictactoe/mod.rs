//! Tic-tac-toe on a 3x3 board, the bundled `Searchable` game.
//!
//! X is player one and always moves first. Positions can be written as nine
//! cells in row-major order, for example `x...o....`.

mod board;
mod game_move;
mod location;
mod player;
mod searchable;

pub use board::{Locations, ParseBoardError, TicTacToeBoard};
pub use game_move::TicTacToeMove;
pub use location::{Location, ParseLocationError, BOARD_SIZE, NUM_CELLS};
pub use player::Player;
pub use searchable::{default_weights, DEFAULT_WEIGHTS};

#[cfg(test)]
mod tests;
