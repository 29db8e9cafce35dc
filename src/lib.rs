pub mod game;
pub mod prelude;
pub mod puzzle;
pub mod search;
pub mod tictactoe;

#[cfg(feature = "instrumentation")]
pub mod instrumentation;
