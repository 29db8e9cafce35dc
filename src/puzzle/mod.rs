//! Single-player puzzles solved by exhaustive depth-first search, either on
//! the calling thread or spread over a rayon thread pool.

mod queens;
mod solver;

use std::hash::Hash;

use thiserror::Error;

pub use queens::Queens;
pub use solver::{ConcurrentSolver, SequentialSolver, Solution};

/// Describes a puzzle to the solvers. Positions are values: `apply` returns
/// a new position and never modifies its input.
pub trait PuzzleController: Sync {
    type Position: Clone + Send + Sync;
    type Move: Clone + Send + Sync;
    /// Identifies positions that need not be explored twice.
    type Key: Eq + Hash + Send + Sync;

    fn initial_position(&self) -> Self::Position;

    fn is_goal(&self, position: &Self::Position) -> bool;

    fn legal_moves(&self, position: &Self::Position) -> Vec<Self::Move>;

    fn apply(&self, position: &Self::Position, puzzle_move: &Self::Move) -> Self::Position;

    fn key(&self, position: &Self::Position) -> Self::Key;
}

#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error("at least one solver thread is required")]
    NoThreads,
    #[error("failed to build solver thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
