//! CLI command implementations.

pub trait Command {
    fn execute(self);
}

pub mod best_move;
pub mod play;
pub mod solve_queens;
pub mod watch;

// Shared search flags
pub(crate) mod search_args;
