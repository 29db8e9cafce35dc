use thiserror::Error;

/// Raised when a move cannot be applied to, or undone from, a board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMoveError {
    #[error("location ({row}, {col}) is off the board")]
    OffBoard { row: u8, col: u8 },
    #[error("location ({row}, {col}) is already occupied")]
    Occupied { row: u8, col: u8 },
    #[error("move was played out of turn")]
    OutOfTurn,
    #[error("undo does not match the most recent move")]
    UndoMismatch,
    #[error("there is no move to undo")]
    NothingToUndo,
    #[error("the game is already over")]
    GameOver,
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("invalid search options: {0}")]
    InvalidOptions(String),
    #[error("illegal move during search: {0}")]
    IllegalMove(#[from] IllegalMoveError),
    #[error("search was cancelled")]
    Cancelled,
    #[error("search is not paused")]
    NotPaused,
    #[error("failed to spawn search worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
    #[error("search worker panicked")]
    WorkerPanicked,
}
