use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

use crate::search::{
    create_strategy, request_move, IllegalMoveError, ProgressReport, SearchError, SearchOptions,
    SearchResult, SearchStrategy, Searchable,
};
use crate::tictactoe::{Location, Player, TicTacToeBoard, TicTacToeMove};

const PROGRESS_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    IllegalMove(#[from] IllegalMoveError),
    #[error("the search strategy was lost when a previous search failed")]
    StrategyLost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnding {
    Win(Player),
    Draw,
}

impl fmt::Display for GameEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEnding::Win(player) => write!(f, "{} wins!", player),
            GameEnding::Draw => write!(f, "draw!"),
        }
    }
}

/// Owns the game board and the strategy that searches it. Each search runs
/// on a worker thread; the board and strategy come back when it finishes.
pub struct Engine {
    board: TicTacToeBoard,
    strategy: Option<Box<dyn SearchStrategy<TicTacToeBoard>>>,
    on_progress: Option<Box<dyn FnMut(&ProgressReport)>>,
}

impl Engine {
    pub fn new(board: TicTacToeBoard, options: SearchOptions) -> Result<Self, EngineError> {
        Ok(Self {
            board,
            strategy: Some(create_strategy(options)?),
            on_progress: None,
        })
    }

    /// Called on this thread with every progress report from the worker.
    pub fn with_progress(mut self, on_progress: impl FnMut(&ProgressReport) + 'static) -> Self {
        self.on_progress = Some(Box::new(on_progress));
        self
    }

    pub fn board(&self) -> &TicTacToeBoard {
        &self.board
    }

    pub fn check_game_over(&mut self) -> Option<GameEnding> {
        if !self.board.done(None, true) {
            return None;
        }
        Some(match self.board.recorded_winner() {
            Some(player) => GameEnding::Win(player),
            None => GameEnding::Draw,
        })
    }

    pub fn make_move(&mut self, location: Location) -> Result<TicTacToeMove, EngineError> {
        let game_move = TicTacToeMove::new(location, self.board.to_move());
        self.board.make_internal_move(&game_move)?;
        Ok(game_move)
    }

    /// Searches the current position without changing it.
    pub fn get_best_move(&mut self) -> Result<SearchResult<TicTacToeMove>, EngineError> {
        let mut strategy = self.strategy.take().ok_or(EngineError::StrategyLost)?;
        let (report_tx, report_rx) = mpsc::channel();
        strategy.set_observer(Box::new(move |report| {
            let _ = report_tx.send(*report);
        }));

        let last_move = self.board.last_move().cloned();
        let pending = request_move(self.board.clone(), strategy, last_move)?;
        loop {
            match report_rx.recv_timeout(PROGRESS_POLL_INTERVAL) {
                Ok(report) => self.report(&report),
                Err(RecvTimeoutError::Timeout) if !pending.is_finished() => {}
                Err(_) => break,
            }
        }
        for report in report_rx.try_iter() {
            self.report(&report);
        }

        let completed = pending.join()?;
        self.strategy = Some(completed.strategy);
        let result = completed.result?;
        debug!("search statistics:\n{}", result.stats);
        Ok(result)
    }

    /// Searches and plays the best move.
    pub fn make_best_move(&mut self) -> Result<SearchResult<TicTacToeMove>, EngineError> {
        let result = self.get_best_move()?;
        self.board.make_internal_move(&result.best_move)?;
        info!("engine played {} (value {})", result.best_move, result.value);
        Ok(result)
    }

    fn report(&mut self, report: &ProgressReport) {
        if let Some(on_progress) = self.on_progress.as_mut() {
            on_progress(report);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::search::StrategyType;
    use crate::tictactoe::default_weights;

    fn engine(position: &str) -> Engine {
        let options = SearchOptions::new(StrategyType::NegaScout)
            .with_look_ahead(4)
            .with_weights(default_weights());
        Engine::new(position.parse().unwrap(), options).unwrap()
    }

    #[test]
    fn test_make_best_move_wins() {
        let mut engine = engine("xx.oo....");
        let result = engine.make_best_move().unwrap();
        assert_eq!(result.best_move.location(), Location::new(0, 2).unwrap());
        assert_eq!(engine.check_game_over(), Some(GameEnding::Win(Player::X)));
    }

    #[test]
    fn test_progress_reaches_caller() {
        let percents = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&percents);
        let mut engine = engine("x...o....").with_progress(move |report| {
            seen.borrow_mut().push(report.percent_done);
        });

        engine.get_best_move().unwrap();
        assert_eq!(engine.board().notation(), "x...o....");
        let percents = percents.borrow();
        assert_eq!(percents.last(), Some(&100));
        assert!(percents.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_strategy_is_reused() {
        let mut engine = engine(".........");
        engine.make_best_move().unwrap();
        engine.make_best_move().unwrap();
        assert_eq!(engine.board().history().len(), 2);
    }

    #[test]
    fn test_illegal_human_move() {
        let mut engine = engine("x........");
        assert!(matches!(
            engine.make_move(Location::new(0, 0).unwrap()),
            Err(EngineError::IllegalMove(IllegalMoveError::Occupied { row: 0, col: 0 }))
        ));
        assert_eq!(engine.make_move(Location::new(1, 1).unwrap()).unwrap().player(), Player::O);
    }

    #[test]
    fn test_draw() {
        let mut engine = engine("xox/xoo/oxx");
        assert_eq!(engine.check_game_over(), Some(GameEnding::Draw));
        assert!(matches!(
            engine.get_best_move(),
            Err(EngineError::Search(SearchError::NoAvailableMoves))
        ));
    }
}
