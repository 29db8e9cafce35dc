//! Runs a search on its own worker thread so the caller stays responsive.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, info};

use super::progress::SearchProgress;
use super::strategy::{SearchResult, SearchStrategy};
use super::traits::Searchable;
use super::SearchError;

/// Everything handed back by a finished worker: ownership of the position
/// and strategy returns to the caller together with the outcome. The
/// strategy comes back with no pause or cancellation pending, ready for
/// the next search.
pub struct CompletedSearch<S: Searchable> {
    pub searchable: S,
    pub strategy: Box<dyn SearchStrategy<S>>,
    pub result: Result<SearchResult<S::Move>, SearchError>,
}

/// Handle to a search running on a worker thread.
pub struct PendingMove<S: Searchable> {
    progress: Arc<SearchProgress>,
    handle: JoinHandle<CompletedSearch<S>>,
}

/// Moves `searchable` and `strategy` onto a new worker thread and starts
/// searching for the best reply to `last_move`. A pause or cancellation
/// left over on the strategy from an earlier search is dropped first.
pub fn request_move<S>(
    mut searchable: S,
    mut strategy: Box<dyn SearchStrategy<S>>,
    last_move: Option<S::Move>,
) -> Result<PendingMove<S>, SearchError>
where
    S: Searchable + 'static,
{
    let progress = strategy.progress();
    progress.clear_interrupts();
    debug!(
        "requesting move from {} strategy after {} moves",
        strategy.strategy_type(),
        searchable.num_moves()
    );

    let handle = thread::Builder::new()
        .name("search-worker".to_string())
        .spawn(move || {
            let result = strategy.search(&mut searchable, last_move.as_ref());
            match &result {
                Ok(found) => info!(
                    "search finished: {:?} ({} moves considered)",
                    found.best_move, found.stats.moves_considered
                ),
                Err(err) => info!("search stopped: {}", err),
            }
            CompletedSearch {
                searchable,
                strategy,
                result,
            }
        })
        .map_err(SearchError::WorkerSpawn)?;

    Ok(PendingMove { progress, handle })
}

impl<S: Searchable> PendingMove<S> {
    pub fn pause(&self) {
        self.progress.pause();
    }

    pub fn continue_processing(&self) -> Result<(), SearchError> {
        self.progress.continue_processing()
    }

    pub fn cancel(&self) {
        self.progress.cancel();
    }

    pub fn is_paused(&self) -> bool {
        self.progress.is_paused()
    }

    pub fn percent_done(&self) -> u8 {
        self.progress.percent_done()
    }

    pub fn num_moves_considered(&self) -> u64 {
        self.progress.num_moves_considered()
    }

    pub fn progress(&self) -> Arc<SearchProgress> {
        Arc::clone(&self.progress)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the worker to finish. A pause or cancel that arrived after
    /// the worker's last checkpoint is discarded.
    pub fn join(self) -> Result<CompletedSearch<S>, SearchError> {
        let completed = self.handle.join().map_err(|_| SearchError::WorkerPanicked)?;
        self.progress.clear_interrupts();
        Ok(completed)
    }
}
