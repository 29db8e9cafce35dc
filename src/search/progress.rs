//! Progress reporting, pause/continue and cancellation for a running search.
//!
//! A `SearchProgress` is shared (through an `Arc`) between the thread running
//! the search and whoever watches it. The search passes through
//! [`SearchProgress::checkpoint`] once per child expansion; that is the only
//! place where it can be suspended or aborted, so a paused search always
//! resumes exactly where it stopped.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use super::SearchError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressReport {
    pub percent_done: u8,
    pub num_moves_considered: u64,
}

/// Called synchronously on the search thread each time a root move has been
/// fully searched.
pub type ProgressObserver = Box<dyn FnMut(&ProgressReport) + Send>;

#[derive(Debug, Default)]
pub struct SearchProgress {
    percent_done: AtomicU8,
    moves_considered: AtomicU64,
    paused: AtomicBool,
    cancelled: AtomicBool,
    // guards transitions of `paused` and `cancelled` so a waiting search cannot miss a wakeup
    lock: Mutex<()>,
    resumed: Condvar,
}

impl SearchProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspends the search at its next checkpoint.
    pub fn pause(&self) {
        let _guard = self.lock();
        self.paused.store(true, Ordering::SeqCst);
    }

    /// Resumes a paused search.
    pub fn continue_processing(&self) -> Result<(), SearchError> {
        let _guard = self.lock();
        if !self.paused.swap(false, Ordering::SeqCst) {
            return Err(SearchError::NotPaused);
        }
        self.resumed.notify_all();
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Aborts the search at its next checkpoint, waking it if it is paused.
    /// Cancellation sticks until [`SearchProgress::reset`] is called.
    pub fn cancel(&self) {
        let _guard = self.lock();
        self.cancelled.store(true, Ordering::SeqCst);
        self.resumed.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn percent_done(&self) -> u8 {
        self.percent_done.load(Ordering::SeqCst)
    }

    pub fn num_moves_considered(&self) -> u64 {
        self.moves_considered.load(Ordering::SeqCst)
    }

    pub fn report(&self) -> ProgressReport {
        ProgressReport {
            percent_done: self.percent_done(),
            num_moves_considered: self.num_moves_considered(),
        }
    }

    /// Clears the counters along with any pause or cancellation.
    pub fn reset(&self) {
        self.reset_counters();
        self.clear_interrupts();
    }

    /// Drops a pending pause or cancellation, keeping the counters of the
    /// last search readable.
    pub(crate) fn clear_interrupts(&self) {
        let _guard = self.lock();
        self.paused.store(false, Ordering::SeqCst);
        self.cancelled.store(false, Ordering::SeqCst);
        self.resumed.notify_all();
    }

    pub(crate) fn reset_counters(&self) {
        self.percent_done.store(0, Ordering::SeqCst);
        self.moves_considered.store(0, Ordering::SeqCst);
    }

    pub(crate) fn set_percent_done(&self, percent: u8) {
        self.percent_done.store(percent.min(100), Ordering::SeqCst);
    }

    /// Counts one move, blocks while paused and fails if the search was cancelled.
    pub(crate) fn checkpoint(&self) -> Result<(), SearchError> {
        self.moves_considered.fetch_add(1, Ordering::SeqCst);

        if self.paused.load(Ordering::SeqCst) {
            let mut guard = self.lock();
            while self.paused.load(Ordering::SeqCst) && !self.cancelled.load(Ordering::SeqCst) {
                guard = self
                    .resumed
                    .wait(guard)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        }

        if self.cancelled.load(Ordering::SeqCst) {
            return Err(SearchError::Cancelled);
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
