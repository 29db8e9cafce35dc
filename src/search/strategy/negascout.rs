use std::sync::Arc;

use log::trace;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::{
    record_line, search_root, to_player1, with_move_applied, Expansion, RootSearcher,
    SearchContext, SearchResult, SearchStrategy, StrategyType,
};
use crate::search::options::SearchOptions;
use crate::search::progress::{ProgressObserver, SearchProgress};
use crate::search::traits::{Searchable, TwoPlayerMove};
use crate::search::transposition_table::Probe;
use crate::search::window::SearchWindow;
use crate::search::{SearchError, INFINITY};

/// Principal variation search: the first move gets the full window, every
/// later move a null-window probe that is re-searched only if it lands
/// strictly inside the window.
pub struct NegaScoutStrategy<M> {
    context: SearchContext<M>,
}

impl<M: TwoPlayerMove> NegaScoutStrategy<M> {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            context: SearchContext::new(options),
        }
    }

    pub fn with_memory(options: SearchOptions) -> Self {
        Self {
            context: SearchContext::with_memory(options),
        }
    }

    pub fn context(&self) -> &SearchContext<M> {
        &self.context
    }

    /// Scores the position after `game_move` (already applied) for the player
    /// who made it, probing with a null window unless this is the first move.
    fn score_child<S>(
        &mut self,
        searchable: &mut S,
        game_move: &M,
        depth: i32,
        window: SearchWindow,
        first: bool,
        continuation: &mut Vec<M>,
    ) -> Result<i32, SearchError>
    where
        S: Searchable<Move = M>,
    {
        let full_window = window.negate_and_swap();
        if first || !self.context.alpha_beta() {
            return Ok(-self.negascout(searchable, game_move, depth, full_window, continuation)?);
        }

        let probe_window = window.null_window().negate_and_swap();
        let probe = -self.negascout(searchable, game_move, depth, probe_window, continuation)?;
        if !window.contains(probe) {
            return Ok(probe);
        }

        trace!("null window probe {} inside {:?}, re-searching", probe, window);
        continuation.clear();
        Ok(-self.negascout(searchable, game_move, depth, full_window, continuation)?)
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn negascout<S>(
        &mut self,
        searchable: &mut S,
        last_move: &M,
        depth: i32,
        window: SearchWindow,
        line: &mut Vec<M>,
    ) -> Result<i32, SearchError>
    where
        S: Searchable<Move = M>,
    {
        let player1 = searchable.player1_to_move();
        let key = searchable.hash_key();
        let verification = searchable.verification_key();

        let mut window = window;
        if let Some(table) = self.context.transposition_table_mut() {
            match table.probe(key, verification, depth, window) {
                Probe::Cutoff { value, best_move } => {
                    line.clear();
                    line.extend(best_move);
                    return Ok(value);
                }
                Probe::Narrowed { window: narrowed } => window = narrowed,
                Probe::Miss => {}
            }
        }

        let moves = match self.context.expand(searchable, last_move, depth) {
            Expansion::Leaf(worth) => {
                let value = to_player1(worth, player1);
                if let Some(table) = self.context.transposition_table_mut() {
                    table.store_exact(key, verification, depth, value);
                }
                return Ok(value);
            }
            Expansion::Moves(moves) => moves,
        };

        let alpha_beta = self.context.alpha_beta();
        let mut alpha = window.alpha;
        let mut best = -INFINITY;

        for (index, game_move) in moves.iter().enumerate() {
            self.context.checkpoint()?;

            let mut continuation = Vec::new();
            let child_window = SearchWindow::new(alpha, window.beta);
            let value = with_move_applied(searchable, game_move, |searchable| {
                self.score_child(
                    searchable,
                    game_move,
                    depth - 1,
                    child_window,
                    index == 0,
                    &mut continuation,
                )
            })?;

            if value > best {
                best = value;
                record_line(line, game_move, to_player1(value, player1), continuation);
            }
            if alpha_beta {
                alpha = alpha.max(value);
                if alpha >= window.beta {
                    self.context.record_cutoff();
                    break;
                }
            }
        }

        if let Some(table) = self.context.transposition_table_mut() {
            table.store(key, verification, line.first().cloned(), depth, best, window);
        }
        Ok(best)
    }
}

impl<S> RootSearcher<S> for NegaScoutStrategy<S::Move>
where
    S: Searchable,
{
    fn context(&mut self) -> &mut SearchContext<S::Move> {
        &mut self.context
    }

    fn score_root_child(
        &mut self,
        searchable: &mut S,
        game_move: &S::Move,
        window: SearchWindow,
        first: bool,
        line: &mut Vec<S::Move>,
    ) -> Result<i32, SearchError> {
        let depth = self.context.options().brute.look_ahead - 1;
        self.score_child(searchable, game_move, depth, window, first, line)
    }
}

impl<S> SearchStrategy<S> for NegaScoutStrategy<S::Move>
where
    S: Searchable,
{
    fn search(
        &mut self,
        searchable: &mut S,
        last_move: Option<&S::Move>,
    ) -> Result<SearchResult<S::Move>, SearchError> {
        search_root(self, searchable, last_move)
    }

    fn strategy_type(&self) -> StrategyType {
        if self.context.transposition_table().is_some() {
            StrategyType::NegaScoutMemory
        } else {
            StrategyType::NegaScout
        }
    }

    fn options(&self) -> &SearchOptions {
        self.context.options()
    }

    fn progress(&self) -> Arc<SearchProgress> {
        self.context.progress()
    }

    fn set_observer(&mut self, observer: ProgressObserver) {
        self.context.set_observer(observer);
    }
}
