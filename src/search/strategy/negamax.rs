use std::sync::Arc;

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

/// Negamax with optional alpha-beta pruning and transposition table memory.
pub struct NegaMaxStrategy<M> {
    context: SearchContext<M>,
}

impl<M: TwoPlayerMove> NegaMaxStrategy<M> {
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

    /// Value of the node reached by `last_move`, from the perspective of the side to move.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn negamax<S>(
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

        for game_move in moves.iter() {
            self.context.checkpoint()?;

            let mut continuation = Vec::new();
            let child_window = SearchWindow::new(alpha, window.beta).negate_and_swap();
            let value = -with_move_applied(searchable, game_move, |searchable| {
                self.negamax(searchable, game_move, depth - 1, child_window, &mut continuation)
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

impl<S> RootSearcher<S> for NegaMaxStrategy<S::Move>
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
        _first: bool,
        line: &mut Vec<S::Move>,
    ) -> Result<i32, SearchError> {
        let depth = self.context.options().brute.look_ahead - 1;
        Ok(-self.negamax(searchable, game_move, depth, window.negate_and_swap(), line)?)
    }
}

impl<S> SearchStrategy<S> for NegaMaxStrategy<S::Move>
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
            StrategyType::NegaMaxMemory
        } else {
            StrategyType::NegaMax
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
