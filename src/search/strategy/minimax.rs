use std::sync::Arc;

#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::{
    record_line, search_root, with_move_applied, Expansion, RootSearcher,
    SearchContext, SearchResult, SearchStrategy, StrategyType,
};
use crate::search::options::SearchOptions;
use crate::search::progress::{ProgressObserver, SearchProgress};
use crate::search::traits::{Searchable, TwoPlayerMove};
use crate::search::window::SearchWindow;
use crate::search::{SearchError, INFINITY};

/// Classic minimax: player one maximises, player two minimises, and every
/// value is seen from player one's side.
pub struct MiniMaxStrategy<M> {
    context: SearchContext<M>,
}

impl<M: TwoPlayerMove> MiniMaxStrategy<M> {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            context: SearchContext::new(options),
        }
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn minimax<S>(
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
        let moves = match self.context.expand(searchable, last_move, depth) {
            Expansion::Leaf(worth) => return Ok(worth),
            Expansion::Moves(moves) => moves,
        };

        let maximizing = searchable.player1_to_move();
        let alpha_beta = self.context.alpha_beta();
        let SearchWindow {
            mut alpha,
            mut beta,
        } = window;
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for game_move in moves.iter() {
            self.context.checkpoint()?;

            let mut continuation = Vec::new();
            let child_window = SearchWindow::new(alpha, beta);
            let value = with_move_applied(searchable, game_move, |searchable| {
                self.minimax(searchable, game_move, depth - 1, child_window, &mut continuation)
            })?;

            let is_better = if maximizing {
                value > best
            } else {
                value < best
            };
            if is_better {
                best = value;
                record_line(line, game_move, value, continuation);
            }

            if alpha_beta {
                if maximizing {
                    alpha = alpha.max(value);
                } else {
                    beta = beta.min(value);
                }
                if alpha >= beta {
                    self.context.record_cutoff();
                    break;
                }
            }
        }

        Ok(best)
    }
}

impl<S> RootSearcher<S> for MiniMaxStrategy<S::Move>
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
        // the root loop works from the mover's side, minimax from player one's
        let player1 = game_move.is_player1();
        let window = if player1 {
            window
        } else {
            window.negate_and_swap()
        };
        let depth = self.context.options().brute.look_ahead - 1;
        let value = self.minimax(searchable, game_move, depth, window, line)?;
        Ok(if player1 { value } else { -value })
    }
}

impl<S> SearchStrategy<S> for MiniMaxStrategy<S::Move>
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
        StrategyType::MiniMax
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
