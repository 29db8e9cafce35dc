//! Game tree search strategies.
//!
//! # Minimax family
//!
//! `MiniMaxStrategy`, `NegaMaxStrategy` and `NegaScoutStrategy` perform a
//! depth-limited, fail-soft search with optional alpha-beta pruning. They
//! share the root loop in [`search_root`] and the leaf/quiescence decision in
//! [`SearchContext::expand`], and differ only in how an inner node is scored:
//!
//! - minimax alternates maximising and minimising from player one's perspective
//! - negamax always maximises from the perspective of the side to move
//! - negascout probes every move after the first with a null window and only
//!   re-searches it with the full window when the probe shows an improvement
//!
//! The memory variants consult a [`TranspositionTable`] before expanding a node.
//!
//! # Move ordering
//!
//! Generated moves are stably sorted best-first by their static value, then
//! trimmed by best-moves pruning. Since only strictly better values replace
//! the current best, the first move in that order wins ties.
//!
//! # Monte Carlo
//!
//! `UctStrategy` grows a tree with the UCT selection rule and scores new
//! leaves with bounded random playouts.

mod minimax;
mod negamax;
mod negascout;
mod uct;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

pub use minimax::MiniMaxStrategy;
pub use negamax::NegaMaxStrategy;
pub use negascout::NegaScoutStrategy;
pub use uct::UctStrategy;

use super::best_moves::{order_moves, select_best_moves};
use super::options::SearchOptions;
use super::progress::{ProgressObserver, SearchProgress};
use super::traits::{Searchable, TwoPlayerMove};
use super::transposition_table::{TableStatistics, TranspositionTable};
use super::window::SearchWindow;
use super::SearchError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum StrategyType {
    MiniMax,
    NegaMax,
    NegaMaxMemory,
    #[default]
    NegaScout,
    NegaScoutMemory,
    Uct,
}

impl StrategyType {
    pub const ALL: [StrategyType; 6] = [
        StrategyType::MiniMax,
        StrategyType::NegaMax,
        StrategyType::NegaMaxMemory,
        StrategyType::NegaScout,
        StrategyType::NegaScoutMemory,
        StrategyType::Uct,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyType::MiniMax => "minimax",
            StrategyType::NegaMax => "negamax",
            StrategyType::NegaMaxMemory => "negamax-memory",
            StrategyType::NegaScout => "negascout",
            StrategyType::NegaScoutMemory => "negascout-memory",
            StrategyType::Uct => "uct",
        }
    }

    pub fn uses_memory(&self) -> bool {
        matches!(
            self,
            StrategyType::NegaMaxMemory | StrategyType::NegaScoutMemory
        )
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown strategy `{0}`, expected one of: minimax, negamax, negamax-memory, negascout, negascout-memory, uct")]
pub struct ParseStrategyError(String);

impl FromStr for StrategyType {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        StrategyType::ALL
            .into_iter()
            .find(|strategy| strategy.name() == normalized)
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SearchStatistics {
    pub moves_considered: u64,
    pub leaf_evaluations: u64,
    pub quiescent_nodes: u64,
    pub cutoffs: u64,
    pub simulations: u64,
    pub transposition: TableStatistics,
    pub elapsed: Duration,
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "moves considered:   {}", self.moves_considered)?;
        writeln!(f, "leaf evaluations:   {}", self.leaf_evaluations)?;
        writeln!(f, "quiescent nodes:    {}", self.quiescent_nodes)?;
        writeln!(f, "cutoffs:            {}", self.cutoffs)?;
        if self.simulations > 0 {
            writeln!(f, "simulations:        {}", self.simulations)?;
        }
        writeln!(
            f,
            "transpositions:     {} hits, {} near hits, {} misses, {} collisions",
            self.transposition.hits,
            self.transposition.near_hits,
            self.transposition.misses,
            self.transposition.collisions
        )?;
        write!(f, "elapsed:            {:.2?}", self.elapsed)
    }
}

/// Outcome of a search.
///
/// `value` and the value carried by each move of `principal_variation` are
/// backed-up values from player one's perspective. The variation starts with
/// `best_move`.
#[derive(Clone, Debug)]
pub struct SearchResult<M> {
    pub best_move: M,
    pub value: i32,
    pub principal_variation: Vec<M>,
    pub stats: SearchStatistics,
}

pub trait SearchStrategy<S: Searchable>: Send {
    /// Finds the best move for the side to move in `searchable`. The position
    /// is explored in place and is identical to its starting state when this
    /// returns, whether or not the search succeeded.
    fn search(
        &mut self,
        searchable: &mut S,
        last_move: Option<&S::Move>,
    ) -> Result<SearchResult<S::Move>, SearchError>;

    fn strategy_type(&self) -> StrategyType;

    fn options(&self) -> &SearchOptions;

    /// Handle for pausing, resuming and cancelling the search from another thread.
    fn progress(&self) -> Arc<SearchProgress>;

    fn set_observer(&mut self, observer: ProgressObserver);
}

/// Builds the strategy selected by `options.strategy`.
pub fn create_strategy<S: Searchable>(
    options: SearchOptions,
) -> Result<Box<dyn SearchStrategy<S>>, SearchError> {
    options.validate()?;
    debug!("creating {} strategy", options.strategy);

    let strategy: Box<dyn SearchStrategy<S>> = match options.strategy {
        StrategyType::MiniMax => Box::new(MiniMaxStrategy::new(options)),
        StrategyType::NegaMax => Box::new(NegaMaxStrategy::new(options)),
        StrategyType::NegaMaxMemory => Box::new(NegaMaxStrategy::with_memory(options)),
        StrategyType::NegaScout => Box::new(NegaScoutStrategy::new(options)),
        StrategyType::NegaScoutMemory => Box::new(NegaScoutStrategy::with_memory(options)),
        StrategyType::Uct => Box::new(UctStrategy::new(options)),
    };
    Ok(strategy)
}

/// State shared by every strategy: options, progress, statistics and the
/// optional transposition table.
pub struct SearchContext<M> {
    options: SearchOptions,
    progress: Arc<SearchProgress>,
    observer: Option<ProgressObserver>,
    transposition_table: Option<TranspositionTable<M>>,
    stats: SearchStatistics,
    started: Option<Instant>,
}

pub(crate) enum Expansion<M> {
    /// Static worth from player one's perspective.
    Leaf(i32),
    Moves(Vec<M>),
}

impl<M: TwoPlayerMove> SearchContext<M> {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            progress: Arc::new(SearchProgress::new()),
            observer: None,
            transposition_table: None,
            stats: SearchStatistics::default(),
            started: None,
        }
    }

    pub fn with_memory(options: SearchOptions) -> Self {
        let capacity = options.brute.transposition_table_capacity;
        Self {
            transposition_table: Some(TranspositionTable::new(capacity)),
            ..Self::new(options)
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn progress(&self) -> Arc<SearchProgress> {
        Arc::clone(&self.progress)
    }

    pub fn set_observer(&mut self, observer: ProgressObserver) {
        self.observer = Some(observer);
    }

    pub fn transposition_table(&self) -> Option<&TranspositionTable<M>> {
        self.transposition_table.as_ref()
    }

    pub(crate) fn transposition_table_mut(&mut self) -> Option<&mut TranspositionTable<M>> {
        self.transposition_table.as_mut()
    }

    pub(crate) fn begin_search(&mut self) {
        self.stats = SearchStatistics::default();
        self.progress.reset_counters();
        if let Some(table) = self.transposition_table.as_mut() {
            table.clear();
        }
        self.started = Some(Instant::now());
    }

    pub(crate) fn finish_search(&mut self) -> SearchStatistics {
        self.stats.moves_considered = self.progress.num_moves_considered();
        if let Some(table) = self.transposition_table.as_ref() {
            self.stats.transposition = table.statistics();
        }
        self.stats.elapsed = self.started.take().map(|s| s.elapsed()).unwrap_or_default();
        self.stats
    }

    #[inline]
    pub(crate) fn checkpoint(&self) -> Result<(), SearchError> {
        self.progress.checkpoint()
    }

    pub(crate) fn alpha_beta(&self) -> bool {
        self.options.brute.alpha_beta
    }

    pub(crate) fn record_cutoff(&mut self) {
        self.stats.cutoffs += 1;
    }

    pub(crate) fn record_simulation(&mut self) {
        self.stats.simulations += 1;
    }

    /// Publishes `completed / total` as percent done and notifies the observer.
    pub(crate) fn report_progress(&mut self, completed: usize, total: usize) {
        let percent = if total == 0 {
            100
        } else {
            (completed * 100 / total) as u8
        };
        self.progress.set_percent_done(percent);
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.progress.report());
        }
    }

    /// Decides whether the node reached by `last_move` is a leaf, and if not,
    /// which moves to search from it.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub(crate) fn expand<S>(&mut self, searchable: &mut S, last_move: &M, depth: i32) -> Expansion<M>
    where
        S: Searchable<Move = M>,
    {
        let done = searchable.done(Some(last_move), false);

        if depth <= 0 || done {
            if !done && self.should_extend(searchable, last_move, depth) {
                let mut urgent = searchable.generate_urgent_moves(Some(last_move), &self.options.weights);
                if !urgent.is_empty() {
                    order_moves(&mut urgent, searchable.player1_to_move());
                    self.stats.quiescent_nodes += 1;
                    return Expansion::Moves(urgent);
                }
            }
            return self.leaf(searchable, last_move);
        }

        let moves = select_best_moves(
            searchable.generate_moves(Some(last_move), &self.options.weights),
            searchable.player1_to_move(),
            &self.options.best_moves,
        );
        if moves.is_empty() {
            return self.leaf(searchable, last_move);
        }
        Expansion::Moves(moves)
    }

    fn should_extend<S>(&self, searchable: &S, last_move: &M, depth: i32) -> bool
    where
        S: Searchable<Move = M>,
    {
        self.options.brute.quiescence
            && depth > -self.options.brute.max_quiescent_depth
            && searchable.in_jeopardy(Some(last_move), &self.options.weights)
    }

    fn leaf<S>(&mut self, searchable: &S, last_move: &M) -> Expansion<M>
    where
        S: Searchable<Move = M>,
    {
        self.stats.leaf_evaluations += 1;
        Expansion::Leaf(searchable.worth(Some(last_move), &self.options.weights))
    }
}

/// Scores children of the root for [`search_root`].
pub(crate) trait RootSearcher<S: Searchable> {
    fn context(&mut self) -> &mut SearchContext<S::Move>;

    /// Value of the position reached by `game_move`, which has already been
    /// applied, from the perspective of the player who made it. `line`
    /// receives the best continuation.
    fn score_root_child(
        &mut self,
        searchable: &mut S,
        game_move: &S::Move,
        window: SearchWindow,
        first: bool,
        line: &mut Vec<S::Move>,
    ) -> Result<i32, SearchError>;
}

/// Expands the root, scoring every selected move with the searcher.
/// The root never takes a transposition cutoff.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub(crate) fn search_root<S, R>(
    searcher: &mut R,
    searchable: &mut S,
    last_move: Option<&S::Move>,
) -> Result<SearchResult<S::Move>, SearchError>
where
    S: Searchable,
    R: RootSearcher<S>,
{
    let context = searcher.context();
    context.options.validate()?;
    context.begin_search();
    debug!(
        "{} search depth: {}",
        context.options.strategy, context.options.brute.look_ahead
    );

    if searchable.done(last_move, false) {
        return Err(SearchError::NoAvailableMoves);
    }

    let player1 = searchable.player1_to_move();
    let moves = select_best_moves(
        searchable.generate_moves(last_move, &context.options.weights),
        player1,
        &context.options.best_moves,
    );
    if moves.is_empty() {
        return Err(SearchError::NoAvailableMoves);
    }

    let alpha_beta = context.alpha_beta();
    let total = moves.len();
    let mut window = SearchWindow::full();
    let mut best: Option<(S::Move, i32, Vec<S::Move>)> = None;

    for (index, game_move) in moves.iter().enumerate() {
        searcher.context().checkpoint()?;

        let mut line = Vec::new();
        let value = with_move_applied(searchable, game_move, |searchable| {
            searcher.score_root_child(searchable, game_move, window, index == 0, &mut line)
        })?;
        debug!("root move {:?} scored {}", game_move, value);

        if best.as_ref().map_or(true, |(_, best_value, _)| value > *best_value) {
            best = Some((game_move.clone(), value, line));
        }
        if alpha_beta {
            window.alpha = window.alpha.max(value);
        }

        searcher.context().report_progress(index + 1, total);
    }

    let (mut best_move, value, line) = best.ok_or(SearchError::NoAvailableMoves)?;
    let value = to_player1(value, player1);
    best_move.set_value(value);

    let mut principal_variation = Vec::with_capacity(line.len() + 1);
    principal_variation.push(best_move.clone());
    principal_variation.extend(line);

    let stats = searcher.context().finish_search();
    debug!("best move {:?} with value {}", best_move, value);

    Ok(SearchResult {
        best_move,
        value,
        principal_variation,
        stats,
    })
}

/// Makes a move, runs `f` on the resulting position, then undoes the move.
/// The move is undone even when `f` fails.
pub(crate) fn with_move_applied<S, F, R>(
    searchable: &mut S,
    game_move: &S::Move,
    f: F,
) -> Result<R, SearchError>
where
    S: Searchable,
    F: FnOnce(&mut S) -> Result<R, SearchError>,
{
    searchable.make_internal_move(game_move)?;
    let result = f(searchable);
    searchable.undo_internal_move(game_move)?;
    result
}

/// Replaces `line` with `game_move` (carrying `value`) followed by `continuation`.
pub(crate) fn record_line<M: TwoPlayerMove>(
    line: &mut Vec<M>,
    game_move: &M,
    value: i32,
    continuation: Vec<M>,
) {
    line.clear();
    let mut head = game_move.clone();
    head.set_value(value);
    line.push(head);
    line.extend(continuation);
}

/// Converts a value seen by the given side into player one's perspective.
#[inline(always)]
pub(crate) fn to_player1(value: i32, player1: bool) -> i32 {
    if player1 {
        value
    } else {
        -value
    }
}
