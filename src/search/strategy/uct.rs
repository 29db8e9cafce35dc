//! Monte Carlo tree search with the UCT selection rule.

use std::sync::Arc;

use log::debug;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::{SearchContext, SearchResult, SearchStrategy, StrategyType};
use crate::search::best_moves::{mover_value, select_best_moves};
use crate::search::options::SearchOptions;
use crate::search::progress::{ProgressObserver, SearchProgress};
use crate::search::traits::{Searchable, TwoPlayerMove};
use crate::search::{SearchError, WINNING_VALUE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Player1Wins,
    Player2Wins,
    Draw,
}

impl Outcome {
    fn from_worth(worth: i32) -> Self {
        match worth.signum() {
            1 => Outcome::Player1Wins,
            -1 => Outcome::Player2Wins,
            _ => Outcome::Draw,
        }
    }

    fn player1_credit(self) -> f64 {
        match self {
            Outcome::Player1Wins => 1.0,
            Outcome::Player2Wins => 0.0,
            Outcome::Draw => 0.5,
        }
    }
}

struct UctNode<M> {
    game_move: M,
    visits: u32,
    player1_wins: f64,
    children: Option<Vec<UctNode<M>>>,
}

impl<M: TwoPlayerMove> UctNode<M> {
    fn new(game_move: M) -> Self {
        Self {
            game_move,
            visits: 0,
            player1_wins: 0.0,
            children: None,
        }
    }

    fn player1_win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.5
        } else {
            self.player1_wins / self.visits as f64
        }
    }

    /// Win rate for whoever made this node's move.
    fn mover_win_rate(&self) -> f64 {
        if self.game_move.is_player1() {
            self.player1_win_rate()
        } else {
            1.0 - self.player1_win_rate()
        }
    }

    fn backed_up_value(&self) -> i32 {
        ((2.0 * self.player1_win_rate() - 1.0) * WINNING_VALUE as f64).round() as i32
    }

    fn record(&mut self, outcome: Outcome) {
        self.visits += 1;
        self.player1_wins += outcome.player1_credit();
    }
}

/// Index of the child to descend into: the first unvisited child, otherwise
/// the highest UCT priority. Earlier children win ties.
fn select_child<M: TwoPlayerMove>(children: &[UctNode<M>], parent_visits: u32, explore: f64) -> usize {
    if let Some(unvisited) = children.iter().position(|child| child.visits == 0) {
        return unvisited;
    }

    let log_parent = (parent_visits.max(1) as f64).ln();
    let mut best_index = 0;
    let mut best_priority = f64::NEG_INFINITY;
    for (index, child) in children.iter().enumerate() {
        let priority =
            child.mover_win_rate() + explore * (log_parent / child.visits as f64).sqrt();
        if priority > best_priority {
            best_priority = priority;
            best_index = index;
        }
    }
    best_index
}

/// The child to play: most visits, then best win rate, then earliest.
fn most_visited<M: TwoPlayerMove>(children: &[UctNode<M>]) -> Option<&UctNode<M>> {
    let mut best: Option<&UctNode<M>> = None;
    for child in children.iter().filter(|child| child.visits > 0) {
        let replace = match best {
            None => true,
            Some(current) => {
                child.visits > current.visits
                    || (child.visits == current.visits
                        && child.mover_win_rate() > current.mover_win_rate())
            }
        };
        if replace {
            best = Some(child);
        }
    }
    best
}

pub struct UctStrategy<M> {
    context: SearchContext<M>,
}

impl<M: TwoPlayerMove> UctStrategy<M> {
    pub fn new(options: SearchOptions) -> Self {
        Self {
            context: SearchContext::new(options),
        }
    }

    fn expand_children<S>(&self, searchable: &S, last_move: Option<&M>) -> Vec<UctNode<M>>
    where
        S: Searchable<Move = M>,
    {
        let options = self.context.options();
        select_best_moves(
            searchable.generate_moves(last_move, &options.weights),
            searchable.player1_to_move(),
            &options.best_moves,
        )
        .into_iter()
        .map(UctNode::new)
        .collect()
    }

    /// Runs one selection/expansion/playout pass below `node`, whose move has
    /// already been applied, and backs the outcome up into its children.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn simulate<S>(
        &mut self,
        searchable: &mut S,
        node: &mut UctNode<M>,
        rng: &mut fastrand::Rng,
    ) -> Result<Outcome, SearchError>
    where
        S: Searchable<Move = M>,
    {
        let last_move = Some(&node.game_move);
        if searchable.done(last_move, false) {
            return Ok(Outcome::from_worth(
                searchable.worth(last_move, &self.context.options().weights),
            ));
        }

        if node.children.is_none() {
            node.children = Some(self.expand_children(searchable, last_move));
        }
        let parent_visits = node.visits;
        let children = match node.children.as_mut() {
            Some(children) if !children.is_empty() => children,
            _ => {
                return Ok(Outcome::from_worth(searchable.worth(
                    Some(&node.game_move),
                    &self.context.options().weights,
                )))
            }
        };

        let explore = self.context.options().monte_carlo.explore_exploit_ratio;
        let index = select_child(children, parent_visits, explore);
        let outcome = self.descend(searchable, &mut children[index], rng)?;
        Ok(outcome)
    }

    /// Applies `child`'s move, scores it (a playout the first time, a deeper
    /// simulation afterwards), undoes the move and records the outcome.
    fn descend<S>(
        &mut self,
        searchable: &mut S,
        child: &mut UctNode<M>,
        rng: &mut fastrand::Rng,
    ) -> Result<Outcome, SearchError>
    where
        S: Searchable<Move = M>,
    {
        self.context.checkpoint()?;

        searchable.make_internal_move(&child.game_move)?;
        let outcome = if child.visits == 0 {
            self.playout(searchable, &child.game_move, rng)
        } else {
            self.simulate(searchable, child, rng)
        };
        searchable.undo_internal_move(&child.game_move)?;

        let outcome = outcome?;
        child.record(outcome);
        Ok(outcome)
    }

    /// Plays random good moves from the current position and scores where it ends.
    /// Every move made is undone before returning.
    fn playout<S>(
        &mut self,
        searchable: &mut S,
        last_move: &M,
        rng: &mut fastrand::Rng,
    ) -> Result<Outcome, SearchError>
    where
        S: Searchable<Move = M>,
    {
        let mut made: Vec<M> = Vec::new();
        let worth = self.random_moves(searchable, last_move, rng, &mut made);
        for game_move in made.iter().rev() {
            searchable.undo_internal_move(game_move)?;
        }
        Ok(Outcome::from_worth(worth?))
    }

    fn random_moves<S>(
        &mut self,
        searchable: &mut S,
        last_move: &M,
        rng: &mut fastrand::Rng,
        made: &mut Vec<M>,
    ) -> Result<i32, SearchError>
    where
        S: Searchable<Move = M>,
    {
        let options = self.context.options();
        let thresh = options.best_moves.percent_less_than_best_thresh as i64;

        for _ in 0..options.monte_carlo.random_look_ahead {
            let last = made.last().unwrap_or(last_move);
            if searchable.done(Some(last), false) {
                break;
            }

            let player1 = searchable.player1_to_move();
            let moves = select_best_moves(
                searchable.generate_moves(Some(last), &options.weights),
                player1,
                &options.best_moves,
            );
            let Some(first) = moves.first() else {
                break;
            };

            // candidates are the moves within the threshold of the best one
            let best = mover_value(first, player1) as i64;
            let worst = moves.last().map_or(best, |m| mover_value(m, player1) as i64);
            let cutoff = best - (best - worst) * thresh / 100;
            let candidates = moves
                .iter()
                .take_while(|m| mover_value(*m, player1) as i64 >= cutoff)
                .count();

            let chosen = moves[rng.usize(..candidates)].clone();
            searchable.make_internal_move(&chosen)?;
            made.push(chosen);
        }

        let last = made.last().unwrap_or(last_move);
        Ok(searchable.worth(Some(last), &options.weights))
    }

    fn principal_variation(children: &[UctNode<M>]) -> Vec<M> {
        let mut line = Vec::new();
        let mut current = most_visited(children);
        while let Some(node) = current {
            let mut game_move = node.game_move.clone();
            game_move.set_value(node.backed_up_value());
            line.push(game_move);
            current = node.children.as_deref().and_then(most_visited);
        }
        line
    }
}

impl<S> SearchStrategy<S> for UctStrategy<S::Move>
where
    S: Searchable,
{
    fn search(
        &mut self,
        searchable: &mut S,
        last_move: Option<&S::Move>,
    ) -> Result<SearchResult<S::Move>, SearchError> {
        self.context.options().validate()?;
        self.context.begin_search();

        if searchable.done(last_move, false) {
            return Err(SearchError::NoAvailableMoves);
        }
        let mut children = self.expand_children(searchable, last_move);
        if children.is_empty() {
            return Err(SearchError::NoAvailableMoves);
        }

        let monte_carlo = self.context.options().monte_carlo.clone();
        debug!(
            "uct search: {} simulations, seed {}",
            monte_carlo.max_simulations, monte_carlo.seed
        );
        let mut rng = fastrand::Rng::with_seed(monte_carlo.seed);
        let mut root_visits = 0u32;
        let mut last_percent = 0;

        for simulation in 0..monte_carlo.max_simulations {
            let index = select_child(&children, root_visits, monte_carlo.explore_exploit_ratio);
            self.descend(searchable, &mut children[index], &mut rng)?;
            root_visits += 1;
            self.context.record_simulation();

            let percent = (simulation + 1) * 100 / monte_carlo.max_simulations;
            if percent != last_percent {
                last_percent = percent;
                self.context
                    .report_progress(simulation + 1, monte_carlo.max_simulations);
            }
        }

        let principal_variation = Self::principal_variation(&children);
        let best_move = principal_variation
            .first()
            .cloned()
            .ok_or(SearchError::NoAvailableMoves)?;
        let value = best_move.value();
        let stats = self.context.finish_search();
        debug!("uct chose {:?} with value {}", best_move, value);

        Ok(SearchResult {
            best_move,
            value,
            principal_variation,
            stats,
        })
    }

    fn strategy_type(&self) -> StrategyType {
        StrategyType::Uct
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
