use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use dashmap::DashSet;
use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::{PuzzleController, PuzzleError};

/// A goal position and the moves that reach it from the initial position.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<P, M> {
    pub moves: Vec<M>,
    pub position: P,
    pub positions_examined: usize,
}

/// Depth-first search from `position`. `first_visit` records a key and
/// reports whether it was new; `stopped` aborts the search early.
fn depth_first<C, V>(
    controller: &C,
    position: &C::Position,
    moves: &mut Vec<C::Move>,
    first_visit: &mut V,
    stopped: &dyn Fn() -> bool,
    examined: &AtomicUsize,
) -> Option<C::Position>
where
    C: PuzzleController,
    V: FnMut(C::Key) -> bool,
{
    examined.fetch_add(1, Ordering::Relaxed);
    if controller.is_goal(position) {
        return Some(position.clone());
    }

    for puzzle_move in controller.legal_moves(position) {
        if stopped() {
            return None;
        }
        let next = controller.apply(position, &puzzle_move);
        if !first_visit(controller.key(&next)) {
            continue;
        }

        moves.push(puzzle_move);
        if let Some(goal) = depth_first(controller, &next, moves, first_visit, stopped, examined) {
            return Some(goal);
        }
        moves.pop();
    }
    None
}

/// Deterministic single-threaded solver: moves are tried in the order the
/// controller generates them, so the first solution in that order is found.
pub struct SequentialSolver<'a, C> {
    controller: &'a C,
}

impl<'a, C: PuzzleController> SequentialSolver<'a, C> {
    pub fn new(controller: &'a C) -> Self {
        Self { controller }
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn solve(&self) -> Option<Solution<C::Position, C::Move>> {
        let initial = self.controller.initial_position();
        let mut visited: FxHashSet<C::Key> = FxHashSet::default();
        visited.insert(self.controller.key(&initial));

        let examined = AtomicUsize::new(0);
        let mut moves = Vec::new();
        let goal = depth_first(
            self.controller,
            &initial,
            &mut moves,
            &mut |key| visited.insert(key),
            &|| false,
            &examined,
        );

        let positions_examined = examined.into_inner();
        debug!(
            "sequential solver examined {} positions, solved: {}",
            positions_examined,
            goal.is_some()
        );
        goal.map(|position| Solution {
            moves,
            position,
            positions_examined,
        })
    }
}

/// Splits the moves from the initial position across a fixed-size thread
/// pool. Workers share one visited set and stop as soon as any of them
/// reaches a goal, so which solution is returned may vary between runs.
pub struct ConcurrentSolver<'a, C> {
    controller: &'a C,
    threads: usize,
}

impl<'a, C: PuzzleController> ConcurrentSolver<'a, C> {
    pub fn new(controller: &'a C, threads: usize) -> Self {
        Self {
            controller,
            threads,
        }
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn solve(&self) -> Result<Option<Solution<C::Position, C::Move>>, PuzzleError> {
        if self.threads == 0 {
            return Err(PuzzleError::NoThreads);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|index| format!("puzzle-worker-{}", index))
            .build()?;

        let controller = self.controller;
        let initial = controller.initial_position();
        let examined = AtomicUsize::new(1);
        if controller.is_goal(&initial) {
            return Ok(Some(Solution {
                moves: Vec::new(),
                position: initial,
                positions_examined: 1,
            }));
        }

        let visited: DashSet<C::Key> = DashSet::new();
        visited.insert(controller.key(&initial));
        let solved = AtomicBool::new(false);
        let root_moves = controller.legal_moves(&initial);
        debug!(
            "concurrent solver: {} root moves on {} threads",
            root_moves.len(),
            self.threads
        );

        let found = pool.install(|| {
            root_moves.par_iter().find_map_any(|root_move| {
                let next = controller.apply(&initial, root_move);
                if !visited.insert(controller.key(&next)) {
                    return None;
                }

                let mut moves = vec![root_move.clone()];
                let goal = depth_first(
                    controller,
                    &next,
                    &mut moves,
                    &mut |key| visited.insert(key),
                    &|| solved.load(Ordering::Relaxed),
                    &examined,
                )?;
                solved.store(true, Ordering::Relaxed);
                Some((moves, goal))
            })
        });

        let positions_examined = examined.load(Ordering::Relaxed);
        debug!(
            "concurrent solver examined {} positions, solved: {}",
            positions_examined,
            found.is_some()
        );
        Ok(found.map(|(moves, position)| Solution {
            moves,
            position,
            positions_examined,
        }))
    }
}
