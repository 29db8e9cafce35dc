//! Core traits for generic two-player search.

use std::fmt::Debug;

use super::error::IllegalMoveError;
use super::weights::Weights;
use super::zobrist::HashKey;

/// A transition between two board states.
pub trait TwoPlayerMove: Clone + Debug + PartialEq + Send + 'static {
    /// Static heuristic value from player one's perspective, set when the move is generated.
    fn value(&self) -> i32;

    fn set_value(&mut self, value: i32);

    /// True if player one makes this move.
    fn is_player1(&self) -> bool;

    /// True for forcing moves (captures, wins, blocks) that quiescence should follow.
    fn is_urgent(&self) -> bool {
        false
    }
}

/// A game position that the search strategies can explore in place.
///
/// Moves are made and undone in strict LIFO order; after undoing every move
/// made since a given point, the position (and its hash key) must be
/// identical to what it was at that point.
pub trait Searchable: Send {
    type Move: TwoPlayerMove;

    /// All legal moves for the side to move, each carrying its static value.
    fn generate_moves(&self, last_move: Option<&Self::Move>, weights: &Weights) -> Vec<Self::Move>;

    /// Forcing moves only. Games without a notion of urgency generate none.
    fn generate_urgent_moves(
        &self,
        _last_move: Option<&Self::Move>,
        _weights: &Weights,
    ) -> Vec<Self::Move> {
        Vec::new()
    }

    /// True if the position is unstable and quiescence should look further.
    fn in_jeopardy(&self, _last_move: Option<&Self::Move>, _weights: &Weights) -> bool {
        false
    }

    /// Heuristic value of the position from player one's perspective.
    /// The magnitude never exceeds `WINNING_VALUE`.
    fn worth(&self, last_move: Option<&Self::Move>, weights: &Weights) -> i32;

    fn worth_for(
        &self,
        last_move: Option<&Self::Move>,
        weights: &Weights,
        player1_perspective: bool,
    ) -> i32 {
        let worth = self.worth(last_move, weights);
        if player1_perspective {
            worth
        } else {
            -worth
        }
    }

    /// True if the game is over. With `record_win` the winner is remembered
    /// by the game; the search always passes `false`.
    fn done(&mut self, last_move: Option<&Self::Move>, record_win: bool) -> bool;

    fn make_internal_move(&mut self, game_move: &Self::Move) -> Result<(), IllegalMoveError>;

    fn undo_internal_move(&mut self, game_move: &Self::Move) -> Result<(), IllegalMoveError>;

    fn hash_key(&self) -> HashKey;

    /// Independent second hash stored alongside transposition entries so that
    /// two positions sharing a `hash_key` are not confused. Zero disables the check.
    fn verification_key(&self) -> u64 {
        0
    }

    fn player1_to_move(&self) -> bool;

    /// Number of moves played so far.
    fn num_moves(&self) -> usize;
}
