use smallvec::SmallVec;

use super::board::{winner, Cells, TicTacToeBoard, WIN_LINES};
use super::game_move::TicTacToeMove;
use super::location::NUM_CELLS;
use super::player::Player;
use crate::search::{
    HashKey, IllegalMoveError, Searchable, TwoPlayerMove, Weights, WINNING_VALUE,
};

/// Weight of an open line holding one piece, then of one holding two.
pub const DEFAULT_WEIGHTS: [f64; 2] = [1.0, 10.0];

pub fn default_weights() -> Weights {
    Weights::new(DEFAULT_WEIGHTS.to_vec())
}

fn line_counts(cells: &Cells, line: &[usize; 3]) -> (usize, usize) {
    line.iter().fold((0, 0), |(x, o), &index| match cells[index] {
        Some(Player::X) => (x + 1, o),
        Some(Player::O) => (x, o + 1),
        None => (x, o),
    })
}

/// Static value of `cells` from X's perspective.
///
/// A completed line is a win. Otherwise every line still open to only one
/// player counts `weights[pieces - 1]` for that player. Non-winning totals
/// stay strictly inside the winning value.
pub(crate) fn evaluate(cells: &Cells, weights: &Weights) -> i32 {
    let mut total = 0.0;
    for line in WIN_LINES.iter() {
        match line_counts(cells, line) {
            (3, _) => return WINNING_VALUE,
            (_, 3) => return -WINNING_VALUE,
            (x, 0) if x > 0 => total += weights.get(x - 1),
            (0, o) if o > 0 => total -= weights.get(o - 1),
            _ => {}
        }
    }
    let limit = WINNING_VALUE - 1;
    (total.round() as i32).clamp(-limit, limit)
}

/// Empty cells that would complete a line already holding two pieces of
/// one player: a win for that player, a block for the other.
pub(crate) fn threat_cells(cells: &Cells) -> SmallVec<[usize; NUM_CELLS]> {
    let mut threats: SmallVec<[usize; NUM_CELLS]> = SmallVec::new();
    for line in WIN_LINES.iter() {
        let (x, o) = line_counts(cells, line);
        if (x == 2 && o == 0) || (o == 2 && x == 0) {
            if let Some(&empty) = line.iter().find(|&&index| cells[index].is_none()) {
                if !threats.contains(&empty) {
                    threats.push(empty);
                }
            }
        }
    }
    threats
}

impl Searchable for TicTacToeBoard {
    type Move = TicTacToeMove;

    fn generate_moves(
        &self,
        _last_move: Option<&TicTacToeMove>,
        weights: &Weights,
    ) -> Vec<TicTacToeMove> {
        let player = self.to_move();
        let threats = threat_cells(self.cells());
        let mut cells = *self.cells();

        self.empty_locations()
            .into_iter()
            .map(|location| {
                let index = location.index();
                cells[index] = Some(player);
                let value = evaluate(&cells, weights);
                cells[index] = None;
                TicTacToeMove::new(location, player)
                    .with_evaluation(value, threats.contains(&index))
            })
            .collect()
    }

    fn generate_urgent_moves(
        &self,
        last_move: Option<&TicTacToeMove>,
        weights: &Weights,
    ) -> Vec<TicTacToeMove> {
        let mut moves = self.generate_moves(last_move, weights);
        moves.retain(|game_move| game_move.is_urgent());
        moves
    }

    fn in_jeopardy(&self, _last_move: Option<&TicTacToeMove>, _weights: &Weights) -> bool {
        !threat_cells(self.cells()).is_empty()
    }

    fn worth(&self, _last_move: Option<&TicTacToeMove>, weights: &Weights) -> i32 {
        evaluate(self.cells(), weights)
    }

    fn done(&mut self, _last_move: Option<&TicTacToeMove>, record_win: bool) -> bool {
        let winner = winner(self.cells());
        if record_win {
            self.record_winner(winner);
        }
        winner.is_some() || self.is_full()
    }

    fn make_internal_move(&mut self, game_move: &TicTacToeMove) -> Result<(), IllegalMoveError> {
        self.apply(game_move)
    }

    fn undo_internal_move(&mut self, game_move: &TicTacToeMove) -> Result<(), IllegalMoveError> {
        self.undo(game_move)
    }

    fn hash_key(&self) -> HashKey {
        TicTacToeBoard::hash_key(self)
    }

    fn verification_key(&self) -> u64 {
        TicTacToeBoard::verification_key(self)
    }

    fn player1_to_move(&self) -> bool {
        self.to_move().is_player1()
    }

    fn num_moves(&self) -> usize {
        self.history().len()
    }
}
