use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;
use thiserror::Error;

use super::game_move::TicTacToeMove;
use super::location::{Location, BOARD_SIZE, NUM_CELLS};
use super::player::Player;
use crate::search::{HashKey, IllegalMoveError, ZobristHash};

/// Rows, columns and both diagonals, as cell indices.
pub(crate) const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

const HASH_SEED: u64 = 0x7107_7AC7_0E5E_ED01;
const VERIFICATION_SEED: u64 = 0x2C3A_91F0_66D4_B7E5;

pub type Locations = SmallVec<[Location; NUM_CELLS]>;

pub(crate) type Cells = [Option<Player>; NUM_CELLS];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("expected 9 cells, found {found}")]
    WrongLength { found: usize },
    #[error("invalid cell `{0}`, expected one of x, o, .")]
    InvalidCharacter(char),
    #[error("impossible position with {x} x pieces and {o} o pieces")]
    InvalidPieceCounts { x: usize, o: usize },
}

/// A 3x3 board mutated in place. Moves are recorded so that undo can check
/// it is reverting the most recent one.
#[derive(Clone, Debug)]
pub struct TicTacToeBoard {
    cells: Cells,
    to_move: Player,
    history: SmallVec<[TicTacToeMove; NUM_CELLS]>,
    hash: ZobristHash,
    verification: ZobristHash,
    recorded_winner: Option<Player>,
}

impl Default for TicTacToeBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TicTacToeBoard {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
            && self.to_move == other.to_move
            && self.history.len() == other.history.len()
    }
}

impl TicTacToeBoard {
    pub fn new() -> Self {
        Self {
            cells: [None; NUM_CELLS],
            to_move: Player::X,
            history: SmallVec::new(),
            hash: ZobristHash::new(NUM_CELLS, Player::ALL.len(), HASH_SEED),
            verification: ZobristHash::new(NUM_CELLS, Player::ALL.len(), VERIFICATION_SEED),
            recorded_winner: None,
        }
    }

    pub fn get(&self, location: Location) -> Option<Player> {
        self.cells[location.index()]
    }

    pub(crate) fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn history(&self) -> &[TicTacToeMove] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&TicTacToeMove> {
        self.history.last()
    }

    pub fn winner(&self) -> Option<Player> {
        winner(&self.cells)
    }

    /// The winner stored by `done` when asked to record it.
    pub fn recorded_winner(&self) -> Option<Player> {
        self.recorded_winner
    }

    pub(crate) fn record_winner(&mut self, winner: Option<Player>) {
        self.recorded_winner = winner;
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Empty cells in row-major order.
    pub fn empty_locations(&self) -> Locations {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .filter_map(|(index, _)| Location::from_index(index))
            .collect()
    }

    pub fn hash_key(&self) -> HashKey {
        self.hash.key()
    }

    pub fn verification_key(&self) -> u64 {
        self.verification.key().value()
    }

    pub fn apply(&mut self, game_move: &TicTacToeMove) -> Result<(), IllegalMoveError> {
        if self.winner().is_some() {
            return Err(IllegalMoveError::GameOver);
        }
        if game_move.player() != self.to_move {
            return Err(IllegalMoveError::OutOfTurn);
        }
        let location = game_move.location();
        if self.get(location).is_some() {
            return Err(IllegalMoveError::Occupied {
                row: location.row(),
                col: location.col(),
            });
        }

        self.toggle(location, game_move.player());
        self.to_move = self.to_move.opposite();
        self.history.push(game_move.clone());
        Ok(())
    }

    pub fn undo(&mut self, game_move: &TicTacToeMove) -> Result<(), IllegalMoveError> {
        let last = self.history.last().ok_or(IllegalMoveError::NothingToUndo)?;
        if !last.same_placement(game_move) {
            return Err(IllegalMoveError::UndoMismatch);
        }

        self.history.pop();
        self.toggle(game_move.location(), game_move.player());
        self.to_move = game_move.player();
        self.recorded_winner = None;
        Ok(())
    }

    /// Places or removes a piece; both hashes follow.
    fn toggle(&mut self, location: Location, player: Player) {
        let index = location.index();
        self.cells[index] = match self.cells[index] {
            Some(_) => None,
            None => Some(player),
        };
        self.hash.apply_move(index, player.index());
        self.verification.apply_move(index, player.index());
    }

    /// The nine cells in row-major order, e.g. `xo..x...o`.
    pub fn notation(&self) -> String {
        self.cells.iter().map(|cell| cell_symbol(*cell)).collect()
    }
}

pub(crate) fn winner(cells: &Cells) -> Option<Player> {
    WIN_LINES.iter().find_map(|line| match cells[line[0]] {
        Some(player) if line.iter().all(|&index| cells[index] == Some(player)) => Some(player),
        _ => None,
    })
}

fn cell_symbol(cell: Option<Player>) -> char {
    cell.map_or('.', |player| player.symbol())
}

impl FromStr for TicTacToeBoard {
    type Err = ParseBoardError;

    /// Parses the nine cells in row-major order. Whitespace, `/` and `|`
    /// may separate rows. The side to move follows from the piece counts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .collect();
        if symbols.len() != NUM_CELLS {
            return Err(ParseBoardError::WrongLength {
                found: symbols.len(),
            });
        }

        let mut board = TicTacToeBoard::new();
        for (index, symbol) in symbols.into_iter().enumerate() {
            let player = match symbol {
                '.' | '-' => continue,
                _ => Player::from_symbol(symbol).ok_or(ParseBoardError::InvalidCharacter(symbol))?,
            };
            if let Some(location) = Location::from_index(index) {
                board.toggle(location, player);
            }
        }

        let count = |player| board.cells.iter().filter(|cell| **cell == Some(player)).count();
        let (x, o) = (count(Player::X), count(Player::O));
        board.to_move = if x == o {
            Player::X
        } else if x == o + 1 {
            Player::O
        } else {
            return Err(ParseBoardError::InvalidPieceCounts { x, o });
        };
        Ok(board)
    }
}

impl fmt::Display for TicTacToeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 1..=BOARD_SIZE {
            write!(f, " {}", col)?;
        }
        for (index, cell) in self.cells.iter().enumerate() {
            if index % BOARD_SIZE as usize == 0 {
                write!(f, "\n{}", index / BOARD_SIZE as usize + 1)?;
            }
            write!(f, " {}", cell_symbol(*cell))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(row: u8, col: u8, player: Player) -> TicTacToeMove {
        TicTacToeMove::new(Location::new(row, col).unwrap(), player)
    }

    #[test]
    fn test_parse_and_notation() {
        let board: TicTacToeBoard = "xo./.x./..o".parse().unwrap();
        assert_eq!(board.notation(), "xo..x...o");
        assert_eq!(board.to_move(), Player::X);
        assert_eq!(board.get(Location::new(1, 1).unwrap()), Some(Player::X));
        assert_eq!(board.get(Location::new(2, 2).unwrap()), Some(Player::O));
        assert_eq!(board.get(Location::new(0, 2).unwrap()), None);
    }

    #[test]
    fn test_parse_side_to_move() {
        let board: TicTacToeBoard = "x........".parse().unwrap();
        assert_eq!(board.to_move(), Player::O);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "xo".parse::<TicTacToeBoard>(),
            Err(ParseBoardError::WrongLength { found: 2 })
        );
        assert_eq!(
            "xo.z.....".parse::<TicTacToeBoard>(),
            Err(ParseBoardError::InvalidCharacter('z'))
        );
        assert_eq!(
            "xx.......".parse::<TicTacToeBoard>(),
            Err(ParseBoardError::InvalidPieceCounts { x: 2, o: 0 })
        );
    }

    #[test]
    fn test_parsed_hash_matches_played_hash() {
        let mut board = TicTacToeBoard::new();
        board.apply(&placement(0, 0, Player::X)).unwrap();
        board.apply(&placement(1, 1, Player::O)).unwrap();

        let parsed: TicTacToeBoard = "x...o....".parse().unwrap();
        assert_eq!(board.hash_key(), parsed.hash_key());
        assert_eq!(board.verification_key(), parsed.verification_key());
        assert_ne!(board.hash_key(), TicTacToeBoard::new().hash_key());
    }

    #[test]
    fn test_apply_and_undo() {
        let mut board = TicTacToeBoard::new();
        let initial_hash = board.hash_key();
        let first = placement(1, 1, Player::X);

        board.apply(&first).unwrap();
        assert_eq!(board.to_move(), Player::O);
        assert_eq!(board.last_move(), Some(&first));

        board.undo(&first).unwrap();
        assert_eq!(board, TicTacToeBoard::new());
        assert_eq!(board.hash_key(), initial_hash);
        assert_eq!(board.verification_key(), 0);
    }

    #[test]
    fn test_illegal_moves() {
        let mut board = TicTacToeBoard::new();
        assert_eq!(
            board.apply(&placement(0, 0, Player::O)),
            Err(IllegalMoveError::OutOfTurn)
        );
        board.apply(&placement(0, 0, Player::X)).unwrap();
        assert_eq!(
            board.apply(&placement(0, 0, Player::O)),
            Err(IllegalMoveError::Occupied { row: 0, col: 0 })
        );
        assert_eq!(
            board.undo(&placement(2, 2, Player::X)),
            Err(IllegalMoveError::UndoMismatch)
        );
        board.undo(&placement(0, 0, Player::X)).unwrap();
        assert_eq!(
            board.undo(&placement(0, 0, Player::X)),
            Err(IllegalMoveError::NothingToUndo)
        );
    }

    #[test]
    fn test_no_moves_after_a_win() {
        let mut board: TicTacToeBoard = "xxx/oo./...".parse().unwrap();
        assert_eq!(board.winner(), Some(Player::X));
        assert!(board.is_over());
        assert_eq!(
            board.apply(&placement(1, 2, Player::O)),
            Err(IllegalMoveError::GameOver)
        );
    }

    #[test]
    fn test_empty_locations() {
        let board: TicTacToeBoard = "xo.ox.x.o".parse().unwrap();
        let empty: Vec<usize> = board.empty_locations().iter().map(Location::index).collect();
        assert_eq!(empty, vec![2, 5, 7]);
    }

    #[test]
    fn test_display() {
        let board: TicTacToeBoard = "x...o....".parse().unwrap();
        assert_eq!(board.to_string(), "  1 2 3\n1 x . .\n2 . o .\n3 . . .");
    }
}
