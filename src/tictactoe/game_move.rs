use std::fmt;

use super::location::Location;
use super::player::Player;
use crate::search::TwoPlayerMove;

/// Placing `player`'s piece on an empty cell.
#[derive(Clone, Debug, PartialEq)]
pub struct TicTacToeMove {
    location: Location,
    player: Player,
    value: i32,
    urgent: bool,
}

impl TicTacToeMove {
    pub fn new(location: Location, player: Player) -> Self {
        Self {
            location,
            player,
            value: 0,
            urgent: false,
        }
    }

    pub(crate) fn with_evaluation(mut self, value: i32, urgent: bool) -> Self {
        self.value = value;
        self.urgent = urgent;
        self
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// True if `other` places the same piece on the same cell, whatever the values.
    pub fn same_placement(&self, other: &TicTacToeMove) -> bool {
        self.location == other.location && self.player == other.player
    }
}

impl TwoPlayerMove for TicTacToeMove {
    fn value(&self) -> i32 {
        self.value
    }

    fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    fn is_player1(&self) -> bool {
        self.player.is_player1()
    }

    fn is_urgent(&self) -> bool {
        self.urgent
    }
}

impl fmt::Display for TicTacToeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.player, self.location)
    }
}
