use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::search::IllegalMoveError;

pub const BOARD_SIZE: u8 = 3;
pub const NUM_CELLS: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

// "2 3", "2,3" or "(2, 3)", rows and columns counted from 1
static LOCATION_INPUT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?\s*(\d+)\s*[,\s]\s*(\d+)\s*\)?$")
        .expect("LOCATION_INPUT regex should be valid")
});

/// A cell on the board. Rows and columns are zero based internally and
/// one based in text.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash)]
pub struct Location {
    row: u8,
    col: u8,
}

impl Location {
    pub fn new(row: u8, col: u8) -> Result<Self, IllegalMoveError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(IllegalMoveError::OffBoard { row, col });
        }
        Ok(Self { row, col })
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= NUM_CELLS {
            return None;
        }
        Some(Self {
            row: index as u8 / BOARD_SIZE,
            col: index as u8 % BOARD_SIZE,
        })
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Row-major cell index.
    #[inline(always)]
    pub fn index(&self) -> usize {
        (self.row * BOARD_SIZE + self.col) as usize
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row + 1, self.col + 1)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseLocationError {
    #[error("expected `row col`, got `{0}`")]
    InvalidFormat(String),
    #[error(transparent)]
    OffBoard(#[from] IllegalMoveError),
}

impl FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseLocationError::InvalidFormat(s.to_string());
        let captures = LOCATION_INPUT.captures(s.trim()).ok_or_else(invalid)?;
        let parse = |group: usize| -> Result<u8, ParseLocationError> {
            captures[group].parse::<u8>().map_err(|_| invalid())
        };
        let (row, col) = (parse(1)?, parse(2)?);
        if row == 0 || col == 0 {
            return Err(IllegalMoveError::OffBoard {
                row: row.saturating_sub(1),
                col: col.saturating_sub(1),
            }
            .into());
        }
        Ok(Location::new(row - 1, col - 1)?)
    }
}
