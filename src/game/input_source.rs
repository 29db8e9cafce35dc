use std::io::{self, Write};

use thiserror::Error;

use crate::tictactoe::{Location, Player};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("io error: {error:?}")]
    IOError { error: String },
    #[error("user exited")]
    UserExit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveInput {
    Place(Location),
    UseEngine,
}

pub trait InputSource {
    /// The next move for `current_turn`, or `None` if the input was not understood.
    fn get_move(&self, current_turn: Player) -> Result<Option<MoveInput>, InputError>;
}

/// Reads `row col` from stdin. `quit` or end of input exits.
pub fn parse_move_input() -> Result<Option<MoveInput>, InputError> {
    print!("your move (row col): ");
    io::stdout().flush().map_err(|error| InputError::IOError {
        error: error.to_string(),
    })?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .map_err(|error| InputError::IOError {
            error: error.to_string(),
        })?;

    let raw = input.trim();
    if read == 0 || raw == "quit" || raw == "exit" {
        return Err(InputError::UserExit);
    }
    Ok(raw.parse::<Location>().ok().map(MoveInput::Place))
}

pub struct EngineInput;

impl InputSource for EngineInput {
    fn get_move(&self, _current_turn: Player) -> Result<Option<MoveInput>, InputError> {
        Ok(Some(MoveInput::UseEngine))
    }
}

/// Reads moves for `human` from stdin and hands every other turn to the engine.
pub struct ConditionalInput {
    pub human: Player,
}

impl InputSource for ConditionalInput {
    fn get_move(&self, current_turn: Player) -> Result<Option<MoveInput>, InputError> {
        if current_turn == self.human {
            parse_move_input()
        } else {
            Ok(Some(MoveInput::UseEngine))
        }
    }
}
