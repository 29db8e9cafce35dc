use std::time::Duration;

use super::engine::{Engine, EngineError, GameEnding};
use super::input_source::{InputError, InputSource, MoveInput};

pub struct GameLoop<I: InputSource> {
    engine: Engine,
    input: I,
    frame_delay: Option<Duration>,
}

impl<I: InputSource> GameLoop<I> {
    pub fn new(engine: Engine, input: I) -> Self {
        Self {
            engine,
            input,
            frame_delay: None,
        }
    }

    /// Pause after every engine move, so a watched game can be followed.
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = Some(delay);
        self
    }

    /// Plays until the game ends or the user exits. Returns the ending, if any.
    pub fn run(&mut self) -> Result<Option<GameEnding>, EngineError> {
        loop {
            println!("{}\n", self.engine.board());
            if let Some(ending) = self.engine.check_game_over() {
                println!("{}", ending);
                return Ok(Some(ending));
            }

            let current_turn = self.engine.board().to_move();
            match self.input.get_move(current_turn) {
                Ok(Some(MoveInput::Place(location))) => match self.engine.make_move(location) {
                    Ok(game_move) => println!("{}", game_move),
                    Err(error) => println!("error: {}", error),
                },
                Ok(Some(MoveInput::UseEngine)) => {
                    let result = self.engine.make_best_move()?;
                    println!("{} (value {})", result.best_move, result.value);
                    if let Some(delay) = self.frame_delay {
                        std::thread::sleep(delay);
                    }
                }
                Ok(None) => println!("invalid input, expected `row col`"),
                Err(InputError::UserExit) => return Ok(None),
                Err(error) => println!("error: {}", error),
            }
        }
    }
}
