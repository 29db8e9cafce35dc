//! Driving a game of tic-tac-toe between humans and the engine.

pub mod engine;
pub mod game_loop;
pub mod input_source;

pub use engine::{Engine, EngineError, GameEnding};
pub use game_loop::GameLoop;
pub use input_source::{ConditionalInput, EngineInput, InputError, InputSource, MoveInput};
