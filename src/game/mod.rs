//! Game rules: the board, marks, and the move-by-move engine.

mod engine;
mod position;
mod types;

pub use engine::{Game, GameStatus, MoveError};
pub use position::Position;
pub use types::{Board, Mark, Square};
