//! The move-by-move game engine.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::{Board, Mark, Position, Square};

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are still being played.
    InProgress,
    /// A mark completed a line.
    Won(Mark),
    /// The board filled with no winner.
    Tie,
}

/// Errors from an attempted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The chosen square already holds a mark.
    #[display("That square is already taken")]
    SquareTaken,
    /// The game has already ended.
    #[display("The game is over")]
    GameOver,
}

/// One game of tic-tac-toe, tracking the board, whose turn it is, and
/// every move played.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Mark,
    starting_mark: Mark,
    status: GameStatus,
    history: Vec<Position>,
}

impl Game {
    /// A fresh game with the given mark moving first.
    pub fn new(starting_mark: Mark) -> Self {
        Self {
            board: Board::new(),
            to_move: starting_mark,
            starting_mark,
            status: GameStatus::InProgress,
            history: Vec::with_capacity(9),
        }
    }

    /// True while moves can still be played.
    pub fn in_progress(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    /// Plays the current mark at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] after the game has ended and
    /// [`MoveError::SquareTaken`] for an occupied square.
    pub fn make_move(&mut self, pos: Position) -> Result<(), MoveError> {
        if !self.in_progress() {
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::SquareTaken);
        }

        self.board.set(pos, Square::Taken(self.to_move));
        self.history.push(pos);
        debug!(mark = %self.to_move, cell = %pos, "Move played");

        if let Some(winner) = self.board.winner() {
            self.status = GameStatus::Won(winner);
        } else if self.board.is_full() {
            self.status = GameStatus::Tie;
        } else {
            self.to_move = self.to_move.opponent();
        }
        Ok(())
    }
}
