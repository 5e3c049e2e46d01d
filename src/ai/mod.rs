//! The AI opponent: difficulty tiers over a minimax core.

mod minimax;

pub use minimax::{best_moves, minimax_score, worst_moves};

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::{Game, Mark, Position};

/// How hard the AI tries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Plays deliberately unhelpful moves.
    Easy,
    /// Flips a coin between best and worst play each move.
    Medium,
    /// Plays perfectly.
    #[default]
    Hard,
}

impl Difficulty {
    /// Display label for this difficulty.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// The next tier, cycling back to Easy after Hard.
    pub fn next(&self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Picks the AI's move for the current position, or `None` when the board
/// has no open cell. Ties between equally good moves are broken at random.
pub fn choose_move(
    game: &Game,
    ai_mark: Mark,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Option<Position> {
    let open = Position::open_cells(game.board());
    if open.is_empty() || !game.in_progress() {
        return None;
    }
    let choice = match difficulty {
        Difficulty::Easy => easy_move(game, ai_mark, rng),
        Difficulty::Medium => medium_move(game, ai_mark, rng),
        Difficulty::Hard => hard_move(game, ai_mark, rng),
    };
    debug!(difficulty = %difficulty, cell = ?choice, "AI move chosen");
    choice
}

/// Easy: prefer moves that neither win nor block the opponent's win, then
/// moves that merely do not win, then anything.
fn easy_move(game: &Game, ai_mark: Mark, rng: &mut impl Rng) -> Option<Position> {
    let board = game.board();
    let open = Position::open_cells(board);

    let neutral: Vec<Position> = open
        .iter()
        .copied()
        .filter(|&pos| !board.would_win(pos, ai_mark) && !board.would_win(pos, ai_mark.opponent()))
        .collect();
    if let Some(&pos) = neutral.choose(rng) {
        return Some(pos);
    }

    let non_winning: Vec<Position> = open
        .iter()
        .copied()
        .filter(|&pos| !board.would_win(pos, ai_mark))
        .collect();
    if let Some(&pos) = non_winning.choose(rng) {
        return Some(pos);
    }

    open.choose(rng).copied()
}

/// Medium: a coin flip between perfect play and the worst available move.
fn medium_move(game: &Game, ai_mark: Mark, rng: &mut impl Rng) -> Option<Position> {
    if rng.random_bool(0.5) {
        hard_move(game, ai_mark, rng)
    } else {
        worst_moves(game.board(), ai_mark).choose(rng).copied()
    }
}

/// Hard: opening book for the first two plies, minimax after.
fn hard_move(game: &Game, ai_mark: Mark, rng: &mut impl Rng) -> Option<Position> {
    if let Some(pos) = opening_move(game, rng) {
        return Some(pos);
    }
    best_moves(game.board(), ai_mark).choose(rng).copied()
}

/// The opening book: start in a random corner; answer a corner opening
/// with the center, anything else with a corner.
fn opening_move(game: &Game, rng: &mut impl Rng) -> Option<Position> {
    let board = game.board();
    let filled = 9 - Position::open_cells(board).len();
    match filled {
        0 => Position::CORNERS.choose(rng).copied(),
        1 => {
            if board.is_empty(Position::Center) {
                Some(Position::Center)
            } else {
                let open_corners: Vec<Position> = Position::CORNERS
                    .into_iter()
                    .filter(|pos| board.is_empty(*pos))
                    .collect();
                open_corners.choose(rng).copied()
            }
        }
        _ => None,
    }
}
