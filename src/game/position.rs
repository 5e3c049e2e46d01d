//! Named board positions.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::game::Board;

/// One of the nine board cells, named by location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[allow(missing_docs)]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Position {
    /// All positions in row-major order.
    pub const ALL: [Position; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// The four corner positions.
    pub const CORNERS: [Position; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Human-readable cell name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TopLeft => "top left",
            Self::TopCenter => "top center",
            Self::TopRight => "top right",
            Self::CenterLeft => "center left",
            Self::Center => "center",
            Self::CenterRight => "center right",
            Self::BottomLeft => "bottom left",
            Self::BottomCenter => "bottom center",
            Self::BottomRight => "bottom right",
        }
    }

    /// Row-major cell index, 0 through 8.
    pub fn index(&self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopCenter => 1,
            Self::TopRight => 2,
            Self::CenterLeft => 3,
            Self::Center => 4,
            Self::CenterRight => 5,
            Self::BottomLeft => 6,
            Self::BottomCenter => 7,
            Self::BottomRight => 8,
        }
    }

    /// Position for a row-major cell index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row of the cell, 0 through 2.
    pub fn row(&self) -> usize {
        self.index() / 3
    }

    /// Column of the cell, 0 through 2.
    pub fn col(&self) -> usize {
        self.index() % 3
    }

    /// Position at the given row and column. Both must be in `0..3`.
    pub fn from_row_col(row: usize, col: usize) -> Self {
        Self::ALL[row * 3 + col]
    }

    /// Positions still open on the board, in row-major order.
    pub fn open_cells(board: &Board) -> Vec<Position> {
        Self::ALL
            .into_iter()
            .filter(|pos| board.is_empty(*pos))
            .collect()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
