//! Marks, squares, and the 3x3 board.

use serde::{Deserialize, Serialize};

use crate::game::Position;

/// A player's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Crosses.
    X,
    /// Noughts.
    O,
}

impl Mark {
    /// The other mark.
    pub fn opponent(&self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    /// Single-character symbol, as stored in the database.
    pub fn symbol(&self) -> char {
        match self {
            Self::X => 'X',
            Self::O => 'O',
        }
    }

    /// Parses a stored symbol.
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "X" | "x" => Some(Self::X),
            "O" | "o" => Some(Self::O),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// No mark placed yet.
    Empty,
    /// Occupied by a mark.
    Taken(Mark),
}

/// A 3x3 board in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The eight winning line patterns, as cell indices.
    pub const LINES: [[usize; 3]; 8] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        [0, 4, 8],
        [2, 4, 6],
    ];

    /// An empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// The square at a position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.index()]
    }

    /// Sets the square at a position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.index()] = square;
    }

    /// True when the position holds no mark.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// True when every square is taken.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// All nine squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// The mark completing a line, if any.
    pub fn winner(&self) -> Option<Mark> {
        for line in Self::LINES {
            if let Square::Taken(mark) = self.squares[line[0]]
                && self.squares[line[1]] == Square::Taken(mark)
                && self.squares[line[2]] == Square::Taken(mark)
            {
                return Some(mark);
            }
        }
        None
    }

    /// True when placing `mark` at `pos` would complete a line.
    /// The position must be empty.
    pub fn would_win(&self, pos: Position, mark: Mark) -> bool {
        let mut probe = *self;
        probe.set(pos, Square::Taken(mark));
        probe.winner() == Some(mark)
    }

    /// Renders the board as a three-line string for logs.
    pub fn display(&self) -> String {
        let cell = |i: usize| match self.squares[i] {
            Square::Taken(mark) => mark.symbol(),
            Square::Empty => '.',
        };
        (0..3)
            .map(|row| {
                format!(
                    "{} {} {}",
                    cell(row * 3),
                    cell(row * 3 + 1),
                    cell(row * 3 + 2)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
