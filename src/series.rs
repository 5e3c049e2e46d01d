//! Best-of-N series bookkeeping.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::game::Mark;

/// Errors from validating series settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SeriesConfigError {
    /// The win target cannot exceed the number of games.
    #[display("Games to win cannot exceed total games")]
    TargetExceedsTotal,
    /// Both settings must be at least one.
    #[display("Total games and games to win must be at least 1")]
    Zero,
}

/// Validated series settings: how many games, and how many wins take
/// the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SeriesConfig {
    total_games: u32,
    games_to_win: u32,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            total_games: 3,
            games_to_win: 2,
        }
    }
}

impl SeriesConfig {
    /// Validates and builds series settings.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesConfigError`] when either value is zero or the win
    /// target exceeds the total.
    pub fn new(total_games: u32, games_to_win: u32) -> Result<Self, SeriesConfigError> {
        if total_games == 0 || games_to_win == 0 {
            return Err(SeriesConfigError::Zero);
        }
        if games_to_win > total_games {
            return Err(SeriesConfigError::TargetExceedsTotal);
        }
        Ok(Self {
            total_games,
            games_to_win,
        })
    }
}

/// Outcome of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameVerdict {
    /// The mark that won.
    Won(Mark),
    /// Nobody won.
    Tied,
}

impl GameVerdict {
    /// The verdict when a side concedes: the opponent wins.
    pub fn conceded(loser: Mark) -> Self {
        Self::Won(loser.opponent())
    }
}

/// Outcome of a whole series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesVerdict {
    /// The mark that took the series.
    Won(Mark),
    /// The series ended level.
    Tied,
}

/// Running win and tie counters for a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesScore {
    wins_x: u32,
    wins_o: u32,
    ties: u32,
}

impl SeriesScore {
    /// A score with nothing played yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wins recorded for a mark.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.wins_x,
            Mark::O => self.wins_o,
        }
    }

    /// Ties recorded so far.
    pub fn ties(&self) -> u32 {
        self.ties
    }

    /// Adds one finished game to the counters.
    pub fn record(&mut self, verdict: GameVerdict) {
        match verdict {
            GameVerdict::Won(Mark::X) => self.wins_x += 1,
            GameVerdict::Won(Mark::O) => self.wins_o += 1,
            GameVerdict::Tied => self.ties += 1,
        }
    }

    /// Games recorded so far.
    pub fn games_played(&self) -> u32 {
        self.wins_x + self.wins_o + self.ties
    }

    /// The 1-based number of the game about to be played.
    pub fn next_game_number(&self) -> u32 {
        self.games_played() + 1
    }

    /// True once a side reached the win target or every game was played.
    pub fn is_complete(&self, config: &SeriesConfig) -> bool {
        self.wins_x >= *config.games_to_win()
            || self.wins_o >= *config.games_to_win()
            || self.games_played() >= *config.total_games()
    }

    /// The series outcome, or `None` while the series is still live.
    pub fn verdict(&self, config: &SeriesConfig) -> Option<SeriesVerdict> {
        if !self.is_complete(config) {
            return None;
        }
        let verdict = match self.wins_x.cmp(&self.wins_o) {
            std::cmp::Ordering::Greater => SeriesVerdict::Won(Mark::X),
            std::cmp::Ordering::Less => SeriesVerdict::Won(Mark::O),
            std::cmp::Ordering::Equal => SeriesVerdict::Tied,
        };
        Some(verdict)
    }
}
