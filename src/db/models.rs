//! Database models and stored-value enums.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::{DbError, schema};

/// User account database model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::users)]
pub struct User {
    id: i32,
    username: String,
    password_hash: String,
    salt: String,
    created_at: NaiveDateTime,
}

/// Insertable user model. Hash and salt are hex-encoded.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::users)]
pub struct NewUser {
    username: String,
    password_hash: String,
    salt: String,
}

/// A recorded game of a best-of-N series.
///
/// `winner` holds a display name, or `-` for a tie. `moves` is the
/// comma-separated sequence of cell indices in play order.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::matches)]
pub struct MatchRecord {
    id: i32,
    player_one: String,
    player_two: String,
    winner: String,
    result: String,
    moves: String,
    starting_mark: String,
    game_mode: String,
    series_id: String,
    game_number: i32,
    series_total: i32,
    series_target: i32,
    played_at: NaiveDateTime,
}

impl MatchRecord {
    /// Parses the stored result string.
    pub fn parse_result(&self) -> Result<MatchResult, DbError> {
        MatchResult::from_db_string(self.result())
    }

    /// Parses the stored game mode string.
    pub fn parse_mode(&self) -> Result<GameMode, DbError> {
        GameMode::from_db_string(self.game_mode())
    }
}

/// Insertable match model for recording a finished game.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::matches)]
pub struct NewMatchRecord {
    player_one: String,
    player_two: String,
    winner: String,
    result: String,
    moves: String,
    starting_mark: String,
    game_mode: String,
    series_id: String,
    game_number: i32,
    series_total: i32,
    series_target: i32,
}

/// How an individual game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchResult {
    /// One side completed a line.
    Win,
    /// Board filled with no winner.
    Tie,
    /// A player conceded mid-game.
    Surrender,
}

impl MatchResult {
    /// Converts the result to the string stored in the database.
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Tie => "tie",
            Self::Surrender => "surrender",
        }
    }

    /// Parses the result from its stored string.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the string is not a valid result value.
    pub fn from_db_string(s: &str) -> Result<Self, DbError> {
        match s {
            "win" => Ok(Self::Win),
            "tie" => Ok(Self::Tie),
            "surrender" => Ok(Self::Surrender),
            _ => Err(DbError::new(format!("Invalid result: '{}'", s))),
        }
    }
}

/// Which mode a game was played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Two humans at the same keyboard.
    PvP,
    /// Human against the AI opponent.
    PvAi,
}

impl GameMode {
    /// Converts the mode to the string stored in the database.
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::PvP => "pvp",
            Self::PvAi => "pvai",
        }
    }

    /// Parses the mode from its stored string.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the string is not a valid mode value.
    pub fn from_db_string(s: &str) -> Result<Self, DbError> {
        match s {
            "pvp" => Ok(Self::PvP),
            "pvai" => Ok(Self::PvAi),
            _ => Err(DbError::new(format!("Invalid game mode: '{}'", s))),
        }
    }

    /// Display label for this mode.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PvP => "Player vs Player",
            Self::PvAi => "Player vs AI",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
