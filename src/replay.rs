//! Series replay: re-deriving a recorded series move by move.
//!
//! Replays never trust stored outcomes for board state: each move is
//! re-applied through the game engine and win/tie re-derived from the
//! rules. A game whose moves run out while still in progress was a
//! surrender; the mark that was to move is the one that conceded.

use derive_more::{Display, Error};
use tracing::{debug, instrument};

use crate::db::{DbError, GameMode, MatchRecord};
use crate::game::{Game, GameStatus, Mark, Position};
use crate::series::{GameVerdict, SeriesConfig, SeriesScore, SeriesVerdict};

/// Errors from decoding or replaying a recorded series.
#[derive(Debug, Clone, Display, Error)]
pub enum ReplayError {
    /// A token in the stored move list was not a cell index.
    #[display("Invalid move token: '{}'", _0)]
    BadMoveToken(#[error(not(source))] String),
    /// A stored move was illegal when re-applied to the board.
    #[display("Illegal recorded move at cell {}", _0)]
    IllegalMove(#[error(not(source))] usize),
    /// The stored starting mark was not `X` or `O`.
    #[display("Invalid starting mark: '{}'", _0)]
    BadMark(#[error(not(source))] String),
    /// A stored field failed to parse.
    #[display("Corrupt match record: {}", _0)]
    BadRecord(#[error(not(source))] String),
    /// The series had no games.
    #[display("Series has no recorded games")]
    EmptySeries,
    /// No match with the requested id exists.
    #[display("No match with id {}", _0)]
    MatchNotFound(#[error(not(source))] i32),
    /// A database error while loading the series.
    #[display("{}", _0)]
    Db(DbError),
}

impl From<DbError> for ReplayError {
    fn from(err: DbError) -> Self {
        Self::Db(err)
    }
}

/// Encodes a move list as the comma-separated cell indices stored in the
/// database.
pub fn encode_moves(moves: &[Position]) -> String {
    moves
        .iter()
        .map(|pos| pos.index().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes a stored move list.
///
/// # Errors
///
/// Returns [`ReplayError::BadMoveToken`] for anything that is not an
/// in-range cell index.
pub fn decode_moves(encoded: &str) -> Result<Vec<Position>, ReplayError> {
    encoded
        .split(',')
        .filter(|token| !token.trim().is_empty())
        .map(|token| {
            token
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(Position::from_index)
                .ok_or_else(|| ReplayError::BadMoveToken(token.to_string()))
        })
        .collect()
}

/// One recorded game of a series, decoded for playback.
#[derive(Debug, Clone)]
struct ReplayGame {
    starting_mark: Mark,
    moves: Vec<Position>,
    game_number: u32,
}

/// A decoded series ready for playback.
#[derive(Debug, Clone)]
pub struct ReplayScript {
    games: Vec<ReplayGame>,
    player_one: String,
    player_two: String,
    mode: GameMode,
    config: SeriesConfig,
}

impl ReplayScript {
    /// Decodes the games of one series, as loaded from the database in
    /// play order.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] if the series is empty or any record fails
    /// to decode.
    #[instrument(skip(records), fields(count = records.len()))]
    pub fn from_records(records: &[MatchRecord]) -> Result<Self, ReplayError> {
        let first = records.first().ok_or(ReplayError::EmptySeries)?;

        let mode = first
            .parse_mode()
            .map_err(|e| ReplayError::BadRecord(e.message.clone()))?;
        let config = SeriesConfig::new(
            (*first.series_total()).max(1) as u32,
            (*first.series_target()).max(1) as u32,
        )
        .map_err(|e| ReplayError::BadRecord(e.to_string()))?;

        let games = records
            .iter()
            .map(|record| {
                let starting_mark = Mark::from_symbol(record.starting_mark())
                    .ok_or_else(|| ReplayError::BadMark(record.starting_mark().clone()))?;
                Ok(ReplayGame {
                    starting_mark,
                    moves: decode_moves(record.moves())?,
                    game_number: (*record.game_number()).max(1) as u32,
                })
            })
            .collect::<Result<Vec<_>, ReplayError>>()?;

        Ok(Self {
            games,
            player_one: first.player_one().clone(),
            player_two: first.player_two().clone(),
            mode,
            config,
        })
    }

    /// Display name shown in the X column.
    pub fn player_one(&self) -> &str {
        &self.player_one
    }

    /// Display name shown in the O column.
    pub fn player_two(&self) -> &str {
        &self.player_two
    }

    /// Mode the series was played in.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Series configuration recorded with the games.
    pub fn config(&self) -> SeriesConfig {
        self.config
    }

    /// Display name for the player holding the given mark.
    pub fn name_of(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.player_one,
            Mark::O => &self.player_two,
        }
    }
}

/// Playback phase of the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    StartGame,
    Playing,
    SeriesEnd,
    Done,
}

/// One step of playback, surfaced to the UI per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayEvent {
    /// A new game of the series is starting.
    GameStarted {
        /// 1-based game number.
        game_number: u32,
        /// Mark that moves first.
        starting_mark: Mark,
    },
    /// A move was re-applied to the board.
    MoveApplied {
        /// Mark that moved.
        mark: Mark,
        /// Cell played.
        position: Position,
    },
    /// The current game finished (derived from the rules, or surrender
    /// when the moves ran out mid-game).
    GameOver {
        /// Outcome of the game.
        verdict: GameVerdict,
        /// 1-based game number that finished.
        game_number: u32,
    },
    /// All games have been replayed.
    SeriesOver {
        /// Outcome of the series by final win counts.
        verdict: SeriesVerdict,
    },
    /// The cursor is exhausted.
    Finished,
}

/// Steps through a [`ReplayScript`] one event at a time.
#[derive(Debug)]
pub struct ReplayCursor {
    script: ReplayScript,
    game_idx: usize,
    move_idx: usize,
    game: Game,
    score: SeriesScore,
    phase: Phase,
}

impl ReplayCursor {
    /// Creates a cursor positioned before the first game.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::EmptySeries`] if the script has no games.
    pub fn new(script: ReplayScript) -> Result<Self, ReplayError> {
        let first = script.games.first().ok_or(ReplayError::EmptySeries)?;
        let game = Game::new(first.starting_mark);
        Ok(Self {
            script,
            game_idx: 0,
            move_idx: 0,
            game,
            score: SeriesScore::new(),
            phase: Phase::StartGame,
        })
    }

    /// The script being replayed.
    pub fn script(&self) -> &ReplayScript {
        &self.script
    }

    /// Board state of the game currently on screen.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Running series score.
    pub fn score(&self) -> &SeriesScore {
        &self.score
    }

    /// True once every event has been emitted.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Advances playback by one event.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::IllegalMove`] if a stored move cannot be
    /// applied to the re-derived board.
    #[instrument(skip(self), fields(game_idx = self.game_idx, move_idx = self.move_idx))]
    pub fn step(&mut self) -> Result<ReplayEvent, ReplayError> {
        match self.phase {
            Phase::StartGame => {
                let current = &self.script.games[self.game_idx];
                let event = ReplayEvent::GameStarted {
                    game_number: current.game_number,
                    starting_mark: current.starting_mark,
                };
                self.phase = Phase::Playing;
                Ok(event)
            }
            Phase::Playing => {
                let current = &self.script.games[self.game_idx];

                // Game end: rules said so, or the move list ran out.
                if !self.game.in_progress() || self.move_idx >= current.moves.len() {
                    let verdict = match *self.game.status() {
                        GameStatus::Won(mark) => GameVerdict::Won(mark),
                        GameStatus::Tie => GameVerdict::Tied,
                        // Surrender: the mark to move conceded.
                        GameStatus::InProgress => {
                            GameVerdict::Won(self.game.to_move().opponent())
                        }
                    };
                    let game_number = current.game_number;
                    self.score.record(verdict);
                    debug!(?verdict, game_number, "Replayed game finished");

                    self.game_idx += 1;
                    self.move_idx = 0;
                    if let Some(next) = self.script.games.get(self.game_idx) {
                        self.game = Game::new(next.starting_mark);
                        self.phase = Phase::StartGame;
                    } else {
                        self.phase = Phase::SeriesEnd;
                    }
                    return Ok(ReplayEvent::GameOver {
                        verdict,
                        game_number,
                    });
                }

                let position = current.moves[self.move_idx];
                let mark = *self.game.to_move();
                self.game
                    .make_move(position)
                    .map_err(|_| ReplayError::IllegalMove(position.index()))?;
                self.move_idx += 1;
                Ok(ReplayEvent::MoveApplied { mark, position })
            }
            Phase::SeriesEnd => {
                // Verdict straight from the counters: a recorded series may
                // be shorter than its configuration promised.
                let verdict = match self.score.wins(Mark::X).cmp(&self.score.wins(Mark::O)) {
                    std::cmp::Ordering::Greater => SeriesVerdict::Won(Mark::X),
                    std::cmp::Ordering::Less => SeriesVerdict::Won(Mark::O),
                    std::cmp::Ordering::Equal => SeriesVerdict::Tied,
                };
                self.phase = Phase::Done;
                Ok(ReplayEvent::SeriesOver { verdict })
            }
            Phase::Done => Ok(ReplayEvent::Finished),
        }
    }
}
