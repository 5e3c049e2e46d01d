//! Match recording and history business logic.

use chrono::Local;
use derive_new::new;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::db::{ArenaRepository, DbError, GameMode, MatchRecord, MatchResult, NewMatchRecord};
use crate::game::{Game, Mark, Position};
use crate::replay::encode_moves;
use crate::series::{GameVerdict, SeriesConfig};

/// Everything needed to persist one finished game of a series.
#[derive(Debug, Clone, new)]
pub struct FinishedGame {
    /// Display name shown in the X column.
    pub player_one: String,
    /// Display name shown in the O column.
    pub player_two: String,
    /// Winner's display name, or `-` for a tie.
    pub winner: String,
    /// How the game ended.
    pub result: MatchResult,
    /// Moves in play order.
    pub moves: Vec<Position>,
    /// Mark that moved first.
    pub starting_mark: Mark,
    /// Mode the game was played in.
    pub mode: GameMode,
    /// Series the game belongs to.
    pub series_id: String,
    /// 1-based game number within the series.
    pub game_number: u32,
    /// Series configuration at the time of play.
    pub config: SeriesConfig,
}

impl FinishedGame {
    /// Builds the persistence record for a decided game.
    ///
    /// Crosses belong to player one, so a verdict for [`Mark::X`] resolves
    /// to `player_one` and [`Mark::O`] to `player_two`. A tie is stored
    /// with `-` in the winner column. A concession passes
    /// [`GameVerdict::conceded`] here, so the non-conceding side's name is
    /// the one written.
    #[allow(clippy::too_many_arguments)]
    pub fn from_game(
        game: &Game,
        verdict: GameVerdict,
        result: MatchResult,
        player_one: String,
        player_two: String,
        mode: GameMode,
        series_id: String,
        game_number: u32,
        config: SeriesConfig,
    ) -> Self {
        let winner = match verdict {
            GameVerdict::Won(Mark::X) => player_one.clone(),
            GameVerdict::Won(Mark::O) => player_two.clone(),
            GameVerdict::Tied => "-".to_string(),
        };
        Self::new(
            player_one,
            player_two,
            winner,
            result,
            game.history().clone(),
            *game.starting_mark(),
            mode,
            series_id,
            game_number,
            config,
        )
    }
}

/// Service layer for recording games and reading match history.
#[derive(Debug, Clone)]
pub struct MatchService {
    repository: ArenaRepository,
}

impl MatchService {
    /// Creates a match service backed by the given repository.
    pub fn new(repository: ArenaRepository) -> Self {
        Self { repository }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &ArenaRepository {
        &self.repository
    }

    /// Mints a fresh series identifier: local timestamp plus a random
    /// 4-digit suffix.
    #[instrument(skip(rng))]
    pub fn mint_series_id(rng: &mut impl Rng) -> String {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let suffix: u32 = rng.random_range(1000..10000);
        format!("{stamp}_{suffix}")
    }

    /// Persists one finished game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, game), fields(series_id = %game.series_id, game_number = game.game_number))]
    pub fn record_game(&self, game: FinishedGame) -> Result<MatchRecord, DbError> {
        debug!(result = ?game.result, winner = %game.winner, "Recording finished game");

        let record = NewMatchRecord::new(
            game.player_one,
            game.player_two,
            game.winner,
            game.result.to_db_string().to_string(),
            encode_moves(&game.moves),
            game.starting_mark.symbol().to_string(),
            game.mode.to_db_string().to_string(),
            game.series_id,
            game.game_number as i32,
            *game.config.total_games() as i32,
            *game.config.games_to_win() as i32,
        );

        let saved = self.repository.insert_match(record)?;
        info!(match_id = saved.id(), "Game persisted");
        Ok(saved)
    }

    /// Match history for a player, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn history(&self, username: &str) -> Result<Vec<MatchRecord>, DbError> {
        self.repository.matches_for_player(username)
    }

    /// Loads the full series a recorded game belongs to, in play order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn series_of(&self, record: &MatchRecord) -> Result<Vec<MatchRecord>, DbError> {
        self.repository.series_games(record.series_id())
    }
}
