//! Database repository for accounts and match history.

use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use tracing::{debug, info, instrument};

use crate::db::{DbError, MIGRATIONS, MatchRecord, NewMatchRecord, NewUser, User, schema};

/// Repository owning the SQLite database path.
///
/// Connections are opened per operation; use `":memory:"` only for
/// throwaway work since each call would see a fresh database.
#[derive(Debug, Clone)]
pub struct ArenaRepository {
    db_path: String,
}

impl ArenaRepository {
    /// Creates a repository for the database at the given path.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Self {
        info!(path = %db_path, "Creating ArenaRepository");
        Self { db_path }
    }

    /// Establishes a database connection.
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies any pending embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or a migration
    /// fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Inserts a new user account.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the username is already taken or a database
    /// error occurs.
    #[instrument(skip(self, new_user))]
    pub fn create_user(&self, new_user: NewUser) -> Result<User, DbError> {
        let mut conn = self.connection()?;

        let user = diesel::insert_into(schema::users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)?;

        info!(user_id = user.id(), username = %user.username(), "User created");
        Ok(user)
    }

    /// Gets a user by username. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_by_name(&self, username: &str) -> Result<Option<User>, DbError> {
        debug!(username = %username, "Looking up user");
        let mut conn = self.connection()?;

        let user = schema::users::table
            .filter(schema::users::username.eq(username))
            .first::<User>(&mut conn)
            .optional()?;

        Ok(user)
    }

    /// Deletes a user account and every match the user appears in.
    ///
    /// Runs in a transaction so a partial delete cannot survive.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_user_and_matches(&self, username: &str) -> Result<(), DbError> {
        let mut conn = self.connection()?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::delete(
                schema::matches::table.filter(
                    schema::matches::player_one
                        .eq(username)
                        .or(schema::matches::player_two.eq(username)),
                ),
            )
            .execute(conn)?;

            diesel::delete(schema::users::table.filter(schema::users::username.eq(username)))
                .execute(conn)?;

            Ok(())
        })?;

        info!(username = %username, "User and match history deleted");
        Ok(())
    }

    /// Records a completed game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, record), fields(series_id = %record.series_id(), game_number = record.game_number()))]
    pub fn insert_match(&self, record: NewMatchRecord) -> Result<MatchRecord, DbError> {
        let mut conn = self.connection()?;

        let saved = diesel::insert_into(schema::matches::table)
            .values(&record)
            .returning(MatchRecord::as_returning())
            .get_result(&mut conn)?;

        info!(
            match_id = saved.id(),
            series_id = %saved.series_id(),
            result = %saved.result(),
            "Match recorded"
        );
        Ok(saved)
    }

    /// Lists every recorded game involving the given player, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn matches_for_player(&self, username: &str) -> Result<Vec<MatchRecord>, DbError> {
        let mut conn = self.connection()?;

        let records = schema::matches::table
            .filter(
                schema::matches::player_one
                    .eq(username)
                    .or(schema::matches::player_two.eq(username)),
            )
            .order((
                schema::matches::played_at.desc(),
                schema::matches::id.desc(),
            ))
            .load::<MatchRecord>(&mut conn)?;

        info!(username = %username, count = records.len(), "Match history loaded");
        Ok(records)
    }

    /// Loads one recorded game by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn match_by_id(&self, match_id: i32) -> Result<Option<MatchRecord>, DbError> {
        let mut conn = self.connection()?;

        let record = schema::matches::table
            .find(match_id)
            .first::<MatchRecord>(&mut conn)
            .optional()?;

        Ok(record)
    }

    /// Loads every game of a series in play order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn series_games(&self, series_id: &str) -> Result<Vec<MatchRecord>, DbError> {
        let mut conn = self.connection()?;

        let records = schema::matches::table
            .filter(schema::matches::series_id.eq(series_id))
            .order(schema::matches::game_number.asc())
            .load::<MatchRecord>(&mut conn)?;

        debug!(series_id = %series_id, count = records.len(), "Series games loaded");
        Ok(records)
    }
}
