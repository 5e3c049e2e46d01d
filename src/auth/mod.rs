//! Account registration and login.

pub mod password;

use derive_more::{Display, Error, From};
use tracing::{debug, info, instrument, warn};

use crate::db::{ArenaRepository, DbError, NewUser, User};

/// Errors from account operations.
#[derive(Debug, Display, Error, From)]
pub enum AuthError {
    /// Username or password was empty.
    #[display("Username and password cannot be empty")]
    EmptyCredentials,
    /// The username is already registered.
    #[display("Username is already taken")]
    UsernameTaken,
    /// Unknown username or wrong password. Deliberately indistinguishable.
    #[display("Invalid username or password")]
    InvalidCredentials,
    /// Underlying database failure.
    #[display("{}", _0)]
    Db(DbError),
}

/// Service layer for registration, login, and account deletion.
#[derive(Debug, Clone)]
pub struct AuthService {
    repository: ArenaRepository,
}

impl AuthService {
    /// Creates an auth service backed by the given repository.
    pub fn new(repository: ArenaRepository) -> Self {
        Self { repository }
    }

    /// Registers a new account with a fresh salt and PBKDF2 hash.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmptyCredentials`] for blank input,
    /// [`AuthError::UsernameTaken`] for a duplicate username, or a wrapped
    /// [`DbError`].
    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::EmptyCredentials);
        }

        if self.repository.get_user_by_name(username)?.is_some() {
            warn!(username = %username, "Registration rejected: username taken");
            return Err(AuthError::UsernameTaken);
        }

        let salt = password::generate_salt(&mut rand::rng());
        let hash = password::derive_hash(password, &salt);

        let user = self.repository.create_user(NewUser::new(
            username.to_string(),
            hash,
            hex::encode(salt),
        ))?;
        info!(user_id = user.id(), username = %username, "Account registered");
        Ok(user)
    }

    /// Logs a user in by recomputing and comparing the stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown username or
    /// a wrong password: callers cannot tell which.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::EmptyCredentials);
        }

        let user = self
            .repository
            .get_user_by_name(username)?
            .ok_or(AuthError::InvalidCredentials)?;

        if password::verify(password, user.salt(), user.password_hash()) {
            info!(user_id = user.id(), username = %username, "Login succeeded");
            Ok(user)
        } else {
            debug!(username = %username, "Login failed: hash mismatch");
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Deletes an account together with its match history.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`DbError`] on database failure.
    #[instrument(skip(self))]
    pub fn delete_account(&self, username: &str) -> Result<(), AuthError> {
        self.repository.delete_user_and_matches(username)?;
        Ok(())
    }
}
