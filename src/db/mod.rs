//! Database persistence for user accounts and recorded matches.

mod error;
mod models;
mod repository;
mod schema;

pub use error::DbError;
pub use models::{GameMode, MatchRecord, MatchResult, NewMatchRecord, NewUser, User};
pub use repository::ArenaRepository;

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

/// Schema migrations compiled into the binary, applied at startup.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
