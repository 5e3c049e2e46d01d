//! Tictactoe Arena - best-of-N tic-tac-toe in the terminal.
//!
//! # Architecture
//!
//! - **game**: board, marks, and the move-by-move engine
//! - **ai**: difficulty tiers over a minimax core
//! - **series**: best-of-N scorekeeping
//! - **auth**: account registration and login with PBKDF2 hashing
//! - **db**: diesel models and the SQLite repository
//! - **service**: match recording and history
//! - **replay**: re-deriving a recorded series move by move
//! - **ui**: the crossterm + ratatui screen state machine
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_arena::auth::AuthService;
//! use tictactoe_arena::db::ArenaRepository;
//! use tictactoe_arena::service::MatchService;
//! use tictactoe_arena::ui::{Services, run_ui};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let repository = ArenaRepository::new("arena.db".to_string());
//! repository.run_migrations()?;
//!
//! let services = Services {
//!     auth: AuthService::new(repository.clone()),
//!     matches: MatchService::new(repository),
//! };
//! run_ui(services).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod ai;
pub mod auth;
pub mod db;
pub mod game;
pub mod replay;
pub mod series;
pub mod service;
pub mod ui;

pub use ai::{Difficulty, choose_move};
pub use auth::{AuthError, AuthService};
pub use db::{ArenaRepository, DbError, GameMode, MatchRecord, MatchResult, User};
pub use game::{Board, Game, GameStatus, Mark, MoveError, Position, Square};
pub use replay::{ReplayCursor, ReplayError, ReplayEvent, ReplayScript};
pub use series::{GameVerdict, SeriesConfig, SeriesScore, SeriesVerdict};
pub use service::{FinishedGame, MatchService};
