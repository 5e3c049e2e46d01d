//! Screen implementations for the UI state machine.

mod game;
mod history;
mod lobby;
mod login;
mod replay;
mod setup;

pub use game::{GameScreen, GameSetup};
pub use history::HistoryScreen;
pub use lobby::LobbyScreen;
pub use login::LoginScreen;
pub use replay::ReplayScreen;
pub use setup::SetupScreen;
