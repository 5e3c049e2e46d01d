//! Screen trait and transition type for the UI state machine.

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::ai::Difficulty;
use crate::db::GameMode;
use crate::series::SeriesConfig;
use crate::ui::Services;

/// The result of handling input (or a timer tick) on a screen.
///
/// Screens return this to drive the
/// [`ArenaController`](crate::ui::ArenaController) state machine.
#[derive(Debug, Clone)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Return to the login screen, clearing the session.
    ToLogin,
    /// Navigate to the lobby menu.
    ToLobby,
    /// Navigate to series setup for the chosen mode.
    ToSetup {
        /// Mode the series will be played in.
        mode: GameMode,
    },
    /// Begin a series with the validated settings.
    StartGame {
        /// Mode the series will be played in.
        mode: GameMode,
        /// AI difficulty (ignored for PvP).
        difficulty: Difficulty,
        /// Second player's display name (PvP only).
        opponent_name: Option<String>,
        /// Validated series settings.
        config: SeriesConfig,
    },
    /// Navigate to the match history table.
    ToHistory,
    /// Start a replay of the series containing the given match.
    ToReplay {
        /// Id of the selected match row.
        match_id: i32,
    },
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by each screen in the UI state machine.
///
/// Each screen owns its own state, renders itself, and handles key events.
/// Time-driven screens (AI delay, replay cadence) also implement
/// [`Screen::tick`], which the controller calls every loop iteration.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, services: &Services);

    /// Handles a key event and returns the resulting transition.
    fn handle_key(&mut self, key: KeyEvent, services: &Services) -> ScreenTransition;

    /// Advances any deadline-driven state. Called once per event-loop pass.
    fn tick(&mut self, _services: &Services) -> ScreenTransition {
        ScreenTransition::Stay
    }
}
