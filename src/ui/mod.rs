//! Terminal UI: a multi-screen state machine over crossterm + ratatui.

mod controller;
mod screen;
mod screens;

pub use controller::ArenaController;
pub use screen::{Screen, ScreenTransition};
pub use screens::GameSetup;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

use crate::auth::AuthService;
use crate::service::MatchService;

/// Service bundle handed to every screen.
#[derive(Debug, Clone)]
pub struct Services {
    /// Account registration and login.
    pub auth: AuthService,
    /// Match recording and history.
    pub matches: MatchService,
}

/// Runs the terminal UI until the user quits.
///
/// Sets up the alternate screen and raw mode, drives the controller, and
/// restores the terminal on the way out even when the loop errors.
pub async fn run_ui(services: Services) -> Result<()> {
    info!("Starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut controller = ArenaController::new(services);
    let res = controller.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref err) = res {
        error!(error = ?err, "UI loop error");
    }
    res
}
