//! UI controller: the state machine driving the screens.

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument, warn};

use crate::ai::Difficulty;
use crate::db::{GameMode, User};
use crate::series::SeriesConfig;
use crate::ui::screen::{Screen, ScreenTransition};
use crate::ui::screens::{
    GameScreen, GameSetup, HistoryScreen, LobbyScreen, LoginScreen, ReplayScreen, SetupScreen,
};
use crate::ui::Services;

/// Active screen in the UI state machine.
enum ActiveScreen {
    Login(LoginScreen),
    Lobby(LobbyScreen),
    Setup(SetupScreen),
    Game(GameScreen),
    History(HistoryScreen),
    Replay(ReplayScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Login(s) => s,
            Self::Lobby(s) => s,
            Self::Setup(s) => s,
            Self::Game(s) => s,
            Self::History(s) => s,
            Self::Replay(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Login(s) => s,
            Self::Lobby(s) => s,
            Self::Setup(s) => s,
            Self::Game(s) => s,
            Self::History(s) => s,
            Self::Replay(s) => s,
        }
    }
}

/// Controller that owns the services and the login session.
///
/// Call [`ArenaController::run`] to start the event loop.
pub struct ArenaController {
    services: Services,
    current_user: Option<User>,
    guest: bool,
}

impl ArenaController {
    /// Creates a new controller with no active session.
    pub fn new(services: Services) -> Self {
        Self {
            services,
            current_user: None,
            guest: false,
        }
    }

    /// Display name of the active session, if any.
    fn session_name(&self) -> Option<String> {
        if self.guest {
            Some("Player 1".to_string())
        } else {
            self.current_user.as_ref().map(|u| u.username().clone())
        }
    }

    /// Runs the UI event loop until the user quits.
    #[instrument(skip_all)]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        info!("Starting UI event loop");

        let mut screen = ActiveScreen::Login(LoginScreen::new());

        loop {
            terminal.draw(|f| screen.as_screen().render(f, &self.services))?;

            // Poll for input with a short timeout to keep timers running.
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both).
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                let transition = screen.as_screen_mut().handle_key(key, &self.services);
                screen = match self.apply_transition(transition, screen) {
                    Some(next) => next,
                    None => {
                        info!("UI quitting");
                        return Ok(());
                    }
                };
            }

            // Deadline-driven updates: AI delay, game resets, replay cadence.
            let transition = screen.as_screen_mut().tick(&self.services);
            screen = match self.apply_transition(transition, screen) {
                Some(next) => next,
                None => {
                    info!("UI quitting");
                    return Ok(());
                }
            };

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to
    /// quit.
    #[instrument(skip(self, current))]
    fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::ToLogin => {
                info!("Session cleared, returning to login");
                self.current_user = None;
                self.guest = false;
                Some(ActiveScreen::Login(LoginScreen::new()))
            }

            ScreenTransition::ToLobby => {
                // Adopt the session when arriving from the login screen.
                if let ActiveScreen::Login(login) = &current {
                    self.current_user = login.logged_in().clone();
                    self.guest = *login.guest();
                }
                let name = match self.session_name() {
                    Some(n) => n,
                    None => {
                        warn!("No session for lobby, redirecting to login");
                        return Some(ActiveScreen::Login(LoginScreen::new()));
                    }
                };
                info!(user = %name, guest = self.guest, "Entering lobby");
                Some(ActiveScreen::Lobby(LobbyScreen::new(name, self.guest)))
            }

            ScreenTransition::ToSetup { mode } => {
                debug!(mode = %mode, "Entering series setup");
                Some(ActiveScreen::Setup(SetupScreen::new(mode)))
            }

            ScreenTransition::StartGame {
                mode,
                difficulty,
                opponent_name,
                config,
            } => {
                let setup = self.build_setup(mode, difficulty, opponent_name, config);
                info!(
                    mode = %mode,
                    player_one = %setup.player_one,
                    player_two = %setup.player_two,
                    "Starting series"
                );
                Some(ActiveScreen::Game(GameScreen::new(setup)))
            }

            ScreenTransition::ToHistory => match self.session_name() {
                Some(name) if !self.guest => {
                    info!(user = %name, "Entering match history");
                    Some(ActiveScreen::History(HistoryScreen::new(
                        name,
                        &self.services,
                    )))
                }
                _ => {
                    warn!("History requested without a registered session");
                    Some(current)
                }
            },

            ScreenTransition::ToReplay { match_id } => {
                match ReplayScreen::load(match_id, &self.services) {
                    Ok(replay) => {
                        info!(match_id, "Starting replay");
                        Some(ActiveScreen::Replay(replay))
                    }
                    Err(e) => {
                        tracing::error!(match_id, error = %e, "Failed to load replay");
                        let name = self.session_name().unwrap_or_default();
                        Some(ActiveScreen::History(
                            HistoryScreen::new(name, &self.services)
                                .with_error(format!("Failed to load replay: {}", e)),
                        ))
                    }
                }
            }

            ScreenTransition::Quit => None,
        }
    }

    /// Resolves display names and persistence for a new series.
    ///
    /// In PvAI the AI plays X and so sits in the first column; in PvP the
    /// logged-in player is X. Guest sessions never persist.
    fn build_setup(
        &self,
        mode: GameMode,
        difficulty: Difficulty,
        opponent_name: Option<String>,
        config: SeriesConfig,
    ) -> GameSetup {
        let session = self.session_name();
        let persist = !self.guest && self.current_user.is_some();

        let (player_one, player_two) = match mode {
            GameMode::PvAi => (
                "AI".to_string(),
                session.unwrap_or_else(|| "Player".to_string()),
            ),
            GameMode::PvP => (
                session.unwrap_or_else(|| "Player 1".to_string()),
                opponent_name
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| "Player 2".to_string()),
            ),
        };

        GameSetup {
            mode,
            difficulty,
            player_one,
            player_two,
            config,
            persist,
        }
    }
}
