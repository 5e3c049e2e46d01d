//! Lobby screen: mode selection hub after login.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::db::GameMode;
use crate::ui::Services;
use crate::ui::screen::{Screen, ScreenTransition};

/// Menu options available in the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LobbyOption {
    PlayVsPlayer,
    PlayVsAi,
    MatchHistory,
    Logout,
    DeleteAccount,
    Quit,
}

impl LobbyOption {
    fn label(self) -> &'static str {
        match self {
            Self::PlayVsPlayer => "Play vs Player",
            Self::PlayVsAi => "Play vs AI",
            Self::MatchHistory => "Match History",
            Self::Logout => "Logout",
            Self::DeleteAccount => "Delete Account",
            Self::Quit => "Quit",
        }
    }

    /// Options shown for a session. Guests get no history or account row.
    fn for_session(guest: bool) -> &'static [LobbyOption] {
        if guest {
            &[
                Self::PlayVsPlayer,
                Self::PlayVsAi,
                Self::Logout,
                Self::Quit,
            ]
        } else {
            &[
                Self::PlayVsPlayer,
                Self::PlayVsAi,
                Self::MatchHistory,
                Self::Logout,
                Self::DeleteAccount,
                Self::Quit,
            ]
        }
    }
}

/// State for the lobby screen.
#[derive(Debug, Getters)]
pub struct LobbyScreen {
    display_name: String,
    guest: bool,
    #[getter(skip)]
    list_state: ListState,
    confirming_delete: bool,
    error_message: Option<String>,
}

impl LobbyScreen {
    /// Creates a lobby screen for the active session.
    #[instrument]
    pub fn new(display_name: String, guest: bool) -> Self {
        debug!(user = %display_name, guest, "Initializing LobbyScreen");
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            display_name,
            guest,
            list_state: state,
            confirming_delete: false,
            error_message: None,
        }
    }

    fn options(&self) -> &'static [LobbyOption] {
        LobbyOption::for_session(self.guest)
    }

    fn select_previous(&mut self) {
        let count = self.options().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = self.options().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_option(&self) -> LobbyOption {
        let options = self.options();
        let idx = self.list_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }

    /// Deletes the account after the confirmation step.
    #[instrument(skip(self, services))]
    fn delete_account(&mut self, services: &Services) -> ScreenTransition {
        match services.auth.delete_account(&self.display_name) {
            Ok(()) => {
                info!(user = %self.display_name, "Account deleted");
                ScreenTransition::ToLogin
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to delete account: {}", e));
                self.confirming_delete = false;
                ScreenTransition::Stay
            }
        }
    }
}

impl Screen for LobbyScreen {
    fn render(&self, frame: &mut Frame, _services: &Services) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Tic-Tac-Toe Arena - Lobby")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let session = if self.guest {
            format!("Playing as guest ({}): games are not saved", self.display_name)
        } else {
            format!("Logged in as {}", self.display_name)
        };
        let session_bar = Paragraph::new(session)
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(session_bar, chunks[1]);

        let items: Vec<ListItem> = self
            .options()
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();

        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state.clone();
        frame.render_stateful_widget(menu, chunks[2], &mut list_state);

        let help_text = if self.confirming_delete {
            "Delete account and all match history? y: Confirm | n / Esc: Cancel"
        } else if let Some(err) = &self.error_message {
            err.as_str()
        } else {
            "↑↓: Navigate | Enter: Select | q: Quit"
        };
        let help_color = if self.confirming_delete || self.error_message.is_some() {
            Color::Red
        } else {
            Color::DarkGray
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(help_color))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, services))]
    fn handle_key(&mut self, key: KeyEvent, services: &Services) -> ScreenTransition {
        if self.confirming_delete {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.delete_account(services),
                _ => {
                    self.confirming_delete = false;
                    ScreenTransition::Stay
                }
            };
        }

        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Lobby option selected");
                match option {
                    LobbyOption::PlayVsPlayer => ScreenTransition::ToSetup {
                        mode: GameMode::PvP,
                    },
                    LobbyOption::PlayVsAi => ScreenTransition::ToSetup {
                        mode: GameMode::PvAi,
                    },
                    LobbyOption::MatchHistory => ScreenTransition::ToHistory,
                    LobbyOption::Logout => ScreenTransition::ToLogin,
                    LobbyOption::DeleteAccount => {
                        self.confirming_delete = true;
                        self.error_message = None;
                        ScreenTransition::Stay
                    }
                    LobbyOption::Quit => ScreenTransition::Quit,
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
