//! Login screen: sign in, register, or continue as guest.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::db::User;
use crate::ui::Services;
use crate::ui::screen::{Screen, ScreenTransition};

/// Which input field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Password,
}

/// State for the login screen.
#[derive(Debug, Getters)]
pub struct LoginScreen {
    username_input: String,
    password_input: String,
    #[getter(skip)]
    focus: Field,
    error_message: Option<String>,
    info_message: Option<String>,
    logged_in: Option<User>,
    guest: bool,
}

impl LoginScreen {
    /// Creates a fresh login screen.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing LoginScreen");
        Self {
            username_input: String::new(),
            password_input: String::new(),
            focus: Field::Username,
            error_message: None,
            info_message: None,
            logged_in: None,
            guest: false,
        }
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            Field::Username => &mut self.username_input,
            Field::Password => &mut self.password_input,
        }
    }

    /// Attempts a login with the entered credentials.
    #[instrument(skip(self, services))]
    fn try_login(&mut self, services: &Services) -> ScreenTransition {
        match services.auth.login(&self.username_input, &self.password_input) {
            Ok(user) => {
                info!(username = %user.username(), "User logged in");
                self.logged_in = Some(user);
                self.guest = false;
                self.password_input.clear();
                ScreenTransition::ToLobby
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                self.info_message = None;
                ScreenTransition::Stay
            }
        }
    }

    /// Attempts to register a new account with the entered credentials.
    #[instrument(skip(self, services))]
    fn try_register(&mut self, services: &Services) {
        match services
            .auth
            .register(&self.username_input, &self.password_input)
        {
            Ok(user) => {
                info!(username = %user.username(), "Account registered");
                self.info_message = Some("Account created successfully. Press Enter to log in.".to_string());
                self.error_message = None;
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                self.info_message = None;
            }
        }
    }
}

impl Screen for LoginScreen {
    fn render(&self, frame: &mut Frame, _services: &Services) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Tic-Tac-Toe Arena - Login")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let field_style = |field: Field| {
            if self.focus == field {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            }
        };

        let username = Paragraph::new(self.username_input.as_str())
            .style(field_style(Field::Username))
            .block(Block::default().borders(Borders::ALL).title("Username"));
        frame.render_widget(username, chunks[1]);

        let masked: String = "*".repeat(self.password_input.chars().count());
        let password = Paragraph::new(masked)
            .style(field_style(Field::Password))
            .block(Block::default().borders(Borders::ALL).title("Password"));
        frame.render_widget(password, chunks[2]);

        let (message, color) = match (&self.error_message, &self.info_message) {
            (Some(err), _) => (err.as_str(), Color::Red),
            (None, Some(ok)) => (ok.as_str(), Color::Green),
            (None, None) => ("", Color::White),
        };
        let status = Paragraph::new(message)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[3]);

        let help = Paragraph::new(
            "Tab: Switch field | Enter: Login | Ctrl+R: Register | Ctrl+G: Guest | Esc: Quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[5]);
    }

    #[instrument(skip(self, key, services))]
    fn handle_key(&mut self, key: KeyEvent, services: &Services) -> ScreenTransition {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.try_register(services);
                    ScreenTransition::Stay
                }
                KeyCode::Char('g') | KeyCode::Char('G') => {
                    info!("Guest login");
                    self.logged_in = None;
                    self.guest = true;
                    ScreenTransition::ToLobby
                }
                _ => ScreenTransition::Stay,
            };
        }

        match key.code {
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    Field::Username => Field::Password,
                    Field::Password => Field::Username,
                };
                ScreenTransition::Stay
            }
            KeyCode::Char(c) => {
                self.focused_input().push(c);
                ScreenTransition::Stay
            }
            KeyCode::Backspace => {
                self.focused_input().pop();
                ScreenTransition::Stay
            }
            KeyCode::Enter => self.try_login(services),
            KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
