//! Series setup screen: game count, win target, difficulty, names.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::ai::Difficulty;
use crate::db::GameMode;
use crate::series::SeriesConfig;
use crate::ui::Services;
use crate::ui::screen::{Screen, ScreenTransition};

/// Upper bound on games per series, to keep the spinner sane.
const MAX_GAMES: u32 = 25;

/// Settings fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupField {
    TotalGames,
    GamesToWin,
    Difficulty,
    OpponentName,
}

/// State for the series setup screen.
#[derive(Debug)]
pub struct SetupScreen {
    mode: GameMode,
    total_games: u32,
    games_to_win: u32,
    difficulty: Difficulty,
    opponent_input: String,
    list_state: ListState,
    error_message: Option<String>,
}

impl SetupScreen {
    /// Creates a setup screen for the chosen mode with default settings.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        debug!(mode = %mode, "Initializing SetupScreen");
        let defaults = SeriesConfig::default();
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            mode,
            total_games: *defaults.total_games(),
            games_to_win: *defaults.games_to_win(),
            difficulty: Difficulty::default(),
            opponent_input: String::new(),
            list_state: state,
            error_message: None,
        }
    }

    fn fields(&self) -> &'static [SetupField] {
        match self.mode {
            GameMode::PvAi => &[
                SetupField::TotalGames,
                SetupField::GamesToWin,
                SetupField::Difficulty,
            ],
            GameMode::PvP => &[
                SetupField::TotalGames,
                SetupField::GamesToWin,
                SetupField::OpponentName,
            ],
        }
    }

    fn selected_field(&self) -> SetupField {
        let fields = self.fields();
        let idx = self.list_state.selected().unwrap_or(0);
        fields[idx.min(fields.len() - 1)]
    }

    fn field_label(&self, field: SetupField) -> String {
        match field {
            SetupField::TotalGames => format!("Total games        ◄ {} ►", self.total_games),
            SetupField::GamesToWin => format!("Games to win       ◄ {} ►", self.games_to_win),
            SetupField::Difficulty => format!("AI difficulty      ◄ {} ►", self.difficulty),
            SetupField::OpponentName => {
                let name = if self.opponent_input.is_empty() {
                    "Player 2"
                } else {
                    self.opponent_input.as_str()
                };
                format!("Opponent name      [ {} ]", name)
            }
        }
    }

    /// Adjusts the selected field left (-1) or right (+1).
    fn adjust(&mut self, delta: i32) {
        match self.selected_field() {
            SetupField::TotalGames => {
                self.total_games = adjust_count(self.total_games, delta);
            }
            SetupField::GamesToWin => {
                self.games_to_win = adjust_count(self.games_to_win, delta);
            }
            SetupField::Difficulty => {
                self.difficulty = self.difficulty.next();
            }
            SetupField::OpponentName => {}
        }
        self.error_message = None;
    }

    /// Validates the settings and launches the series.
    #[instrument(skip(self))]
    fn confirm(&mut self) -> ScreenTransition {
        match SeriesConfig::new(self.total_games, self.games_to_win) {
            Ok(config) => {
                info!(
                    total = self.total_games,
                    target = self.games_to_win,
                    "Series settings confirmed"
                );
                ScreenTransition::StartGame {
                    mode: self.mode,
                    difficulty: self.difficulty,
                    opponent_name: if self.opponent_input.trim().is_empty() {
                        None
                    } else {
                        Some(self.opponent_input.trim().to_string())
                    },
                    config,
                }
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                ScreenTransition::Stay
            }
        }
    }
}

/// Steps a spinner value within `1..=MAX_GAMES`.
fn adjust_count(value: u32, delta: i32) -> u32 {
    if delta > 0 {
        value.saturating_add(1).min(MAX_GAMES)
    } else {
        value.saturating_sub(1).max(1)
    }
}

impl Screen for SetupScreen {
    fn render(&self, frame: &mut Frame, _services: &Services) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new(format!("Series Setup - {}", self.mode))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = self
            .fields()
            .iter()
            .map(|field| ListItem::new(self.field_label(*field)))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Settings"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state.clone();
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        let error_text = self.error_message.as_deref().unwrap_or("");
        let error = Paragraph::new(error_text)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(error, chunks[2]);

        let help = Paragraph::new("↑↓: Field | ←→: Adjust | Type: Name | Enter: Start | Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _services))]
    fn handle_key(&mut self, key: KeyEvent, _services: &Services) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                let count = self.fields().len();
                let i = match self.list_state.selected() {
                    Some(i) if i > 0 => i - 1,
                    _ => count - 1,
                };
                self.list_state.select(Some(i));
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                let count = self.fields().len();
                let i = match self.list_state.selected() {
                    Some(i) => (i + 1) % count,
                    None => 0,
                };
                self.list_state.select(Some(i));
                ScreenTransition::Stay
            }
            KeyCode::Left => {
                self.adjust(-1);
                ScreenTransition::Stay
            }
            KeyCode::Right => {
                self.adjust(1);
                ScreenTransition::Stay
            }
            KeyCode::Char(c) if self.selected_field() == SetupField::OpponentName => {
                self.opponent_input.push(c);
                ScreenTransition::Stay
            }
            KeyCode::Backspace if self.selected_field() == SetupField::OpponentName => {
                self.opponent_input.pop();
                ScreenTransition::Stay
            }
            KeyCode::Enter => self.confirm(),
            KeyCode::Esc => ScreenTransition::ToLobby,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
