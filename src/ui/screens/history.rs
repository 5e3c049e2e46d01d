//! Match history screen: recorded games, newest first.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};
use tracing::{debug, error, instrument};

use crate::db::MatchRecord;
use crate::ui::Services;
use crate::ui::screen::{Screen, ScreenTransition};

/// State for the match history screen.
#[derive(Debug)]
pub struct HistoryScreen {
    username: String,
    records: Vec<MatchRecord>,
    table_state: TableState,
    error_message: Option<String>,
}

impl HistoryScreen {
    /// Loads the player's match history from the database.
    #[instrument(skip(services))]
    pub fn new(username: String, services: &Services) -> Self {
        let (records, error_message) = match services.matches.history(&username) {
            Ok(records) => {
                debug!(count = records.len(), "Loaded match history");
                (records, None)
            }
            Err(e) => {
                error!("Failed to load match history: {e}");
                (Vec::new(), Some(format!("Could not load history: {e}")))
            }
        };
        let mut table_state = TableState::default();
        if !records.is_empty() {
            table_state.select(Some(0));
        }
        Self {
            username,
            records,
            table_state,
            error_message,
        }
    }

    /// Attaches an error banner, e.g. after a failed replay load.
    pub fn with_error(mut self, message: String) -> Self {
        self.error_message = Some(message);
        self
    }

    fn selected_record(&self) -> Option<&MatchRecord> {
        self.table_state.selected().and_then(|i| self.records.get(i))
    }

    fn select_next(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => (i + 1) % self.records.len(),
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn select_previous(&mut self) {
        if self.records.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => self.records.len() - 1,
        };
        self.table_state.select(Some(i));
    }
}

impl Screen for HistoryScreen {
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

        let title = Paragraph::new(format!("Match History - {}", self.username))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let header = Row::new(vec!["Played", "Players", "Winner", "Result", "Mode", "Game"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .records
            .iter()
            .map(|record| {
                let mode = record
                    .parse_mode()
                    .map(|m| m.label().to_string())
                    .unwrap_or_else(|_| record.game_mode().clone());
                Row::new(vec![
                    record.played_at().format("%Y-%m-%d %H:%M").to_string(),
                    format!("{} vs {}", record.player_one(), record.player_two()),
                    record.winner().clone(),
                    record.result().clone(),
                    mode,
                    format!("{}/{}", record.game_number(), record.series_total()),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(17),
                Constraint::Min(20),
                Constraint::Length(14),
                Constraint::Length(10),
                Constraint::Length(14),
                Constraint::Length(6),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Games"))
        .row_highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

        let mut table_state = self.table_state.clone();
        frame.render_stateful_widget(table, chunks[1], &mut table_state);

        let status = if let Some(message) = &self.error_message {
            message.clone()
        } else if self.records.is_empty() {
            "No recorded matches yet.".to_string()
        } else {
            format!("{} recorded games", self.records.len())
        };
        let status = Paragraph::new(status)
            .style(Style::default().fg(if self.error_message.is_some() {
                Color::Red
            } else {
                Color::Yellow
            }))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);

        let help = Paragraph::new("↑↓: Select | Enter: Replay series | Esc: Back | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _services))]
    fn handle_key(&mut self, key: KeyEvent, _services: &Services) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => match self.selected_record() {
                Some(record) => ScreenTransition::ToReplay {
                    match_id: *record.id(),
                },
                None => ScreenTransition::Stay,
            },
            KeyCode::Esc => ScreenTransition::ToLobby,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
