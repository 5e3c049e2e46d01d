//! Replay screen: steps a recorded series through the game engine.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{error, info, instrument};

use crate::game::{Mark, Position, Square};
use crate::replay::{ReplayCursor, ReplayError, ReplayEvent, ReplayScript};
use crate::series::{GameVerdict, SeriesVerdict};
use crate::ui::Services;
use crate::ui::screen::{Screen, ScreenTransition};

/// Playback cadence between replayed events.
const STEP_INTERVAL: Duration = Duration::from_millis(700);

/// State for the series replay screen.
#[derive(Debug)]
pub struct ReplayScreen {
    cursor: ReplayCursor,
    next_step_due: Option<Instant>,
    paused: bool,
    status: String,
    failed: bool,
}

impl ReplayScreen {
    /// Loads the series a recorded match belongs to and prepares playback.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] if the match does not exist, the series
    /// cannot be loaded, or its records fail to decode.
    #[instrument(skip(services))]
    pub fn load(match_id: i32, services: &Services) -> Result<Self, ReplayError> {
        let record = services
            .matches
            .repository()
            .match_by_id(match_id)?
            .ok_or(ReplayError::MatchNotFound(match_id))?;
        let records = services.matches.series_of(&record)?;
        let script = ReplayScript::from_records(&records)?;
        info!(
            match_id,
            series_id = record.series_id(),
            games = records.len(),
            "Replay loaded"
        );
        let cursor = ReplayCursor::new(script)?;
        Ok(Self {
            cursor,
            next_step_due: Some(Instant::now() + STEP_INTERVAL),
            paused: false,
            status: "Replay starting...".to_string(),
            failed: false,
        })
    }

    fn script(&self) -> &ReplayScript {
        self.cursor.script()
    }

    /// Advances playback by one event and updates the status line.
    fn advance(&mut self) {
        match self.cursor.step() {
            Ok(event) => {
                self.status = self.describe(event);
                self.next_step_due = if self.cursor.is_done() {
                    None
                } else {
                    Some(Instant::now() + STEP_INTERVAL)
                };
            }
            Err(e) => {
                error!("Replay failed: {e}");
                self.status = format!("Replay failed: {e}");
                self.failed = true;
                self.next_step_due = None;
            }
        }
    }

    fn describe(&self, event: ReplayEvent) -> String {
        let script = self.script();
        match event {
            ReplayEvent::GameStarted {
                game_number,
                starting_mark,
            } => format!(
                "Game {game_number}: {} ({starting_mark}) to start",
                script.name_of(starting_mark)
            ),
            ReplayEvent::MoveApplied { mark, position } => {
                format!("{} ({mark}) plays {position}", script.name_of(mark))
            }
            ReplayEvent::GameOver {
                verdict,
                game_number,
            } => match verdict {
                GameVerdict::Won(mark) => {
                    format!("{} wins game {game_number}", script.name_of(mark))
                }
                GameVerdict::Tied => format!("Game {game_number} is a tie"),
            },
            ReplayEvent::SeriesOver { verdict } => match verdict {
                SeriesVerdict::Won(mark) => {
                    format!("{} takes the series", script.name_of(mark))
                }
                SeriesVerdict::Tied => "The series ended level".to_string(),
            },
            ReplayEvent::Finished => "Replay finished: Esc to go back".to_string(),
        }
    }

    fn render_board(&self) -> Vec<Line<'_>> {
        let board = self.cursor.game().board();
        let mut lines = Vec::with_capacity(5);
        for row in 0..3 {
            let mut spans = Vec::new();
            for col in 0..3 {
                let pos = Position::from_row_col(row, col);
                let (symbol, style) = match board.get(pos) {
                    Square::Taken(Mark::X) => ("X", Style::default().fg(Color::Red)),
                    Square::Taken(Mark::O) => ("O", Style::default().fg(Color::Blue)),
                    Square::Empty => (" ", Style::default().fg(Color::DarkGray)),
                };
                spans.push(Span::styled(format!(" {symbol} "), style));
                if col < 2 {
                    spans.push(Span::raw("│"));
                }
            }
            lines.push(Line::from(spans));
            if row < 2 {
                lines.push(Line::from("───┼───┼───"));
            }
        }
        lines
    }

    fn render_scoreboard(&self) -> Vec<Line<'_>> {
        let script = self.script();
        let score = self.cursor.score();
        let config = script.config();
        vec![
            Line::from(format!("Best of {}", config.total_games())),
            Line::from(format!("First to {} wins", config.games_to_win())),
            Line::from(""),
            Line::from(format!(
                "{} (X): {}",
                script.name_of(Mark::X),
                score.wins(Mark::X)
            )),
            Line::from(format!(
                "{} (O): {}",
                script.name_of(Mark::O),
                score.wins(Mark::O)
            )),
            Line::from(format!("Ties: {}", score.ties())),
        ]
    }
}

impl Screen for ReplayScreen {
    fn render(&self, frame: &mut Frame, _services: &Services) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(7),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let script = self.script();
        let mode = script.mode().label();
        let title = Paragraph::new(format!(
            "Replay - {} vs {} ({mode})",
            script.player_one(),
            script.player_two()
        ))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        let board = Paragraph::new(self.render_board())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Board"));
        frame.render_widget(board, middle[0]);

        let scoreboard = Paragraph::new(self.render_scoreboard())
            .block(Block::default().borders(Borders::ALL).title("Series"));
        frame.render_widget(scoreboard, middle[1]);

        let status_style = if self.failed {
            Style::default().fg(Color::Red)
        } else if self.paused {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let status_text = if self.paused {
            format!("[paused] {}", self.status)
        } else {
            self.status.clone()
        };
        let status = Paragraph::new(status_text)
            .style(status_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);

        let help = Paragraph::new("Space: Pause | n: Step | Esc: Back to history | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _services))]
    fn handle_key(&mut self, key: KeyEvent, _services: &Services) -> ScreenTransition {
        match key.code {
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
                if !self.paused && !self.cursor.is_done() && !self.failed {
                    self.next_step_due = Some(Instant::now() + STEP_INTERVAL);
                }
                ScreenTransition::Stay
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                if !self.cursor.is_done() && !self.failed {
                    self.advance();
                }
                ScreenTransition::Stay
            }
            KeyCode::Esc => ScreenTransition::ToHistory,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }

    fn tick(&mut self, _services: &Services) -> ScreenTransition {
        if self.paused || self.failed {
            return ScreenTransition::Stay;
        }
        if let Some(due) = self.next_step_due
            && Instant::now() >= due
        {
            self.advance();
        }
        ScreenTransition::Stay
    }
}
