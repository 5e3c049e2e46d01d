//! Game screen: live board, series scoreboard, AI scheduling.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, error, info, instrument};

use crate::ai::{Difficulty, choose_move};
use crate::db::{GameMode, MatchResult};
use crate::game::{Game, GameStatus, Mark, Position, Square};
use crate::series::{GameVerdict, SeriesConfig, SeriesScore, SeriesVerdict};
use crate::service::FinishedGame;
use crate::ui::Services;
use crate::ui::screen::{Screen, ScreenTransition};

/// The AI always plays crosses.
const AI_MARK: Mark = Mark::X;

/// Pause before the AI places its mark.
const AI_DELAY: Duration = Duration::from_millis(500);

/// Pause between games in a series.
const NEXT_GAME_DELAY: Duration = Duration::from_secs(2);

/// Pause on the final scoreboard before returning to the lobby.
const SERIES_END_DELAY: Duration = Duration::from_secs(3);

/// Everything the game screen needs to run a series.
#[derive(Debug, Clone)]
pub struct GameSetup {
    /// Who is playing whom.
    pub mode: GameMode,
    /// AI strength; ignored in PvP.
    pub difficulty: Difficulty,
    /// Display name shown in the X column.
    pub player_one: String,
    /// Display name shown in the O column.
    pub player_two: String,
    /// Series length and win target.
    pub config: SeriesConfig,
    /// Whether finished games are written to match history.
    pub persist: bool,
}

/// State for the live game screen.
#[derive(Debug)]
pub struct GameScreen {
    setup: GameSetup,
    series_id: Option<String>,
    score: SeriesScore,
    game: Game,
    cursor: Position,
    scoreboard_visible: bool,
    message: Option<String>,
    ai_due: Option<Instant>,
    next_game_due: Option<Instant>,
    back_to_lobby_due: Option<Instant>,
    finished: bool,
}

impl GameScreen {
    /// Starts a fresh series with the given setup.
    #[instrument(skip(setup))]
    pub fn new(setup: GameSetup) -> Self {
        info!(
            mode = %setup.mode,
            total = setup.config.total_games(),
            target = setup.config.games_to_win(),
            "Starting series"
        );
        let mut screen = Self {
            setup,
            series_id: None,
            score: SeriesScore::default(),
            game: Game::new(Mark::X),
            cursor: Position::Center,
            scoreboard_visible: true,
            message: None,
            ai_due: None,
            next_game_due: None,
            back_to_lobby_due: None,
            finished: false,
        };
        screen.start_game();
        screen
    }

    /// The display name for a mark. Crosses belong to player one.
    fn name_of(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.setup.player_one,
            Mark::O => &self.setup.player_two,
        }
    }

    fn is_ai_turn(&self) -> bool {
        self.setup.mode == GameMode::PvAi
            && self.game.in_progress()
            && *self.game.to_move() == AI_MARK
    }

    /// Deals a new board with a coin-flip starting player.
    fn start_game(&mut self) {
        let mut rng = rand::rng();
        let starting = if rng.random_bool(0.5) {
            Mark::X
        } else {
            Mark::O
        };
        debug!(
            game = self.score.next_game_number(),
            starting = %starting,
            "New game"
        );
        self.game = Game::new(starting);
        self.cursor = Position::Center;
        self.message = None;
        self.next_game_due = None;
        self.schedule_ai();
    }

    fn schedule_ai(&mut self) {
        self.ai_due = if self.is_ai_turn() {
            Some(Instant::now() + AI_DELAY)
        } else {
            None
        };
    }

    /// Plays out the AI's scheduled move.
    fn play_ai_move(&mut self, services: &Services) {
        self.ai_due = None;
        let mut rng = rand::rng();
        if let Some(pos) = choose_move(&self.game, AI_MARK, self.setup.difficulty, &mut rng) {
            self.apply_move(pos, services);
        }
    }

    /// Places a mark and reacts to the resulting game state.
    fn apply_move(&mut self, pos: Position, services: &Services) {
        match self.game.make_move(pos) {
            Ok(()) => match *self.game.status() {
                GameStatus::InProgress => self.schedule_ai(),
                GameStatus::Won(mark) => {
                    self.finish_game(GameVerdict::Won(mark), MatchResult::Win, services);
                }
                GameStatus::Tie => {
                    self.finish_game(GameVerdict::Tied, MatchResult::Tie, services);
                }
            },
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    /// Records the finished game and advances the series.
    #[instrument(skip(self, services))]
    fn finish_game(&mut self, verdict: GameVerdict, result: MatchResult, services: &Services) {
        let game_number = self.score.next_game_number();
        self.persist_game(game_number, verdict, result, services);
        self.score.record(verdict);

        let headline = match verdict {
            GameVerdict::Won(mark) => format!("{} wins game {}!", self.name_of(mark), game_number),
            GameVerdict::Tied => format!("Game {game_number} is a tie."),
        };
        info!(game = game_number, "{headline}");

        if self.score.is_complete(&self.setup.config) {
            self.finished = true;
            let closing = match self.score.verdict(&self.setup.config) {
                Some(SeriesVerdict::Won(mark)) => {
                    format!("{headline} {} takes the series!", self.name_of(mark))
                }
                _ => format!("{headline} The series ends in a draw."),
            };
            self.message = Some(closing);
            self.back_to_lobby_due = Some(Instant::now() + SERIES_END_DELAY);
        } else {
            self.message = Some(format!("{headline} Next game shortly..."));
            self.next_game_due = Some(Instant::now() + NEXT_GAME_DELAY);
        }
    }

    /// Writes the game to match history when the session persists.
    fn persist_game(
        &mut self,
        game_number: u32,
        verdict: GameVerdict,
        result: MatchResult,
        services: &Services,
    ) {
        if !self.setup.persist {
            return;
        }
        let series_id = self
            .series_id
            .get_or_insert_with(|| {
                let mut rng = rand::rng();
                crate::service::MatchService::mint_series_id(&mut rng)
            })
            .clone();
        let finished = FinishedGame::from_game(
            &self.game,
            verdict,
            result,
            self.setup.player_one.clone(),
            self.setup.player_two.clone(),
            self.setup.mode,
            series_id,
            game_number,
            self.setup.config,
        );
        if let Err(e) = services.matches.record_game(finished) {
            error!("Failed to record game: {e}");
            self.message = Some(format!("Could not save game: {e}"));
        }
    }

    /// Concedes the current game and ends the series.
    #[instrument(skip(self, services))]
    fn surrender(&mut self, services: &Services) -> ScreenTransition {
        if self.finished || !self.game.in_progress() {
            return ScreenTransition::Stay;
        }
        let verdict = GameVerdict::conceded(*self.game.to_move());
        info!(?verdict, "Game surrendered");
        self.finish_game(verdict, MatchResult::Surrender, services);
        ScreenTransition::ToLobby
    }

    fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let row = (self.cursor.row() as i32 + d_row).rem_euclid(3) as usize;
        let col = (self.cursor.col() as i32 + d_col).rem_euclid(3) as usize;
        self.cursor = Position::from_row_col(row, col);
    }

    /// Accepts input only while a game is live and it is a human's turn.
    fn accepting_moves(&self) -> bool {
        self.game.in_progress() && !self.is_ai_turn() && self.next_game_due.is_none()
    }

    fn render_board(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::with_capacity(5);
        for row in 0..3 {
            let mut spans = Vec::new();
            for col in 0..3 {
                let pos = Position::from_row_col(row, col);
                let symbol = match self.game.board().get(pos) {
                    Square::Taken(mark) => mark.symbol().to_string(),
                    Square::Empty => " ".to_string(),
                };
                let mut style = match self.game.board().get(pos) {
                    Square::Taken(Mark::X) => Style::default().fg(Color::Red),
                    Square::Taken(Mark::O) => Style::default().fg(Color::Blue),
                    Square::Empty => Style::default().fg(Color::DarkGray),
                };
                if pos == self.cursor && self.accepting_moves() {
                    style = style.bg(Color::Yellow).add_modifier(Modifier::BOLD);
                }
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
        let config = &self.setup.config;
        vec![
            Line::from(format!(
                "Game {} of {}",
                self.score.next_game_number().min(*config.total_games()),
                config.total_games()
            )),
            Line::from(format!("First to {} wins", config.games_to_win())),
            Line::from(""),
            Line::from(format!(
                "{} (X): {}",
                self.name_of(Mark::X),
                self.score.wins(Mark::X)
            )),
            Line::from(format!(
                "{} (O): {}",
                self.name_of(Mark::O),
                self.score.wins(Mark::O)
            )),
            Line::from(format!("Ties: {}", self.score.ties())),
        ]
    }

    fn status_line(&self) -> String {
        if let Some(message) = &self.message {
            message.clone()
        } else if self.is_ai_turn() {
            format!("{} is thinking...", self.name_of(AI_MARK))
        } else {
            let mark = *self.game.to_move();
            format!("{} ({}) to move", self.name_of(mark), mark)
        }
    }
}

impl Screen for GameScreen {
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

        let title = Paragraph::new(format!(
            "{} vs {} - {}",
            self.setup.player_one, self.setup.player_two, self.setup.mode
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
            .constraints(if self.scoreboard_visible {
                [Constraint::Percentage(60), Constraint::Percentage(40)]
            } else {
                [Constraint::Percentage(100), Constraint::Percentage(0)]
            })
            .split(chunks[1]);

        let board = Paragraph::new(self.render_board())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Board"));
        frame.render_widget(board, middle[0]);

        if self.scoreboard_visible {
            let scoreboard = Paragraph::new(self.render_scoreboard())
                .block(Block::default().borders(Borders::ALL).title("Series"));
            frame.render_widget(scoreboard, middle[1]);
        }

        let status = Paragraph::new(self.status_line())
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);

        let help =
            Paragraph::new("Arrows: Move | Enter: Place | 1-9: Cell | s: Scoreboard | r: Resign | Esc: Quit series")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, services))]
    fn handle_key(&mut self, key: KeyEvent, services: &Services) -> ScreenTransition {
        match key.code {
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') if self.accepting_moves() => {
                let pos = self.cursor;
                self.apply_move(pos, services);
            }
            KeyCode::Char(c @ '1'..='9') if self.accepting_moves() => {
                let index = c as usize - '1' as usize;
                if let Some(pos) = Position::from_index(index) {
                    self.cursor = pos;
                    self.apply_move(pos, services);
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.scoreboard_visible = !self.scoreboard_visible;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => return self.surrender(services),
            KeyCode::Esc => {
                debug!("Series abandoned");
                return ScreenTransition::ToLobby;
            }
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn tick(&mut self, services: &Services) -> ScreenTransition {
        if let Some(due) = self.back_to_lobby_due
            && Instant::now() >= due
        {
            return ScreenTransition::ToLobby;
        }
        if let Some(due) = self.next_game_due
            && Instant::now() >= due
        {
            self.start_game();
            return ScreenTransition::Stay;
        }
        if let Some(due) = self.ai_due
            && Instant::now() >= due
        {
            self.play_ai_move(services);
        }
        ScreenTransition::Stay
    }
}
