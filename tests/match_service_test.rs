//! Tests for recording finished games through the service layer.

use tempfile::NamedTempFile;

use tictactoe_arena::db::{ArenaRepository, GameMode, MatchResult};
use tictactoe_arena::{
    FinishedGame, Game, GameVerdict, Mark, MatchService, Position, SeriesConfig,
};

fn setup() -> (NamedTempFile, MatchService) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = ArenaRepository::new(db_path);
    repo.run_migrations().expect("Migrations failed");
    (db_file, MatchService::new(repo))
}

fn game_with_moves(starting: Mark, indices: &[usize]) -> Game {
    let mut game = Game::new(starting);
    for &i in indices {
        let pos = Position::from_index(i).expect("Bad index");
        game.make_move(pos).expect("Move failed");
    }
    game
}

fn record(service: &MatchService, game: &Game, verdict: GameVerdict, result: MatchResult) {
    let finished = FinishedGame::from_game(
        game,
        verdict,
        result,
        "Alice".to_string(),
        "Bob".to_string(),
        GameMode::PvP,
        "20260829_101500_1234".to_string(),
        1,
        SeriesConfig::default(),
    );
    service.record_game(finished).expect("Record failed");
}

#[test]
fn test_surrendered_game_persists_the_opponent_as_winner() {
    let (_db, service) = setup();
    // X opened and O answered, so it is X's turn when the concession lands.
    let game = game_with_moves(Mark::X, &[0, 3]);
    assert_eq!(*game.to_move(), Mark::X);

    let verdict = GameVerdict::conceded(*game.to_move());
    record(&service, &game, verdict, MatchResult::Surrender);

    let history = service.history("Alice").expect("History failed");
    assert_eq!(history.len(), 1);
    let row = &history[0];
    assert_eq!(row.winner(), "Bob");
    assert_eq!(row.parse_result().expect("Parse failed"), MatchResult::Surrender);
    assert_eq!(row.moves(), "0,3");
    assert_eq!(row.starting_mark(), "X");
}

#[test]
fn test_concession_by_circles_goes_to_player_one() {
    let (_db, service) = setup();
    let game = game_with_moves(Mark::X, &[4]);
    assert_eq!(*game.to_move(), Mark::O);
    assert_eq!(GameVerdict::conceded(Mark::O), GameVerdict::Won(Mark::X));

    record(
        &service,
        &game,
        GameVerdict::conceded(*game.to_move()),
        MatchResult::Surrender,
    );

    let history = service.history("Bob").expect("History failed");
    assert_eq!(history[0].winner(), "Alice");
}

#[test]
fn test_won_game_persists_the_winning_name() {
    let (_db, service) = setup();
    // X takes the top row.
    let game = game_with_moves(Mark::X, &[0, 3, 1, 4, 2]);
    record(&service, &game, GameVerdict::Won(Mark::X), MatchResult::Win);

    let history = service.history("Bob").expect("History failed");
    let row = &history[0];
    assert_eq!(row.winner(), "Alice");
    assert_eq!(row.parse_result().expect("Parse failed"), MatchResult::Win);
}

#[test]
fn test_tied_game_persists_a_dash_winner() {
    let (_db, service) = setup();
    let game = game_with_moves(Mark::X, &[0, 2, 1, 4, 5, 3, 6, 7, 8]);
    record(&service, &game, GameVerdict::Tied, MatchResult::Tie);

    let history = service.history("Alice").expect("History failed");
    assert_eq!(history[0].winner(), "-");
    assert_eq!(
        history[0].parse_result().expect("Parse failed"),
        MatchResult::Tie
    );
}
