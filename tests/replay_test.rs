//! Tests for series replay: decoding and move-by-move playback.

use tempfile::NamedTempFile;

use tictactoe_arena::db::{ArenaRepository, GameMode, MatchResult};
use tictactoe_arena::replay::{decode_moves, encode_moves};
use tictactoe_arena::{
    FinishedGame, GameVerdict, Mark, MatchService, Position, ReplayCursor, ReplayError,
    ReplayEvent, ReplayScript, SeriesConfig, SeriesVerdict,
};

fn setup() -> (NamedTempFile, MatchService) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = ArenaRepository::new(db_path);
    repo.run_migrations().expect("Migrations failed");
    (db_file, MatchService::new(repo))
}

fn positions(indices: &[usize]) -> Vec<Position> {
    indices
        .iter()
        .map(|&i| Position::from_index(i).expect("Bad index"))
        .collect()
}

fn record(
    service: &MatchService,
    winner: &str,
    result: MatchResult,
    moves: &[usize],
    game_number: u32,
) {
    let config = SeriesConfig::default();
    service
        .record_game(FinishedGame::new(
            "Alice".to_string(),
            "Bob".to_string(),
            winner.to_string(),
            result,
            positions(moves),
            Mark::X,
            GameMode::PvP,
            "20260829_101500_1234".to_string(),
            game_number,
            config,
        ))
        .expect("Record failed");
}

#[test]
fn test_moves_encode_to_comma_separated_indices() {
    let moves = positions(&[4, 0, 8]);
    assert_eq!(encode_moves(&moves), "4,0,8");
    assert_eq!(encode_moves(&[]), "");
}

#[test]
fn test_decode_round_trips() {
    let decoded = decode_moves("4,0,8").expect("Decode failed");
    assert_eq!(decoded, positions(&[4, 0, 8]));
    assert!(decode_moves("").expect("Decode failed").is_empty());
}

#[test]
fn test_decode_rejects_garbage_tokens() {
    assert!(matches!(
        decode_moves("4,abc,8"),
        Err(ReplayError::BadMoveToken(_))
    ));
    assert!(matches!(
        decode_moves("4,9"),
        Err(ReplayError::BadMoveToken(_))
    ));
}

#[test]
fn test_empty_series_cannot_be_scripted() {
    assert!(matches!(
        ReplayScript::from_records(&[]),
        Err(ReplayError::EmptySeries)
    ));
}

#[test]
fn test_cursor_replays_a_full_series() {
    let (_db, service) = setup();
    // Game 1: Alice (X) takes the top row.
    record(&service, "Alice", MatchResult::Win, &[0, 3, 1, 4, 2], 1);
    // Game 2: Alice surrendered with the board still live.
    record(&service, "Bob", MatchResult::Surrender, &[0, 3], 2);
    // Game 3: a full-board tie.
    record(
        &service,
        "-",
        MatchResult::Tie,
        &[0, 2, 1, 4, 5, 3, 6, 7, 8],
        3,
    );

    let history = service.history("Alice").expect("History failed");
    let series = service.series_of(&history[0]).expect("Series load failed");
    assert_eq!(series.len(), 3);

    let script = ReplayScript::from_records(&series).expect("Script failed");
    assert_eq!(script.player_one(), "Alice");
    assert_eq!(script.player_two(), "Bob");
    assert_eq!(script.name_of(Mark::X), "Alice");

    let mut cursor = ReplayCursor::new(script).expect("Cursor failed");
    let mut events = Vec::new();
    while !cursor.is_done() {
        events.push(cursor.step().expect("Step failed"));
    }

    // 3 starts + 16 moves + 3 game ends + 1 series end.
    assert_eq!(events.len(), 23);
    assert_eq!(
        events[0],
        ReplayEvent::GameStarted {
            game_number: 1,
            starting_mark: Mark::X,
        }
    );
    assert_eq!(
        events[6],
        ReplayEvent::GameOver {
            verdict: GameVerdict::Won(Mark::X),
            game_number: 1,
        }
    );
    // The surrendered game goes to the side that did not concede.
    assert_eq!(
        events[10],
        ReplayEvent::GameOver {
            verdict: GameVerdict::Won(Mark::O),
            game_number: 2,
        }
    );
    assert_eq!(
        events[21],
        ReplayEvent::GameOver {
            verdict: GameVerdict::Tied,
            game_number: 3,
        }
    );
    assert_eq!(
        events[22],
        ReplayEvent::SeriesOver {
            verdict: SeriesVerdict::Tied,
        }
    );

    assert_eq!(cursor.score().wins(Mark::X), 1);
    assert_eq!(cursor.score().wins(Mark::O), 1);
    assert_eq!(cursor.score().ties(), 1);
    assert_eq!(cursor.step().expect("Step failed"), ReplayEvent::Finished);
}

#[test]
fn test_cursor_flags_an_illegal_recorded_move() {
    let (_db, service) = setup();
    record(&service, "Alice", MatchResult::Win, &[0, 0], 1);

    let history = service.history("Alice").expect("History failed");
    let series = service.series_of(&history[0]).expect("Series load failed");
    let script = ReplayScript::from_records(&series).expect("Script failed");
    let mut cursor = ReplayCursor::new(script).expect("Cursor failed");

    cursor.step().expect("Start failed");
    cursor.step().expect("First move failed");
    assert!(matches!(cursor.step(), Err(ReplayError::IllegalMove(0))));
}
