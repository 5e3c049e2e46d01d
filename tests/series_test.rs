//! Tests for best-of-N series bookkeeping.

use tictactoe_arena::series::SeriesConfigError;
use tictactoe_arena::{GameVerdict, Mark, SeriesConfig, SeriesScore, SeriesVerdict};

#[test]
fn test_default_series_is_best_of_three() {
    let config = SeriesConfig::default();
    assert_eq!(*config.total_games(), 3);
    assert_eq!(*config.games_to_win(), 2);
}

#[test]
fn test_config_rejects_target_above_total() {
    let result = SeriesConfig::new(3, 4);
    assert_eq!(result, Err(SeriesConfigError::TargetExceedsTotal));
}

#[test]
fn test_config_rejects_zero_values() {
    assert_eq!(SeriesConfig::new(0, 0), Err(SeriesConfigError::Zero));
    assert_eq!(SeriesConfig::new(3, 0), Err(SeriesConfigError::Zero));
}

#[test]
fn test_config_accepts_single_game_series() {
    let config = SeriesConfig::new(1, 1).expect("Config failed");
    assert_eq!(*config.total_games(), 1);
    assert_eq!(*config.games_to_win(), 1);
}

#[test]
fn test_game_numbers_advance_as_games_record() {
    let mut score = SeriesScore::new();
    assert_eq!(score.next_game_number(), 1);
    score.record(GameVerdict::Won(Mark::X));
    assert_eq!(score.next_game_number(), 2);
    score.record(GameVerdict::Tied);
    assert_eq!(score.next_game_number(), 3);
    assert_eq!(score.games_played(), 2);
    assert_eq!(score.wins(Mark::X), 1);
    assert_eq!(score.wins(Mark::O), 0);
    assert_eq!(score.ties(), 1);
}

#[test]
fn test_series_ends_when_a_side_reaches_the_target() {
    let config = SeriesConfig::new(5, 2).expect("Config failed");
    let mut score = SeriesScore::new();
    score.record(GameVerdict::Won(Mark::O));
    assert!(!score.is_complete(&config));
    assert_eq!(score.verdict(&config), None);

    score.record(GameVerdict::Won(Mark::O));
    assert!(score.is_complete(&config));
    assert_eq!(score.verdict(&config), Some(SeriesVerdict::Won(Mark::O)));
}

#[test]
fn test_series_ends_when_all_games_are_played() {
    let config = SeriesConfig::new(3, 2).expect("Config failed");
    let mut score = SeriesScore::new();
    score.record(GameVerdict::Won(Mark::X));
    score.record(GameVerdict::Won(Mark::O));
    score.record(GameVerdict::Tied);
    assert!(score.is_complete(&config));
    assert_eq!(score.verdict(&config), Some(SeriesVerdict::Tied));
}

#[test]
fn test_all_tied_games_exhaust_the_series() {
    let config = SeriesConfig::default();
    let mut score = SeriesScore::new();
    for _ in 0..3 {
        score.record(GameVerdict::Tied);
    }
    assert!(score.is_complete(&config));
    assert_eq!(score.verdict(&config), Some(SeriesVerdict::Tied));
}

#[test]
fn test_verdict_goes_to_the_higher_win_count() {
    let config = SeriesConfig::new(3, 2).expect("Config failed");
    let mut score = SeriesScore::new();
    score.record(GameVerdict::Won(Mark::X));
    score.record(GameVerdict::Tied);
    score.record(GameVerdict::Tied);
    assert_eq!(score.verdict(&config), Some(SeriesVerdict::Won(Mark::X)));
}
