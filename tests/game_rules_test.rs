//! Tests for the board and the move-by-move engine.

use tictactoe_arena::{Board, Game, GameStatus, Mark, MoveError, Position, Square};

#[test]
fn test_new_game_starts_empty() {
    let game = Game::new(Mark::X);
    assert_eq!(*game.status(), GameStatus::InProgress);
    assert_eq!(*game.to_move(), Mark::X);
    assert_eq!(*game.starting_mark(), Mark::X);
    assert!(game.history().is_empty());
    assert!(Position::ALL.iter().all(|p| game.board().is_empty(*p)));
}

#[test]
fn test_marks_alternate() {
    let mut game = Game::new(Mark::O);
    game.make_move(Position::Center).expect("Move failed");
    assert_eq!(*game.to_move(), Mark::X);
    game.make_move(Position::TopLeft).expect("Move failed");
    assert_eq!(*game.to_move(), Mark::O);
}

#[test]
fn test_occupied_square_is_rejected() {
    let mut game = Game::new(Mark::X);
    game.make_move(Position::Center).expect("Move failed");
    let result = game.make_move(Position::Center);
    assert_eq!(result, Err(MoveError::SquareTaken));
    assert_eq!(game.history().len(), 1);
}

#[test]
fn test_no_moves_after_game_over() {
    let mut game = Game::new(Mark::X);
    // X takes the top row while O wanders.
    for pos in [
        Position::TopLeft,
        Position::BottomLeft,
        Position::TopCenter,
        Position::BottomCenter,
        Position::TopRight,
    ] {
        game.make_move(pos).expect("Move failed");
    }
    assert_eq!(*game.status(), GameStatus::Won(Mark::X));
    assert_eq!(game.make_move(Position::Center), Err(MoveError::GameOver));
}

#[test]
fn test_every_line_pattern_wins() {
    for line in Board::LINES {
        let mut board = Board::new();
        for index in line {
            let pos = Position::from_index(index).expect("Bad index");
            board.set(pos, Square::Taken(Mark::O));
        }
        assert_eq!(board.winner(), Some(Mark::O), "Line {line:?} should win");
    }
}

#[test]
fn test_full_board_without_line_is_a_tie() {
    let mut game = Game::new(Mark::X);
    // X X O / O O X / X O X: full, no line.
    for index in [0, 2, 1, 4, 5, 3, 6, 7, 8] {
        let pos = Position::from_index(index).expect("Bad index");
        game.make_move(pos).expect("Move failed");
    }
    assert_eq!(*game.status(), GameStatus::Tie);
    assert!(game.board().is_full());
    assert!(game.board().winner().is_none());
}

#[test]
fn test_history_records_moves_in_order() {
    let mut game = Game::new(Mark::X);
    let moves = [Position::Center, Position::TopLeft, Position::BottomRight];
    for pos in moves {
        game.make_move(pos).expect("Move failed");
    }
    assert_eq!(game.history().as_slice(), &moves);
}

#[test]
fn test_would_win_detects_line_completion() {
    let mut board = Board::new();
    board.set(Position::TopLeft, Square::Taken(Mark::X));
    board.set(Position::TopCenter, Square::Taken(Mark::X));
    assert!(board.would_win(Position::TopRight, Mark::X));
    assert!(!board.would_win(Position::TopRight, Mark::O));
    assert!(!board.would_win(Position::BottomRight, Mark::X));
}

#[test]
fn test_position_row_col_round_trip() {
    for pos in Position::ALL {
        assert_eq!(Position::from_row_col(pos.row(), pos.col()), pos);
        assert_eq!(Position::from_index(pos.index()), Some(pos));
    }
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_mark_symbols_round_trip() {
    assert_eq!(Mark::from_symbol("X"), Some(Mark::X));
    assert_eq!(Mark::from_symbol("o"), Some(Mark::O));
    assert_eq!(Mark::from_symbol("z"), None);
    assert_eq!(Mark::X.opponent(), Mark::O);
    assert_eq!(Mark::O.opponent(), Mark::X);
}
