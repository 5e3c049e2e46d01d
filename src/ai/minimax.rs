//! Minimax search with depth-adjusted scoring.
//!
//! A win at depth `d` scores `WIN_SCORE - d` and a loss `d - WIN_SCORE`,
//! so the search prefers fast wins and slow losses. Root-level helpers
//! return every move tied at the extreme so the caller can break ties
//! at random.

use crate::game::{Board, Mark, Position, Square};

/// Base score of a won game; depth is subtracted from it.
pub const WIN_SCORE: i32 = 10;

/// Scores the board from the AI's point of view.
///
/// `maximizing` is true when it is the AI's turn in this node. The board
/// is mutated in place and restored before returning.
pub fn minimax_score(board: &mut Board, ai_mark: Mark, maximizing: bool, depth: i32) -> i32 {
    if let Some(winner) = board.winner() {
        return if winner == ai_mark {
            WIN_SCORE - depth
        } else {
            depth - WIN_SCORE
        };
    }
    if board.is_full() {
        return 0;
    }

    let mark = if maximizing { ai_mark } else { ai_mark.opponent() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for pos in Position::open_cells(board) {
        board.set(pos, Square::Taken(mark));
        let score = minimax_score(board, ai_mark, !maximizing, depth + 1);
        board.set(pos, Square::Empty);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

/// Scores every open cell at the root.
fn scored_moves(board: &Board, ai_mark: Mark) -> Vec<(Position, i32)> {
    let mut probe = *board;
    Position::open_cells(board)
        .into_iter()
        .map(|pos| {
            probe.set(pos, Square::Taken(ai_mark));
            let score = minimax_score(&mut probe, ai_mark, false, 1);
            probe.set(pos, Square::Empty);
            (pos, score)
        })
        .collect()
}

/// All open cells tied at the extreme score picked by `better`.
fn fold_extreme(
    scored: Vec<(Position, i32)>,
    better: impl Fn(i32, i32) -> bool,
) -> Vec<Position> {
    let mut extreme: Option<i32> = None;
    let mut moves = Vec::new();
    for (pos, score) in scored {
        match extreme {
            Some(current) if better(current, score) => {}
            Some(current) if current == score => moves.push(pos),
            _ => {
                extreme = Some(score);
                moves.clear();
                moves.push(pos);
            }
        }
    }
    moves
}

/// All moves tied for the best minimax score.
pub fn best_moves(board: &Board, ai_mark: Mark) -> Vec<Position> {
    fold_extreme(scored_moves(board, ai_mark), |current, candidate| {
        current > candidate
    })
}

/// All moves tied for the worst minimax score.
pub fn worst_moves(board: &Board, ai_mark: Mark) -> Vec<Position> {
    fold_extreme(scored_moves(board, ai_mark), |current, candidate| {
        current < candidate
    })
}
