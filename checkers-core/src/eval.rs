//! Material evaluation

use serde::{Deserialize, Serialize};

use crate::game::Board;
use crate::pieces::Color;

/// Piece weights for material evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Heuristics {
    /// Value of a man
    pub man_value: i32,
    /// Value of a king
    pub king_value: i32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            man_value: 1,
            king_value: 3,
        }
    }
}

/// Material balance, positive when red is ahead
pub fn evaluate(board: &Board, heuristics: &Heuristics) -> i32 {
    board
        .pieces()
        .map(|(_, cell)| {
            let value = if cell.is_king() {
                heuristics.king_value
            } else {
                heuristics.man_value
            };
            match cell.color() {
                Some(Color::Red) => value,
                Some(Color::Black) => -value,
                None => 0,
            }
        })
        .sum()
}

/// Material balance from the side to move's point of view
pub fn evaluate_for_side(board: &Board, heuristics: &Heuristics) -> i32 {
    let score = evaluate(board, heuristics);
    match board.side_to_move() {
        Color::Red => score,
        Color::Black => -score,
    }
}
