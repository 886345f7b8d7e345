//! Static evaluation of board positions.
//!
//! Scores are coarse and depth-independent: a faster win is worth the same as
//! a slower one. Positions cut off by the search horizon score as draws.

use strictly_tictactoe::{Board, Player, winner};

/// Score of a position won by the engine's side.
pub const WIN_SCORE: i32 = 10;

/// Score of a position won by the opponent.
pub const LOSS_SCORE: i32 = -10;

/// Score of a drawn, undecided or truncated position.
pub const DRAW_SCORE: i32 = 0;

/// Scores `board` from `ai`'s point of view.
pub fn score(board: &Board, ai: Player) -> i32 {
    match winner(board) {
        Some(p) if p == ai => WIN_SCORE,
        Some(_) => LOSS_SCORE,
        None => DRAW_SCORE,
    }
}
