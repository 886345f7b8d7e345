//! Draw and terminal-state detection for tic-tac-toe.

use super::win::winner;
use crate::{Board, Square};

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a draw.
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// True when the game on this board is decided or no square is left.
pub fn is_terminal(board: &Board) -> bool {
    winner(board).is_some() || is_full(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_not_full() {
        let board = Board::new();
        assert!(!is_full(&board));
        assert!(!is_terminal(&board));
    }

    #[test]
    fn test_draw_is_terminal() {
        // X O X / O X X / O X O
        let board = Board::from_notation("XOX/OXX/OXO").unwrap();
        assert!(is_full(&board));
        assert_eq!(winner(&board), None);
        assert!(is_terminal(&board));
    }

    #[test]
    fn test_win_with_empty_squares_is_terminal() {
        let board = Board::from_notation("XXX/OO./...").unwrap();
        assert!(!is_full(&board));
        assert!(is_terminal(&board));
    }
}
