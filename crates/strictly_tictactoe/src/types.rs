//! Core domain types for tic-tac-toe.

use super::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Player {
    /// Player X (goes first by default).
    X,
    /// Player O.
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// Immutable 3x3 board snapshot.
///
/// A move never mutates a board: [`Board::place`] returns a new snapshot that
/// differs from the receiver in exactly one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from the nine squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Parses a nine-character row-major notation.
    ///
    /// `X` and `O` (either case) are marks; `.`, `-` and `_` are empty.
    /// Whitespace and `/` separators are ignored, so `"XX./OO./..."` works.
    #[track_caller]
    #[instrument]
    pub fn from_notation(notation: &str) -> Result<Self, BoardParseError> {
        let mut squares = [Square::Empty; 9];
        let mut count = 0;
        for ch in notation.chars().filter(|c| !c.is_whitespace() && *c != '/') {
            if count == 9 {
                return Err(BoardParseError::new(format!(
                    "Notation has more than 9 cells: {notation:?}"
                )));
            }
            squares[count] = match ch {
                'X' | 'x' => Square::Occupied(Player::X),
                'O' | 'o' => Square::Occupied(Player::O),
                '.' | '-' | '_' => Square::Empty,
                other => {
                    return Err(BoardParseError::new(format!(
                        "Unexpected character {other:?} in {notation:?}"
                    )));
                }
            };
            count += 1;
        }
        if count != 9 {
            return Err(BoardParseError::new(format!(
                "Notation has {count} cells, expected 9: {notation:?}"
            )));
        }
        Ok(Self { squares })
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Returns a new board with `player`'s mark at `pos`.
    ///
    /// The caller is responsible for checking that `pos` is empty; use
    /// [`crate::Game::make_move`] for validated play.
    pub fn place(&self, pos: Position, player: Player) -> Board {
        let mut next = *self;
        next.squares[pos.to_index()] = Square::Occupied(player);
        next
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Empty positions in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Number of empty squares.
    pub fn empty_count(&self) -> usize {
        self.squares.iter().filter(|s| **s == Square::Empty).count()
    }

    /// Returns the single position where `self` and `other` differ.
    ///
    /// `None` when the boards are identical or differ in more than one square.
    pub fn diff(&self, other: &Board) -> Option<Position> {
        let mut differing = Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.get(*pos) != other.get(*pos));
        match (differing.next(), differing.next()) {
            (Some(pos), None) => Some(pos),
            _ => None,
        }
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-9 cell number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(Player::X) => "X".to_string(),
                    Square::Occupied(Player::O) => "O".to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Whether the game has ended.
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// Board notation parse error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Board parse error: {} at {}:{}", message, file, line)]
pub struct BoardParseError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardParseError {
    /// Creates a new parse error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_is_copy_on_write() {
        let board = Board::new();
        let next = board.place(Position::Center, Player::X);
        assert!(board.is_empty(Position::Center));
        assert_eq!(next.get(Position::Center), Square::Occupied(Player::X));
        assert_eq!(board.diff(&next), Some(Position::Center));
    }

    #[test]
    fn test_diff_rejects_multi_cell_changes() {
        let board = Board::new();
        let two = board
            .place(Position::TopLeft, Player::X)
            .place(Position::Center, Player::O);
        assert_eq!(board.diff(&two), None);
        assert_eq!(board.diff(&board), None);
    }

    #[test]
    fn test_notation_parsing() {
        let board = Board::from_notation("XX./OO./...").unwrap();
        assert_eq!(board.get(Position::TopLeft), Square::Occupied(Player::X));
        assert_eq!(board.get(Position::Center), Square::Occupied(Player::O));
        assert_eq!(board.empty_count(), 5);
    }

    #[test]
    fn test_notation_errors() {
        assert!(Board::from_notation("XX").is_err());
        assert!(Board::from_notation("XXXXXXXXXX").is_err());
        let err = Board::from_notation("XXZ......").unwrap_err();
        assert!(err.to_string().contains("Unexpected character"));
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board = Board::new().place(Position::Center, Player::O);
        assert_eq!(board.display(), "1|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_empty_positions_row_major() {
        let board = Board::from_notation("X.O.X.O.X").unwrap();
        assert_eq!(
            board.empty_positions(),
            vec![
                Position::TopCenter,
                Position::MiddleLeft,
                Position::MiddleRight,
                Position::BottomCenter
            ]
        );
    }
}
