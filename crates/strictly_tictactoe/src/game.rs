//! Move validation and game status tracking.

use super::action::{Move, MoveError};
use super::rules::{is_full, winner};
use super::types::{Board, GameStatus, Player};
use super::Position;
use tracing::{debug, instrument};

/// Tic-tac-toe game: the authoritative board plus turn and status tracking.
///
/// Search engines never own a `Game`; they receive the moves applied here.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    starting_player: Player,
    to_move: Player,
    status: GameStatus,
    history: Vec<Move>,
}

impl Game {
    /// Creates a new game with X to move.
    #[instrument]
    pub fn new() -> Self {
        Self::starting_with(Player::X)
    }

    /// Creates a new game with `player` to move first.
    #[instrument]
    pub fn starting_with(player: Player) -> Self {
        Self {
            board: Board::new(),
            starting_player: player,
            to_move: player,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Checks whether the player to move may play at `pos`.
    pub fn is_valid_move(&self, pos: Position) -> bool {
        !self.is_over() && self.board.is_empty(pos)
    }

    /// Places the current player's mark at `pos` and returns the new status.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] once the game has ended and
    /// [`MoveError::SquareOccupied`] for a taken square.
    #[instrument(skip(self), fields(player = %self.to_move))]
    pub fn make_move(&mut self, pos: Position) -> Result<GameStatus, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }

        let mv = Move::new(self.to_move, pos);
        self.board = mv.apply(&self.board);
        self.history.push(mv);
        self.to_move = self.to_move.opponent();
        self.update_status();

        debug!(status = ?self.status, "Move applied");
        Ok(self.status)
    }

    /// Restarts with an empty board and the same starting player.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::starting_with(self.starting_player);
    }

    fn update_status(&mut self) {
        if let Some(player) = winner(&self.board) {
            self.status = GameStatus::Won(player);
        } else if is_full(&self.board) {
            self.status = GameStatus::Draw;
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
