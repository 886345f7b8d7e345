//! Placements and the ways they can be refused.

use super::{Board, Player, Position, Square};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A mark placed on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{player} at {position}")]
pub struct Move {
    /// Side placing the mark.
    pub player: Player,
    /// Target square.
    pub position: Position,
}

impl Move {
    /// Creates a placement of `player`'s mark at `position`.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }

    /// Returns the side placing the mark.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the target square.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Recovers the placement that turns `before` into `after`.
    ///
    /// `None` unless exactly one empty square became occupied.
    pub fn between(before: &Board, after: &Board) -> Option<Self> {
        let position = before.diff(after)?;
        match (before.get(position), after.get(position)) {
            (Square::Empty, Square::Occupied(player)) => Some(Self::new(player, position)),
            _ => None,
        }
    }

    /// Board with this mark placed. Does not check occupancy.
    pub fn apply(&self, board: &Board) -> Board {
        board.place(self.position, self.player)
    }
}

/// Reasons a placement is refused.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Target square already holds a mark.
    #[display("Square {_0} is already occupied")]
    SquareOccupied(#[error(not(source))] Position),

    /// No placements are accepted after a win or draw.
    #[display("Game is already over")]
    GameOver,
}
