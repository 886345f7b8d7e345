//! Tic-tac-toe board model and rules.
//!
//! - [`Board`] is an immutable snapshot; moves produce new boards.
//! - [`rules`] holds the pure win/draw/terminal checks.
//! - [`Game`] validates and applies moves for a live game.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use game::Game;
pub use position::Position;
pub use rules::{is_full, is_terminal, winner};
pub use types::{Board, BoardParseError, GameStatus, Player, Square};

