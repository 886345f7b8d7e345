//! Game rules for tic-tac-toe.
//!
//! Pure functions over [`Board`](crate::Board) snapshots. Rules are kept apart
//! from board storage so search code can evaluate positions without a
//! [`Game`](crate::Game).

pub mod draw;
pub mod win;

pub use draw::{is_full, is_terminal};
pub use win::{LINES, winner};
