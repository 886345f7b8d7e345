//! Persistent decision-tree opponent for tic-tac-toe.
//!
//! # Architecture
//!
//! - **Arena**: generational slot storage for tree nodes
//! - **Builder**: expands positions into children up to a ply horizon
//! - **Search**: plain minimax over the built subtree
//! - **Selector**: Easy / Medium / Hard move policies
//! - **Tree**: root plus a current-position cursor that follows the game
//! - **Engine**: owns the tree, the tier and the random generator
//!
//! # Example
//!
//! ```no_run
//! use strictly_minimax::{Difficulty, Engine, EngineConfig};
//! use strictly_tictactoe::{Player, Position};
//!
//! # fn example() -> Result<(), strictly_minimax::ConfigError> {
//! let config = EngineConfig::new(Player::O).with_difficulty(Difficulty::Hard);
//! let mut engine = Engine::new(config)?;
//! engine.reset_tree();
//!
//! // The human (X) opens in the center.
//! engine.report_move(Position::Center);
//!
//! if let Some(reply) = engine.select_move() {
//!     engine.report_move(reply);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod builder;
mod config;
mod difficulty;
mod engine;
pub mod evaluator;
mod node;
pub mod search;
pub mod selector;
mod tree;

pub use arena::{Arena, NodeId};
pub use config::{ConfigError, EngineConfig, MAX_DEPTH};
pub use difficulty::Difficulty;
pub use engine::Engine;
pub use node::StateNode;
pub use tree::{GameTree, Navigation};
