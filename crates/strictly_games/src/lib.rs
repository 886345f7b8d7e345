//! Strictly Games library - terminal play against the minimax engine
//!
//! # Architecture
//!
//! - **Session**: human-vs-engine games over any line-based reader/writer
//! - **Opponent**: scripted players (random, perfect solver)
//! - **Duel**: batches of engine-vs-opponent games with a summary report
//!
//! # Example
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use strictly_games::{PerfectOpponent, run_duel};
//! use strictly_minimax::{Difficulty, EngineConfig};
//! use strictly_tictactoe::Player;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = EngineConfig::new(Player::O).with_difficulty(Difficulty::Hard);
//! let mut solver = PerfectOpponent::new(StdRng::seed_from_u64(1));
//! let report = run_duel(&config, &mut solver, 10, true, &mut StdRng::seed_from_u64(2))?;
//! assert_eq!(report.opponent_wins, 0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod duel;
mod opponent;
mod session;

pub use duel::{DuelReport, GameRecord, play_game, run_duel};
pub use opponent::{Opponent, PerfectOpponent, RandomOpponent};
pub use session::{Command, SessionSummary, run_session};
