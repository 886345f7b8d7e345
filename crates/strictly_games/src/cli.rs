//! Command-line interface for strictly_games.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strictly_minimax::Difficulty;
use strictly_tictactoe::Player;

/// Strictly Games - Tic-tac-toe against a persistent minimax tree
#[derive(Parser, Debug)]
#[command(name = "strictly_games")]
#[command(about = "Play tic-tac-toe against a decision-tree engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file (TOML). Defaults to strictly_games.toml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively against the engine on stdin/stdout
    Play {
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Pit the engine against a scripted opponent and report results
    Duel {
        #[command(flatten)]
        engine: EngineArgs,

        /// Scripted opponent
        #[arg(long, value_enum, default_value = "random")]
        opponent: OpponentKind,

        /// Number of games
        #[arg(short = 'n', long, default_value = "100")]
        games: usize,

        /// Swap which side opens after every game
        #[arg(long)]
        alternate: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Engine overrides shared by every command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Difficulty tier (easy, medium, hard)
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Side the engine plays
    #[arg(long, value_enum)]
    pub ai: Option<Side>,

    /// Ply horizon for the tree
    #[arg(long)]
    pub depth: Option<usize>,

    /// RNG seed for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Side selector for the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Plays X
    X,
    /// Plays O
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}

/// Scripted opponents available to `duel`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentKind {
    /// Uniformly random legal moves
    Random,
    /// Exhaustive solver
    Perfect,
}
