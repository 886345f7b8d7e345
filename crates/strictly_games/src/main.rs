//! Strictly Games - Unified CLI
//!
//! Interactive play and scripted duels against the decision-tree engine.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use strictly_games::cli::{Cli, Command, EngineArgs, OpponentKind};
use strictly_games::{PerfectOpponent, RandomOpponent, run_duel, run_session};
use strictly_minimax::{Engine, EngineConfig};
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "strictly_games.toml";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Stdout belongs to the game; logs go to stderr.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let base = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Play { engine } => play(apply_overrides(base, &engine)?),
        Command::Duel {
            engine,
            opponent,
            games,
            alternate,
            json,
        } => duel(apply_overrides(base, &engine)?, opponent, games, alternate, json),
    }
}

/// Loads the explicit config file, else the default file if present, else defaults.
#[instrument]
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    if let Some(path) = path {
        return EngineConfig::from_file(path)
            .with_context(|| format!("Loading {}", path.display()));
    }
    if Path::new(DEFAULT_CONFIG_FILE).exists() {
        return EngineConfig::from_file(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("Loading {DEFAULT_CONFIG_FILE}"));
    }
    debug!("No config file, using defaults");
    Ok(EngineConfig::default())
}

/// Layers command-line flags over the loaded configuration.
fn apply_overrides(mut config: EngineConfig, args: &EngineArgs) -> Result<EngineConfig> {
    if let Some(difficulty) = args.difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(side) = args.ai {
        config = config.with_ai_player(side.into());
    }
    if let Some(depth) = args.depth {
        config = config.with_depth(depth);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;
    Ok(config)
}

/// Runs an interactive session on stdin/stdout.
fn play(config: EngineConfig) -> Result<()> {
    info!(ai = %config.ai_player(), difficulty = %config.difficulty(), "Starting session");
    let mut engine = Engine::new(config)?;
    let stdin = std::io::stdin();
    let summary = run_session(&mut engine, stdin.lock(), std::io::stdout())?;
    println!(
        "Final tally: you {} / AI {} / draws {}",
        summary.human_wins, summary.engine_wins, summary.draws
    );
    Ok(())
}

/// Runs a duel and prints the report.
fn duel(config: EngineConfig, kind: OpponentKind, games: usize, alternate: bool, json: bool) -> Result<()> {
    let mut rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };
    let opponent_rng = StdRng::seed_from_u64(rand::Rng::random(&mut rng));
    let report = match kind {
        OpponentKind::Random => {
            run_duel(&config, &mut RandomOpponent::new(opponent_rng), games, alternate, &mut rng)?
        }
        OpponentKind::Perfect => {
            run_duel(&config, &mut PerfectOpponent::new(opponent_rng), games, alternate, &mut rng)?
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
