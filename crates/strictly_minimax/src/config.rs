//! Engine configuration.

use crate::difficulty::Difficulty;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_tictactoe::Player;
use tracing::{debug, info, instrument};

/// Deepest horizon that still fits inside a 3x3 game.
pub const MAX_DEPTH: usize = 9;

/// Configuration for a decision-tree [`Engine`](crate::Engine).
///
/// `depth` bounds both tree expansion and minimax. It is a fixed horizon, not
/// derived from the number of empty squares, and lines longer than it are
/// scored as draws.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ply horizon for expansion and search.
    depth: usize,

    /// Side the engine plays.
    ai_player: Player,

    /// Side to move on the empty root board.
    starting_player: Player,

    /// Initial difficulty tier.
    difficulty: Difficulty,

    /// Fixed RNG seed; entropy-seeded when absent.
    seed: Option<u64>,

    /// Easy tier: probability of a uniformly random move.
    easy_random_chance: f64,

    /// Medium tier: probability of picking from the center/corner list.
    medium_preference_chance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 6,
            ai_player: Player::O,
            starting_player: Player::X,
            difficulty: Difficulty::Medium,
            seed: None,
            easy_random_chance: 0.7,
            medium_preference_chance: 0.5,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration for the given side.
    #[instrument]
    pub fn new(ai_player: Player) -> Self {
        Self {
            ai_player,
            ..Self::default()
        }
    }

    /// Sets the ply horizon.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the side the engine plays.
    pub fn with_ai_player(mut self, ai_player: Player) -> Self {
        self.ai_player = ai_player;
        self
    }

    /// Sets the side to move on the empty board.
    pub fn with_starting_player(mut self, starting_player: Player) -> Self {
        self.starting_player = starting_player;
        self
    }

    /// Sets the initial tier.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the Easy tier's random-move probability.
    pub fn with_easy_random_chance(mut self, chance: f64) -> Self {
        self.easy_random_chance = chance;
        self
    }

    /// Sets the Medium tier's preferred-square probability.
    pub fn with_medium_preference_chance(mut self, chance: f64) -> Self {
        self.medium_preference_chance = chance;
        self
    }

    /// Loads configuration from a TOML file; missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(depth = config.depth, ai = %config.ai_player, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 || self.depth > MAX_DEPTH {
            return Err(ConfigError::new(format!(
                "depth must be between 1 and {MAX_DEPTH}, got {}",
                self.depth
            )));
        }
        for (name, p) in [
            ("easy_random_chance", self.easy_random_chance),
            ("medium_preference_chance", self.medium_preference_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::new(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let config = EngineConfig::default();
        assert_eq!(*config.depth(), 6);
        assert_eq!(*config.ai_player(), Player::O);
        assert_eq!(*config.starting_player(), Player::X);
        assert_eq!(*config.difficulty(), Difficulty::Medium);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_setters_chain() {
        let config = EngineConfig::new(Player::X)
            .with_depth(4)
            .with_seed(7)
            .with_difficulty(Difficulty::Hard);
        assert_eq!(*config.ai_player(), Player::X);
        assert_eq!(*config.depth(), 4);
        assert_eq!(*config.seed(), Some(7));
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config = EngineConfig::from_toml("depth = 9\ndifficulty = \"hard\"\nai_player = \"X\"").unwrap();
        assert_eq!(*config.depth(), 9);
        assert_eq!(*config.difficulty(), Difficulty::Hard);
        assert_eq!(*config.ai_player(), Player::X);
        assert_eq!(*config.easy_random_chance(), 0.7);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(EngineConfig::default().with_depth(0).validate().is_err());
        assert!(EngineConfig::default().with_depth(10).validate().is_err());
        let err = EngineConfig::default()
            .with_easy_random_chance(1.5)
            .validate()
            .unwrap_err();
        assert!(err.message.contains("easy_random_chance"));
        assert!(EngineConfig::from_toml("depth = 12").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 42\nmedium_preference_chance = 1.0").unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.seed(), Some(42));
        assert_eq!(*config.medium_preference_chance(), 1.0);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = EngineConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().starts_with("Config error: Failed to read"));
    }
}
