//! Difficulty tiers.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How much of the minimax result the engine honors.
///
/// Tiers only change how a move is picked among the scored children; the
/// tree itself is identical at every tier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Mostly random moves.
    Easy,
    /// Takes wins, blocks losses, otherwise favors center and corners.
    #[default]
    Medium,
    /// Minimax with random tie-breaking.
    Hard,
}

impl Difficulty {
    /// Returns the display label for this tier.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Next tier in the Easy → Medium → Hard → Easy cycle.
    #[instrument]
    pub fn cycle(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}
