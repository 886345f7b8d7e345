//! The decision-tree engine.

use crate::config::{ConfigError, EngineConfig};
use crate::difficulty::Difficulty;
use crate::selector;
use crate::tree::{GameTree, Navigation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strictly_tictactoe::{Board, Player, Position};
use tracing::{debug, info, instrument};

/// Automated opponent backed by a persistent minimax tree.
///
/// Usage per turn: call [`Engine::select_move`] when it is the engine's turn,
/// apply the move to the authoritative board, then call
/// [`Engine::report_move`] for every move either side makes. Call
/// [`Engine::reset_tree`] when a new game starts.
///
/// All randomness comes from the single generator `R` owned by the engine.
#[derive(Debug, Clone)]
pub struct Engine<R = StdRng> {
    config: EngineConfig,
    difficulty: Difficulty,
    tree: GameTree,
    rng: R,
}

impl Engine<StdRng> {
    /// Creates an engine seeded from `config.seed`, or from OS entropy when
    /// no seed is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration fails validation.
    #[instrument(skip(config), fields(ai = %config.ai_player(), depth = *config.depth()))]
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Engine<R> {
    /// Creates an engine that draws from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration fails validation.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let tree = GameTree::new(*config.depth(), *config.starting_player());
        Ok(Self {
            difficulty: *config.difficulty(),
            config,
            tree,
            rng,
        })
    }

    /// Chooses the engine's next move, or `None` if the game is over.
    ///
    /// Builds the tree first if none exists yet.
    #[instrument(skip(self), fields(difficulty = %self.difficulty))]
    pub fn select_move(&mut self) -> Option<Position> {
        if !self.tree.is_built() {
            self.tree.reset();
        }
        let choice = selector::select_move(&mut self.tree, &self.config, self.difficulty, &mut self.rng);
        debug!(?choice, "Move selected");
        choice
    }

    /// Advances the tree past a move made by either side.
    #[instrument(skip(self))]
    pub fn report_move(&mut self, pos: Position) -> Navigation {
        self.tree.report_move(pos)
    }

    /// Discards the tree and builds a fresh one for a new game.
    #[instrument(skip(self))]
    pub fn reset_tree(&mut self) {
        self.tree.reset();
    }

    /// Minimax score of every move from the current position.
    ///
    /// Empty when the game is over or it is not the engine's turn.
    #[instrument(skip(self))]
    pub fn scored_moves(&mut self) -> Vec<(Position, i32)> {
        if !self.tree.is_built() {
            self.tree.reset();
        }
        let Some(current) = self.tree.current() else {
            return Vec::new();
        };
        if current.to_move() != *self.config.ai_player() {
            return Vec::new();
        }
        let Some(current) = self.tree.current_id() else {
            return Vec::new();
        };
        let depth = *self.config.depth();
        let ai = *self.config.ai_player();
        selector::score_children(self.tree.arena_mut(), current, depth, ai)
    }

    /// Changes the tier used by subsequent move requests.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!(from = %self.difficulty, to = %difficulty, "Difficulty changed");
        self.difficulty = difficulty;
    }

    /// Current tier.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Side the engine plays.
    pub fn ai_player(&self) -> Player {
        *self.config.ai_player()
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The search tree.
    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    /// Board at the tree's current position.
    pub fn current_board(&self) -> Option<Board> {
        self.tree.current_board()
    }
}
