//! Engine-versus-opponent matches for measuring a tier's strength.

use crate::opponent::Opponent;
use anyhow::{Result, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use strictly_minimax::{Difficulty, Engine, EngineConfig};
use strictly_tictactoe::{Game, GameStatus, Player, Position};
use tracing::{debug, info, instrument};

/// One finished game of a duel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Side that opened.
    pub starting_player: Player,
    /// Winning side, `None` for a draw.
    pub winner: Option<Player>,
    /// Every move in order.
    pub moves: Vec<Position>,
}

/// Aggregate results of a duel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuelReport {
    /// Opponent name.
    pub opponent: String,
    /// Engine tier.
    pub difficulty: Difficulty,
    /// Side the engine played.
    pub ai_player: Player,
    /// Games played.
    pub games: usize,
    /// Games the engine won.
    pub engine_wins: usize,
    /// Games the opponent won.
    pub opponent_wins: usize,
    /// Drawn games.
    pub draws: usize,
    /// Per-game detail.
    pub records: Vec<GameRecord>,
}

impl DuelReport {
    fn new(opponent: &str, difficulty: Difficulty, ai_player: Player) -> Self {
        Self {
            opponent: opponent.to_string(),
            difficulty,
            ai_player,
            games: 0,
            engine_wins: 0,
            opponent_wins: 0,
            draws: 0,
            records: Vec::new(),
        }
    }

    fn record(&mut self, record: GameRecord) {
        self.games += 1;
        match record.winner {
            Some(p) if p == self.ai_player => self.engine_wins += 1,
            Some(_) => self.opponent_wins += 1,
            None => self.draws += 1,
        }
        self.records.push(record);
    }
}

impl std::fmt::Display for DuelReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games, engine ({}, {}) vs {}: {} won, {} lost, {} drawn",
            self.games,
            self.ai_player,
            self.difficulty.label(),
            self.opponent,
            self.engine_wins,
            self.opponent_wins,
            self.draws
        )
    }
}

/// Plays `games` games between a fresh engine built from `config` and
/// `opponent`.
///
/// Each game gets its own engine seeded from `rng`. With `alternate` the
/// opening side swaps after every game; otherwise every game opens with
/// `config.starting_player`.
#[instrument(skip(config, opponent, rng), fields(opponent = opponent.name()))]
pub fn run_duel<O: Opponent>(
    config: &EngineConfig,
    opponent: &mut O,
    games: usize,
    alternate: bool,
    rng: &mut StdRng,
) -> Result<DuelReport> {
    let mut report = DuelReport::new(opponent.name(), *config.difficulty(), *config.ai_player());
    let mut starter = *config.starting_player();

    for index in 0..games {
        let game_config = config.clone().with_starting_player(starter);
        let mut engine = Engine::with_rng(game_config, StdRng::seed_from_u64(rng.random()))?;
        let record = play_game(&mut engine, opponent)?;
        debug!(index, winner = ?record.winner, moves = record.moves.len(), "Duel game finished");
        report.record(record);
        if alternate {
            starter = starter.opponent();
        }
    }

    info!(%report, "Duel finished");
    Ok(report)
}

/// Plays one game to completion. Both sides' moves go through the
/// authoritative [`Game`] before the engine is told about them.
#[instrument(skip_all)]
pub fn play_game<R: Rng, O: Opponent>(engine: &mut Engine<R>, opponent: &mut O) -> Result<GameRecord> {
    let starting_player = *engine.config().starting_player();
    let mut game = Game::starting_with(starting_player);
    engine.reset_tree();

    while !game.is_over() {
        let choice = if game.to_move() == engine.ai_player() {
            engine.select_move()
        } else {
            opponent.choose(&game)
        };
        let Some(pos) = choice else {
            bail!("{} side found no move in a running game", game.to_move());
        };
        game.make_move(pos)?;
        engine.report_move(pos);
    }

    let winner = match game.status() {
        GameStatus::Won(p) => Some(p),
        _ => None,
    };
    Ok(GameRecord {
        starting_player,
        winner,
        moves: game.history().iter().map(|m| m.position()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opponent::RandomOpponent;

    #[test]
    fn test_report_tallies() {
        let mut report = DuelReport::new("random", Difficulty::Hard, Player::O);
        for winner in [Some(Player::O), Some(Player::X), None, None] {
            report.record(GameRecord {
                starting_player: Player::X,
                winner,
                moves: Vec::new(),
            });
        }
        assert_eq!(report.games, 4);
        assert_eq!(report.engine_wins, 1);
        assert_eq!(report.opponent_wins, 1);
        assert_eq!(report.draws, 2);
    }

    #[test]
    fn test_alternate_swaps_opener() {
        let config = EngineConfig::new(Player::O).with_difficulty(Difficulty::Easy);
        let mut opponent = RandomOpponent::new(StdRng::seed_from_u64(5));
        let mut rng = StdRng::seed_from_u64(6);
        let report = run_duel(&config, &mut opponent, 4, true, &mut rng).unwrap();
        let openers: Vec<Player> = report.records.iter().map(|r| r.starting_player).collect();
        assert_eq!(openers, vec![Player::X, Player::O, Player::X, Player::O]);
        for record in &report.records {
            assert!(record.moves.len() >= 5 && record.moves.len() <= 9);
        }
    }
}
