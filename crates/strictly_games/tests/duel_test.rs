//! Engine tiers against scripted opponents.

use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_games::{PerfectOpponent, RandomOpponent, run_duel};
use strictly_minimax::{Difficulty, EngineConfig};
use strictly_tictactoe::Player;

#[test]
fn test_hard_draws_every_game_against_perfect() {
    for ai in [Player::X, Player::O] {
        let config = EngineConfig::new(ai).with_difficulty(Difficulty::Hard);
        let mut solver = PerfectOpponent::new(StdRng::seed_from_u64(11));
        let mut rng = StdRng::seed_from_u64(12);
        let report = run_duel(&config, &mut solver, 12, true, &mut rng).unwrap();
        assert_eq!(report.games, 12);
        assert_eq!(report.opponent_wins, 0, "{report}");
        assert_eq!(report.engine_wins, 0, "{report}");
        assert_eq!(report.draws, 12);
    }
}

#[test]
fn test_hard_never_loses_to_random() {
    let config = EngineConfig::new(Player::O).with_difficulty(Difficulty::Hard);
    let mut random = RandomOpponent::new(StdRng::seed_from_u64(21));
    let mut rng = StdRng::seed_from_u64(22);
    let report = run_duel(&config, &mut random, 50, true, &mut rng).unwrap();
    assert_eq!(report.opponent_wins, 0, "{report}");
    assert!(report.engine_wins > 0);
}

#[test]
fn test_duel_is_reproducible_from_seeds() {
    let config = EngineConfig::new(Player::O).with_difficulty(Difficulty::Medium);
    let play = || {
        let mut random = RandomOpponent::new(StdRng::seed_from_u64(31));
        let mut rng = StdRng::seed_from_u64(32);
        run_duel(&config, &mut random, 10, false, &mut rng).unwrap()
    };
    assert_eq!(play(), play());
}

#[test]
fn test_report_serializes_to_json() {
    let config = EngineConfig::new(Player::X).with_difficulty(Difficulty::Easy);
    let mut random = RandomOpponent::new(StdRng::seed_from_u64(41));
    let mut rng = StdRng::seed_from_u64(42);
    let report = run_duel(&config, &mut random, 3, false, &mut rng).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["games"], 3);
    assert_eq!(value["opponent"], "random");
    assert_eq!(value["difficulty"], "easy");
    assert_eq!(value["records"].as_array().unwrap().len(), 3);
}
