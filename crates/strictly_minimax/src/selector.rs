//! Difficulty-tiered move selection.
//!
//! Every randomized choice draws from the generator the caller passes in, so
//! an engine that owns one seeded generator replays identically.

use crate::arena::{Arena, NodeId};
use crate::config::EngineConfig;
use crate::difficulty::Difficulty;
use crate::search::minimax;
use crate::tree::GameTree;
use rand::Rng;
use rand::seq::IndexedRandom;
use strictly_tictactoe::{Board, Player, Position, is_terminal, winner};
use tracing::{debug, instrument, warn};

/// Picks a move for the position at the tree's current node.
///
/// Returns `None` when there is no tree, the configuration fails
/// validation, or the current board is decided or full. If the current node
/// is not the engine's turn, any empty square is returned uniformly at random
/// regardless of tier.
#[instrument(skip(tree, config, rng))]
pub fn select_move<R: Rng + ?Sized>(
    tree: &mut GameTree,
    config: &EngineConfig,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Position> {
    if let Err(e) = config.validate() {
        warn!(%e, "Refusing to select with invalid configuration");
        return None;
    }
    let current = tree.current_id()?;
    let node = tree.arena().get(current)?;
    let board = *node.board();
    if is_terminal(&board) {
        debug!("No legal moves from decided position");
        return None;
    }

    let ai = *config.ai_player();
    if node.to_move() != ai {
        debug!(to_move = %node.to_move(), "Out-of-turn request, playing randomly");
        return random_move(&board, rng);
    }

    match difficulty {
        Difficulty::Easy => easy_move(&board, ai, config, rng),
        Difficulty::Medium => medium_move(&board, ai, *config.medium_preference_chance(), rng),
        Difficulty::Hard => hard_move(tree.arena_mut(), current, *config.depth(), ai, rng),
    }
}

/// Coerces `p` into a probability `random_bool` accepts. NaN counts as zero.
fn probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Uniformly random empty square.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    board.empty_positions().choose(rng).copied()
}

/// Easy tier: usually random, sometimes Medium. Out-of-range chances in
/// `config` are clamped.
pub fn easy_move<R: Rng + ?Sized>(
    board: &Board,
    ai: Player,
    config: &EngineConfig,
    rng: &mut R,
) -> Option<Position> {
    if rng.random_bool(probability(*config.easy_random_chance())) {
        random_move(board, rng)
    } else {
        medium_move(board, ai, *config.medium_preference_chance(), rng)
    }
}

/// Medium tier: win, else block, else a coin flip between the preferred
/// squares (center, then corners) and any empty square.
///
/// `preference_chance` is clamped to `[0, 1]`.
///
/// Wins and blocks are deterministic: the first qualifying square in
/// row-major order is taken without consulting `rng`.
pub fn medium_move<R: Rng + ?Sized>(
    board: &Board,
    ai: Player,
    preference_chance: f64,
    rng: &mut R,
) -> Option<Position> {
    let moves = board.empty_positions();
    if moves.is_empty() {
        return None;
    }

    if let Some(pos) = winning_move(board, ai) {
        debug!(%pos, "Taking immediate win");
        return Some(pos);
    }
    if let Some(pos) = winning_move(board, ai.opponent()) {
        debug!(%pos, "Blocking opponent win");
        return Some(pos);
    }

    let preferred: Vec<Position> = std::iter::once(Position::CENTER)
        .chain(Position::CORNERS)
        .filter(|pos| board.is_empty(*pos))
        .collect();
    if !preferred.is_empty() && rng.random_bool(probability(preference_chance)) {
        return preferred.choose(rng).copied();
    }
    moves.choose(rng).copied()
}

/// First empty square (row-major) that completes a line for `player`.
pub fn winning_move(board: &Board, player: Player) -> Option<Position> {
    board
        .empty_positions()
        .into_iter()
        .find(|pos| winner(&board.place(*pos, player)) == Some(player))
}

/// Hard tier: best minimax score among `current`'s children, ties broken
/// uniformly at random. Falls back to a random square when `current` was
/// never expanded.
pub fn hard_move<R: Rng + ?Sized>(
    arena: &mut Arena,
    current: NodeId,
    depth: usize,
    ai: Player,
    rng: &mut R,
) -> Option<Position> {
    let scored = score_children(arena, current, depth, ai);
    let Some(best) = scored.iter().map(|(_, score)| *score).max() else {
        let board = *arena.get(current)?.board();
        return random_move(&board, rng);
    };

    let ties: Vec<Position> = scored
        .iter()
        .filter(|(_, score)| *score == best)
        .map(|(pos, _)| *pos)
        .collect();
    debug!(best, ties = ties.len(), "Minimax scored children");
    ties.choose(rng).copied()
}

/// Minimax score of each child of `current`, which must be the engine's turn.
///
/// Each child's score is also recorded on the child node.
pub fn score_children(
    arena: &mut Arena,
    current: NodeId,
    depth: usize,
    ai: Player,
) -> Vec<(Position, i32)> {
    let view: &Arena = arena;
    let Some(node) = view.get(current) else {
        return Vec::new();
    };
    let board = *node.board();
    let scored: Vec<(NodeId, Position, i32)> = node
        .children()
        .iter()
        .filter_map(|child| {
            let pos = view.get(*child)?.move_from(&board)?;
            Some((*child, pos, minimax(view, *child, depth, false, ai)))
        })
        .collect();

    scored
        .into_iter()
        .map(|(child, pos, score)| {
            if let Some(node) = arena.get_mut(child) {
                node.set_score(score);
            }
            (pos, score)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn board(notation: &str) -> Board {
        Board::from_notation(notation).unwrap()
    }

    #[test]
    fn test_random_move_only_picks_empty_squares() {
        let mut rng = StdRng::seed_from_u64(1);
        let b = board("XOX/OXO/.X.");
        for _ in 0..50 {
            let pos = random_move(&b, &mut rng).unwrap();
            assert!(b.is_empty(pos));
        }
        assert_eq!(random_move(&board("XOX/OXX/OXO"), &mut rng), None);
    }

    #[test]
    fn test_winning_move_scans_row_major() {
        // X can win at TopRight (row) or BottomLeft (column); row-major takes TopRight.
        let b = board("XX./X../...");
        assert_eq!(winning_move(&b, Player::X), Some(Position::TopRight));
        assert_eq!(winning_move(&b, Player::O), None);
    }

    #[test]
    fn test_medium_takes_win_over_block() {
        let mut rng = StdRng::seed_from_u64(3);
        let b = board("XX./OO./...");
        for _ in 0..20 {
            assert_eq!(medium_move(&b, Player::X, 0.5, &mut rng), Some(Position::TopRight));
            assert_eq!(medium_move(&b, Player::O, 0.5, &mut rng), Some(Position::MiddleRight));
        }
    }

    #[test]
    fn test_medium_blocks_when_it_cannot_win() {
        let mut rng = StdRng::seed_from_u64(4);
        let b = board("XX./O../..O");
        for _ in 0..20 {
            assert_eq!(medium_move(&b, Player::O, 0.5, &mut rng), Some(Position::TopRight));
        }
    }

    #[test]
    fn test_medium_preference_list() {
        let mut rng = StdRng::seed_from_u64(5);
        // Center taken: preferred squares are the free corners.
        let b = board(".../.X./...");
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(medium_move(&b, Player::O, 1.0, &mut rng).unwrap());
        }
        assert_eq!(seen, Position::CORNERS.into_iter().collect());

        // Preference chance zero draws from every empty square.
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.insert(medium_move(&b, Player::O, 0.0, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_easy_with_no_randomness_is_medium() {
        let mut rng = StdRng::seed_from_u64(6);
        let config = EngineConfig::new(Player::X).with_easy_random_chance(0.0);
        let b = board("XX./OO./...");
        assert_eq!(easy_move(&b, Player::X, &config, &mut rng), Some(Position::TopRight));
    }

    #[test]
    fn test_select_move_decided_position_is_none() {
        let config = EngineConfig::new(Player::O);
        let mut tree = GameTree::new(*config.depth(), Player::X);
        tree.reset();
        // X wins the top row while O plays the middle row.
        for pos in [
            Position::TopLeft,
            Position::MiddleLeft,
            Position::TopCenter,
            Position::Center,
            Position::TopRight,
        ] {
            tree.report_move(pos);
        }
        let mut rng = StdRng::seed_from_u64(7);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(select_move(&mut tree, &config, difficulty, &mut rng), None);
        }
    }

    #[test]
    fn test_out_of_range_chances_are_clamped() {
        let mut rng = StdRng::seed_from_u64(8);
        let b = board("X../.O./...");
        for chance in [1.5, -0.5, f64::NAN] {
            let pos = medium_move(&b, Player::O, chance, &mut rng).unwrap();
            assert!(b.is_empty(pos));
        }
        // Above one always picks from the free corners.
        for _ in 0..20 {
            let pos = medium_move(&b, Player::O, 1.5, &mut rng).unwrap();
            assert!(Position::CORNERS.contains(&pos));
        }
        let config = EngineConfig::new(Player::O).with_easy_random_chance(2.0);
        for _ in 0..20 {
            assert!(b.is_empty(easy_move(&b, Player::O, &config, &mut rng).unwrap()));
        }
    }

    #[test]
    fn test_select_move_rejects_invalid_config() {
        let config = EngineConfig::new(Player::X).with_medium_preference_chance(3.0);
        let mut tree = GameTree::new(2, Player::X);
        tree.reset();
        let mut rng = StdRng::seed_from_u64(9);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(select_move(&mut tree, &config, difficulty, &mut rng), None);
        }
    }

    #[test]
    fn test_hard_on_unexpanded_node_plays_random_empty_square() {
        let mut arena = Arena::new();
        let b = board("X../.O./...");
        let id = arena.insert(crate::node::StateNode::new(b, Player::X, None));
        let mut rng = StdRng::seed_from_u64(10);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let pos = hard_move(&mut arena, id, 6, Player::X, &mut rng).unwrap();
            assert!(b.is_empty(pos));
            seen.insert(pos);
        }
        assert_eq!(seen.len(), 7);
        assert!(arena.get(id).unwrap().children().is_empty());
    }
}
