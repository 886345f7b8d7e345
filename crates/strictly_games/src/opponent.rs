//! Scripted opponents the engine can be pitted against.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::collections::HashMap;
use strictly_tictactoe::{Board, Game, Player, Position, is_full, winner};
use tracing::{debug, instrument};

/// Trait for players that pick moves without the engine's tree.
pub trait Opponent {
    /// Picks a move for the player to move in `game`, `None` if it is over.
    fn choose(&mut self, game: &Game) -> Option<Position>;

    /// Returns the opponent's display name.
    fn name(&self) -> &str;
}

/// Plays a uniformly random empty square.
#[derive(Debug, derive_new::new)]
pub struct RandomOpponent {
    rng: StdRng,
}

impl Opponent for RandomOpponent {
    fn choose(&mut self, game: &Game) -> Option<Position> {
        if game.is_over() {
            return None;
        }
        game.board().empty_positions().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Exhaustive solver: always plays a game-theoretically optimal move,
/// choosing uniformly among equally good ones.
///
/// Position values are memoized across calls.
#[derive(Debug, derive_new::new)]
pub struct PerfectOpponent {
    rng: StdRng,
    #[new(default)]
    memo: HashMap<(Board, Player), i8>,
}

impl PerfectOpponent {
    /// Value of `board` for `to_move` under perfect play: 1 win, 0 draw, -1 loss.
    pub fn value(&mut self, board: Board, to_move: Player) -> i8 {
        if let Some(w) = winner(&board) {
            return if w == to_move { 1 } else { -1 };
        }
        if is_full(&board) {
            return 0;
        }
        if let Some(v) = self.memo.get(&(board, to_move)) {
            return *v;
        }
        let best = board
            .empty_positions()
            .into_iter()
            .map(|pos| -self.value(board.place(pos, to_move), to_move.opponent()))
            .max()
            .unwrap_or(0);
        self.memo.insert((board, to_move), best);
        best
    }

    /// All moves achieving the best value for `to_move`.
    pub fn best_moves(&mut self, board: Board, to_move: Player) -> Vec<Position> {
        let scored: Vec<(Position, i8)> = board
            .empty_positions()
            .into_iter()
            .map(|pos| (pos, -self.value(board.place(pos, to_move), to_move.opponent())))
            .collect();
        let Some(best) = scored.iter().map(|(_, v)| *v).max() else {
            return Vec::new();
        };
        scored
            .into_iter()
            .filter(|(_, v)| *v == best)
            .map(|(pos, _)| pos)
            .collect()
    }
}

impl Opponent for PerfectOpponent {
    #[instrument(skip_all)]
    fn choose(&mut self, game: &Game) -> Option<Position> {
        if game.is_over() {
            return None;
        }
        let moves = self.best_moves(*game.board(), game.to_move());
        debug!(candidates = moves.len(), "Solver picked optimal set");
        moves.choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "perfect"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_empty_board_is_a_draw() {
        let mut solver = PerfectOpponent::new(StdRng::seed_from_u64(0));
        assert_eq!(solver.value(Board::new(), Player::X), 0);
    }

    #[test]
    fn test_solver_completes_line() {
        let mut solver = PerfectOpponent::new(StdRng::seed_from_u64(0));
        let board = Board::from_notation("XX./OO./...").unwrap();
        assert_eq!(solver.best_moves(board, Player::X), vec![Position::TopRight]);
    }

    #[test]
    fn test_random_opponent_stops_when_over() {
        let mut random = RandomOpponent::new(StdRng::seed_from_u64(0));
        let mut game = Game::new();
        for pos in [
            Position::TopLeft,
            Position::Center,
            Position::TopCenter,
            Position::BottomLeft,
            Position::TopRight,
        ] {
            game.make_move(pos).unwrap();
        }
        assert_eq!(random.choose(&game), None);
    }

    #[test]
    fn test_solver_memo_starts_empty_and_fills() {
        let mut solver = PerfectOpponent::new(StdRng::seed_from_u64(0));
        assert!(solver.memo.is_empty());
        let board = Board::from_notation("XO./.X./...").unwrap();
        assert_eq!(solver.value(board, Player::O), -1);
        assert!(!solver.memo.is_empty());
    }
}
