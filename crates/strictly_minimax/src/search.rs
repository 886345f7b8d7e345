//! Plain minimax over a materialized subtree.
//!
//! No pruning and no memoization: every call walks the subtree it is given.
//! The tree is already bounded by the builder's horizon, so the walk is too.

use crate::arena::{Arena, NodeId};
use crate::evaluator::{self, DRAW_SCORE};
use strictly_tictactoe::{Player, is_terminal};

/// Backward-induction score of `id` from `ai`'s point of view.
///
/// Leaves, terminal positions and nodes reached with `depth == 0` score by
/// [`evaluator::score`]. Otherwise the maximizing side takes the best child
/// score and the minimizing side the worst. A stale handle scores as a draw.
pub fn minimax(arena: &Arena, id: NodeId, depth: usize, maximizing: bool, ai: Player) -> i32 {
    let Some(node) = arena.get(id) else {
        return DRAW_SCORE;
    };
    if depth == 0 || node.children().is_empty() || is_terminal(node.board()) {
        return evaluator::score(node.board(), ai);
    }

    let scores = node
        .children()
        .iter()
        .map(|child| minimax(arena, *child, depth - 1, !maximizing, ai));
    let best = if maximizing { scores.max() } else { scores.min() };
    best.unwrap_or(DRAW_SCORE)
}
