//! Tree construction.
//!
//! [`expand`] materializes every position reachable from a node up to a ply
//! bound. [`deepen`] pushes the frontier of an existing subtree back out to a
//! horizon without touching nodes that already have children.

use crate::arena::{Arena, NodeId};
use crate::node::StateNode;
use strictly_tictactoe::is_terminal;
use tracing::{instrument, trace};

/// Expands `id` with one child per empty square, recursing `remaining_depth`
/// plies deep.
///
/// Terminal positions and nodes reached with no depth left stay childless.
/// Children are created in row-major order of the square they fill. Returns
/// the number of nodes created. A node that already has children, or a stale
/// handle, is left alone.
pub fn expand(arena: &mut Arena, id: NodeId, remaining_depth: usize) -> usize {
    let Some(node) = arena.get(id) else {
        return 0;
    };
    if remaining_depth == 0 || !node.children().is_empty() || is_terminal(node.board()) {
        return 0;
    }

    let board = *node.board();
    let mover = node.to_move();
    let mut created = 0;
    let mut children = Vec::with_capacity(board.empty_count());
    for pos in board.empty_positions() {
        let child = arena.insert(StateNode::new(board.place(pos, mover), mover.opponent(), Some(id)));
        created += 1 + expand(arena, child, remaining_depth - 1);
        children.push(child);
    }
    if let Some(node) = arena.get_mut(id) {
        node.set_children(children);
    }
    created
}

/// Extends the subtree under `id` so every line reaches `horizon` plies below
/// it or ends the game.
///
/// Returns the number of nodes created.
#[instrument(skip(arena))]
pub fn deepen(arena: &mut Arena, id: NodeId, horizon: usize) -> usize {
    let mut created = 0;
    let mut stack = vec![(id, 0usize)];
    while let Some((next, depth)) = stack.pop() {
        let Some(node) = arena.get(next) else {
            continue;
        };
        if depth >= horizon {
            continue;
        }
        if node.children().is_empty() {
            created += expand(arena, next, horizon - depth);
        } else {
            stack.extend(node.children().iter().map(|child| (*child, depth + 1)));
        }
    }
    trace!(created, "Frontier deepened");
    created
}
