//! Persistent game tree and the current-position cursor.
//!
//! The tree is built once per game and then followed: each reported move
//! moves `current` down one edge. Siblings of the played child are freed
//! straight away, so the nodes above `current` form the single line actually
//! played, and everything at or below `current` is the live search tree.

use crate::arena::{Arena, NodeId};
use crate::builder::{deepen, expand};
use crate::node::StateNode;
use strictly_tictactoe::{Board, Player, Position};
use tracing::{debug, info, instrument, warn};

/// Outcome of reporting a move to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// `current` moved to the matching child.
    Advanced,
    /// No child matched; the tree was rebuilt from the empty board.
    Rebuilt,
    /// There was no tree yet; one was built from the empty board.
    Initialized,
}

/// Search tree with a root and a current-position cursor.
///
/// Either both `root` and `current` are set and `current` is reachable from
/// `root`, or neither is set.
#[derive(Debug, Clone)]
pub struct GameTree {
    arena: Arena,
    root: Option<NodeId>,
    current: Option<NodeId>,
    depth: usize,
    starting_player: Player,
}

impl GameTree {
    /// Creates an empty tree; nothing is built until [`GameTree::reset`].
    pub fn new(depth: usize, starting_player: Player) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            current: None,
            depth,
            starting_player,
        }
    }

    /// Whether a tree has been built.
    pub fn is_built(&self) -> bool {
        self.root.is_some()
    }

    /// Ply horizon kept below `current`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Root handle.
    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    /// Current-position handle.
    pub fn current_id(&self) -> Option<NodeId> {
        self.current
    }

    /// Root node (the empty board).
    pub fn root(&self) -> Option<&StateNode> {
        self.root.and_then(|id| self.arena.get(id))
    }

    /// Node for the position the game has reached.
    pub fn current(&self) -> Option<&StateNode> {
        self.current.and_then(|id| self.arena.get(id))
    }

    /// Board at the current position.
    pub fn current_board(&self) -> Option<Board> {
        self.current().map(|node| *node.board())
    }

    /// Resolves any handle into the tree.
    pub fn node(&self, id: NodeId) -> Option<&StateNode> {
        self.arena.get(id)
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Backing arena.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub(crate) fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Handles from `root` down to `current`, following parent links upward.
    ///
    /// `None` when no tree exists or the walk upward does not end at `root`.
    pub fn path_to_current(&self) -> Option<Vec<NodeId>> {
        let root = self.root?;
        let mut path = vec![self.current?];
        while let Some(parent) = self.arena.get(*path.last()?)?.parent() {
            if !self.arena.get(parent)?.children().contains(path.last()?) {
                return None;
            }
            path.push(parent);
        }
        path.reverse();
        (path.first() == Some(&root)).then_some(path)
    }

    /// Throws away any existing tree and builds a fresh one from the empty
    /// board, `depth` plies deep. `current` starts at the root.
    #[instrument(skip(self), fields(depth = self.depth))]
    pub fn reset(&mut self) {
        self.arena.clear();
        let root = self
            .arena
            .insert(StateNode::new(Board::new(), self.starting_player, None));
        let created = expand(&mut self.arena, root, self.depth);
        self.root = Some(root);
        self.current = Some(root);
        info!(nodes = created + 1, "Game tree built");
    }

    /// Moves `current` to the child reached by playing `pos`.
    ///
    /// Sibling subtrees of that child are freed and the frontier below the
    /// new `current` is extended back to the full horizon. A move with no
    /// matching child means the tree is out of sync with the game; it is
    /// rebuilt from scratch.
    #[instrument(skip(self))]
    pub fn report_move(&mut self, pos: Position) -> Navigation {
        let Some(current) = self.current else {
            self.reset();
            return Navigation::Initialized;
        };

        let Some(child) = self.matching_child(current, pos) else {
            warn!(%pos, "Reported move not found below current position, rebuilding tree");
            self.reset();
            return Navigation::Rebuilt;
        };

        let siblings: Vec<NodeId> = self
            .arena
            .get(current)
            .map(|node| node.children().iter().copied().filter(|c| *c != child).collect())
            .unwrap_or_default();
        let freed: usize = siblings
            .into_iter()
            .map(|sibling| self.arena.remove_subtree(sibling))
            .sum();
        if let Some(node) = self.arena.get_mut(current) {
            node.set_children(vec![child]);
        }

        self.current = Some(child);
        let created = deepen(&mut self.arena, child, self.depth);
        debug!(freed, created, nodes = self.arena.len(), "Advanced current position");
        Navigation::Advanced
    }

    fn matching_child(&self, current: NodeId, pos: Position) -> Option<NodeId> {
        let node = self.arena.get(current)?;
        let board = node.board();
        node.children()
            .iter()
            .copied()
            .find(|child| self.arena.get(*child).and_then(|c| c.move_from(board)) == Some(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_is_empty() {
        let tree = GameTree::new(6, Player::X);
        assert!(!tree.is_built());
        assert!(tree.current().is_none());
        assert!(tree.path_to_current().is_none());
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn test_report_without_tree_initializes() {
        let mut tree = GameTree::new(2, Player::X);
        assert_eq!(tree.report_move(Position::Center), Navigation::Initialized);
        assert_eq!(tree.current_id(), tree.root_id());
        assert_eq!(tree.current_board(), Some(Board::new()));
    }

    #[test]
    fn test_advance_prunes_siblings_and_keeps_horizon() {
        let mut tree = GameTree::new(2, Player::X);
        tree.reset();
        assert_eq!(tree.node_count(), 1 + 9 + 72);

        assert_eq!(tree.report_move(Position::Center), Navigation::Advanced);
        let root = tree.root().unwrap();
        assert_eq!(root.children().len(), 1);
        // Root, the played child, its 8 replies and their 7 replies each.
        assert_eq!(tree.node_count(), 1 + 1 + 8 + 56);

        let current = tree.current().unwrap();
        assert_eq!(current.to_move(), Player::O);
        assert_eq!(current.children().len(), 8);
        assert_eq!(tree.path_to_current().unwrap().len(), 2);
    }

    #[test]
    fn test_occupied_square_triggers_rebuild() {
        let mut tree = GameTree::new(2, Player::X);
        tree.reset();
        tree.report_move(Position::Center);
        let stale = tree.current_id().unwrap();

        assert_eq!(tree.report_move(Position::Center), Navigation::Rebuilt);
        assert_eq!(tree.current_id(), tree.root_id());
        assert_eq!(tree.current_board(), Some(Board::new()));
        assert!(tree.node(stale).is_none());
    }

    #[test]
    fn test_reset_twice_is_idempotent() {
        let mut tree = GameTree::new(3, Player::O);
        tree.reset();
        let count = tree.node_count();
        tree.reset();
        assert_eq!(tree.node_count(), count);
        assert_eq!(tree.current_id(), tree.root_id());
        let root = tree.root().unwrap();
        assert_eq!(*root.board(), Board::new());
        assert_eq!(root.to_move(), Player::O);
    }
}
