//! Materialized board positions stored in the search tree.

use crate::arena::NodeId;
use strictly_tictactoe::{Board, Move, Player, Position};

/// A board position plus whose turn it is.
///
/// Children are owned through the arena; the parent link is a plain handle
/// and does not keep the parent alive.
#[derive(Debug, Clone)]
pub struct StateNode {
    board: Board,
    to_move: Player,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    score: Option<i32>,
}

impl StateNode {
    /// Creates a childless node.
    pub fn new(board: Board, to_move: Player, parent: Option<NodeId>) -> Self {
        Self {
            board,
            to_move,
            children: Vec::new(),
            parent,
            score: None,
        }
    }

    /// Board snapshot of this position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move in this position.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Child handles in row-major move order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent handle, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Last minimax score recorded for this node, if any.
    pub fn score(&self) -> Option<i32> {
        self.score
    }

    /// The square filled on the way from `parent_board` to this node.
    ///
    /// `None` unless exactly one empty square of `parent_board` holds the
    /// mark of the side that moved into this node.
    pub fn move_from(&self, parent_board: &Board) -> Option<Position> {
        Move::between(parent_board, &self.board)
            .filter(|mv| mv.player() == self.to_move.opponent())
            .map(|mv| mv.position())
    }

    #[cfg(test)]
    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn set_children(&mut self, children: Vec<NodeId>) {
        self.children = children;
    }

    pub(crate) fn set_score(&mut self, score: i32) {
        self.score = Some(score);
    }
}
