//! Arena-backed node storage with generational handles.
//!
//! Nodes live in a slot vector and refer to each other by [`NodeId`]. Freed
//! slots are recycled, and every slot carries a generation counter so a handle
//! to a freed node never resolves to whatever is stored in the slot later.

use crate::node::StateNode;
use tracing::trace;

/// Handle to a node in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Slot index (stable while the node is alive).
    pub fn index(self) -> u32 {
        self.index
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<StateNode>,
}

/// Slot arena owning every node of a search tree.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl Arena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no node is alive.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores a node and returns its handle.
    pub fn insert(&mut self, node: StateNode) -> NodeId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Resolves a handle, `None` if it is stale.
    pub fn get(&self, id: NodeId) -> Option<&StateNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Resolves a handle mutably, `None` if it is stale.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut StateNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Frees `id` and every node reachable through its children.
    ///
    /// The parent's child list is not touched; callers detach the subtree
    /// first when the parent stays alive. Returns the number of freed nodes.
    pub fn remove_subtree(&mut self, id: NodeId) -> usize {
        let mut freed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.remove(next) {
                stack.extend(node.children().iter().copied());
                freed += 1;
            }
        }
        trace!(freed, "Subtree removed");
        freed
    }

    /// Drops every node and invalidates all outstanding handles.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.len = 0;
    }

    fn remove(&mut self, id: NodeId) -> Option<StateNode> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(node)
    }
}
