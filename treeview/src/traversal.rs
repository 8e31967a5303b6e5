//! Navigation over the visible order.
//!
//! All queries work on [`TreeIndex`]'s flattened visible order: pre-order,
//! collapsed subtrees excluded, disabled nodes (and everything under them)
//! excluded. An id that is not in the visible order fails soft to a boundary
//! instead of erroring.

use crate::index::TreeIndex;
use crate::node::NodeId;

/// Walk direction for range collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the last visible node.
    Forward,
    /// Towards the first visible node.
    Backward,
}

impl TreeIndex {
    fn id_at(&self, position: usize) -> Option<NodeId> {
        self.visible_entry(position).map(|e| e.id.clone())
    }

    /// The node after `current`, or `None` at the end.
    ///
    /// An id outside the visible order starts before the first node, so the
    /// result is [`first`](Self::first).
    pub fn next(&self, current: &NodeId) -> Option<NodeId> {
        match self.position(current) {
            Some(pos) => self.id_at(pos + 1),
            None => self.first(),
        }
    }

    /// The node before `current`, or `None` at the start.
    ///
    /// An id outside the visible order starts after the last node, so the
    /// result is [`last`](Self::last).
    pub fn previous(&self, current: &NodeId) -> Option<NodeId> {
        match self.position(current) {
            Some(0) => None,
            Some(pos) => self.id_at(pos - 1),
            None => self.last(),
        }
    }

    /// First visible node.
    pub fn first(&self) -> Option<NodeId> {
        self.id_at(0)
    }

    /// Last visible node.
    pub fn last(&self) -> Option<NodeId> {
        self.visible_len().checked_sub(1).and_then(|p| self.id_at(p))
    }

    /// Every node from `start` to the boundary in `direction`, both ends
    /// included, ordered as walked. Empty if `start` is not visible.
    pub fn all_between(&self, start: &NodeId, direction: Direction) -> Vec<NodeId> {
        let Some(pos) = self.position(start) else {
            return Vec::new();
        };
        match direction {
            Direction::Forward => self
                .visible_entries()
                .skip(pos)
                .map(|e| e.id.clone())
                .collect(),
            Direction::Backward => {
                let mut ids: Vec<NodeId> = self
                    .visible_entries()
                    .take(pos + 1)
                    .map(|e| e.id.clone())
                    .collect();
                ids.reverse();
                ids
            }
        }
    }

    /// Every visible node in order.
    pub fn all_visible(&self) -> Vec<NodeId> {
        self.visible_entries().map(|e| e.id.clone()).collect()
    }

    /// The parent of a visible node.
    ///
    /// A visible node's ancestors are expanded and enabled, so the parent is
    /// visible too. `None` for root level nodes and ids outside the visible
    /// order.
    pub fn parent_of(&self, current: &NodeId) -> Option<NodeId> {
        let pos = self.position(current)?;
        let parent = self.visible_entry(pos)?.parent?;
        self.entry(parent).map(|e| e.id.clone())
    }

    /// The first visible child of `current`.
    ///
    /// Only an expanded node has one; the child is the next node in the
    /// visible order if it sits one level deeper.
    pub fn first_child_of(&self, current: &NodeId) -> Option<NodeId> {
        let pos = self.position(current)?;
        let depth = self.visible_entry(pos)?.depth;
        self.visible_entry(pos + 1)
            .filter(|e| e.depth == depth + 1)
            .map(|e| e.id.clone())
    }
}
