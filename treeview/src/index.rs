//! Flattened arena over the tree model.
//!
//! The tree is laid out once in pre-order so that every subtree occupies a
//! contiguous range of the arena. The visible order (what keyboard navigation
//! walks) is derived from the arena plus the expansion set and rebuilt
//! whenever either changes.

use std::collections::{HashMap, HashSet};

use crate::error::TreeError;
use crate::node::{NodeId, TreeNode};

/// One node in the arena.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Node id.
    pub id: NodeId,
    /// Display text (opaque to navigation).
    pub label: String,
    /// Arena index of the parent, `None` for roots.
    pub parent: Option<usize>,
    /// Depth in tree (0 = root).
    pub depth: usize,
    /// Disabled itself or under a disabled ancestor.
    pub inert: bool,
    /// Number of direct children.
    pub child_count: usize,
    /// One past the last arena index of this node's subtree.
    subtree_end: usize,
}

impl IndexEntry {
    pub fn has_children(&self) -> bool {
        self.child_count > 0
    }
}

/// Arena and visible order for one tree.
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    entries: Vec<IndexEntry>,
    lookup: HashMap<NodeId, usize>,
    /// Arena indices of visible, enabled nodes in pre-order.
    visible: Vec<usize>,
    /// Node id to position in `visible`.
    positions: HashMap<NodeId, usize>,
}

impl TreeIndex {
    /// Build the arena for `roots` and compute the visible order.
    pub fn new(roots: &[TreeNode], expanded: &HashSet<NodeId>) -> Self {
        let mut index = Self::default();
        index.build(roots);
        index.rebuild_visible(expanded);
        index
    }

    /// Lay the tree out in pre-order.
    ///
    /// Uses an explicit stack so arbitrarily deep chains cannot overflow.
    fn build(&mut self, roots: &[TreeNode]) {
        let mut stack: Vec<(&TreeNode, Option<usize>, usize, bool)> =
            roots.iter().rev().map(|n| (n, None, 0, false)).collect();

        while let Some((node, parent, depth, parent_inert)) = stack.pop() {
            let index = self.entries.len();
            let inert = parent_inert || node.disabled;
            self.entries.push(IndexEntry {
                id: node.id.clone(),
                label: node.label.clone(),
                parent,
                depth,
                inert,
                child_count: node.children.len(),
                subtree_end: index + 1,
            });
            self.lookup.entry(node.id.clone()).or_insert(index);

            for child in node.children.iter().rev() {
                stack.push((child, Some(index), depth + 1, inert));
            }
        }

        // Descendants always sit after their ancestors, so a reverse sweep
        // sees every subtree complete before its parent.
        for i in (0..self.entries.len()).rev() {
            let end = self.entries[i].subtree_end;
            if let Some(parent) = self.entries[i].parent {
                let parent = &mut self.entries[parent];
                parent.subtree_end = parent.subtree_end.max(end);
            }
        }
    }

    /// Recompute the visible order for a new expansion set.
    pub fn rebuild_visible(&mut self, expanded: &HashSet<NodeId>) {
        self.visible.clear();
        self.positions.clear();

        let mut i = 0;
        while i < self.entries.len() {
            let entry = &self.entries[i];
            if entry.inert {
                i = entry.subtree_end;
                continue;
            }
            self.positions
                .entry(entry.id.clone())
                .or_insert(self.visible.len());
            self.visible.push(i);

            if entry.has_children() && !expanded.contains(&entry.id) {
                i = entry.subtree_end;
            } else {
                i += 1;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Total number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of nodes in the visible order.
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Whether a node with this id exists anywhere in the tree.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.lookup.contains_key(id)
    }

    /// Get a node's entry by id.
    pub fn get(&self, id: &NodeId) -> Option<&IndexEntry> {
        self.lookup.get(id).map(|&i| &self.entries[i])
    }

    /// Arena (pre-order) index of a node.
    pub fn arena_index(&self, id: &NodeId) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    /// Whether the node exists and neither it nor an ancestor is disabled.
    pub fn is_enabled(&self, id: &NodeId) -> bool {
        self.get(id).is_some_and(|e| !e.inert)
    }

    /// Whether the node is part of the visible order.
    pub fn is_visible(&self, id: &NodeId) -> bool {
        self.positions.contains_key(id)
    }

    /// Position of a node in the visible order.
    pub fn position(&self, id: &NodeId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Entry at an arena index.
    pub fn entry(&self, arena_index: usize) -> Option<&IndexEntry> {
        self.entries.get(arena_index)
    }

    /// Entry at a visible position.
    pub fn visible_entry(&self, position: usize) -> Option<&IndexEntry> {
        self.visible.get(position).map(|&i| &self.entries[i])
    }

    /// Visible entries in order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.visible.iter().map(|&i| &self.entries[i])
    }

    /// Whether the node can be expanded or collapsed: it has children and
    /// is not disabled.
    pub fn is_expandable(&self, id: &NodeId) -> bool {
        self.get(id).is_some_and(|e| e.has_children() && !e.inert)
    }

    /// Ids of every expandable node, in pre-order.
    pub fn expandable_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.entries
            .iter()
            .filter(|e| e.has_children() && !e.inert)
            .map(|e| &e.id)
    }

    /// Entries a host should draw: every node whose ancestors are expanded,
    /// disabled ones included.
    pub fn rendered(&self, expanded: &HashSet<NodeId>) -> Vec<&IndexEntry> {
        let mut rows = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            let entry = &self.entries[i];
            rows.push(entry);
            if entry.has_children() && !expanded.contains(&entry.id) {
                i = entry.subtree_end;
            } else {
                i += 1;
            }
        }
        rows
    }

    /// Parent entry of a node, visible or not.
    pub fn parent(&self, id: &NodeId) -> Option<&IndexEntry> {
        self.get(id)
            .and_then(|e| e.parent)
            .map(|p| &self.entries[p])
    }
}

/// Check a host-supplied tree for duplicate or empty ids.
pub fn validate(roots: &[TreeNode]) -> Result<(), TreeError> {
    let mut seen: HashSet<&NodeId> = HashSet::new();
    let mut stack: Vec<(&TreeNode, usize)> = roots.iter().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        if matches!(&node.id, NodeId::Str(s) if s.is_empty()) {
            return Err(TreeError::EmptyId { depth });
        }
        if !seen.insert(&node.id) {
            return Err(TreeError::DuplicateId {
                id: node.id.clone(),
                depth,
            });
        }
        stack.extend(node.children.iter().map(|c| (c, depth + 1)));
    }
    Ok(())
}
