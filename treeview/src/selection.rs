//! Selection and activation state.
//!
//! `selected` is the set of selected node ids; `active` is the single most
//! recently activated node (the "current choice" in single-select use).
//! Both may be owned by the host or by the component, independently.

use std::collections::HashSet;

use log::{debug, trace};

use crate::controlled::Controllable;
use crate::index::TreeIndex;
use crate::node::NodeId;

/// How a selection change came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKind {
    /// The selection was replaced by a single node.
    Replace,
    /// A node was added to or removed from a multi-selection.
    Toggle,
    /// Several nodes were added at once (range or select all).
    Extend,
}

/// The outcome of a selection operation.
///
/// Carries the next values even when the host controls the state and the
/// component therefore did not retain them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionUpdate {
    pub selected: HashSet<NodeId>,
    pub active: Option<NodeId>,
    pub selected_changed: bool,
    pub active_changed: bool,
}

impl SelectionUpdate {
    fn unchanged(state: &SelectionState) -> Self {
        Self {
            selected: state.selected().clone(),
            active: state.active().cloned(),
            selected_changed: false,
            active_changed: false,
        }
    }

    /// Whether nothing changed.
    pub fn is_noop(&self) -> bool {
        !self.selected_changed && !self.active_changed
    }
}

/// Selected ids and active id with their invariants.
///
/// - `selected` never holds an unknown or disabled id.
/// - Without multiselect `selected` has at most one member.
/// - `active`, if set, names an enabled node.
#[derive(Debug, Clone)]
pub struct SelectionState {
    multiselect: bool,
    selected: Controllable<HashSet<NodeId>>,
    active: Controllable<Option<NodeId>>,
}

impl SelectionState {
    /// Create state from the host's initial or controlled values.
    ///
    /// Values naming unknown or disabled nodes are dropped.
    pub fn new(
        index: &TreeIndex,
        multiselect: bool,
        selected: Controllable<HashSet<NodeId>>,
        active: Controllable<Option<NodeId>>,
    ) -> Self {
        let mut state = Self {
            multiselect,
            selected,
            active,
        };
        state.reconcile(index);
        state
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn multiselect(&self) -> bool {
        self.multiselect
    }

    /// Authoritative selected ids.
    pub fn selected(&self) -> &HashSet<NodeId> {
        self.selected.get()
    }

    /// Authoritative active id.
    pub fn active(&self) -> Option<&NodeId> {
        self.active.get().as_ref()
    }

    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected().contains(id)
    }

    pub fn is_active(&self, id: &NodeId) -> bool {
        self.active() == Some(id)
    }

    /// Whether the host owns the selected set.
    pub fn is_selection_controlled(&self) -> bool {
        self.selected.is_controlled()
    }

    /// Whether the host owns the active id.
    pub fn is_activation_controlled(&self) -> bool {
        self.active.is_controlled()
    }

    // -------------------------------------------------------------------------
    // Host updates
    // -------------------------------------------------------------------------

    /// Apply the host's selected value (`None` = component-owned).
    pub fn sync_selected(&mut self, index: &TreeIndex, selected: Option<HashSet<NodeId>>) {
        self.selected.sync(selected);
        self.reconcile(index);
    }

    /// Apply the host's active value (`None` = component-owned).
    pub fn sync_active(&mut self, index: &TreeIndex, active: Option<NodeId>) {
        self.active.sync(active.map(Some));
        self.reconcile(index);
    }

    /// Switch between single and multiple selection.
    pub fn set_multiselect(&mut self, index: &TreeIndex, multiselect: bool) {
        self.multiselect = multiselect;
        self.reconcile(index);
    }

    /// Restore the invariants against a (possibly changed) tree.
    ///
    /// Drops unknown and disabled ids and trims a single-select set to one
    /// member, preferring the active node, then the earliest in tree order.
    /// This is bookkeeping, not a user mutation, so no change is reported.
    pub fn reconcile(&mut self, index: &TreeIndex) {
        let multiselect = self.multiselect;
        let active = self
            .active
            .get()
            .clone()
            .filter(|id| index.is_enabled(id));

        self.selected.map_in_place(|selected| {
            selected.retain(|id| index.is_enabled(id));
            if !multiselect && selected.len() > 1 {
                let keep = active
                    .clone()
                    .filter(|id| selected.contains(id))
                    .or_else(|| {
                        selected
                            .iter()
                            .min_by_key(|id| index.arena_index(id))
                            .cloned()
                    });
                selected.retain(|id| Some(id) == keep.as_ref());
            }
        });
        self.active.map_in_place(|a| {
            if a.as_ref().is_some_and(|id| !index.is_enabled(id)) {
                *a = None;
            }
        });
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Select a node.
    ///
    /// Non-additive (or without multiselect): the selection becomes exactly
    /// `{id}` and `id` becomes active. Additive with multiselect: `id` is
    /// added, or removed if already selected; the active node is untouched.
    /// Disabled or unknown ids are ignored.
    pub fn toggle_select(
        &mut self,
        index: &TreeIndex,
        id: &NodeId,
        additive: bool,
    ) -> SelectionUpdate {
        if !index.is_enabled(id) {
            trace!("Ignoring select of unavailable node {}", id);
            return SelectionUpdate::unchanged(self);
        }

        let current = self.selected().clone();
        let (next, next_active) = if additive && self.multiselect {
            let mut next = current.clone();
            if !next.remove(id) {
                next.insert(id.clone());
            }
            (next, self.active().cloned())
        } else {
            (HashSet::from([id.clone()]), Some(id.clone()))
        };

        self.commit(current, next, next_active)
    }

    /// Add every enabled id in `ids` to the selection.
    ///
    /// Disabled and unknown ids are dropped before the union. Ranges only make
    /// sense with multiselect; without it this is a no-op.
    pub fn select_many<'a>(
        &mut self,
        index: &TreeIndex,
        ids: impl IntoIterator<Item = &'a NodeId>,
    ) -> SelectionUpdate {
        if !self.multiselect {
            debug!("Ignoring range selection without multiselect");
            return SelectionUpdate::unchanged(self);
        }

        let current = self.selected().clone();
        let mut next = current.clone();
        next.extend(ids.into_iter().filter(|id| index.is_enabled(id)).cloned());
        let active = self.active().cloned();

        self.commit(current, next, active)
    }

    /// Make `id` the active node. The selection is untouched.
    pub fn activate(&mut self, index: &TreeIndex, id: &NodeId) -> SelectionUpdate {
        if !index.is_enabled(id) {
            trace!("Ignoring activate of unavailable node {}", id);
            return SelectionUpdate::unchanged(self);
        }
        let current = self.selected().clone();
        self.commit(current.clone(), current, Some(id.clone()))
    }

    fn commit(
        &mut self,
        current: HashSet<NodeId>,
        next: HashSet<NodeId>,
        next_active: Option<NodeId>,
    ) -> SelectionUpdate {
        let selected_changed = next != current;
        let active_changed = next_active.as_ref() != self.active();

        if selected_changed {
            self.selected.set(next.clone());
        }
        if active_changed {
            self.active.set(next_active.clone());
        }

        SelectionUpdate {
            selected: next,
            active: next_active,
            selected_changed,
            active_changed,
        }
    }
}
