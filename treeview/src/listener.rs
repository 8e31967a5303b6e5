//! Host notification interface.

use std::collections::HashSet;

use crate::node::NodeId;
use crate::selection::SelectKind;

/// Context passed along with a selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectMeta {
    /// The node the user acted on, if the change came from a single node.
    pub node: Option<NodeId>,
    /// The active node after the change.
    pub active_node_id: Option<NodeId>,
    /// How the change came about.
    pub kind: SelectKind,
}

/// Receives state changes from a [`TreeView`](crate::TreeView).
///
/// Callbacks run synchronously after the state change, once per accepted
/// mutation and never for no-ops. In controlled mode they carry the value the
/// host should adopt; the view keeps showing the host's value until it is
/// synced back.
pub trait TreeViewListener {
    /// The selected set changed.
    fn on_select(&mut self, selected: &HashSet<NodeId>, meta: &SelectMeta) {
        let _ = (selected, meta);
    }

    /// The active node changed.
    fn on_activate(&mut self, active: Option<&NodeId>) {
        let _ = active;
    }

    /// A node was expanded (`true`) or collapsed (`false`).
    fn on_toggle(&mut self, node: &NodeId, expanded: bool) {
        let _ = (node, expanded);
    }
}

/// No-op listener.
impl TreeViewListener for () {}
