//! The tree view component.

use std::collections::HashSet;

use log::{debug, trace};

use crate::config::{RangeChord, TreeSize, TreeViewConfig};
use crate::controlled::Controllable;
use crate::index::TreeIndex;
use crate::interpreter::{EventResult, Intent, interpret};
use crate::keys::{KeyCombo, PointerEvent};
use crate::listener::{SelectMeta, TreeViewListener};
use crate::node::{NodeId, TreeNode};
use crate::selection::{SelectKind, SelectionState, SelectionUpdate};
use crate::traversal::Direction;

/// What the host should do after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Whether the event was handled.
    pub result: EventResult,
    /// Node that should receive focus, if focus moves.
    pub focus: Option<NodeId>,
}

impl KeyOutcome {
    fn ignored() -> Self {
        Self {
            result: EventResult::Ignored,
            focus: None,
        }
    }

    fn consumed(focus: Option<NodeId>) -> Self {
        Self {
            result: EventResult::Consumed,
            focus,
        }
    }

    pub fn is_consumed(&self) -> bool {
        self.result == EventResult::Consumed
    }
}

/// A node as the host should draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: NodeId,
    pub label: String,
    /// Depth in tree (0 = root).
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    /// Disabled itself or under a disabled ancestor.
    pub disabled: bool,
    /// `aria-selected`.
    pub selected: bool,
    pub active: bool,
}

/// Builder for [`TreeView`].
#[derive(Debug)]
pub struct TreeViewBuilder<L = ()> {
    nodes: Vec<TreeNode>,
    config: TreeViewConfig,
    default_selected: Vec<NodeId>,
    default_active: Option<NodeId>,
    selected: Option<Vec<NodeId>>,
    active: Option<NodeId>,
    listener: L,
}

impl TreeViewBuilder<()> {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self {
            nodes,
            config: TreeViewConfig::default(),
            default_selected: Vec::new(),
            default_active: None,
            selected: None,
            active: None,
            listener: (),
        }
    }
}

impl<L> TreeViewBuilder<L> {
    /// Replace the whole configuration.
    pub fn config(mut self, config: TreeViewConfig) -> Self {
        self.config = config;
        self
    }

    pub fn multiselect(mut self, multiselect: bool) -> Self {
        self.config.multiselect = multiselect;
        self
    }

    pub fn size(mut self, size: TreeSize) -> Self {
        self.config.size = size;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    pub fn hide_label(mut self, hide: bool) -> Self {
        self.config.hide_label = hide;
        self
    }

    pub fn range_chord(mut self, chord: RangeChord) -> Self {
        self.config.range_chord = chord;
        self
    }

    /// Initial selection for a component-owned selection.
    pub fn default_selected(mut self, ids: impl IntoIterator<Item = impl Into<NodeId>>) -> Self {
        self.default_selected = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Initial active node for a component-owned active state.
    pub fn default_active(mut self, id: impl Into<NodeId>) -> Self {
        self.default_active = Some(id.into());
        self
    }

    /// Host-controlled selection.
    pub fn selected(mut self, ids: impl IntoIterator<Item = impl Into<NodeId>>) -> Self {
        self.selected = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Host-controlled active node.
    pub fn active(mut self, id: impl Into<NodeId>) -> Self {
        self.active = Some(id.into());
        self
    }

    /// Set the change listener.
    pub fn listener<M: TreeViewListener>(self, listener: M) -> TreeViewBuilder<M> {
        TreeViewBuilder {
            nodes: self.nodes,
            config: self.config,
            default_selected: self.default_selected,
            default_active: self.default_active,
            selected: self.selected,
            active: self.active,
            listener,
        }
    }
}

impl<L: TreeViewListener> TreeViewBuilder<L> {
    pub fn build(self) -> TreeView<L> {
        let expanded = initially_expanded(&self.nodes);
        let index = TreeIndex::new(&self.nodes, &expanded);

        // Unknown, disabled and surplus single-select ids are trimmed by
        // `SelectionState::new` once the index exists.
        let selected = match self.selected {
            Some(ids) => Controllable::controlled(ids.into_iter().collect()),
            None => Controllable::uncontrolled(self.default_selected.into_iter().collect()),
        };
        let active = match self.active {
            Some(id) => Controllable::controlled(Some(id)),
            None => Controllable::uncontrolled(self.default_active),
        };
        let selection = SelectionState::new(&index, self.config.multiselect, selected, active);

        debug!(
            "TreeView '{}' built: {} nodes, {} visible, multiselect={}",
            self.config.label,
            index.len(),
            index.visible_len(),
            self.config.multiselect
        );

        TreeView {
            roots: self.nodes,
            expanded,
            index,
            selection,
            config: self.config,
            listener: self.listener,
        }
    }
}

fn initially_expanded(roots: &[TreeNode]) -> HashSet<NodeId> {
    let mut expanded = HashSet::new();
    let mut stack: Vec<&TreeNode> = roots.iter().collect();
    while let Some(node) = stack.pop() {
        if node.expanded && !node.children.is_empty() {
            expanded.insert(node.id.clone());
        }
        stack.extend(node.children.iter());
    }
    expanded
}

/// A headless tree view.
///
/// Holds the tree model, expansion state and selection state, interprets key
/// and pointer events and reports changes to its [`TreeViewListener`]. The
/// host draws [`rows`](Self::rows) and moves DOM/terminal focus to whatever
/// [`KeyOutcome::focus`] names.
///
/// # Example
///
/// ```
/// use treeview::{Key, KeyCombo, NodeId, TreeNode, TreeView};
///
/// let nodes = vec![
///     TreeNode::new("a", "A"),
///     TreeNode::new("b", "B")
///         .expanded(true)
///         .children([TreeNode::new("b1", "B1"), TreeNode::new("b2", "B2")]),
///     TreeNode::new("c", "C"),
/// ];
/// let mut tree = TreeView::builder(nodes).label("Files").build();
///
/// let outcome = tree.handle_key(&NodeId::from("b"), &KeyCombo::key(Key::Down));
/// assert_eq!(outcome.focus, Some(NodeId::from("b1")));
/// ```
#[derive(Debug)]
pub struct TreeView<L: TreeViewListener = ()> {
    roots: Vec<TreeNode>,
    expanded: HashSet<NodeId>,
    index: TreeIndex,
    selection: SelectionState,
    config: TreeViewConfig,
    listener: L,
}

impl TreeView<()> {
    pub fn builder(nodes: Vec<TreeNode>) -> TreeViewBuilder<()> {
        TreeViewBuilder::new(nodes)
    }
}

impl<L: TreeViewListener> TreeView<L> {
    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &TreeViewConfig {
        &self.config
    }

    /// Root nodes as last supplied by the host.
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// The flattened index; exposes the traversal queries.
    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_ids(&self) -> &HashSet<NodeId> {
        self.selection.selected()
    }

    pub fn active_id(&self) -> Option<&NodeId> {
        self.selection.active()
    }

    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selection.is_selected(id)
    }

    pub fn is_active(&self, id: &NodeId) -> bool {
        self.selection.is_active(id)
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Rows to draw, in order.
    pub fn rows(&self) -> Vec<TreeRow> {
        self.index
            .rendered(&self.expanded)
            .into_iter()
            .map(|e| TreeRow {
                id: e.id.clone(),
                label: e.label.clone(),
                depth: e.depth,
                has_children: e.has_children(),
                expanded: e.has_children() && self.expanded.contains(&e.id),
                disabled: e.inert,
                selected: self.selection.is_selected(&e.id),
                active: self.selection.is_active(&e.id),
            })
            .collect()
    }

    /// The node that should hold the tab stop when the tree gains focus.
    ///
    /// The active node if it is reachable, otherwise the first enabled node.
    pub fn initial_focus(&self) -> Option<NodeId> {
        self.selection
            .active()
            .filter(|id| self.index.is_visible(id))
            .cloned()
            .or_else(|| self.index.first())
    }

    // -------------------------------------------------------------------------
    // Host updates
    // -------------------------------------------------------------------------

    /// Replace the tree.
    ///
    /// Expansion of nodes that survive with children is kept; new nodes
    /// start with their own `expanded` flag. Selection drops ids that
    /// vanished or became disabled without notifying the listener.
    pub fn set_nodes(&mut self, nodes: Vec<TreeNode>) {
        let flagged = initially_expanded(&nodes);
        let old = std::mem::take(&mut self.index);
        self.roots = nodes;

        let mut index = TreeIndex::new(&self.roots, &HashSet::new());
        self.expanded
            .retain(|id| index.get(id).is_some_and(|e| e.has_children()));
        self.expanded
            .extend(flagged.into_iter().filter(|id| !old.contains(id)));
        index.rebuild_visible(&self.expanded);

        self.index = index;
        self.selection.reconcile(&self.index);
        debug!(
            "TreeView '{}' nodes replaced: {} nodes, {} visible",
            self.config.label,
            self.index.len(),
            self.index.visible_len()
        );
    }

    /// Apply the host's selected ids for this update (`None` = uncontrolled).
    pub fn sync_selected(&mut self, selected: Option<Vec<NodeId>>) {
        self.selection
            .sync_selected(&self.index, selected.map(|ids| ids.into_iter().collect()));
    }

    /// Apply the host's active id for this update (`None` = uncontrolled).
    pub fn sync_active(&mut self, active: Option<NodeId>) {
        self.selection.sync_active(&self.index, active);
    }

    pub fn set_multiselect(&mut self, multiselect: bool) {
        self.config.multiselect = multiselect;
        self.selection.set_multiselect(&self.index, multiselect);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Select a node. See [`SelectionState::toggle_select`].
    ///
    /// Returns whether anything changed.
    pub fn toggle_select(&mut self, id: &NodeId, additive: bool) -> bool {
        let kind = if additive && self.selection.multiselect() {
            SelectKind::Toggle
        } else {
            SelectKind::Replace
        };
        let update = self.selection.toggle_select(&self.index, id, additive);
        self.notify(update, Some(id.clone()), kind)
    }

    /// Add several nodes to the selection. Disabled ids are dropped.
    pub fn select_many<'a>(&mut self, ids: impl IntoIterator<Item = &'a NodeId>) -> bool {
        let update = self.selection.select_many(&self.index, ids);
        self.notify(update, None, SelectKind::Extend)
    }

    /// Add every visible node to the selection.
    pub fn select_all(&mut self) -> bool {
        let ids = self.index.all_visible();
        self.select_many(&ids)
    }

    /// Make a node active.
    pub fn activate(&mut self, id: &NodeId) -> bool {
        let update = self.selection.activate(&self.index, id);
        self.notify(update, Some(id.clone()), SelectKind::Replace)
    }

    fn notify(&mut self, update: SelectionUpdate, node: Option<NodeId>, kind: SelectKind) -> bool {
        if update.selected_changed {
            debug!("Selection changed: {} selected", update.selected.len());
            let meta = SelectMeta {
                node,
                active_node_id: update.active.clone(),
                kind,
            };
            self.listener.on_select(&update.selected, &meta);
        }
        if update.active_changed {
            debug!("Active node changed: {:?}", update.active);
            self.listener.on_activate(update.active.as_ref());
        }
        !update.is_noop()
    }

    // -------------------------------------------------------------------------
    // Expand/Collapse
    // -------------------------------------------------------------------------

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    /// Expand an enabled node with children. Returns whether it changed.
    pub fn expand(&mut self, id: &NodeId) -> bool {
        if !self.index.is_expandable(id) || !self.expanded.insert(id.clone()) {
            return false;
        }
        self.index.rebuild_visible(&self.expanded);
        debug!("Expanded {}", id);
        self.listener.on_toggle(id, true);
        true
    }

    /// Collapse an enabled node with children. Returns whether it changed.
    pub fn collapse(&mut self, id: &NodeId) -> bool {
        if !self.index.is_expandable(id) || !self.expanded.remove(id) {
            return false;
        }
        self.index.rebuild_visible(&self.expanded);
        debug!("Collapsed {}", id);
        self.listener.on_toggle(id, false);
        true
    }

    /// Flip a node's expansion.
    pub fn toggle_expanded(&mut self, id: &NodeId) -> bool {
        if self.expanded.contains(id) {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    /// Expand every enabled node with children. Notifies per node that
    /// changed.
    pub fn expand_all(&mut self) {
        let newly: Vec<NodeId> = self
            .index
            .expandable_ids()
            .filter(|id| !self.expanded.contains(*id))
            .cloned()
            .collect();
        if newly.is_empty() {
            return;
        }
        self.expanded.extend(newly.iter().cloned());
        self.index.rebuild_visible(&self.expanded);
        for id in &newly {
            self.listener.on_toggle(id, true);
        }
    }

    /// Collapse every enabled node. Notifies per node that changed.
    pub fn collapse_all(&mut self) {
        let collapsed: Vec<NodeId> = self
            .expanded
            .iter()
            .filter(|id| self.index.is_expandable(id))
            .cloned()
            .collect();
        if collapsed.is_empty() {
            return;
        }
        for id in &collapsed {
            self.expanded.remove(id);
        }
        self.index.rebuild_visible(&self.expanded);
        for id in &collapsed {
            self.listener.on_toggle(id, false);
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Handle a key press while `focused` holds focus.
    ///
    /// Keys aimed at a node that is not in the tree are ignored entirely.
    pub fn handle_key(&mut self, focused: &NodeId, key: &KeyCombo) -> KeyOutcome {
        if !self.index.contains(focused) {
            trace!("Ignoring key for unknown node {}", focused);
            return KeyOutcome::ignored();
        }
        let Some(intent) = interpret(key, &self.config) else {
            return KeyOutcome::ignored();
        };

        let focus = match intent {
            Intent::FocusNext => self.index.next(focused),
            Intent::FocusPrevious => self.index.previous(focused),
            Intent::FocusFirst { extend } => {
                if extend {
                    let ids = self.index.all_between(focused, Direction::Backward);
                    self.select_many(&ids);
                }
                self.index.first()
            }
            Intent::FocusLast { extend } => {
                if extend {
                    let ids = self.index.all_between(focused, Direction::Forward);
                    self.select_many(&ids);
                }
                self.index.last()
            }
            Intent::SelectAll => {
                self.select_all();
                None
            }
            Intent::Select { additive } => {
                // A non-additive select also activates the node.
                self.toggle_select(focused, additive);
                None
            }
            Intent::CollapseOrParent => {
                if self.expanded.contains(focused) && self.collapse(focused) {
                    None
                } else {
                    self.index.parent_of(focused)
                }
            }
            Intent::ExpandOrChild => {
                let has_children = self.index.get(focused).is_some_and(|e| e.has_children());
                if !has_children {
                    None
                } else if self.expanded.contains(focused) {
                    self.index.first_child_of(focused)
                } else {
                    self.expand(focused);
                    None
                }
            }
        };

        KeyOutcome::consumed(focus.filter(|id| id != focused))
    }

    /// Handle a click on a node.
    ///
    /// Ctrl/Meta-click toggles membership in a multi-selection; a plain click
    /// replaces the selection and activates the node. Clicks on unknown or
    /// disabled nodes are ignored.
    pub fn handle_click(&mut self, event: &PointerEvent) -> KeyOutcome {
        if !self.index.is_enabled(&event.node) {
            trace!("Ignoring click on unavailable node {}", event.node);
            return KeyOutcome::ignored();
        }
        let additive = self.config.multiselect && event.modifiers.toggle_held();
        self.toggle_select(&event.node, additive);
        let focus = Some(event.node.clone()).filter(|id| self.index.is_visible(id));
        KeyOutcome::consumed(focus)
    }
}
