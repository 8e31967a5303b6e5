use std::collections::HashSet;

use treeview::{Controllable, Key, KeyCombo, NodeId, SelectMeta, TreeNode, TreeView, TreeViewListener};

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

fn set(list: &[&str]) -> HashSet<NodeId> {
    list.iter().map(|s| id(s)).collect()
}

#[derive(Debug, Default)]
struct Host {
    reported: Vec<HashSet<NodeId>>,
    activated: Vec<Option<NodeId>>,
}

impl TreeViewListener for Host {
    fn on_select(&mut self, selected: &HashSet<NodeId>, _meta: &SelectMeta) {
        self.reported.push(selected.clone());
    }

    fn on_activate(&mut self, active: Option<&NodeId>) {
        self.activated.push(active.cloned());
    }
}

fn nodes() -> Vec<TreeNode> {
    vec![
        TreeNode::new("A", "A"),
        TreeNode::new("B", "B"),
        TreeNode::new("C", "C"),
        TreeNode::new("D", "D").disabled(true),
    ]
}

// ============================================================================
// Controllable
// ============================================================================

#[test]
fn test_uncontrolled_set_retained() {
    let mut value = Controllable::uncontrolled(1);
    assert!(!value.is_controlled());
    assert!(value.set(2));
    assert_eq!(*value.get(), 2);
}

#[test]
fn test_controlled_set_not_retained() {
    let mut value = Controllable::controlled(1);
    assert!(value.is_controlled());
    assert!(!value.set(2));
    assert_eq!(*value.get(), 1);
}

#[test]
fn test_sync_external_replaces() {
    let mut value = Controllable::uncontrolled(vec![1, 2]);
    value.sync(Some(vec![9]));
    assert_eq!(value.get(), &vec![9]);
}

#[test]
fn test_sync_none_continues_from_last_external() {
    let mut value = Controllable::controlled(5);
    value.set(6);
    value.sync(None);
    assert!(!value.is_controlled());
    assert_eq!(*value.get(), 5);
    assert!(value.set(7));
    assert_eq!(*value.get(), 7);
}

#[test]
fn test_default_is_uncontrolled() {
    let value: Controllable<Option<u8>> = Controllable::default();
    assert!(!value.is_controlled());
    assert_eq!(*value.get(), None);
}

// ============================================================================
// Controlled selection
// ============================================================================

#[test]
fn test_controlled_selection_reports_but_keeps_external() {
    let mut tree = TreeView::builder(nodes())
        .multiselect(true)
        .selected(["A"])
        .listener(Host::default())
        .build();

    assert!(tree.toggle_select(&id("B"), true));
    assert_eq!(tree.listener().reported, vec![set(&["A", "B"])]);
    // Nothing changes until the host echoes the value back.
    assert_eq!(tree.selected_ids(), &set(&["A"]));

    tree.sync_selected(Some(vec![id("A"), id("B")]));
    assert_eq!(tree.selected_ids(), &set(&["A", "B"]));
}

#[test]
fn test_host_value_overwrites_internal() {
    let mut tree = TreeView::builder(nodes())
        .multiselect(true)
        .default_selected(["A", "B"])
        .build();
    tree.sync_selected(Some(vec![id("C")]));
    assert_eq!(tree.selected_ids(), &set(&["C"]));
    assert!(tree.selection().is_selection_controlled());
}

#[test]
fn test_controlled_selection_drops_disabled() {
    let tree = TreeView::builder(nodes())
        .multiselect(true)
        .selected(["A", "D", "nope"])
        .build();
    assert_eq!(tree.selected_ids(), &set(&["A"]));
}

#[test]
fn test_controlled_to_uncontrolled() {
    let mut tree = TreeView::builder(nodes())
        .multiselect(true)
        .selected(["B"])
        .build();
    tree.sync_selected(None);
    assert!(!tree.selection().is_selection_controlled());
    assert_eq!(tree.selected_ids(), &set(&["B"]));

    tree.toggle_select(&id("C"), true);
    assert_eq!(tree.selected_ids(), &set(&["B", "C"]));
}

#[test]
fn test_controlled_select_all_reports_next_set() {
    let mut tree = TreeView::builder(nodes())
        .multiselect(true)
        .selected(Vec::<NodeId>::new())
        .listener(Host::default())
        .build();

    let outcome = tree.handle_key(&id("A"), &KeyCombo::key(Key::Char('a')).ctrl());
    assert!(outcome.is_consumed());
    assert_eq!(tree.listener().reported, vec![set(&["A", "B", "C"])]);
    assert!(tree.selected_ids().is_empty());
}

// ============================================================================
// Controlled activation
// ============================================================================

#[test]
fn test_controlled_active_reports_once() {
    let mut tree = TreeView::builder(nodes())
        .active("A")
        .listener(Host::default())
        .build();

    tree.handle_key(&id("B"), &KeyCombo::key(Key::Enter));
    assert_eq!(tree.listener().activated, vec![Some(id("B"))]);
    assert_eq!(tree.active_id(), Some(&id("A")));
    // Selection is still component-owned.
    assert_eq!(tree.selected_ids(), &set(&["B"]));

    tree.sync_active(Some(id("B")));
    assert_eq!(tree.active_id(), Some(&id("B")));
}

#[test]
fn test_controlled_active_disabled_dropped() {
    let tree = TreeView::builder(nodes()).active("D").build();
    assert_eq!(tree.active_id(), None);
    assert!(tree.selection().is_activation_controlled());
}

#[test]
fn test_independent_ownership() {
    let tree = TreeView::builder(nodes())
        .selected(["A"])
        .default_active("B")
        .build();
    assert!(tree.selection().is_selection_controlled());
    assert!(!tree.selection().is_activation_controlled());
}
