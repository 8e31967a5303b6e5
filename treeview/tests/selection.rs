use std::collections::HashSet;

use treeview::{NodeId, SelectKind, SelectMeta, TreeNode, TreeView, TreeViewListener};

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

fn set(list: &[&str]) -> HashSet<NodeId> {
    list.iter().map(|s| id(s)).collect()
}

#[derive(Debug, Default)]
struct Recorder {
    selects: Vec<(HashSet<NodeId>, SelectMeta)>,
    activations: Vec<Option<NodeId>>,
}

impl TreeViewListener for Recorder {
    fn on_select(&mut self, selected: &HashSet<NodeId>, meta: &SelectMeta) {
        self.selects.push((selected.clone(), meta.clone()));
    }

    fn on_activate(&mut self, active: Option<&NodeId>) {
        self.activations.push(active.cloned());
    }
}

fn flat(disabled: &[&str]) -> Vec<TreeNode> {
    ["A", "B", "C", "D"]
        .iter()
        .map(|s| TreeNode::new(*s, *s).disabled(disabled.contains(s)))
        .collect()
}

fn tree(multiselect: bool) -> TreeView<Recorder> {
    TreeView::builder(flat(&["D"]))
        .multiselect(multiselect)
        .listener(Recorder::default())
        .build()
}

// ============================================================================
// toggle_select
// ============================================================================

#[test]
fn test_non_additive_select_replaces_and_activates() {
    let mut tree = tree(true);
    assert!(tree.toggle_select(&id("A"), false));
    assert!(tree.toggle_select(&id("B"), false));

    assert_eq!(tree.selected_ids(), &set(&["B"]));
    assert_eq!(tree.active_id(), Some(&id("B")));
}

#[test]
fn test_single_select_sequence() {
    let mut tree = tree(false);
    tree.toggle_select(&id("A"), false);
    tree.toggle_select(&id("B"), false);
    assert_eq!(tree.selected_ids(), &set(&["B"]));
    assert_eq!(tree.active_id(), Some(&id("B")));
}

#[test]
fn test_additive_ignored_without_multiselect() {
    let mut tree = tree(false);
    tree.toggle_select(&id("A"), false);
    tree.toggle_select(&id("B"), true);
    assert_eq!(tree.selected_ids(), &set(&["B"]));
    assert_eq!(tree.active_id(), Some(&id("B")));
}

#[test]
fn test_additive_toggles_membership() {
    let mut tree = tree(true);
    tree.toggle_select(&id("A"), false);
    tree.toggle_select(&id("B"), true);
    assert_eq!(tree.selected_ids(), &set(&["A", "B"]));
    assert_eq!(tree.active_id(), Some(&id("A")));

    tree.toggle_select(&id("A"), true);
    assert_eq!(tree.selected_ids(), &set(&["B"]));
    // Active is not part of multi-select membership.
    assert_eq!(tree.active_id(), Some(&id("A")));
}

#[test]
fn test_disabled_select_is_silent_noop() {
    let mut tree = tree(true);
    assert!(!tree.toggle_select(&id("D"), false));
    assert!(!tree.toggle_select(&id("D"), true));
    assert!(!tree.toggle_select(&id("missing"), false));

    assert!(tree.selected_ids().is_empty());
    assert!(tree.listener().selects.is_empty());
    assert!(tree.listener().activations.is_empty());
}

#[test]
fn test_reselect_same_node_is_noop() {
    let mut tree = tree(false);
    tree.toggle_select(&id("A"), false);
    assert!(!tree.toggle_select(&id("A"), false));
    assert_eq!(tree.listener().selects.len(), 1);
    assert_eq!(tree.listener().activations.len(), 1);
}

// ============================================================================
// Callbacks
// ============================================================================

#[test]
fn test_callbacks_fire_once_per_change() {
    let mut tree = tree(true);
    tree.toggle_select(&id("A"), false);

    let recorder = tree.listener();
    assert_eq!(recorder.selects.len(), 1);
    assert_eq!(recorder.activations, vec![Some(id("A"))]);

    let (selected, meta) = &recorder.selects[0];
    assert_eq!(selected, &set(&["A"]));
    assert_eq!(meta.node, Some(id("A")));
    assert_eq!(meta.active_node_id, Some(id("A")));
    assert_eq!(meta.kind, SelectKind::Replace);
}

#[test]
fn test_additive_toggle_meta() {
    let mut tree = tree(true);
    tree.toggle_select(&id("A"), false);
    tree.toggle_select(&id("C"), true);

    let recorder = tree.listener();
    assert_eq!(recorder.selects.len(), 2);
    assert_eq!(recorder.activations.len(), 1);
    assert_eq!(recorder.selects[1].1.kind, SelectKind::Toggle);
    assert_eq!(recorder.selects[1].0, set(&["A", "C"]));
}

// ============================================================================
// select_many
// ============================================================================

#[test]
fn test_select_many_unions_and_drops_disabled() {
    let mut tree = tree(true);
    tree.toggle_select(&id("A"), false);
    let ids = vec![id("B"), id("D"), id("missing")];
    assert!(tree.select_many(&ids));

    assert_eq!(tree.selected_ids(), &set(&["A", "B"]));
    assert_eq!(tree.active_id(), Some(&id("A")));
    let (_, meta) = tree.listener().selects.last().unwrap();
    assert_eq!(meta.kind, SelectKind::Extend);
    assert_eq!(meta.node, None);
}

#[test]
fn test_select_many_nothing_new_is_noop() {
    let mut tree = tree(true);
    tree.toggle_select(&id("A"), false);
    let ids = vec![id("A"), id("D")];
    assert!(!tree.select_many(&ids));
    assert_eq!(tree.listener().selects.len(), 1);
}

#[test]
fn test_select_many_requires_multiselect() {
    let mut tree = tree(false);
    let ids = vec![id("A"), id("B")];
    assert!(!tree.select_many(&ids));
    assert!(tree.selected_ids().is_empty());
}

#[test]
fn test_select_all_skips_disabled() {
    let mut tree = tree(true);
    assert!(tree.select_all());
    assert_eq!(tree.selected_ids(), &set(&["A", "B", "C"]));
}

// ============================================================================
// activate
// ============================================================================

#[test]
fn test_activate_leaves_selection() {
    let mut tree = tree(true);
    tree.toggle_select(&id("A"), false);
    assert!(tree.activate(&id("C")));
    assert_eq!(tree.selected_ids(), &set(&["A"]));
    assert_eq!(tree.active_id(), Some(&id("C")));
}

#[test]
fn test_activate_is_idempotent() {
    let mut tree = tree(false);
    assert!(tree.activate(&id("B")));
    assert!(!tree.activate(&id("B")));
    assert_eq!(tree.active_id(), Some(&id("B")));
    assert_eq!(tree.listener().activations, vec![Some(id("B"))]);
    assert!(tree.listener().selects.is_empty());
}

#[test]
fn test_activate_disabled_or_absent_ignored() {
    let mut tree = tree(false);
    assert!(!tree.activate(&id("D")));
    assert!(!tree.activate(&id("zzz")));
    assert_eq!(tree.active_id(), None);
}

// ============================================================================
// Seeding
// ============================================================================

#[test]
fn test_seed_drops_disabled() {
    let tree = TreeView::builder(flat(&["B"]))
        .multiselect(true)
        .default_selected(["A", "B"])
        .build();
    assert_eq!(tree.selected_ids(), &set(&["A"]));
}

#[test]
fn test_seed_round_trip() {
    let tree = TreeView::builder(flat(&[]))
        .multiselect(true)
        .default_selected(["A", "B"])
        .default_active("B")
        .build();
    assert_eq!(tree.selected_ids(), &set(&["A", "B"]));
    assert_eq!(tree.active_id(), Some(&id("B")));
    assert!(!tree.selection().is_selection_controlled());
}

#[test]
fn test_seed_single_select_keeps_one() {
    let tree = TreeView::builder(flat(&[]))
        .default_selected(["C", "B"])
        .build();
    // Earliest in tree order wins when nothing is active.
    assert_eq!(tree.selected_ids(), &set(&["B"]));

    let tree = TreeView::builder(flat(&[]))
        .default_selected(["C", "B"])
        .default_active("C")
        .build();
    assert_eq!(tree.selected_ids(), &set(&["C"]));
}

#[test]
fn test_seed_disabled_active_dropped() {
    let tree = TreeView::builder(flat(&["D"])).default_active("D").build();
    assert_eq!(tree.active_id(), None);
}

#[test]
fn test_turning_off_multiselect_trims() {
    let mut tree = tree(true);
    tree.toggle_select(&id("B"), false);
    tree.toggle_select(&id("C"), true);
    tree.set_multiselect(false);
    assert_eq!(tree.selected_ids(), &set(&["B"]));
    assert!(!tree.config().multiselect);
}

#[test]
fn test_set_nodes_drops_newly_disabled() {
    let mut tree = tree(true);
    tree.toggle_select(&id("A"), false);
    tree.toggle_select(&id("B"), true);
    tree.set_nodes(flat(&["A", "D"]));

    assert_eq!(tree.selected_ids(), &set(&["B"]));
    assert_eq!(tree.active_id(), None);
    // Reconciliation is not a user change.
    assert_eq!(tree.listener().selects.len(), 2);
}
