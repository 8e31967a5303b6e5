//! Demo state: one tree, the focused node and a status line.

use std::collections::HashSet;

use log::info;
use treeview::{
    Key, KeyCombo, Modifiers, NodeId, PointerEvent, SelectMeta, TreeView, TreeViewListener,
};

use crate::document::Document;

/// Startup options from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Force multiselect on regardless of the document.
    pub multiselect: bool,
    /// Own the selection in the demo and echo it back after every change.
    pub controlled: bool,
}

/// Records changes for the status line.
#[derive(Debug, Default)]
pub struct StatusListener {
    pub message: String,
    pending: Option<HashSet<NodeId>>,
}

impl TreeViewListener for StatusListener {
    fn on_select(&mut self, selected: &HashSet<NodeId>, meta: &SelectMeta) {
        info!("Selection {:?}: {} selected", meta.kind, selected.len());
        self.message = format!("{} selected ({:?})", selected.len(), meta.kind);
        self.pending = Some(selected.clone());
    }

    fn on_activate(&mut self, active: Option<&NodeId>) {
        info!("Active: {:?}", active);
        if let Some(id) = active {
            self.message = format!("active: {}", id);
        }
    }

    fn on_toggle(&mut self, node: &NodeId, expanded: bool) {
        let verb = if expanded { "expanded" } else { "collapsed" };
        info!("{} {}", verb, node);
        self.message = format!("{} {}", verb, node);
    }
}

pub struct App {
    pub tree: TreeView<StatusListener>,
    pub focus: Option<NodeId>,
    pub scroll: usize,
    pub quit: bool,
    controlled: bool,
}

impl App {
    pub fn new(document: Document, options: Options) -> Self {
        let mut config = document.config;
        config.multiselect |= options.multiselect;

        let builder = TreeView::builder(document.nodes).config(config);
        let builder = if options.controlled {
            builder.selected(document.selected)
        } else {
            builder.default_selected(document.selected)
        };
        let builder = match document.active {
            Some(active) => builder.default_active(active),
            None => builder,
        };
        let tree = builder.listener(StatusListener::default()).build();
        let focus = tree.initial_focus();

        Self {
            tree,
            focus,
            scroll: 0,
            quit: false,
            controlled: options.controlled,
        }
    }

    /// Handle a key press on the focused node.
    pub fn handle_key(&mut self, combo: KeyCombo) {
        let Some(focused) = self.focus.clone() else {
            self.handle_unclaimed(combo);
            return;
        };

        let outcome = self.tree.handle_key(&focused, &combo);
        if outcome.is_consumed() {
            if let Some(next) = outcome.focus {
                self.focus = Some(next);
            }
        } else {
            self.handle_unclaimed(combo);
        }
        self.after_event();
    }

    /// Handle a click on the node drawn at `row` (0 = first row).
    pub fn handle_click(&mut self, row: usize, modifiers: Modifiers) {
        let Some(node) = self.tree.rows().get(row).map(|r| r.id.clone()) else {
            return;
        };
        let outcome = self.tree.handle_click(&PointerEvent::new(node, modifiers));
        if let Some(next) = outcome.focus {
            self.focus = Some(next);
        }
        self.after_event();
    }

    /// Demo keys the tree does not claim.
    fn handle_unclaimed(&mut self, combo: KeyCombo) {
        match combo.key {
            Key::Char('q') | Key::Escape => self.quit = true,
            Key::Char('c') if combo.modifiers.ctrl => self.quit = true,
            Key::Char('*') => self.tree.expand_all(),
            Key::Char('-') => self.tree.collapse_all(),
            _ => {}
        }
    }

    fn after_event(&mut self) {
        if self.controlled {
            if let Some(next) = self.tree.listener_mut().pending.take() {
                self.tree.sync_selected(Some(next.into_iter().collect()));
            }
        }
        self.repair_focus();
    }

    /// Move focus off nodes that collapsing hid, to the nearest visible
    /// ancestor.
    fn repair_focus(&mut self) {
        let index = self.tree.index();
        let mut focus = self.focus.take();
        while let Some(id) = focus.as_ref() {
            if index.is_visible(id) {
                break;
            }
            focus = index.parent(id).map(|e| e.id.clone());
        }
        self.focus = focus.or_else(|| self.tree.initial_focus());
    }

    /// Row index of the focused node among the drawn rows.
    pub fn focus_row(&self) -> Option<usize> {
        let focus = self.focus.as_ref()?;
        self.tree.rows().iter().position(|r| &r.id == focus)
    }

    /// Keep the focused row inside a viewport of `height` rows.
    pub fn scroll_to_focus(&mut self, height: usize) {
        let Some(row) = self.focus_row() else { return };
        if height == 0 {
            return;
        }
        if row < self.scroll {
            self.scroll = row;
        } else if row >= self.scroll + height {
            self.scroll = row + 1 - height;
        }
    }
}
