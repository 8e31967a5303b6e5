//! Key to intent mapping.
//!
//! Stateless: every key press is interpreted on its own, there are no multi
//! key sequences. The [`TreeView`](crate::TreeView) carries out the intent.

use log::trace;

use crate::config::TreeViewConfig;
use crate::keys::{Key, KeyCombo};

/// What a key press asks the tree to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move focus to the next visible node.
    FocusNext,
    /// Move focus to the previous visible node.
    FocusPrevious,
    /// Move focus to the first visible node, optionally selecting everything
    /// from the focused node up to it.
    FocusFirst { extend: bool },
    /// Move focus to the last visible node, optionally selecting everything
    /// from the focused node down to it.
    FocusLast { extend: bool },
    /// Add every visible node to the selection.
    SelectAll,
    /// Select the focused node.
    Select { additive: bool },
    /// Collapse an expanded node, otherwise move to its parent.
    CollapseOrParent,
    /// Expand a collapsed node, otherwise move to its first child.
    ExpandOrChild,
}

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Not a tree key; the host's own handling should run.
    Ignored,
    /// Handled; the host should suppress default behaviour (scrolling).
    Consumed,
}

/// Map a key press to an intent, or `None` for keys the tree does not handle.
pub fn interpret(key: &KeyCombo, config: &TreeViewConfig) -> Option<Intent> {
    let mods = &key.modifiers;
    let intent = match key.key {
        Key::Down if !mods.alt => Intent::FocusNext,
        Key::Up if !mods.alt => Intent::FocusPrevious,
        Key::Home => Intent::FocusFirst {
            extend: config.multiselect && config.range_chord.is_held(mods),
        },
        Key::End => Intent::FocusLast {
            extend: config.multiselect && config.range_chord.is_held(mods),
        },
        Key::Char('a') if mods.toggle_held() && config.multiselect => Intent::SelectAll,
        Key::Enter | Key::Space => Intent::Select {
            additive: config.multiselect && mods.toggle_held(),
        },
        Key::Left if !mods.toggle_held() && !mods.alt => Intent::CollapseOrParent,
        Key::Right if !mods.toggle_held() && !mods.alt => Intent::ExpandOrChild,
        _ => {
            trace!("Unmapped key {:?}", key);
            return None;
        }
    };
    trace!("Key {:?} -> {:?}", key, intent);
    Some(intent)
}
