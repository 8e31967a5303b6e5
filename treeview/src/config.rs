//! Tree view configuration.

use serde::Deserialize;

/// Display density. Styling only; navigation and selection ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeSize {
    Xs,
    #[default]
    Sm,
}

/// Modifiers that turn Home/End into "select to start/end".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangeChord {
    /// Shift and Ctrl (or Meta) held together.
    #[default]
    ShiftCtrl,
    /// Shift alone.
    Shift,
}

impl RangeChord {
    /// Whether `modifiers` satisfy this chord.
    pub fn is_held(&self, modifiers: &crate::keys::Modifiers) -> bool {
        match self {
            RangeChord::ShiftCtrl => modifiers.shift && modifiers.toggle_held(),
            RangeChord::Shift => modifiers.shift,
        }
    }
}

/// Per-tree configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TreeViewConfig {
    /// Allow more than one selected node.
    pub multiselect: bool,
    /// Display density token.
    pub size: TreeSize,
    /// Accessible label for the tree.
    pub label: String,
    /// Whether the label is hidden visually (still announced).
    pub hide_label: bool,
    /// Chord for Home/End range selection.
    pub range_chord: RangeChord,
}

impl TreeViewConfig {
    /// Create a config with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Enable or disable multiselect.
    pub fn multiselect(mut self, multiselect: bool) -> Self {
        self.multiselect = multiselect;
        self
    }

    /// Set the size token.
    pub fn size(mut self, size: TreeSize) -> Self {
        self.size = size;
        self
    }

    /// Hide the label visually.
    pub fn hide_label(mut self, hide: bool) -> Self {
        self.hide_label = hide;
        self
    }

    /// Set the Home/End range chord.
    pub fn range_chord(mut self, chord: RangeChord) -> Self {
        self.range_chord = chord;
        self
    }
}
