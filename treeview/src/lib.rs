//! Headless tree view.
//!
//! `treeview` implements the behaviour of an interactive tree without drawing
//! anything: keyboard navigation over the visible nodes, expand/collapse,
//! single and multiple selection, and an active node. The host supplies the
//! tree, feeds in key and pointer events, moves focus where told, and draws
//! [`TreeView::rows`].
//!
//! Selection and activation can each be owned by the component or controlled
//! by the host; see [`Controllable`].

pub mod config;
pub mod controlled;
pub mod error;
pub mod index;
pub mod interpreter;
pub mod keys;
pub mod listener;
pub mod node;
pub mod selection;
pub mod traversal;
pub mod view;

pub use config::{RangeChord, TreeSize, TreeViewConfig};
pub use controlled::Controllable;
pub use error::TreeError;
pub use index::{IndexEntry, TreeIndex, validate};
pub use interpreter::{EventResult, Intent, interpret};
pub use keys::{Key, KeyCombo, Modifiers, PointerEvent, convert_key_event, convert_modifiers};
pub use listener::{SelectMeta, TreeViewListener};
pub use node::{NodeId, TreeNode};
pub use selection::{SelectKind, SelectionState, SelectionUpdate};
pub use traversal::Direction;
pub use view::{KeyOutcome, TreeRow, TreeView, TreeViewBuilder};
