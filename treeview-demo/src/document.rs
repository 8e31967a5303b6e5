//! Tree documents loaded from disk.

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;
use treeview::{NodeId, TreeNode, TreeViewConfig, validate};

use crate::error::DemoError;

/// A tree plus the state to start from.
///
/// ```json
/// {
///   "config": { "multiselect": true, "label": "Files" },
///   "nodes": [{ "id": "src", "label": "src", "children": [...] }],
///   "selected": ["src"],
///   "active": "src"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Document {
    pub config: TreeViewConfig,
    pub nodes: Vec<TreeNode>,
    pub selected: Vec<NodeId>,
    pub active: Option<NodeId>,
}

impl Document {
    /// Parse a document from JSON text and validate its ids.
    pub fn parse(text: &str, path: &Path) -> Result<Self, DemoError> {
        let document: Document =
            serde_json::from_str(text).map_err(|source| DemoError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        validate(&document.nodes)?;
        Ok(document)
    }

    /// Read and parse a document file.
    pub fn load(path: &Path) -> Result<Self, DemoError> {
        let text = fs::read_to_string(path)?;
        let document = Self::parse(&text, path)?;
        info!(
            "Loaded '{}': {} root nodes",
            path.display(),
            document.nodes.len()
        );
        Ok(document)
    }
}
