//! Tree model errors.

use thiserror::Error;

use crate::node::NodeId;

/// Problems found when validating a host-supplied tree.
///
/// The view never returns these at runtime; malformed input is tolerated with
/// bounded traversal. Hosts that want to reject bad input call
/// [`validate`](crate::validate) up front.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Two nodes share the same id.
    #[error("duplicate node id '{id}' (depth {depth})")]
    DuplicateId {
        /// The repeated id.
        id: NodeId,
        /// Depth of the second occurrence.
        depth: usize,
    },

    /// A node has an empty string id.
    #[error("node at depth {depth} has an empty id")]
    EmptyId {
        /// Depth of the offending node.
        depth: usize,
    },
}
