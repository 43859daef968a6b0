//! Child-list mutation records

use crate::NodeId;

/// A child-list change on an observed element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// Element whose children changed
    pub target: NodeId,
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
}

impl MutationRecord {
    /// Whether any child was added or removed
    pub fn changes_children(&self) -> bool {
        !self.added_nodes.is_empty() || !self.removed_nodes.is_empty()
    }
}
