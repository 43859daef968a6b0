//! fxlayout DOM
//!
//! Arena-backed element tree that layout directives read from and write
//! their inline styles into. Only the parts of the DOM the directives
//! touch are modelled: attributes, class list, inline style, a stand-in
//! for cascaded styles, and child-list mutation records.

mod node;
mod tree;
mod style_attr;
mod mutation;

pub use node::{Node, NodeData, ElementData, Attribute, user_agent_default};
pub use tree::{DomTree, Children};
pub use style_attr::{InlineStyle, parse_style_attribute};
pub use mutation::MutationRecord;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID points at a node
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

/// DOM manipulation error
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("Invalid node: {0:?}")]
    InvalidNode(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Cannot insert {child:?} into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}
