//! fOS DOM - Document Object Model
//!
//! Arena-based content tree used by the accessibility layer.
//!
//! Besides the plain DOM child list, elements can carry binding-generated
//! (anonymous) content and insertion points that light children are
//! distributed into. The flattened tree is what gets rendered; the light
//! tree is what script sees.

mod node;
mod tree;
mod child_iter;

pub use node::{Node, NodeData, NodeFlags, NodeType, ElementData, Attribute};
pub use tree::{DomTree, Children};
pub use child_iter::{AllChildrenIter, ChildFilter};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this id refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Convert the sentinel into an `Option`
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Node {0:?} is already attached to a parent")]
    AlreadyAttached(NodeId),

    #[error("Inserting {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("Node {0:?} is not a light child and cannot be distributed")]
    NotDistributable(NodeId),
}
