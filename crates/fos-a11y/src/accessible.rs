//! Accessible nodes
//!
//! Accessibles live in an arena owned by [`DocAccessible`](crate::DocAccessible)
//! and refer to their content node and to each other by index.

use fos_dom::{DomTree, NodeId, NodeType};

use crate::AriaRole;

/// Accessible identifier (index into the document's arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccId(pub(crate) u32);

impl AccId {
    /// The document accessible
    pub const DOCUMENT: AccId = AccId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node of the accessible tree
#[derive(Debug, Clone)]
pub struct Accessible {
    pub(crate) id: AccId,
    pub(crate) content: NodeId,
    pub(crate) parent: Option<AccId>,
    /// Container the node was created under, restored when relocation ends
    pub(crate) natural_parent: Option<AccId>,
    pub(crate) role: AriaRole,
    pub(crate) relocated: bool,
    pub(crate) no_binding_kids: bool,
    pub(crate) children: Vec<AccId>,
}

impl Accessible {
    pub(crate) fn new(id: AccId, content: NodeId, parent: Option<AccId>, role: AriaRole) -> Self {
        Self {
            id,
            content,
            parent,
            natural_parent: parent,
            role,
            relocated: false,
            no_binding_kids: false,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> AccId {
        self.id
    }

    /// Content node this accessible was created for
    pub fn content(&self) -> NodeId {
        self.content
    }

    /// Current accessible parent (the owner for relocated nodes)
    pub fn parent(&self) -> Option<AccId> {
        self.parent
    }

    pub fn role(&self) -> AriaRole {
        self.role
    }

    /// True while the node is placed under an owner rather than its
    /// natural container
    pub fn is_relocated(&self) -> bool {
        self.relocated
    }

    pub fn is_doc(&self) -> bool {
        self.id == AccId::DOCUMENT
    }

    /// Binding-generated content is not exposed under this node
    pub fn no_binding_kids(&self) -> bool {
        self.no_binding_kids
    }

    /// Children recorded by the last tree build
    pub fn children(&self) -> &[AccId] {
        &self.children
    }

    /// Whether `node` may become an accessible child of this one
    pub fn is_acceptable_child(&self, tree: &DomTree, node: NodeId) -> bool {
        if self.role.has_presentational_children() {
            return false;
        }
        match tree.get(node) {
            Some(n) => n.node_type() != NodeType::Comment,
            None => false,
        }
    }
}
