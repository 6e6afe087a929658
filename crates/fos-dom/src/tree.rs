//! DOM Tree (arena-based allocation)

use crate::{DomError, Node, NodeFlags, NodeId};

/// Arena-based DOM tree
///
/// Index 0 always holds the document node.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only a document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.get(id).ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.get_mut(id).ok_or(DomError::UnknownNode(id))
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its document node
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.node(parent)?;
        if !parent_node.is_element() && parent != NodeId::ROOT {
            return Err(DomError::NotAnElement(parent));
        }
        let child_node = self.node(child)?;
        if child == NodeId::ROOT || child_node.parent.is_valid() {
            return Err(DomError::AlreadyAttached(child));
        }

        // The child must not be the parent or one of its ancestors
        let mut current = parent;
        while current.is_valid() {
            if current == child {
                return Err(DomError::Cycle { parent, child });
            }
            current = self.node(current)?.parent;
        }
        Ok(())
    }

    /// Append `child` as the last light child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_attachable(parent, child)?;

        let last = self.node(parent)?.last_child;
        {
            let child_node = self.node_mut(child)?;
            child_node.parent = parent;
            child_node.prev_sibling = last;
            child_node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.node_mut(last)?.next_sibling = child;
        }
        let parent_node = self.node_mut(parent)?;
        if !parent_node.first_child.is_valid() {
            parent_node.first_child = child;
        }
        parent_node.last_child = child;
        Ok(())
    }

    /// Attach binding-generated content to `host`
    ///
    /// Anonymous content has `host` as its DOM parent but is not part of the
    /// host's light child list.
    pub fn append_anonymous_child(&mut self, host: NodeId, child: NodeId) -> Result<(), DomError> {
        if !self.node(host)?.is_element() {
            return Err(DomError::NotAnElement(host));
        }
        self.check_attachable(host, child)?;

        let child_node = self.node_mut(child)?;
        child_node.parent = host;
        child_node.flags.insert(NodeFlags::MAY_BE_IN_BINDING);
        self.node_mut(host)?.anonymous_children.push(child);
        Ok(())
    }

    /// Distribute a light child into an insertion point inside binding content
    pub fn distribute(&mut self, child: NodeId, insertion_point: NodeId) -> Result<(), DomError> {
        if !self.node(insertion_point)?.is_element() {
            return Err(DomError::NotAnElement(insertion_point));
        }
        let parent = self.node(child)?.parent;
        if !parent.is_valid() || self.node(parent)?.anonymous_children.contains(&child) {
            return Err(DomError::NotDistributable(child));
        }

        let previous = self.node(child)?.insertion_parent;
        if previous.is_valid() {
            self.node_mut(previous)?.distributed.retain(|&n| n != child);
        }

        let child_node = self.node_mut(child)?;
        child_node.insertion_parent = insertion_point;
        child_node.flags.insert(NodeFlags::MAY_BE_IN_BINDING);
        self.node_mut(insertion_point)?.distributed.push(child);

        tracing::trace!("Distributed {:?} into {:?}", child, insertion_point);
        Ok(())
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.node_mut(node)?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(node))?
            .set_attr(name, value);
        Ok(())
    }

    /// Get an attribute of an element
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node)?.as_element()?.get_attr(name)
    }

    /// Tag name of an element
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.get(node)?.as_element().map(|e| e.tag.as_str())
    }

    pub fn set_flag(&mut self, node: NodeId, flag: NodeFlags) -> Result<(), DomError> {
        self.node_mut(node)?.flags.insert(flag);
        Ok(())
    }

    pub fn has_flag(&self, node: NodeId, flag: NodeFlags) -> bool {
        self.get(node).is_some_and(|n| n.flags.contains(flag))
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(Node::is_element)
    }

    /// DOM parent
    pub fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent.to_option()
    }

    /// Parent in the flattened tree: the insertion point a node is
    /// distributed into, otherwise its DOM parent
    pub fn flattened_parent(&self, node: NodeId) -> Option<NodeId> {
        let n = self.get(node)?;
        n.insertion_parent.to_option().or(n.parent.to_option())
    }

    /// Light children of a node
    pub fn children(&self, node: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(node).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Binding-generated content of a node
    pub fn anonymous_children(&self, node: NodeId) -> &[NodeId] {
        self.get(node)
            .map(|n| n.anonymous_children.as_slice())
            .unwrap_or_default()
    }

    /// Children in the flattened tree
    ///
    /// A host with binding content shows that content; an insertion point
    /// with distributed nodes shows them; everything else shows its light
    /// children.
    pub fn flattened_children(&self, node: NodeId) -> Vec<NodeId> {
        let Some(n) = self.get(node) else {
            return Vec::new();
        };
        if !n.anonymous_children.is_empty() {
            n.anonymous_children.clone()
        } else if !n.distributed.is_empty() {
            n.distributed.clone()
        } else {
            self.children(node).collect()
        }
    }

    /// First element child of the document node
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT).find(|&id| self.is_element(id))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over light children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.to_option()?;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.next_sibling);
        Some(current)
    }
}
