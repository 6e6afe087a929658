//! Accessibility Tree
//!
//! Snapshot of the whole accessible tree, built by walking the children of
//! every accessible starting at the document.

use std::collections::HashSet;

use crate::{AccId, AccessibleFactory, AriaRole, DocAccessible, TreeWalker};

/// Accessibility node as seen in a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibilityNode {
    pub id: AccId,
    pub role: AriaRole,
    pub parent: Option<AccId>,
    pub depth: usize,
    /// Placed here by aria-owns rather than by content order
    pub relocated: bool,
}

/// Accessibility tree in preorder
#[derive(Debug, Default)]
pub struct AccessibilityTree {
    nodes: Vec<AccessibilityNode>,
}

impl AccessibilityTree {
    /// Walk the document, creating accessibles as needed, and record every
    /// accessible's children on the document
    pub fn build(doc: &mut DocAccessible, factory: &dyn AccessibleFactory) -> Self {
        let mut tree = Self::default();
        let mut visited = HashSet::new();
        let root = doc.document();

        tree.nodes.push(AccessibilityNode {
            id: root,
            role: AriaRole::Document,
            parent: None,
            depth: 0,
            relocated: false,
        });
        visited.insert(root);
        tree.build_children(doc, factory, root, 1, &mut visited);

        tracing::debug!("Built accessibility tree: {} nodes", tree.nodes.len());
        tree
    }

    fn build_children(
        &mut self,
        doc: &mut DocAccessible,
        factory: &dyn AccessibleFactory,
        parent: AccId,
        depth: usize,
        visited: &mut HashSet<AccId>,
    ) {
        let children: Vec<AccId> = TreeWalker::new(doc, factory, parent).collect();
        if let Err(err) = doc.set_children(parent, children.clone()) {
            tracing::warn!("Could not record children of {:?}: {}", parent, err);
        }

        for child in children {
            if !visited.insert(child) {
                tracing::warn!("{:?} reached twice while building the tree", child);
                continue;
            }
            let Some(acc) = doc.accessible(child) else {
                continue;
            };
            self.nodes.push(AccessibilityNode {
                id: child,
                role: acc.role(),
                parent: Some(parent),
                depth,
                relocated: acc.is_relocated(),
            });
            self.build_children(doc, factory, child, depth + 1, visited);
        }
    }

    /// Nodes in preorder
    pub fn nodes(&self) -> &[AccessibilityNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get node by ID
    pub fn get_node(&self, id: AccId) -> Option<&AccessibilityNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Children of `id` in order
    pub fn children_of(&self, id: AccId) -> Vec<AccId> {
        self.nodes.iter()
            .filter(|n| n.parent == Some(id))
            .map(|n| n.id)
            .collect()
    }

    /// Get all landmarks
    pub fn get_landmarks(&self) -> Vec<&AccessibilityNode> {
        self.nodes.iter().filter(|n| n.role.is_landmark()).collect()
    }

    /// Get tree depth of a node
    pub fn get_depth(&self, id: AccId) -> Option<usize> {
        self.get_node(id).map(|n| n.depth)
    }
}
