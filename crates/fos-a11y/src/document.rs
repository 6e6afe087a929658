//! Document accessible
//!
//! Owns the content tree, the accessible arena, the content-to-accessible
//! cache and the aria-owns relocation table.

use std::collections::HashMap;

use fos_dom::{DomTree, NodeId};

use crate::{AccId, A11yError, Accessible, AriaRole};

/// Accessible document
#[derive(Debug)]
pub struct DocAccessible {
    dom: DomTree,
    accessibles: Vec<Accessible>,
    cache: HashMap<NodeId, AccId>,
    /// Owner -> ordered list of accessibles relocated under it
    aria_owns: HashMap<AccId, Vec<AccId>>,
}

impl DocAccessible {
    /// Create a document accessible bound to the tree's document node
    pub fn new(dom: DomTree) -> Self {
        let root = dom.root();
        let doc = Accessible::new(AccId::DOCUMENT, root, None, AriaRole::Document);

        let mut cache = HashMap::new();
        cache.insert(root, AccId::DOCUMENT);

        Self {
            dom,
            accessibles: vec![doc],
            cache,
            aria_owns: HashMap::new(),
        }
    }

    /// The document accessible itself
    pub fn document(&self) -> AccId {
        AccId::DOCUMENT
    }

    pub fn dom(&self) -> &DomTree {
        &self.dom
    }

    /// Mutable access to the content tree
    ///
    /// Walkers must not be alive across mutations.
    pub fn dom_mut(&mut self) -> &mut DomTree {
        &mut self.dom
    }

    pub fn accessible(&self, id: AccId) -> Option<&Accessible> {
        self.accessibles.get(id.index())
    }

    fn accessible_mut(&mut self, id: AccId) -> Result<&mut Accessible, A11yError> {
        self.accessibles
            .get_mut(id.index())
            .ok_or(A11yError::UnknownAccessible(id))
    }

    /// Number of accessibles, the document included
    pub fn len(&self) -> usize {
        self.accessibles.len()
    }

    /// A document always holds its own accessible
    pub fn is_empty(&self) -> bool {
        self.accessibles.is_empty()
    }

    /// Cache-only lookup
    pub fn get_accessible(&self, node: NodeId) -> Option<AccId> {
        self.cache.get(&node).copied()
    }

    /// Accessible of `node`, or of its nearest ancestor that has one
    pub fn get_accessible_or_container(&self, node: NodeId) -> Option<AccId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(acc) = self.get_accessible(n) {
                return Some(acc);
            }
            current = self.dom.flattened_parent(n);
        }
        None
    }

    /// Create and cache an accessible for `node` under `parent`
    pub fn bind(&mut self, node: NodeId, parent: AccId, role: AriaRole) -> Result<AccId, A11yError> {
        if self.dom.get(node).is_none() {
            return Err(A11yError::UnknownNode(node));
        }
        if self.accessible(parent).is_none() {
            return Err(A11yError::UnknownAccessible(parent));
        }
        if self.cache.contains_key(&node) {
            return Err(A11yError::AlreadyBound(node));
        }

        let id = AccId(self.accessibles.len() as u32);
        self.accessibles.push(Accessible::new(id, node, Some(parent), role));
        self.cache.insert(node, id);

        tracing::trace!("Bound {:?} to {:?} ({:?}) under {:?}", node, id, role, parent);
        Ok(id)
    }

    /// Stop exposing binding-generated content under `id`
    pub fn set_no_binding_kids(&mut self, id: AccId, value: bool) -> Result<(), A11yError> {
        self.accessible_mut(id)?.no_binding_kids = value;
        Ok(())
    }

    /// Replace the ordered list of accessibles relocated under `owner`
    ///
    /// Accessibles dropped from the previous list go back to their natural
    /// container. Owning the document, the owner itself, one of its
    /// ancestors, or a node already relocated under another owner fails
    /// without changing anything.
    pub fn set_aria_owns(&mut self, owner: AccId, owned: Vec<AccId>) -> Result<(), A11yError> {
        if self.accessible(owner).is_none() {
            return Err(A11yError::UnknownAccessible(owner));
        }

        for (i, &child) in owned.iter().enumerate() {
            let acc = self.accessible(child).ok_or(A11yError::UnknownAccessible(child))?;
            if acc.is_doc() || self.is_ancestor_or_self(child, owner) {
                return Err(A11yError::OwnsCycle { owner, child });
            }
            let elsewhere = acc.relocated && acc.parent != Some(owner);
            if elsewhere || owned[..i].contains(&child) {
                return Err(A11yError::AlreadyOwned { owner, child });
            }
        }

        let previous = self.aria_owns.remove(&owner).unwrap_or_default();
        for child in previous.into_iter().filter(|c| !owned.contains(c)) {
            let acc = self.accessible_mut(child)?;
            acc.relocated = false;
            acc.parent = acc.natural_parent;
        }

        for &child in &owned {
            let acc = self.accessible_mut(child)?;
            acc.relocated = true;
            acc.parent = Some(owner);
        }

        tracing::debug!("{:?} now owns {} accessibles", owner, owned.len());
        if !owned.is_empty() {
            self.aria_owns.insert(owner, owned);
        }
        Ok(())
    }

    fn is_ancestor_or_self(&self, candidate: AccId, of: AccId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.accessible(id).and_then(Accessible::parent);
        }
        false
    }

    /// Number of accessibles relocated under `owner`
    pub fn aria_owned_count(&self, owner: AccId) -> usize {
        self.aria_owns.get(&owner).map_or(0, Vec::len)
    }

    /// Accessible at `index` in the owner's relocation list
    pub fn aria_owned_at(&self, owner: AccId, index: usize) -> Option<AccId> {
        self.aria_owns.get(&owner)?.get(index).copied()
    }

    /// Whether `context` accepts `node` as a candidate child
    pub fn is_acceptable_child(&self, context: AccId, node: NodeId) -> bool {
        self.accessible(context)
            .is_some_and(|acc| acc.is_acceptable_child(&self.dom, node))
    }

    pub(crate) fn set_children(&mut self, id: AccId, children: Vec<AccId>) -> Result<(), A11yError> {
        self.accessible_mut(id)?.children = children;
        Ok(())
    }
}
