//! Accessible tree walker
//!
//! Produces the accessible children of a context accessible. Natural
//! children come from the content tree, walked through a stack of child
//! iterators so that generic containers without accessibles are looked
//! through. Children relocated elsewhere by aria-owns are hidden from that
//! walk, and the context's own relocated children follow the natural ones.
//!
//! ```text
//! forward:  AtStart -> AtDom -> AtAriaOwns -> AtEnd
//! backward: AtEnd -> AtAriaOwns -> AtDom -> AtStart
//! ```
//!
//! `seek` can re-enter at `AtDom` or `AtAriaOwns`.

use std::ops::BitOr;

use fos_dom::{AllChildrenIter, ChildFilter, NodeFlags, NodeId};

use crate::{AccId, AccessibleFactory, Accessible, DocAccessible};

/// Walker behavior flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkFlags(u32);

impl WalkFlags {
    pub const NONE: WalkFlags = WalkFlags(0);
    /// Only return accessibles that already exist
    pub const WALK_CACHE: WalkFlags = WalkFlags(0x1);
    /// Once the anchor is exhausted, continue with the rest of the
    /// context's content subtree
    pub const WALK_CONTEXT_TREE: WalkFlags = WalkFlags(0x2);

    pub fn contains(self, other: WalkFlags) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for WalkFlags {
    type Output = WalkFlags;

    fn bitor(self, rhs: WalkFlags) -> WalkFlags {
        WalkFlags(self.0 | rhs.0)
    }
}

/// Traversal stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AtStart,
    AtDom,
    AtAriaOwns,
    AtEnd,
}

/// Why a seek failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeekError {
    #[error("Node {0:?} has no element parent")]
    NoElementParent(NodeId),

    #[error("Relocated accessible {child:?} belongs to {owner:?}, not the walker context")]
    ForeignOwner { child: AccId, owner: Option<AccId> },

    #[error("Node {child:?} is not among the filtered children of {parent:?}")]
    NotInParent { child: NodeId, parent: NodeId },

    #[error("Relocated accessible {0:?} is missing from the context's owns list")]
    NotOwned(AccId),
}

enum Climb {
    /// A frame for the new anchor was pushed, positioned at the old one
    Resumed,
    /// The anchor is the context's own content
    ReachedContext,
    /// An ancestor has no element parent
    NoParent,
}

/// Walker over the accessible children of one context accessible
///
/// Accessibles are only created when walking forward without
/// [`WalkFlags::WALK_CACHE`]. The content tree and the owns table must not
/// change while a walker is alive; the borrow of the document enforces it.
pub struct TreeWalker<'a> {
    doc: &'a mut DocAccessible,
    factory: &'a dyn AccessibleFactory,
    context: AccId,
    /// Content node where context-tree climbing stops
    context_node: Option<NodeId>,
    anchor: Option<NodeId>,
    child_filter: ChildFilter,
    flags: WalkFlags,
    phase: Phase,
    aria_owns_idx: usize,
    state_stack: Vec<AllChildrenIter>,
}

impl<'a> TreeWalker<'a> {
    /// Walk all children of `context`
    pub fn new(doc: &'a mut DocAccessible, factory: &'a dyn AccessibleFactory, context: AccId) -> Self {
        let anchor = doc.accessible(context).and_then(|acc| {
            if acc.is_doc() {
                doc.dom().root_element()
            } else {
                Some(acc.content())
            }
        });
        debug_assert!(doc.accessible(context).is_some(), "Unknown walker context {context:?}");

        let child_filter = Self::filter_for(doc.accessible(context));
        Self {
            doc,
            factory,
            context,
            context_node: anchor,
            anchor,
            child_filter,
            flags: WalkFlags::NONE,
            phase: Phase::AtStart,
            aria_owns_idx: 0,
            state_stack: Vec::new(),
        }
    }

    /// Walk the children of `context` found below `anchor`
    ///
    /// `anchor` must be content whose nearest accessible is `context`.
    pub fn with_anchor(
        doc: &'a mut DocAccessible,
        factory: &'a dyn AccessibleFactory,
        context: AccId,
        anchor: NodeId,
        flags: WalkFlags,
    ) -> Self {
        debug_assert_eq!(
            doc.get_accessible_or_container(anchor),
            Some(context),
            "Unexpected anchor node was given"
        );

        let context_node = doc.accessible(context).and_then(|acc| {
            if acc.is_doc() {
                doc.dom().root_element()
            } else {
                Some(acc.content())
            }
        });
        let child_filter = Self::filter_for(doc.accessible(context));
        Self {
            doc,
            factory,
            context,
            context_node,
            anchor: Some(anchor),
            child_filter,
            flags,
            phase: Phase::AtStart,
            aria_owns_idx: 0,
            state_stack: Vec::new(),
        }
    }

    fn filter_for(context: Option<&Accessible>) -> ChildFilter {
        let binding = if context.is_some_and(Accessible::no_binding_kids) {
            ChildFilter::ALL_BUT_BINDING
        } else {
            ChildFilter::ALL_CHILDREN
        };
        ChildFilter::SKIP_PLACEHOLDER | binding
    }

    pub fn context(&self) -> AccId {
        self.context
    }

    /// Content node currently treated as the traversal root
    pub fn anchor(&self) -> Option<NodeId> {
        self.anchor
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flags(&self) -> WalkFlags {
        self.flags
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            tracing::trace!("Walker {:?}: {:?} -> {:?}", self.context, self.phase, phase);
            self.phase = phase;
        }
    }

    /// Parent used to climb from `node`: the DOM parent for binding content
    /// when binding content is filtered out, the flattened parent otherwise
    fn content_parent(&self, node: NodeId) -> Option<NodeId> {
        let dom = self.doc.dom();
        if dom.has_flag(node, NodeFlags::MAY_BE_IN_BINDING)
            && self.child_filter.contains(ChildFilter::ALL_BUT_BINDING)
        {
            dom.parent_node(node)
        } else {
            dom.flattened_parent(node)
        }
    }

    fn element_parent(&self, node: NodeId) -> Option<NodeId> {
        self.content_parent(node)
            .filter(|&parent| self.doc.dom().is_element(parent))
    }

    fn push_state(&mut self, node: NodeId, start_at_beginning: bool) {
        let iter = AllChildrenIter::new(self.doc.dom(), node, self.child_filter, start_at_beginning);
        self.state_stack.push(iter);
    }

    fn is_relocated(&self, acc: AccId) -> bool {
        self.doc.accessible(acc).is_some_and(Accessible::is_relocated)
    }

    /// Reposition so that `next` resumes right after `child_node` and
    /// `prev` returns what ends at it
    pub fn seek(&mut self, child_node: NodeId) -> Result<(), SeekError> {
        let result = self.seek_inner(child_node);
        match &result {
            Ok(()) => tracing::debug!("Walker {:?} seeked to {:?} ({:?})", self.context, child_node, self.phase),
            Err(err) => {
                tracing::warn!("Walker {:?} failed to seek to {:?}: {}", self.context, child_node, err);
                self.state_stack.clear();
                self.set_phase(Phase::AtEnd);
            }
        }
        result
    }

    fn seek_inner(&mut self, target: NodeId) -> Result<(), SeekError> {
        self.phase = Phase::AtStart;
        self.state_stack.clear();
        self.aria_owns_idx = 0;

        let mut child = target;
        loop {
            let parent = self.element_parent(child).ok_or(SeekError::NoElementParent(child))?;

            // Owned by the context: resume inside the owns list
            if let Some(acc) = self.doc.get_accessible(child).filter(|&acc| self.is_relocated(acc)) {
                let owner = self.doc.accessible(acc).and_then(Accessible::parent);
                if owner != Some(self.context) {
                    return Err(SeekError::ForeignOwner { child: acc, owner });
                }

                loop {
                    let Some(owned) = self.doc.aria_owned_at(self.context, self.aria_owns_idx) else {
                        debug_assert!(false, "A relocated child has to be in the owns list");
                        return Err(SeekError::NotOwned(acc));
                    };
                    self.aria_owns_idx += 1;
                    if owned == acc {
                        break;
                    }
                }

                self.state_stack.clear();
                self.set_phase(Phase::AtAriaOwns);
                return Ok(());
            }

            let mut iter = AllChildrenIter::new(self.doc.dom(), parent, self.child_filter, true);
            let found = if child == target {
                iter.seek_past(child)
            } else {
                iter.seek(child)
            };
            self.state_stack.insert(0, iter);
            if !found {
                return Err(SeekError::NotInParent { child, parent });
            }

            if Some(parent) == self.anchor {
                self.set_phase(Phase::AtDom);
                return Ok(());
            }
            child = parent;
        }
    }

    /// Previous accessible child, never creating accessibles
    pub fn prev(&mut self) -> Option<AccId> {
        loop {
            if self.state_stack.is_empty() {
                match self.phase {
                    Phase::AtStart | Phase::AtDom => {
                        self.set_phase(Phase::AtStart);
                        return None;
                    }
                    Phase::AtEnd => {
                        self.aria_owns_idx = self.doc.aria_owned_count(self.context);
                        self.set_phase(Phase::AtAriaOwns);
                    }
                    Phase::AtAriaOwns => {}
                }

                if self.aria_owns_idx > 0 {
                    self.aria_owns_idx -= 1;
                    return self.doc.aria_owned_at(self.context, self.aria_owns_idx);
                }

                let Some(anchor) = self.anchor else {
                    self.set_phase(Phase::AtStart);
                    return None;
                };
                self.set_phase(Phase::AtDom);
                self.push_state(anchor, false);
            }

            if let Some(child) = self.prev_from_stack() {
                return Some(child);
            }

            // Move to content before the anchor within the context subtree
            if !self.flags.contains(WalkFlags::WALK_CONTEXT_TREE) {
                self.set_phase(Phase::AtStart);
                return None;
            }
            match self.climb() {
                Climb::Resumed => {}
                Climb::ReachedContext | Climb::NoParent => {
                    self.set_phase(Phase::AtStart);
                    return None;
                }
            }
        }
    }

    fn next_from_stack(&mut self) -> Option<AccId> {
        while let Some(top) = self.state_stack.last_mut() {
            let Some(child_node) = top.next_child() else {
                self.state_stack.pop();
                continue;
            };

            let mut skip_subtree = false;
            let child = if self.flags.contains(WalkFlags::WALK_CACHE) {
                let cached = self.doc.get_accessible(child_node);
                skip_subtree = cached.is_none() && self.factory.skips_subtree(self.doc, child_node);
                cached
            } else if self.doc.is_acceptable_child(self.context, child_node) {
                let creation = self.factory.get_or_create_accessible(self.doc, child_node, self.context);
                skip_subtree = creation.skip_subtree;
                creation.accessible
            } else {
                None
            };

            // Relocated accessibles surface in the owner's owns phase
            if let Some(child) = child {
                if self.is_relocated(child) {
                    continue;
                }
                return Some(child);
            }

            if !skip_subtree && self.doc.dom().is_element(child_node) {
                self.push_state(child_node, true);
            }
        }
        None
    }

    fn prev_from_stack(&mut self) -> Option<AccId> {
        while let Some(top) = self.state_stack.last_mut() {
            let Some(child_node) = top.previous_child() else {
                self.state_stack.pop();
                continue;
            };

            if let Some(child) = self.doc.get_accessible(child_node) {
                if self.is_relocated(child) {
                    continue;
                }
                return Some(child);
            }

            // Hidden subtrees stay closed in both directions
            if self.doc.dom().is_element(child_node) && !self.factory.skips_subtree(self.doc, child_node) {
                self.push_state(child_node, false);
            }
        }
        None
    }

    /// Make the anchor's parent the new anchor, resuming at the old anchor
    fn climb(&mut self) -> Climb {
        while let Some(anchor) = self.anchor.filter(|&a| Some(a) != self.context_node) {
            let Some(parent) = self.element_parent(anchor) else {
                tracing::warn!("Anchor {:?} of walker {:?} has no element parent", anchor, self.context);
                return Climb::NoParent;
            };

            let mut iter = AllChildrenIter::new(self.doc.dom(), parent, self.child_filter, true);
            self.anchor = Some(parent);
            if iter.seek(anchor) {
                self.state_stack.push(iter);
                return Climb::Resumed;
            }

            // Happens for placeholder content, which no filtered child list
            // contains; keep climbing
            tracing::debug!("Anchor {:?} not found among children of {:?}", anchor, parent);
        }
        Climb::ReachedContext
    }
}

impl Iterator for TreeWalker<'_> {
    type Item = AccId;

    /// Next accessible child in document order, relocated children last
    fn next(&mut self) -> Option<AccId> {
        loop {
            if self.state_stack.is_empty() {
                match self.phase {
                    Phase::AtEnd => return None,
                    Phase::AtDom | Phase::AtAriaOwns => {
                        self.set_phase(Phase::AtAriaOwns);
                        if let Some(child) = self.doc.aria_owned_at(self.context, self.aria_owns_idx) {
                            self.aria_owns_idx += 1;
                            return Some(child);
                        }
                        self.set_phase(Phase::AtEnd);
                        return None;
                    }
                    Phase::AtStart => {
                        let Some(anchor) = self.anchor else {
                            self.set_phase(Phase::AtEnd);
                            return None;
                        };
                        self.set_phase(Phase::AtDom);
                        self.push_state(anchor, true);
                    }
                }
            }

            if let Some(child) = self.next_from_stack() {
                return Some(child);
            }

            // The anchor subtree is exhausted. Without context-tree walking
            // the empty stack leads straight into the owns phase.
            if !self.flags.contains(WalkFlags::WALK_CONTEXT_TREE) {
                continue;
            }
            match self.climb() {
                Climb::Resumed | Climb::ReachedContext => {}
                Climb::NoParent => {
                    self.set_phase(Phase::AtEnd);
                    return None;
                }
            }
        }
    }
}
