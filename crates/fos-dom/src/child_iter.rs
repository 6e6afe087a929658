//! Child iteration with filtering
//!
//! `AllChildrenIter` walks the children of one container in either
//! direction and can be repositioned at a known child. It is the building
//! block for resumable traversals that keep a stack of these iterators.

use std::ops::BitOr;

use crate::{DomTree, NodeFlags, NodeId};

/// Which children an iterator exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildFilter(u32);

impl ChildFilter {
    /// Flattened children, binding content included
    pub const ALL_CHILDREN: ChildFilter = ChildFilter(0x0);
    /// Light children only, binding content skipped
    pub const ALL_BUT_BINDING: ChildFilter = ChildFilter(0x1);
    /// Skip placeholder content
    pub const SKIP_PLACEHOLDER: ChildFilter = ChildFilter(0x2);

    /// Check if all bits of `other` are set
    pub fn contains(self, other: ChildFilter) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl Default for ChildFilter {
    fn default() -> Self {
        Self::ALL_CHILDREN
    }
}

impl BitOr for ChildFilter {
    type Output = ChildFilter;

    fn bitor(self, rhs: ChildFilter) -> ChildFilter {
        ChildFilter(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    BeforeStart,
    At(usize),
    /// Between a child and its next sibling
    After(usize),
    AfterEnd,
}

/// Bidirectional, seekable iterator over the filtered children of one node
#[derive(Debug, Clone)]
pub struct AllChildrenIter {
    parent: NodeId,
    children: Vec<NodeId>,
    cursor: Cursor,
}

impl AllChildrenIter {
    /// Create an iterator positioned before the first child, or after the
    /// last one when `start_at_beginning` is false
    pub fn new(tree: &DomTree, parent: NodeId, filter: ChildFilter, start_at_beginning: bool) -> Self {
        let candidates = if filter.contains(ChildFilter::ALL_BUT_BINDING) {
            tree.children(parent).collect()
        } else {
            tree.flattened_children(parent)
        };

        let skip_placeholder = filter.contains(ChildFilter::SKIP_PLACEHOLDER);
        let children = candidates
            .into_iter()
            .filter(|&child| !(skip_placeholder && tree.has_flag(child, NodeFlags::PLACEHOLDER)))
            .collect();

        Self {
            parent,
            children,
            cursor: if start_at_beginning { Cursor::BeforeStart } else { Cursor::AfterEnd },
        }
    }

    /// The container being iterated
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// The child the cursor rests on, if any
    pub fn current(&self) -> Option<NodeId> {
        match self.cursor {
            Cursor::At(i) | Cursor::After(i) => self.children.get(i).copied(),
            _ => None,
        }
    }

    /// Advance to the next child
    pub fn next_child(&mut self) -> Option<NodeId> {
        let next = match self.cursor {
            Cursor::BeforeStart => 0,
            Cursor::At(i) | Cursor::After(i) => i + 1,
            Cursor::AfterEnd => return None,
        };

        if next < self.children.len() {
            self.cursor = Cursor::At(next);
            Some(self.children[next])
        } else {
            self.cursor = Cursor::AfterEnd;
            None
        }
    }

    /// Step back to the previous child
    pub fn previous_child(&mut self) -> Option<NodeId> {
        let prev = match self.cursor {
            Cursor::AfterEnd => self.children.len().checked_sub(1),
            Cursor::At(i) => i.checked_sub(1),
            Cursor::After(i) => Some(i),
            Cursor::BeforeStart => return None,
        };

        match prev {
            Some(i) => {
                self.cursor = Cursor::At(i);
                Some(self.children[i])
            }
            None => {
                self.cursor = Cursor::BeforeStart;
                None
            }
        }
    }

    /// Move the cursor forward onto `target`
    ///
    /// Returns false, leaving the cursor past the end, when `target` is not
    /// among the remaining filtered children.
    pub fn seek(&mut self, target: NodeId) -> bool {
        match self.find_forward(target) {
            Some(i) => {
                self.cursor = Cursor::At(i);
                true
            }
            None => {
                self.cursor = Cursor::AfterEnd;
                false
            }
        }
    }

    /// Like [`seek`](Self::seek), but leaves the cursor just past `target`
    /// so that `previous_child` returns `target` itself
    pub fn seek_past(&mut self, target: NodeId) -> bool {
        match self.find_forward(target) {
            Some(i) => {
                self.cursor = Cursor::After(i);
                true
            }
            None => {
                self.cursor = Cursor::AfterEnd;
                false
            }
        }
    }

    fn find_forward(&self, target: NodeId) -> Option<usize> {
        let start = match self.cursor {
            Cursor::BeforeStart => 0,
            Cursor::At(i) | Cursor::After(i) => i,
            Cursor::AfterEnd => self.children.len(),
        };
        self.children[start..]
            .iter()
            .position(|&c| c == target)
            .map(|offset| start + offset)
    }
}
