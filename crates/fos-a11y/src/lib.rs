//! fOS Accessibility
//!
//! Accessible tree construction for the fOS browser engine.
//!
//! Features:
//! - ARIA roles and implicit roles of HTML elements
//! - Accessible document with aria-owns relocation
//! - On-demand accessible creation
//! - Resumable, bidirectional child walker
//! - Accessibility tree snapshots

pub mod aria;
pub mod accessible;
pub mod document;
pub mod service;
pub mod tree_walker;
pub mod tree;

pub use aria::AriaRole;
pub use accessible::{AccId, Accessible};
pub use document::DocAccessible;
pub use service::{AccService, AccessibleFactory, Creation, ServiceConfig};
pub use tree_walker::{Phase, SeekError, TreeWalker, WalkFlags};
pub use tree::{AccessibilityTree, AccessibilityNode};

use fos_dom::NodeId;

/// Accessibility error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum A11yError {
    #[error("Unknown content node {0:?}")]
    UnknownNode(NodeId),

    #[error("Unknown accessible {0:?}")]
    UnknownAccessible(AccId),

    #[error("Content node {0:?} already has an accessible")]
    AlreadyBound(NodeId),

    #[error("{owner:?} cannot own {child:?}: it would create a cycle")]
    OwnsCycle { owner: AccId, child: AccId },

    #[error("{child:?} is already owned, cannot relocate it under {owner:?}")]
    AlreadyOwned { owner: AccId, child: AccId },
}
