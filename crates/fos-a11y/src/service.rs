//! Accessibility service
//!
//! Decides which content nodes get accessibles and creates them on demand.

use fos_dom::{NodeData, NodeId};

use crate::{AccId, AriaRole, DocAccessible};

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Treat `aria-hidden="true"` subtrees as absent
    pub honor_aria_hidden: bool,

    /// Create text leaf accessibles for non-whitespace text
    pub expose_text_leaves: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            honor_aria_hidden: true,
            expose_text_leaves: true,
        }
    }
}

/// Outcome of asking a factory for an accessible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Creation {
    pub accessible: Option<AccId>,
    /// The node and everything below it must not be exposed
    pub skip_subtree: bool,
}

impl Creation {
    fn found(acc: AccId) -> Self {
        Self { accessible: Some(acc), skip_subtree: false }
    }

    fn skip() -> Self {
        Self { accessible: None, skip_subtree: true }
    }
}

/// Source of accessibles for content nodes
pub trait AccessibleFactory {
    /// Return the cached accessible of `node` or create one under
    /// `context`
    fn get_or_create_accessible(&self, doc: &mut DocAccessible, node: NodeId, context: AccId) -> Creation;

    /// Whether `node` and its subtree are never exposed, without creating
    /// anything
    fn skips_subtree(&self, doc: &DocAccessible, node: NodeId) -> bool;
}

enum Verdict {
    Create(AriaRole),
    Descend,
    Skip,
}

/// Default factory driven by roles and `hidden` state
#[derive(Debug, Clone, Default)]
pub struct AccService {
    config: ServiceConfig,
}

impl AccService {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn classify(&self, doc: &DocAccessible, node: NodeId) -> Verdict {
        let Some(n) = doc.dom().get(node) else {
            return Verdict::Descend;
        };

        match &n.data {
            NodeData::Text(text) if self.config.expose_text_leaves && !text.trim().is_empty() => {
                Verdict::Create(AriaRole::Text)
            }
            NodeData::Element(elem) => {
                let aria_hidden = elem.get_attr("aria-hidden") == Some("true");
                if elem.get_attr("hidden").is_some() || (self.config.honor_aria_hidden && aria_hidden) {
                    return Verdict::Skip;
                }
                let role = elem.get_attr("role")
                    .and_then(AriaRole::parse)
                    .or_else(|| AriaRole::from_tag(&elem.tag));
                match role {
                    Some(role) if role != AriaRole::Presentation => Verdict::Create(role),
                    _ => Verdict::Descend,
                }
            }
            _ => Verdict::Descend,
        }
    }
}

impl AccessibleFactory for AccService {
    fn get_or_create_accessible(&self, doc: &mut DocAccessible, node: NodeId, context: AccId) -> Creation {
        if let Some(acc) = doc.get_accessible(node) {
            return Creation::found(acc);
        }

        match self.classify(doc, node) {
            Verdict::Create(role) => match doc.bind(node, context, role) {
                Ok(acc) => Creation::found(acc),
                Err(err) => {
                    tracing::warn!("Failed to create accessible for {:?}: {}", node, err);
                    Creation::default()
                }
            },
            Verdict::Descend => Creation::default(),
            Verdict::Skip => Creation::skip(),
        }
    }

    fn skips_subtree(&self, doc: &DocAccessible, node: NodeId) -> bool {
        matches!(self.classify(doc, node), Verdict::Skip)
    }
}
