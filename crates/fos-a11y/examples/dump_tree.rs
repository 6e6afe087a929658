//! Example: build a small document and print its accessible tree
//!
//! Run with `RUST_LOG=fos_a11y=trace` to watch the walker phases.

use anyhow::Result;
use fos_a11y::{AccService, AccessibilityTree, DocAccessible, TreeWalker, WalkFlags};
use fos_dom::{DomTree, NodeId};
use tracing_subscriber::EnvFilter;

fn element(dom: &mut DomTree, parent: NodeId, tag: &str) -> Result<NodeId> {
    let node = dom.create_element(tag);
    dom.append_child(parent, node)?;
    Ok(node)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut dom = DomTree::new();
    let root = dom.root();
    let body = element(&mut dom, root, "body")?;
    let nav = element(&mut dom, body, "nav")?;
    let menu = element(&mut dom, nav, "ul")?;
    for label in ["Home", "Docs"] {
        let item = element(&mut dom, menu, "li")?;
        let text = dom.create_text(label);
        dom.append_child(item, text)?;
    }
    let aside = element(&mut dom, body, "aside")?;
    let extra = element(&mut dom, aside, "li")?;
    let text = dom.create_text("About");
    dom.append_child(extra, text)?;

    let mut doc = DocAccessible::new(dom);
    let service = AccService::default();
    AccessibilityTree::build(&mut doc, &service);

    // Move the stray item into the navigation list
    let list = doc.get_accessible(menu).ok_or_else(|| anyhow::anyhow!("list has no accessible"))?;
    let stray = doc.get_accessible(extra).ok_or_else(|| anyhow::anyhow!("item has no accessible"))?;
    doc.set_aria_owns(list, vec![stray])?;

    let tree = AccessibilityTree::build(&mut doc, &service);
    for node in tree.nodes() {
        let marker = if node.relocated { " (owned)" } else { "" };
        println!("{}{:?} {:?}{}", "  ".repeat(node.depth), node.id, node.role, marker);
    }

    // Resume after the first item, reading only what already exists
    let first = doc.accessible(list).and_then(|acc| acc.children().first().copied());
    if let Some(first) = first.and_then(|id| doc.accessible(id)).map(|acc| acc.content()) {
        let mut walker = TreeWalker::with_anchor(&mut doc, &service, list, menu, WalkFlags::WALK_CACHE);
        walker.seek(first)?;
        let rest: Vec<_> = walker.collect();
        println!("after the first item: {:?}", rest);
    }

    Ok(())
}
