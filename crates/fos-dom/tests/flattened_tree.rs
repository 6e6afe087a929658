//! Flattened tree tests for fos-dom
//!
//! Binding content, distribution and filtered child iteration together.

use fos_dom::{AllChildrenIter, ChildFilter, DomError, DomTree, NodeFlags, NodeId};

/// ```text
/// body
///   x-tabs (host)
///     light: tab1, tab2(placeholder), tab3
///     binding: header > point(tab1, tab3), footer
/// ```
struct Widget {
    tree: DomTree,
    host: NodeId,
    tabs: [NodeId; 3],
    header: NodeId,
    point: NodeId,
    footer: NodeId,
}

fn widget() -> Widget {
    let mut tree = DomTree::new();
    let body = tree.create_element("body");
    tree.append_child(tree.root(), body).unwrap();
    let host = tree.create_element("x-tabs");
    tree.append_child(body, host).unwrap();

    let tabs = ["tab", "tab", "tab"].map(|tag| {
        let tab = tree.create_element(tag);
        tree.append_child(host, tab).unwrap();
        tab
    });
    tree.set_flag(tabs[1], NodeFlags::PLACEHOLDER).unwrap();

    let header = tree.create_element("div");
    tree.append_anonymous_child(host, header).unwrap();
    let point = tree.create_element("content");
    tree.append_child(header, point).unwrap();
    let footer = tree.create_element("div");
    tree.append_anonymous_child(host, footer).unwrap();

    tree.distribute(tabs[0], point).unwrap();
    tree.distribute(tabs[2], point).unwrap();

    Widget { tree, host, tabs, header, point, footer }
}

fn collect(iter: &mut AllChildrenIter) -> Vec<NodeId> {
    std::iter::from_fn(|| iter.next_child()).collect()
}

#[test]
fn test_flattened_children_follow_binding() {
    let w = widget();

    assert_eq!(w.tree.flattened_children(w.host), vec![w.header, w.footer]);
    assert_eq!(w.tree.flattened_children(w.header), vec![w.point]);
    assert_eq!(w.tree.flattened_children(w.point), vec![w.tabs[0], w.tabs[2]]);
    assert_eq!(w.tree.children(w.host).collect::<Vec<_>>(), w.tabs.to_vec());
}

#[test]
fn test_parents_differ_for_distributed_nodes() {
    let w = widget();

    assert_eq!(w.tree.parent_node(w.tabs[0]), Some(w.host));
    assert_eq!(w.tree.flattened_parent(w.tabs[0]), Some(w.point));
    assert_eq!(w.tree.flattened_parent(w.tabs[1]), Some(w.host));
    assert_eq!(w.tree.flattened_parent(w.header), Some(w.host));
    assert!(!w.tree.has_flag(w.tabs[1], NodeFlags::MAY_BE_IN_BINDING));
}

#[test]
fn test_filters_combine() {
    let w = widget();
    let light = ChildFilter::ALL_BUT_BINDING;

    let mut iter = AllChildrenIter::new(&w.tree, w.host, light, true);
    assert_eq!(collect(&mut iter), w.tabs.to_vec());

    let mut iter = AllChildrenIter::new(&w.tree, w.host, light | ChildFilter::SKIP_PLACEHOLDER, true);
    assert_eq!(collect(&mut iter), vec![w.tabs[0], w.tabs[2]]);

    let mut iter = AllChildrenIter::new(&w.tree, w.host, ChildFilter::SKIP_PLACEHOLDER, true);
    assert_eq!(collect(&mut iter), vec![w.header, w.footer]);
}

#[test]
fn test_stack_of_iterators_walks_flattened_subtree() {
    let w = widget();
    let mut stack = vec![AllChildrenIter::new(&w.tree, w.host, ChildFilter::ALL_CHILDREN, true)];
    let mut leaves = Vec::new();

    while let Some(top) = stack.last_mut() {
        match top.next_child() {
            Some(child) => {
                let iter = AllChildrenIter::new(&w.tree, child, ChildFilter::ALL_CHILDREN, true);
                if w.tree.flattened_children(child).is_empty() {
                    leaves.push(child);
                }
                stack.push(iter);
            }
            None => {
                stack.pop();
            }
        }
    }

    assert_eq!(leaves, vec![w.tabs[0], w.tabs[2], w.footer]);
}

#[test]
fn test_redistribution_moves_node() {
    let mut w = widget();

    w.tree.distribute(w.tabs[0], w.footer).unwrap();
    assert_eq!(w.tree.flattened_children(w.point), vec![w.tabs[2]]);
    assert_eq!(w.tree.flattened_children(w.footer), vec![w.tabs[0]]);
    assert_eq!(w.tree.flattened_parent(w.tabs[0]), Some(w.footer));
}

#[test]
fn test_binding_errors() {
    let mut w = widget();
    let text = w.tree.create_text("label");
    assert_eq!(w.tree.append_anonymous_child(text, w.header), Err(DomError::NotAnElement(text)));

    let stray = w.tree.create_element("div");
    assert_eq!(w.tree.distribute(stray, w.point), Err(DomError::NotDistributable(stray)));
    assert_eq!(w.tree.distribute(w.header, w.point), Err(DomError::NotDistributable(w.header)));
    assert_eq!(
        w.tree.append_anonymous_child(w.host, w.header),
        Err(DomError::AlreadyAttached(w.header))
    );
}
