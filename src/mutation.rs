//! Node graph primitives (C1): the three low-level link mutators.
//!
//! None of these perform validation; that is `crate::insertion`'s job.
//! Each takes the eight link fields of up to five neighboring nodes from one
//! consistent state to another with no intermediate observable state.
//!
//! SPECLINK: https://dom.spec.whatwg.org/#concept-node-insert
//! SPECLINK: https://dom.spec.whatwg.org/#concept-node-remove

use crate::arena::Ref;

/// The deepest, rightmost node reachable from `n` by following `following`
/// while staying inside `n`'s own subtree. O(depth of right spine); the only
/// non-O(1) step in the mutation primitives.
pub(crate) fn last_node_in_tree<'arena>(n: Ref<'arena>) -> Ref<'arena> {
    let mut current = n;
    loop {
        match current.following() {
            Some(next) if n.is_ancestor_of(next) => current = next,
            _ => return current,
        }
    }
}

/// Appends `node` as `parent`'s new last child.
///
/// Preconditions: `node.parent()` is `None`.
pub fn append_child<'arena>(parent: Ref<'arena>, node: Ref<'arena>) {
    debug_assert!(node.parent().is_none(), "append_child: node is already attached");

    let prev_child = parent.last_child();
    let preceding = match prev_child {
        Some(prev_child) => last_node_in_tree(prev_child),
        None => parent,
    };
    // The node that used to come right after `parent`'s subtree in tree
    // order. Must be read before any link mutation below: it is not
    // necessarily `parent.next_sibling()` (that is only the node right
    // after `parent` at `parent`'s own level; the node after `parent`'s
    // whole subtree may instead be an ancestor's next sibling).
    let parent_old_following = preceding.following();
    let last_reachable_following = last_node_in_tree(node);

    node.set_parent(Some(parent));
    node.set_next_sibling(None);
    node.set_previous_sibling(prev_child);
    if let Some(prev_child) = prev_child {
        prev_child.set_next_sibling(Some(node));
    }

    preceding.set_following(Some(node));
    node.set_preceding(Some(preceding));
    last_reachable_following.set_following(parent_old_following);
    if let Some(following) = parent_old_following {
        following.set_preceding(Some(last_reachable_following));
    }

    if node.previous_sibling().is_none() {
        parent.set_first_child(Some(node));
        parent.set_following(Some(node));
    }
    parent.set_last_child(Some(node));
}

/// Splices `node` into `parent`'s child list immediately before `before`.
///
/// Preconditions: `node.parent()` is `None`; `before.parent()` is
/// `Some(parent)`.
pub fn insert_child_before<'arena>(parent: Ref<'arena>, node: Ref<'arena>, before: Ref<'arena>) {
    debug_assert!(node.parent().is_none(), "insert_child_before: node is already attached");
    debug_assert!(
        before.parent().is_some_and(|p| std::ptr::eq(p, parent)),
        "insert_child_before: before is not a child of parent"
    );

    let preceding = before.preceding();
    let previous_sibling = before.previous_sibling();
    let last_reachable_following = last_node_in_tree(node);

    node.set_parent(Some(parent));
    node.set_next_sibling(Some(before));
    node.set_previous_sibling(before.previous_sibling());
    before.set_previous_sibling(Some(node));
    if let Some(previous_sibling) = previous_sibling {
        previous_sibling.set_next_sibling(Some(node));
    }

    // `before` has a parent, so by invariant 4 it is not the first node in
    // tree order and always has a preceding node.
    let preceding = preceding.expect("insert_child_before: before has no preceding node");
    preceding.set_following(Some(node));
    node.set_preceding(Some(preceding));
    last_reachable_following.set_following(Some(before));
    before.set_preceding(Some(last_reachable_following));

    if node.previous_sibling().is_none() {
        parent.set_first_child(Some(node));
        parent.set_following(Some(node));
    }
}

/// Detaches `node` from its parent, closing the gap left in both the
/// sibling chain and the `preceding`/`following` chain. A no-op if `node`
/// is already detached.
///
/// `node`'s own link fields into its former siblings are left as-is (stale)
/// rather than cleared: they are unconditionally overwritten the next time
/// `node` is attached via `append_child`/`insert_child_before`, and the
/// subtree's *internal* links (children, and `following` within the
/// subtree) are untouched so the detached subtree remains walkable and
/// re-insertable.
pub fn remove_from_parent<'arena>(node: Ref<'arena>) {
    let Some(parent) = node.parent() else {
        return;
    };

    let preceding = node.preceding();
    let following = last_node_in_tree(node).following();
    let prev_sibling = node.previous_sibling();
    let next_sibling = node.next_sibling();

    node.set_parent(None);

    if let Some(prev_sibling) = prev_sibling {
        prev_sibling.set_next_sibling(next_sibling);
    }
    if let Some(next_sibling) = next_sibling {
        next_sibling.set_previous_sibling(prev_sibling);
    }

    if prev_sibling.is_none() {
        parent.set_first_child(next_sibling);
    }
    if next_sibling.is_none() {
        parent.set_last_child(prev_sibling);
    }

    if let Some(preceding) = preceding {
        preceding.set_following(following);
    }
    if let Some(following) = following {
        following.set_preceding(preceding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::document::{DocumentKind, Mode};
    use crate::element::CustomElementState;
    use crate::namespace::{Namespace, QualifiedName};
    use crate::node::Node;

    fn new_element<'a>(arena: &'a Arena<'a>, doc: Ref<'a>, name: &str) -> Ref<'a> {
        Node::new_element(
            arena,
            name,
            doc,
            QualifiedName::new(name, Some(Namespace::Html), None),
            CustomElementState::Uncustomized,
            None,
        )
    }

    #[test]
    fn insert_before_orders_children_correctly() {
        // S2
        let arena = Arena::new();
        let doc = Node::new_document(&arena, "doc", DocumentKind::Html, Mode::NoQuirks, "text/html");
        let r = new_element(&arena, doc, "R");
        let n0 = new_element(&arena, doc, "N0");
        let n1 = new_element(&arena, doc, "N1");
        let n2 = new_element(&arena, doc, "N2");

        append_child(r, n0);
        insert_child_before(r, n2, n0);
        insert_child_before(r, n1, n0);

        let order: Vec<_> = r.child_nodes().into_iter().map(|n| n.debug_name().to_string()).collect();
        assert_eq!(order, vec!["N2", "N1", "N0"]);
        assert!(std::ptr::eq(r.first_child().unwrap(), n2));
        assert!(std::ptr::eq(r.last_child().unwrap(), n0));
        assert!(std::ptr::eq(r.following().unwrap(), n2));
        assert!(std::ptr::eq(n2.following().unwrap(), n1));
        assert!(std::ptr::eq(n1.following().unwrap(), n0));
    }

    #[test]
    fn append_subtree_links_into_parent_following_chain() {
        // S3
        let arena = Arena::new();
        let doc = Node::new_document(&arena, "doc", DocumentKind::Html, Mode::NoQuirks, "text/html");
        let r = new_element(&arena, doc, "R");
        let n0 = new_element(&arena, doc, "N0");
        let n1 = new_element(&arena, doc, "N1");
        let n2 = new_element(&arena, doc, "N2");
        append_child(r, n0);
        append_child(r, n1);
        append_child(r, n2);

        let n3 = new_element(&arena, doc, "N3");
        let n3_0 = new_element(&arena, doc, "N3.0");
        let n3_1 = new_element(&arena, doc, "N3.1");
        let n3_2 = new_element(&arena, doc, "N3.2");
        append_child(n3, n3_0);
        append_child(n3, n3_1);
        append_child(n3, n3_2);

        append_child(r, n3);

        assert!(std::ptr::eq(n2.following().unwrap(), n3));
        assert!(std::ptr::eq(n3.following().unwrap(), n3_0));
        assert!(std::ptr::eq(n3_0.following().unwrap(), n3_1));
        assert!(n3_2.following().is_none());
    }

    #[test]
    fn insert_subtree_before_splices_whole_subtree() {
        // S4
        let arena = Arena::new();
        let doc = Node::new_document(&arena, "doc", DocumentKind::Html, Mode::NoQuirks, "text/html");
        let r = new_element(&arena, doc, "R");
        let n0 = new_element(&arena, doc, "N0");
        let n1 = new_element(&arena, doc, "N1");
        let n2 = new_element(&arena, doc, "N2");
        append_child(r, n0);
        append_child(r, n1);
        append_child(r, n2);

        let n3 = new_element(&arena, doc, "N3");
        let n3_0 = new_element(&arena, doc, "N3.0");
        let n3_1 = new_element(&arena, doc, "N3.1");
        let n3_2 = new_element(&arena, doc, "N3.2");
        append_child(n3, n3_0);
        append_child(n3, n3_1);
        append_child(n3, n3_2);

        insert_child_before(r, n3, n1);

        let order: Vec<_> = r.child_nodes().into_iter().map(|n| n.debug_name().to_string()).collect();
        assert_eq!(order, vec!["N0", "N3", "N1", "N2"]);
        assert!(std::ptr::eq(n0.following().unwrap(), n3));
        assert!(std::ptr::eq(n3_2.following().unwrap(), n1));
    }

    #[test]
    fn staged_removal_keeps_link_invariants() {
        // S5
        let arena = Arena::new();
        let doc = Node::new_document(&arena, "doc", DocumentKind::Html, Mode::NoQuirks, "text/html");
        let r = new_element(&arena, doc, "R");

        let mut first = Vec::new();
        let mut second = Vec::new();
        for i in 0..3 {
            let sub = new_element(&arena, doc, &format!("A{i}"));
            append_child(r, sub);
            first.push(sub);
        }
        for i in 0..3 {
            let sub = new_element(&arena, doc, &format!("B{i}"));
            append_child(r, sub);
            second.push(sub);
        }

        fn assert_invariants<'a>(r: Ref<'a>) {
            let children = r.child_nodes();
            for (i, c) in children.iter().enumerate() {
                assert_eq!(c.index(), i);
                assert!(std::ptr::eq(c.parent().unwrap(), r));
                if let Some(next) = c.next_sibling() {
                    assert!(std::ptr::eq(next.previous_sibling().unwrap(), *c));
                }
                if let Some(f) = c.following() {
                    assert!(std::ptr::eq(f.preceding().unwrap(), *c));
                }
            }
        }

        remove_from_parent(first[1]);
        assert_invariants(r);
        remove_from_parent(first[2]);
        assert_invariants(r);
        remove_from_parent(first[0]);
        assert_invariants(r);
        remove_from_parent(second[2]);
        assert_invariants(r);
        remove_from_parent(second[0]);
        assert_invariants(r);

        let remaining: Vec<_> = r.child_nodes().into_iter().map(|n| n.debug_name().to_string()).collect();
        assert_eq!(remaining, vec!["B1"]);
    }

    #[test]
    fn remove_from_parent_on_detached_node_is_a_no_op() {
        let arena = Arena::new();
        let doc = Node::new_document(&arena, "doc", DocumentKind::Html, Mode::NoQuirks, "text/html");
        let n = new_element(&arena, doc, "N");
        remove_from_parent(n);
        assert!(n.parent().is_none());
    }

    #[test]
    fn append_off_the_rightmost_spine_preserves_following_past_an_ancestors_sibling() {
        // GP -> G -> P -> C, with P the only child of G, G the first child of
        // GP, and Y the second child of GP. Appending N under P must route
        // the following chain through N to Y, the node that followed P's
        // subtree, not truncate it just because P itself has no next_sibling.
        let arena = Arena::new();
        let doc = Node::new_document(&arena, "doc", DocumentKind::Html, Mode::NoQuirks, "text/html");
        let gp = new_element(&arena, doc, "GP");
        let g = new_element(&arena, doc, "G");
        let p = new_element(&arena, doc, "P");
        let c = new_element(&arena, doc, "C");
        let y = new_element(&arena, doc, "Y");

        append_child(gp, g);
        append_child(g, p);
        append_child(p, c);
        append_child(gp, y);

        let n = new_element(&arena, doc, "N");
        append_child(p, n);

        assert!(std::ptr::eq(n.following().unwrap(), y));
        assert!(std::ptr::eq(y.preceding().unwrap(), n));
    }
}
