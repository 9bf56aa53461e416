//! Tree traversal (C2): descendant walks in tree order and shadow-including
//! tree order.
//!
//! SPECLINK: https://dom.spec.whatwg.org/#concept-tree-order
//! SPECLINK: https://dom.spec.whatwg.org/#concept-shadow-including-tree-order

use std::ops::ControlFlow;

use crate::arena::Ref;

/// Visits `n`, then recurses left-to-right over its children, in pre-order.
/// The visitor returning `ControlFlow::Break` aborts the whole walk (and is
/// propagated back out).
pub fn inclusive_descendants<'arena>(
    n: Ref<'arena>,
    visit: &mut impl FnMut(Ref<'arena>) -> ControlFlow<()>,
) -> ControlFlow<()> {
    visit(n)?;
    let mut child = n.first_child();
    while let Some(c) = child {
        inclusive_descendants(c, visit)?;
        child = c.next_sibling();
    }
    ControlFlow::Continue(())
}

/// Like `inclusive_descendants`, but does not visit `n` itself.
pub fn descendants<'arena>(
    n: Ref<'arena>,
    visit: &mut impl FnMut(Ref<'arena>) -> ControlFlow<()>,
) -> ControlFlow<()> {
    let mut child = n.first_child();
    while let Some(c) = child {
        inclusive_descendants(c, visit)?;
        child = c.next_sibling();
    }
    ControlFlow::Continue(())
}

/// Shadow-including tree order: visit `n`; if `n` is a shadow host, recurse
/// into its shadow root before its ordinary children; then recurse over the
/// ordinary children.
pub fn shadow_including_inclusive_descendants<'arena>(
    n: Ref<'arena>,
    visit: &mut impl FnMut(Ref<'arena>) -> ControlFlow<()>,
) -> ControlFlow<()> {
    visit(n)?;
    if n.is_element() {
        if let Some(shadow_root) = n.shadow_root() {
            shadow_including_inclusive_descendants(shadow_root, visit)?;
        }
    }
    let mut child = n.first_child();
    while let Some(c) = child {
        shadow_including_inclusive_descendants(c, visit)?;
        child = c.next_sibling();
    }
    ControlFlow::Continue(())
}

/// Like `shadow_including_inclusive_descendants`, but does not visit `n`
/// itself.
pub fn shadow_including_descendants<'arena>(
    n: Ref<'arena>,
    visit: &mut impl FnMut(Ref<'arena>) -> ControlFlow<()>,
) -> ControlFlow<()> {
    if n.is_element() {
        if let Some(shadow_root) = n.shadow_root() {
            shadow_including_inclusive_descendants(shadow_root, visit)?;
        }
    }
    let mut child = n.first_child();
    while let Some(c) = child {
        shadow_including_inclusive_descendants(c, visit)?;
        child = c.next_sibling();
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::document::{DocumentKind, Mode};
    use crate::element::CustomElementState;
    use crate::mutation::append_child;
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
    fn inclusive_descendants_visits_in_pre_order() {
        let arena = Arena::new();
        let doc = Node::new_document(&arena, "doc", DocumentKind::Html, Mode::NoQuirks, "text/html");
        let r = new_element(&arena, doc, "R");
        let a = new_element(&arena, doc, "A");
        let a1 = new_element(&arena, doc, "A1");
        let b = new_element(&arena, doc, "B");
        append_child(r, a);
        append_child(a, a1);
        append_child(r, b);

        let mut seen = Vec::new();
        let _ = inclusive_descendants(r, &mut |n| {
            seen.push(n.debug_name().to_string());
            ControlFlow::Continue(())
        });
        assert_eq!(seen, vec!["R", "A", "A1", "B"]);
    }

    #[test]
    fn stop_signal_aborts_the_walk() {
        let arena = Arena::new();
        let doc = Node::new_document(&arena, "doc", DocumentKind::Html, Mode::NoQuirks, "text/html");
        let r = new_element(&arena, doc, "R");
        let a = new_element(&arena, doc, "A");
        let b = new_element(&arena, doc, "B");
        append_child(r, a);
        append_child(r, b);

        let mut seen = Vec::new();
        let _ = inclusive_descendants(r, &mut |n| {
            seen.push(n.debug_name().to_string());
            if n.debug_name() == "A" {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(seen, vec!["R", "A"]);
    }

    #[test]
    fn shadow_including_descendants_visits_shadow_root_before_children() {
        let arena = Arena::new();
        let doc = Node::new_document(&arena, "doc", DocumentKind::Html, Mode::NoQuirks, "text/html");
        let host = new_element(&arena, doc, "host");
        let light_child = new_element(&arena, doc, "light-child");
        append_child(host, light_child);

        let shadow_root = Node::new_shadow_root(&arena, "shadow-root", doc, host);
        let shadow_child = new_element(&arena, doc, "shadow-child");
        append_child(shadow_root, shadow_child);
        crate::shadow::attach_shadow_root(host, shadow_root);

        let mut seen = Vec::new();
        let _ = shadow_including_inclusive_descendants(host, &mut |n| {
            seen.push(n.debug_name().to_string());
            ControlFlow::Continue(())
        });
        assert_eq!(seen, vec!["host", "shadow-root", "shadow-child", "light-child"]);
    }
}
