//! Shadow composition (C4): host <-> ShadowRoot linkage and the two
//! traversals that cross that boundary.
//!
//! SPECLINK: https://dom.spec.whatwg.org/#concept-shadow-including-root
//! SPECLINK: https://dom.spec.whatwg.org/#concept-tree-host-including-inclusive-ancestor

use crate::arena::Ref;
use crate::node::Node;

impl<'arena> Node<'arena> {
    /// The root of this node's tree, hopping from each shadow root to its
    /// host.
    pub fn shadow_including_root(&'arena self) -> Ref<'arena> {
        shadow_including_root(self)
    }

    /// True iff this node is an inclusive ancestor of `of`, or `of`'s root
    /// is a ShadowRoot with a host and this node is a host-including
    /// inclusive ancestor of that host.
    pub fn host_including_inclusive_ancestor_of(&'arena self, of: Ref<'arena>) -> bool {
        host_including_inclusive_ancestor_of(self, of)
    }
}

/// The root of `n`'s tree, hopping from each shadow root to its host.
/// Terminates because each hop leaves one tree for an enclosing one.
pub fn shadow_including_root<'arena>(n: Ref<'arena>) -> Ref<'arena> {
    let root = n.root();
    if root.is_shadow_root() {
        if let Some(host) = root.host() {
            return shadow_including_root(host);
        }
    }
    root
}

/// True iff `a` is an inclusive ancestor of `of`, or `of`'s root is a
/// ShadowRoot with a host and `a` is a host-including inclusive ancestor of
/// that host.
pub fn host_including_inclusive_ancestor_of<'arena>(a: Ref<'arena>, of: Ref<'arena>) -> bool {
    if a.is_inclusive_ancestor_of(of) {
        return true;
    }
    let root = of.root();
    if root.is_shadow_root() {
        if let Some(host) = root.host() {
            return host_including_inclusive_ancestor_of(a, host);
        }
    }
    false
}

/// Sets both sides of invariant 8 atomically: `element.shadow_root` and
/// `shadow_root.host`. The source left the element side of this wiring to
/// "the surrounding element-attach flow"; this crate makes it an explicit
/// operation instead.
pub fn attach_shadow_root<'arena>(element: Ref<'arena>, shadow_root: Ref<'arena>) {
    debug_assert!(element.is_element());
    debug_assert!(shadow_root.is_document_fragment());
    element.set_shadow_root(Some(shadow_root));
    shadow_root.set_host(Some(element));
}
