//! The insertion pipeline (C5): pre-insertion validation, `insert`,
//! `pre_insert`, `append`, and `adopt_into`.
//!
//! SPECLINK: https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity
//! SPECLINK: https://dom.spec.whatwg.org/#concept-node-pre-insert
//! SPECLINK: https://dom.spec.whatwg.org/#concept-node-insert
//! SPECLINK: https://dom.spec.whatwg.org/#concept-node-append
//! SPECLINK: https://dom.spec.whatwg.org/#concept-node-adopt

use std::ops::ControlFlow;

use crate::arena::Ref;
use crate::error::{DomException, ErrorName};
use crate::hooks::{LiveRangeTracker, MutationRecorder, NoopCollaborators};
use crate::mutation::{append_child, insert_child_before, remove_from_parent};
use crate::node::NodeKind;
use crate::traversal::shadow_including_inclusive_descendants;

/// Fails with `HierarchyRequestError` or `NotFoundError` per
/// https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity.
///
/// The source's document-parent `switch` is missing a `break` after the
/// Element case, letting Element accidentally fall through into the
/// DocumentType case. This is a plain Rust `match`, whose arms never fall
/// through, so Element and DocumentType are implemented as disjoint cases.
pub fn ensure_pre_insertion_validity<'arena>(
    node: Ref<'arena>,
    parent: Ref<'arena>,
    before_child: Option<Ref<'arena>>,
) -> Result<(), DomException> {
    if !(parent.is_document() || parent.is_document_fragment() || parent.is_element()) {
        return Err(DomException::new(ErrorName::HierarchyRequestError));
    }

    if node.host_including_inclusive_ancestor_of(parent) {
        return Err(DomException::new(ErrorName::HierarchyRequestError));
    }

    if let Some(before_child) = before_child {
        if !before_child.parent().is_some_and(|p| std::ptr::eq(p, parent)) {
            return Err(DomException::new(ErrorName::NotFoundError));
        }
    }

    if !matches!(
        node.kind(),
        NodeKind::DocumentFragment
            | NodeKind::DocumentType
            | NodeKind::Element
            | NodeKind::Text
            | NodeKind::ProcessingInstruction
            | NodeKind::Comment
    ) {
        return Err(DomException::new(ErrorName::HierarchyRequestError));
    }

    if (node.is_text() && parent.is_document()) || (node.is_document_type() && !parent.is_document()) {
        return Err(DomException::new(ErrorName::HierarchyRequestError));
    }

    if parent.is_document() {
        let children = parent.child_nodes();
        let parent_has_element_child = children.iter().any(|c| c.is_element());
        let parent_has_doctype_child = children.iter().any(|c| c.is_document_type());

        let element_precedes_before_child = |before: Ref<'arena>| {
            children.iter().take_while(|c| !std::ptr::eq(**c, before)).any(|c| c.is_element())
        };
        let doctype_follows_before_child = |before: Ref<'arena>| {
            let idx = children
                .iter()
                .position(|c| std::ptr::eq(*c, before))
                .expect("before_child was already validated to be a child of parent");
            children[idx + 1..].iter().any(|c| c.is_document_type())
        };

        let hierarchy_request_error = || Err(DomException::new(ErrorName::HierarchyRequestError));

        match node.kind() {
            NodeKind::DocumentFragment => {
                let fragment_children = node.child_nodes();
                let element_count = fragment_children.iter().filter(|c| c.is_element()).count();
                let has_text_child = fragment_children.iter().any(|c| c.is_text());
                if element_count > 1 || has_text_child {
                    return hierarchy_request_error();
                }
                if element_count == 1
                    && (parent_has_element_child
                        || before_child.is_some_and(|b| b.is_document_type())
                        || before_child.is_some_and(doctype_follows_before_child))
                {
                    return hierarchy_request_error();
                }
            }
            NodeKind::Element => {
                if parent_has_element_child
                    || before_child.is_some_and(|b| b.is_document_type())
                    || before_child.is_some_and(doctype_follows_before_child)
                {
                    return hierarchy_request_error();
                }
            }
            NodeKind::DocumentType => {
                if parent_has_doctype_child
                    || before_child.is_some_and(element_precedes_before_child)
                    || (before_child.is_none() && parent_has_element_child)
                {
                    return hierarchy_request_error();
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn collect_shadow_including_inclusive_descendants<'arena>(n: Ref<'arena>) -> Vec<Ref<'arena>> {
    let mut out = Vec::new();
    let _ = shadow_including_inclusive_descendants(n, &mut |d| {
        out.push(d);
        ControlFlow::Continue(())
    });
    out
}

/// https://dom.spec.whatwg.org/#concept-node-insert
///
/// Slot assignment, the `connectedCallback`/upgrade reaction queue, and
/// named-slot machinery are out of scope and logged as skipped rather than
/// implemented; the tree-shape and hook-ordering guarantees (including the
/// two-pass separation between per-descendant insertion steps here and the
/// batch-wide post-connection pass at the end) are fully implemented.
pub fn insert<'arena>(
    node: Ref<'arena>,
    parent: Ref<'arena>,
    before_child: Option<Ref<'arena>>,
    suppress_observers: bool,
    live_ranges: &dyn LiveRangeTracker<'arena>,
    mutation_recorder: &dyn MutationRecorder<'arena>,
) {
    // 1.
    let nodes: Vec<Ref<'arena>> = if node.is_document_fragment() {
        node.child_nodes()
    } else {
        vec![node]
    };
    // 2.
    if nodes.is_empty() {
        return;
    }
    // 3.
    if node.is_document_fragment() {
        for &child in &nodes {
            remove_from_parent(child);
        }
        mutation_recorder.queue_tree_mutation_record(node, &[], &nodes, None, None);
    }
    // 4.
    if let Some(before) = before_child {
        live_ranges.fix_up_ranges_before_insert(parent, Some(before), nodes.len());
    }
    // 5.
    let previous_sibling = match before_child {
        Some(before) => before.previous_sibling(),
        None => parent.last_child(),
    };
    // 6.
    for &m in &nodes {
        adopt_into(m, parent.owning_document());
        match before_child {
            Some(before) => insert_child_before(parent, m, before),
            None => append_child(parent, m),
        }
        log::debug!("insert: skipping slot assignment for {} (out of scope)", m.debug_name());

        for d in collect_shadow_including_inclusive_descendants(m) {
            if let Some(hooks) = d.hooks() {
                hooks.insertion_steps(d);
            }
            if d.is_connected() && d.is_element() && d.is_custom() {
                log::debug!("insert: skipping connectedCallback reaction for {} (out of scope)", d.debug_name());
            } else if d.is_element() {
                log::debug!("insert: skipping custom element upgrade attempt for {} (out of scope)", d.debug_name());
            }
        }
    }
    // 7.
    if !suppress_observers {
        mutation_recorder.queue_tree_mutation_record(parent, &nodes, &[], previous_sibling, before_child);
    }
    // 8.
    if let Some(hooks) = parent.hooks() {
        hooks.children_changed_steps(parent);
    }
    // 9. A separate pass over the whole batch, run only after every node in
    // `nodes` has been linked, so a post-connection hook always observes
    // the final tree shape.
    let post_connection_targets: Vec<Ref<'arena>> =
        nodes.iter().flat_map(|&m| collect_shadow_including_inclusive_descendants(m)).collect();
    for d in post_connection_targets {
        if d.is_connected() {
            if let Some(hooks) = d.hooks() {
                hooks.post_connection_steps(d);
            }
        }
    }
}

/// https://dom.spec.whatwg.org/#concept-node-pre-insert
pub fn pre_insert<'arena>(
    node: Ref<'arena>,
    parent: Ref<'arena>,
    before_child: Option<Ref<'arena>>,
    live_ranges: &dyn LiveRangeTracker<'arena>,
    mutation_recorder: &dyn MutationRecorder<'arena>,
) -> Result<Ref<'arena>, DomException> {
    ensure_pre_insertion_validity(node, parent, before_child)?;
    // Self-insertion corner: must happen after validation, before insert.
    let reference = match before_child {
        Some(before) if std::ptr::eq(before, node) => node.next_sibling(),
        other => other,
    };
    insert(node, parent, reference, false, live_ranges, mutation_recorder);
    Ok(node)
}

/// https://dom.spec.whatwg.org/#concept-node-append
pub fn append<'arena>(
    node: Ref<'arena>,
    parent: Ref<'arena>,
    live_ranges: &dyn LiveRangeTracker<'arena>,
    mutation_recorder: &dyn MutationRecorder<'arena>,
) -> Result<Ref<'arena>, DomException> {
    pre_insert(node, parent, None, live_ranges, mutation_recorder)
}

/// `pre_insert`, with no live ranges or mutation observers to service:
/// the common case for a tree with no outstanding `Range`s.
pub fn pre_insert_simple<'arena>(
    node: Ref<'arena>,
    parent: Ref<'arena>,
    before_child: Option<Ref<'arena>>,
) -> Result<Ref<'arena>, DomException> {
    pre_insert(node, parent, before_child, &NoopCollaborators, &NoopCollaborators)
}

/// `append`, with no live ranges or mutation observers to service.
pub fn append_simple<'arena>(node: Ref<'arena>, parent: Ref<'arena>) -> Result<Ref<'arena>, DomException> {
    append(node, parent, &NoopCollaborators, &NoopCollaborators)
}

/// https://dom.spec.whatwg.org/#concept-node-adopt
pub fn adopt_into<'arena>(node: Ref<'arena>, document: Ref<'arena>) {
    if node.parent().is_some() {
        remove_from_parent(node);
    }
    if node.node_document().is_some_and(|d| std::ptr::eq(d, document)) {
        return;
    }
    for d in collect_shadow_including_inclusive_descendants(node) {
        let old_document = d.node_document();
        d.set_node_document(document);
        if d.is_element() {
            log::debug!(
                "adopt_into: skipping attribute node-document update for {} (out of scope)",
                d.debug_name()
            );
            if d.is_custom() {
                log::debug!("adopt_into: skipping adoptedCallback reaction for {} (out of scope)", d.debug_name());
            }
        }
        if let Some(hooks) = d.hooks() {
            hooks.adopting_steps(d, old_document);
        }
    }
}
