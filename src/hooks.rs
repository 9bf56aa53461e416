//! The four spec hooks a node's kind can implement, and the live-range /
//! mutation-record collaborators the insertion pipeline consults.
//!
//! The reference implementation uses subclass virtual methods for these;
//! this crate renders that as a trait with default no-op methods, attached
//! to a node through an optional trait object rather than baked into the
//! `NodeData` variant, so a custom behavior can be plugged in without
//! widening the variant set.
//!
//! SPECLINK: https://dom.spec.whatwg.org/#concept-node-insert
//! SPECLINK: https://dom.spec.whatwg.org/#concept-node-adopt

use crate::arena::Ref;

pub trait SpecHooks<'arena> {
    /// Run once per shadow-including inclusive descendant of an inserted
    /// node, in tree order, during `insert` step 6.
    fn insertion_steps(&self, _node: Ref<'arena>) {}

    /// Run once per shadow-including inclusive descendant of an adopted
    /// node, in shadow-including tree order, during `adopt_into`.
    fn adopting_steps(&self, _node: Ref<'arena>, _old_document: Option<Ref<'arena>>) {}

    /// Run once per `insert`/`remove` call, on the parent, after the
    /// mutation record (if any) has been queued.
    fn children_changed_steps(&self, _parent: Ref<'arena>) {}

    /// Run once per connected shadow-including inclusive descendant of all
    /// nodes inserted in one `insert` batch, after every node in the batch
    /// has been linked (`insert` step 9).
    fn post_connection_steps(&self, _node: Ref<'arena>) {}
}

/// Tracks the process-wide list of outstanding `Range` objects that
/// `insert`/`remove` must fix up offsets for. Range itself is out of scope;
/// this is the hook point `insert` step 4 calls into.
///
/// SPECLINK: https://dom.spec.whatwg.org/#concept-live-range
pub trait LiveRangeTracker<'arena> {
    /// Called before nodes are spliced in: bump the end of any live range
    /// that starts or ends at `parent` beyond `before_child`'s index.
    fn fix_up_ranges_before_insert(
        &self,
        _parent: Ref<'arena>,
        _before_child: Option<Ref<'arena>>,
        _inserted_count: usize,
    ) {
    }
}

/// Queues `MutationRecord`s for a `MutationObserver` to later deliver.
/// MutationObserver dispatch itself is out of scope; this is the hook point
/// `insert` calls into for tree mutation records.
pub trait MutationRecorder<'arena> {
    fn queue_tree_mutation_record(
        &self,
        _target: Ref<'arena>,
        _added: &[Ref<'arena>],
        _removed: &[Ref<'arena>],
        _previous_sibling: Option<Ref<'arena>>,
        _next_sibling: Option<Ref<'arena>>,
    ) {
    }
}

/// A collaborator bundle that does nothing; the default when a caller has
/// no live ranges or observers to service.
pub struct NoopCollaborators;
impl<'arena> LiveRangeTracker<'arena> for NoopCollaborators {}
impl<'arena> MutationRecorder<'arena> for NoopCollaborators {}
