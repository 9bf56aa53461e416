//! DocumentFragment and ShadowRoot attributes (C4's fragment side).
//!
//! SPECLINK: https://dom.spec.whatwg.org/#interface-documentfragment
//! SPECLINK: https://dom.spec.whatwg.org/#interface-shadowroot

use std::cell::Cell;

use crate::arena::Ref;
use crate::node::{Node, NodeData};

pub struct DocumentFragmentData<'arena> {
    pub host: Cell<Option<Ref<'arena>>>,
}

impl<'arena> Node<'arena> {
    fn document_fragment_data(&self) -> &DocumentFragmentData<'arena> {
        match &self.data {
            NodeData::DocumentFragment(data) => data,
            _ => panic!("{} is not a DocumentFragment", self.debug_name()),
        }
    }

    /// The fragment's host element, if any. Non-`None` only when this
    /// fragment is also a ShadowRoot.
    pub fn host(&self) -> Option<Ref<'arena>> {
        self.document_fragment_data().host.get()
    }

    pub(crate) fn set_host(&self, host: Option<Ref<'arena>>) {
        self.document_fragment_data().host.set(host);
    }
}
