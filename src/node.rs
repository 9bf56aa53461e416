//! The `Node` type: the universal tree member and its link fields.
//!
//! SPECLINK: https://dom.spec.whatwg.org/#interface-node

use std::cell::{Cell, RefCell};
use std::fmt;

use crate::arena::{Arena, Link, Ref};
use crate::document::{DocumentData, DocumentKind, Mode};
use crate::document_fragment::DocumentFragmentData;
use crate::element::{CustomElementState, ElementData};
use crate::hooks::SpecHooks;
use crate::namespace::{Attribute, QualifiedName};

/// The DOM-standard numeric node-type codes. Attribute, CDataSection and the
/// other data-only kinds are represented but this core never constructs most
/// of them (character data and attributes are out of scope; see `NodeData`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CDataSection = 4,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
}

/// Kind-specific payload. The kinds out of scope for this core (Attribute,
/// CDataSection, ProcessingInstruction, Comment, Text) are represented as
/// data-only leaves so `NodeData::kind` stays total and the insertion
/// pipeline's validity rules (which reason about Text/Comment/PI nodes) have
/// something concrete to match against.
pub enum NodeData<'arena> {
    Document(DocumentData),
    DocumentType {
        name: String,
        public_id: String,
        system_id: String,
    },
    DocumentFragment(DocumentFragmentData<'arena>),
    Element(ElementData<'arena>),
    Attribute(Attribute),
    Text(RefCell<String>),
    CDataSection(RefCell<String>),
    ProcessingInstruction { target: String, data: RefCell<String> },
    Comment(RefCell<String>),
}

impl<'arena> NodeData<'arena> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Document(_) => NodeKind::Document,
            NodeData::DocumentType { .. } => NodeKind::DocumentType,
            NodeData::DocumentFragment(_) => NodeKind::DocumentFragment,
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Attribute(_) => NodeKind::Attribute,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::CDataSection(_) => NodeKind::CDataSection,
            NodeData::ProcessingInstruction { .. } => NodeKind::ProcessingInstruction,
            NodeData::Comment(_) => NodeKind::Comment,
        }
    }
}

/// A node in the tree. Allocated out of a [`crate::arena::Arena`] and
/// referenced thereafter by shared reference (`Ref<'arena>`); every link
/// field is a `Cell` so the graph can be rewired through a shared reference,
/// matching how the mutation primitives in [`crate::mutation`] are written.
pub struct Node<'arena> {
    debug_name: String,
    node_document: Link<'arena>,
    parent: Link<'arena>,
    first_child: Link<'arena>,
    last_child: Link<'arena>,
    previous_sibling: Link<'arena>,
    next_sibling: Link<'arena>,
    preceding: Link<'arena>,
    following: Link<'arena>,
    hooks: Cell<Option<&'arena dyn SpecHooks<'arena>>>,
    pub data: NodeData<'arena>,
}

impl<'arena> Node<'arena> {
    /// Allocates a new, detached node with the given kind-specific payload.
    /// `node_document` should be `None` only when constructing the Document
    /// that will own this node's eventual tree.
    pub fn new(
        arena: &'arena Arena<'arena>,
        debug_name: impl Into<String>,
        node_document: Option<Ref<'arena>>,
        data: NodeData<'arena>,
    ) -> Ref<'arena> {
        arena.alloc(Node {
            debug_name: debug_name.into(),
            node_document: Cell::new(node_document),
            parent: Cell::new(None),
            first_child: Cell::new(None),
            last_child: Cell::new(None),
            previous_sibling: Cell::new(None),
            next_sibling: Cell::new(None),
            preceding: Cell::new(None),
            following: Cell::new(None),
            hooks: Cell::new(None),
            data,
        })
    }

    pub fn hooks(&self) -> Option<&'arena dyn SpecHooks<'arena>> {
        self.hooks.get()
    }

    /// Attaches a spec-hooks implementation to this node. There is no
    /// unregistration; hooks are meant to be set once, at construction
    /// time, by whatever higher layer knows this node is e.g. a custom
    /// element.
    pub fn set_hooks(&self, hooks: &'arena dyn SpecHooks<'arena>) {
        self.hooks.set(Some(hooks));
    }

    pub fn new_document(
        arena: &'arena Arena<'arena>,
        debug_name: impl Into<String>,
        kind: DocumentKind,
        mode: Mode,
        content_type: impl Into<String>,
    ) -> Ref<'arena> {
        Node::new(
            arena,
            debug_name,
            None,
            NodeData::Document(DocumentData {
                kind,
                mode: Cell::new(mode),
                content_type: content_type.into(),
            }),
        )
    }

    pub fn new_element(
        arena: &'arena Arena<'arena>,
        debug_name: impl Into<String>,
        node_document: Ref<'arena>,
        name: QualifiedName,
        custom_element_state: CustomElementState,
        is: Option<String>,
    ) -> Ref<'arena> {
        Node::new(
            arena,
            debug_name,
            Some(node_document),
            NodeData::Element(ElementData {
                name,
                custom_element_state: Cell::new(custom_element_state),
                is,
                shadow_root: Cell::new(None),
            }),
        )
    }

    pub fn new_document_fragment(
        arena: &'arena Arena<'arena>,
        debug_name: impl Into<String>,
        node_document: Ref<'arena>,
    ) -> Ref<'arena> {
        Node::new(
            arena,
            debug_name,
            Some(node_document),
            NodeData::DocumentFragment(DocumentFragmentData {
                host: Cell::new(None),
            }),
        )
    }

    /// A DocumentFragment whose host is already set: "ShadowRoot is a
    /// DocumentFragment whose host is set."
    pub fn new_shadow_root(
        arena: &'arena Arena<'arena>,
        debug_name: impl Into<String>,
        node_document: Ref<'arena>,
        host: Ref<'arena>,
    ) -> Ref<'arena> {
        Node::new(
            arena,
            debug_name,
            Some(node_document),
            NodeData::DocumentFragment(DocumentFragmentData {
                host: Cell::new(Some(host)),
            }),
        )
    }

    pub fn new_text(
        arena: &'arena Arena<'arena>,
        debug_name: impl Into<String>,
        node_document: Ref<'arena>,
        contents: impl Into<String>,
    ) -> Ref<'arena> {
        Node::new(
            arena,
            debug_name,
            Some(node_document),
            NodeData::Text(RefCell::new(contents.into())),
        )
    }

    pub fn new_comment(
        arena: &'arena Arena<'arena>,
        debug_name: impl Into<String>,
        node_document: Ref<'arena>,
        contents: impl Into<String>,
    ) -> Ref<'arena> {
        Node::new(
            arena,
            debug_name,
            Some(node_document),
            NodeData::Comment(RefCell::new(contents.into())),
        )
    }

    pub fn new_doctype(
        arena: &'arena Arena<'arena>,
        debug_name: impl Into<String>,
        node_document: Ref<'arena>,
        name: impl Into<String>,
        public_id: impl Into<String>,
        system_id: impl Into<String>,
    ) -> Ref<'arena> {
        Node::new(
            arena,
            debug_name,
            Some(node_document),
            NodeData::DocumentType {
                name: name.into(),
                public_id: public_id.into(),
                system_id: system_id.into(),
            },
        )
    }

    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document(_))
    }
    pub fn is_document_type(&self) -> bool {
        matches!(self.data, NodeData::DocumentType { .. })
    }
    pub fn is_document_fragment(&self) -> bool {
        matches!(self.data, NodeData::DocumentFragment(_))
    }
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }
    pub fn is_character_data(&self) -> bool {
        matches!(
            self.data,
            NodeData::Text(_)
                | NodeData::CDataSection(_)
                | NodeData::Comment(_)
                | NodeData::ProcessingInstruction { .. }
        )
    }

    /// A DocumentFragment is a ShadowRoot iff its host is set.
    pub fn is_shadow_root(&self) -> bool {
        match &self.data {
            NodeData::DocumentFragment(fragment) => fragment.host.get().is_some(),
            _ => false,
        }
    }

    // -- Link field queries -------------------------------------------------

    pub fn parent(&'arena self) -> Option<Ref<'arena>> {
        self.parent.get()
    }

    /// The parent, but only if it is an Element; `None` otherwise (including
    /// when the parent is a Document; see S7).
    pub fn parent_element(&'arena self) -> Option<Ref<'arena>> {
        self.parent().filter(|p| p.is_element())
    }

    pub fn first_child(&'arena self) -> Option<Ref<'arena>> {
        self.first_child.get()
    }

    pub fn last_child(&'arena self) -> Option<Ref<'arena>> {
        self.last_child.get()
    }

    pub fn previous_sibling(&'arena self) -> Option<Ref<'arena>> {
        self.previous_sibling.get()
    }

    pub fn next_sibling(&'arena self) -> Option<Ref<'arena>> {
        self.next_sibling.get()
    }

    pub fn preceding(&'arena self) -> Option<Ref<'arena>> {
        self.preceding.get()
    }

    pub fn following(&'arena self) -> Option<Ref<'arena>> {
        self.following.get()
    }

    /// Raw `node document` query; `None` only for a node that is itself a
    /// Document and has not otherwise been assigned one.
    pub fn node_document(&'arena self) -> Option<Ref<'arena>> {
        self.node_document.get()
    }

    /// The document this node's algorithms should use: itself, if it is a
    /// Document; otherwise its `node_document`. Used internally by
    /// `adopt_into` and the insertion pipeline, which need a document even
    /// when operating directly on one.
    pub(crate) fn owning_document(&'arena self) -> Ref<'arena> {
        self.node_document.get().unwrap_or(self)
    }

    pub(crate) fn set_node_document(&self, document: Ref<'arena>) {
        self.node_document.set(Some(document));
    }

    // -- Link field mutators, used only by crate::mutation and crate::insertion --

    pub(crate) fn set_parent(&self, parent: Option<Ref<'arena>>) {
        self.parent.set(parent);
    }
    pub(crate) fn set_first_child(&self, child: Option<Ref<'arena>>) {
        self.first_child.set(child);
    }
    pub(crate) fn set_last_child(&self, child: Option<Ref<'arena>>) {
        self.last_child.set(child);
    }
    pub(crate) fn set_previous_sibling(&self, sibling: Option<Ref<'arena>>) {
        self.previous_sibling.set(sibling);
    }
    pub(crate) fn set_next_sibling(&self, sibling: Option<Ref<'arena>>) {
        self.next_sibling.set(sibling);
    }
    pub(crate) fn set_preceding(&self, node: Option<Ref<'arena>>) {
        self.preceding.set(node);
    }
    pub(crate) fn set_following(&self, node: Option<Ref<'arena>>) {
        self.following.set(node);
    }

    pub fn has_child_nodes(&self) -> bool {
        self.first_child.get().is_some()
    }

    /// Snapshot of children in tree order.
    pub fn child_nodes(&'arena self) -> Vec<Ref<'arena>> {
        let mut out = Vec::new();
        let mut next = self.first_child();
        while let Some(child) = next {
            out.push(child);
            next = child.next_sibling();
        }
        out
    }

    pub fn index(&'arena self) -> usize {
        let mut n = 0;
        let mut sibling = self.previous_sibling();
        while let Some(s) = sibling {
            n += 1;
            sibling = s.previous_sibling();
        }
        n
    }

    pub fn root(&'arena self) -> Ref<'arena> {
        let mut r: Ref<'arena> = self;
        while let Some(p) = r.parent() {
            r = p;
        }
        r
    }

    pub fn is_ancestor_of(&'arena self, other: Ref<'arena>) -> bool {
        let mut cur = other.parent();
        while let Some(n) = cur {
            if std::ptr::eq(n, self) {
                return true;
            }
            cur = n.parent();
        }
        false
    }

    pub fn is_descendant_of(&'arena self, other: Ref<'arena>) -> bool {
        other.is_ancestor_of(self)
    }

    pub fn is_inclusive_ancestor_of(&'arena self, other: Ref<'arena>) -> bool {
        std::ptr::eq(self, other) || self.is_ancestor_of(other)
    }

    pub fn is_inclusive_descendant_of(&'arena self, other: Ref<'arena>) -> bool {
        std::ptr::eq(self, other) || self.is_descendant_of(other)
    }

    /// A node is connected iff its shadow-including root is a Document.
    pub fn is_connected(&'arena self) -> bool {
        self.shadow_including_root().is_document()
    }
}

// Pointer identity, not structural equality: the link fields form a cyclic
// graph (parent <-> child, following <-> preceding), so a derived field-wise
// PartialEq would recurse forever the first time it compared two nodes that
// could reach each other. Arena allocation gives every node a stable address
// for its whole lifetime, which is exactly what identity comparison needs.
impl<'arena> PartialEq for Node<'arena> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}
impl<'arena> Eq for Node<'arena> {}

impl<'arena> fmt::Debug for Node<'arena> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("debug_name", &self.debug_name)
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentKind, Mode};
    use crate::element::CustomElementState;
    use crate::mutation::append_child;
    use crate::namespace::Namespace;

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
    fn append_three_siblings_builds_following_chain() {
        // S1
        let arena = Arena::new();
        let doc = Node::new_document(&arena, "doc", DocumentKind::Html, Mode::NoQuirks, "text/html");
        let r = new_element(&arena, doc, "R");
        let n0 = new_element(&arena, doc, "N0");
        let n1 = new_element(&arena, doc, "N1");
        let n2 = new_element(&arena, doc, "N2");

        append_child(r, n0);
        append_child(r, n1);
        append_child(r, n2);

        assert!(std::ptr::eq(r.first_child().unwrap(), n0));
        assert!(std::ptr::eq(r.last_child().unwrap(), n2));
        assert!(std::ptr::eq(r.following().unwrap(), n0));
        assert!(std::ptr::eq(n0.following().unwrap(), n1));
        assert!(std::ptr::eq(n1.following().unwrap(), n2));
        assert!(n2.following().is_none());
        assert!(std::ptr::eq(n0.next_sibling().unwrap(), n1));
        assert!(std::ptr::eq(n1.previous_sibling().unwrap(), n0));
        assert!(std::ptr::eq(n1.preceding().unwrap(), n0));
        assert!(std::ptr::eq(n2.preceding().unwrap(), n1));
    }

    #[test]
    fn parent_element_discriminates_document_parents() {
        // S7
        let arena = Arena::new();
        let doc = Node::new_document(&arena, "doc", DocumentKind::Html, Mode::NoQuirks, "text/html");
        let ep = new_element(&arena, doc, "EP");
        let epc = new_element(&arena, doc, "EPC");
        append_child(ep, epc);
        let dpc = new_element(&arena, doc, "DPC");
        append_child(doc, dpc);

        assert!(std::ptr::eq(epc.parent_element().unwrap(), ep));
        assert!(dpc.parent_element().is_none());
    }

    #[test]
    fn index_counts_previous_siblings() {
        let arena = Arena::new();
        let doc = Node::new_document(&arena, "doc", DocumentKind::Html, Mode::NoQuirks, "text/html");
        let r = new_element(&arena, doc, "R");
        let n0 = new_element(&arena, doc, "N0");
        let n1 = new_element(&arena, doc, "N1");
        append_child(r, n0);
        append_child(r, n1);
        assert_eq!(n0.index(), 0);
        assert_eq!(n1.index(), 1);
    }
}
