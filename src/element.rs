//! Element-only attributes and operations (C3, C4's host side).
//!
//! SPECLINK: https://dom.spec.whatwg.org/#interface-element

use std::cell::Cell;

use crate::arena::Ref;
use crate::document::DocumentKind;
use crate::namespace::{Namespace, QualifiedName};
use crate::node::Node;

/// A web-components lifecycle stage. Only `Uncustomized` and `Undefined` are
/// ever assigned by this core's `create_element`; the registry that would
/// drive a custom element through `Precustomized`/`Custom`/`Failed` is out
/// of scope (see `DESIGN.md`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomElementState {
    Undefined,
    Failed,
    Uncustomized,
    Precustomized,
    Custom,
}

pub struct ElementData<'arena> {
    pub name: QualifiedName,
    pub custom_element_state: Cell<CustomElementState>,
    pub is: Option<String>,
    pub shadow_root: Cell<Option<Ref<'arena>>>,
}

impl<'arena> Node<'arena> {
    fn element_data(&self) -> &ElementData<'arena> {
        match &self.data {
            crate::node::NodeData::Element(data) => data,
            _ => panic!("{} is not an Element", self.debug_name()),
        }
    }

    pub fn namespace(&self) -> Option<Namespace> {
        self.element_data().name.namespace
    }

    pub fn namespace_prefix(&self) -> Option<&str> {
        self.element_data().name.prefix.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.element_data().name.local
    }

    pub fn is_value(&self) -> Option<&str> {
        self.element_data().is.as_deref()
    }

    pub fn custom_element_state(&self) -> CustomElementState {
        self.element_data().custom_element_state.get()
    }

    pub fn set_custom_element_state(&self, state: CustomElementState) {
        self.element_data().custom_element_state.set(state);
    }

    pub fn is_custom(&self) -> bool {
        self.custom_element_state() == CustomElementState::Custom
    }

    pub fn shadow_root(&self) -> Option<Ref<'arena>> {
        self.element_data().shadow_root.get()
    }

    pub fn is_shadow_host(&self) -> bool {
        self.shadow_root().is_some()
    }

    pub(crate) fn set_shadow_root(&self, shadow_root: Option<Ref<'arena>>) {
        self.element_data().shadow_root.set(shadow_root);
    }

    /// `prefix:local` if a prefix is set, else the bare local name.
    pub fn qualified_name(&self) -> String {
        self.element_data().name.qualified()
    }

    /// The qualified name, upper-cased (ASCII-only), iff this element is in
    /// the HTML namespace and its node document is an HTML document.
    pub fn html_uppercased_qualified_name(&'arena self) -> String {
        let qualified = self.qualified_name();
        let in_html_namespace = matches!(self.namespace(), Some(Namespace::Html));
        let owner_is_html = self
            .node_document()
            .map(|doc| doc.document_kind() == DocumentKind::Html)
            .unwrap_or(false);
        if in_html_namespace && owner_is_html {
            qualified.to_ascii_uppercase()
        } else {
            qualified
        }
    }

    pub fn tag_name(&'arena self) -> String {
        self.html_uppercased_qualified_name()
    }
}
