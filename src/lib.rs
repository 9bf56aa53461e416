//! An early, from-scratch implementation of the WHATWG DOM tree data
//! structure: the node graph, tree mutation, traversal, shadow composition,
//! and the insertion pipeline. Parsing, rendering, and script bindings are
//! out of scope; see `DESIGN.md`.

pub mod arena;
pub mod document;
pub mod document_fragment;
pub mod element;
pub mod error;
pub mod hooks;
pub mod insertion;
pub mod mutation;
pub mod namespace;
pub mod node;
pub mod shadow;
pub mod traversal;

pub use arena::{Arena, Link, Ref};
pub use document::{DocumentKind, Mode};
pub use element::CustomElementState;
pub use error::{DomException, ErrorName};
pub use hooks::{LiveRangeTracker, MutationRecorder, NoopCollaborators, SpecHooks};
pub use insertion::{adopt_into, append, append_simple, ensure_pre_insertion_validity, insert, pre_insert, pre_insert_simple};
pub use namespace::{Attribute, Namespace, QualifiedName};
pub use node::{Node, NodeData, NodeKind};
pub use shadow::attach_shadow_root;
