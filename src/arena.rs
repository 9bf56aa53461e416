//! Arena storage for the node graph.
//!
//! Every node in a tree is allocated out of a single [`typed_arena::Arena`]
//! and referenced thereafter by shared reference. This sidesteps the
//! reference-counting-cycle question that a `Rc`/`Weak`-based tree would
//! raise for the `next_sibling`/`following` edges: the arena owns every node
//! unconditionally until it is dropped, so "strong" and "weak" in the
//! link-field documentation describe which chain is authoritative, not which
//! chain keeps memory alive.

use std::cell::Cell;

use crate::node::Node;

/// Backing storage for one tree (and any shadow trees reachable from it).
pub type Arena<'arena> = typed_arena::Arena<Node<'arena>>;

/// A reference to an arena-allocated node, valid for the arena's lifetime.
pub type Ref<'arena> = &'arena Node<'arena>;

/// A mutable link field pointing at another node in the same arena.
pub type Link<'arena> = Cell<Option<Ref<'arena>>>;
