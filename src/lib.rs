//! Self-balancing binary search trees whose nodes are allocated in a slab.
//!
//! Two balancing policies share the same rotation primitives:
//! red-black ([`RbTreeMap`]) and AVL ([`AvlTreeMap`]).
//! The plain, never rotated [`BstMap`] serves as a baseline.
//!
//! The [`generic`] module exposes the underlying types,
//! parameterized by the policy and the node container.
#[cfg(feature = "std-slab")]
use slab::Slab;

pub mod generic;

/// Red-black tree map based on `Slab`.
#[cfg(feature = "std-slab")]
pub type RbTreeMap<K, V> =
	generic::TreeMap<K, V, generic::RedBlack, Slab<generic::Node<K, V, generic::Color>>>;

/// AVL tree map based on `Slab`.
#[cfg(feature = "std-slab")]
pub type AvlTreeMap<K, V> =
	generic::TreeMap<K, V, generic::Avl, Slab<generic::Node<K, V, generic::Height>>>;

/// Unbalanced binary search tree map based on `Slab`.
#[cfg(feature = "std-slab")]
pub type BstMap<K, V> = generic::TreeMap<K, V, generic::Unbalanced, Slab<generic::Node<K, V, ()>>>;
