//! Balancing policies.
//!
//! A policy decides which metadata is attached to each node and how the tree is
//! repaired after a node is attached or spliced out.
//! All the policies share the same rotation primitives, provided by [`TreeExtMut`].
use crate::generic::{
	map::{Splice, TreeExt, TreeExtMut},
	node::Metadata,
};

mod avl;
mod red_black;

pub use avl::Avl;
pub use red_black::RedBlack;

/// Balancing policy of a tree.
pub trait Policy {
	/// Balancing information stored in each node.
	type Metadata: Metadata;

	/// Metadata of a node that has just been attached as a leaf.
	fn leaf_metadata() -> Self::Metadata;

	/// Restore the balance invariant after the node `id` has been attached as a leaf.
	fn rebalance_insert<K, V, T>(tree: &mut T, id: usize)
	where
		T: TreeExtMut<K, V, Self::Metadata> + ?Sized;

	/// Restore the balance invariant after a node has been spliced out of the tree.
	fn rebalance_remove<K, V, T>(tree: &mut T, splice: Splice<Self::Metadata>)
	where
		T: TreeExtMut<K, V, Self::Metadata> + ?Sized;

	/// Checks the balance invariant of the whole tree.
	///
	/// Panics if the invariant does not hold.
	fn validate<K, V, T>(tree: &T)
	where
		T: TreeExt<K, V, Self::Metadata> + ?Sized;
}

/// Plain binary search tree.
///
/// Never rotates. Its height is only bounded by the number of keys,
/// it serves as a baseline for the balanced policies.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Unbalanced;

impl Policy for Unbalanced {
	type Metadata = ();

	#[inline]
	fn leaf_metadata() -> Self::Metadata {}

	#[inline]
	fn rebalance_insert<K, V, T>(_tree: &mut T, _id: usize)
	where
		T: TreeExtMut<K, V, Self::Metadata> + ?Sized,
	{
	}

	#[inline]
	fn rebalance_remove<K, V, T>(_tree: &mut T, _splice: Splice<Self::Metadata>)
	where
		T: TreeExtMut<K, V, Self::Metadata> + ?Sized,
	{
	}

	#[inline]
	fn validate<K, V, T>(_tree: &T)
	where
		T: TreeExt<K, V, Self::Metadata> + ?Sized,
	{
	}
}
