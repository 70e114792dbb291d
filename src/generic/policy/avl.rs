use super::Policy;
use crate::generic::{
	map::{Splice, TreeExt, TreeExtMut},
	node::{Height, Side},
};
use log::trace;

/// Height balancing (AVL).
///
/// The heights of the two subtrees of any node differ by at most one,
/// which bounds the height of the tree by about `1.44 * log2(n + 2)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Avl;

#[inline]
fn height<K, V, T>(tree: &T, id: Option<usize>) -> isize
where
	T: TreeExt<K, V, Height> + ?Sized,
{
	Height::of(tree.metadata_of(id))
}

/// Height of the left subtree minus height of the right subtree.
#[inline]
fn balance_factor<K, V, T>(tree: &T, id: usize) -> isize
where
	T: TreeExt<K, V, Height> + ?Sized,
{
	let node = tree.node(id);
	height(tree, node.left()) - height(tree, node.right())
}

impl Avl {
	/// Rebalance the subtree rooted in `id`, whose children are balanced.
	///
	/// Returns the new root of the subtree.
	fn rebalance<K, V, T>(tree: &mut T, id: usize) -> usize
	where
		T: TreeExtMut<K, V, Height> + ?Sized,
	{
		let factor = balance_factor(tree, id);

		let heavy_side = if factor > 1 {
			Side::Left
		} else if factor < -1 {
			Side::Right
		} else {
			return id;
		};

		let child_id = tree
			.child_of(id, heavy_side)
			.expect("unbalanced node has no heavy child");

		let child_factor = balance_factor(tree, child_id);
		let leans_inward = match heavy_side {
			Side::Left => child_factor < 0,
			Side::Right => child_factor > 0,
		};

		if leans_inward {
			trace!("double rotation at node {}", id);
			tree.rotate(child_id, heavy_side);
		} else {
			trace!("single rotation at node {}", id);
		}

		tree.rotate(id, heavy_side.opposite())
	}

	/// Walk up from the given node to the root,
	/// refreshing heights and rebalancing every node on the way.
	fn retrace<K, V, T>(tree: &mut T, mut current: Option<usize>)
	where
		T: TreeExtMut<K, V, Height> + ?Sized,
	{
		while let Some(id) = current {
			tree.refresh(id);
			let subtree_root = Self::rebalance(tree, id);
			current = tree.parent_of(subtree_root);
		}
	}
}

impl Policy for Avl {
	type Metadata = Height;

	#[inline]
	fn leaf_metadata() -> Self::Metadata {
		Height::LEAF
	}

	#[inline]
	fn rebalance_insert<K, V, T>(tree: &mut T, id: usize)
	where
		T: TreeExtMut<K, V, Self::Metadata> + ?Sized,
	{
		let parent = tree.parent_of(id);
		Self::retrace(tree, parent)
	}

	#[inline]
	fn rebalance_remove<K, V, T>(tree: &mut T, splice: Splice<Self::Metadata>)
	where
		T: TreeExtMut<K, V, Self::Metadata> + ?Sized,
	{
		Self::retrace(tree, splice.parent())
	}

	fn validate<K, V, T>(tree: &T)
	where
		T: TreeExt<K, V, Self::Metadata> + ?Sized,
	{
		if let Some(root_id) = tree.root_id() {
			checked_height(tree, root_id);
		}
	}
}

/// Checks the cached heights and the balance of the given subtree,
/// and returns its height.
fn checked_height<K, V, T>(tree: &T, id: usize) -> isize
where
	T: TreeExt<K, V, Height> + ?Sized,
{
	let node = tree.node(id);
	let left = node.left().map(|l| checked_height(tree, l)).unwrap_or(-1);
	let right = node.right().map(|r| checked_height(tree, r)).unwrap_or(-1);

	if (left - right).abs() > 1 {
		panic!("unbalanced node")
	}

	let expected = 1 + std::cmp::max(left, right);
	if node.metadata().get() != expected {
		panic!("wrong cached height")
	}

	expected
}
