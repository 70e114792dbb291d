use super::Policy;
use crate::generic::{
	map::{Splice, TreeExt, TreeExtMut},
	node::{Color, Side},
};
use log::trace;

/// Red-black balancing.
///
/// Invariants:
///   - the root is black;
///   - absent children are black;
///   - a red node has no red child;
///   - every path from a node to an absent descendant crosses the same number of black nodes.
///
/// This bounds the height of the tree by `2 * log2(n + 1)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RedBlack;

#[inline]
fn color<K, V, T>(tree: &T, id: Option<usize>) -> Color
where
	T: TreeExt<K, V, Color> + ?Sized,
{
	Color::of(tree.metadata_of(id))
}

#[inline]
fn is_red<K, V, T>(tree: &T, id: Option<usize>) -> bool
where
	T: TreeExt<K, V, Color> + ?Sized,
{
	color(tree, id).is_red()
}

impl Policy for RedBlack {
	type Metadata = Color;

	#[inline]
	fn leaf_metadata() -> Self::Metadata {
		Color::Red
	}

	fn rebalance_insert<K, V, T>(tree: &mut T, id: usize)
	where
		T: TreeExtMut<K, V, Self::Metadata> + ?Sized,
	{
		let mut z = id;

		// `z` is red. Its parent is red as well: the grand-parent exists and is black.
		while let Some(parent_id) = tree.parent_of(z).filter(|&p| is_red(tree, Some(p))) {
			let (grand_parent_id, side) = match tree.slot_of(parent_id) {
				Some(slot) => slot,
				None => break,
			};

			let uncle = tree.child_of(grand_parent_id, side.opposite());
			match uncle.filter(|&u| is_red(tree, Some(u))) {
				Some(uncle_id) => {
					trace!("insert fixup at {}: red uncle, recolor", z);
					tree.set_metadata(parent_id, Color::Black);
					tree.set_metadata(uncle_id, Color::Black);
					tree.set_metadata(grand_parent_id, Color::Red);
					z = grand_parent_id
				}
				None => {
					let mut parent_id = parent_id;

					if tree.node(parent_id).child(side.opposite()) == Some(z) {
						trace!("insert fixup at {}: black uncle, zig-zag", z);
						tree.rotate(parent_id, side);
						std::mem::swap(&mut z, &mut parent_id);
					}

					trace!("insert fixup at {}: black uncle, straight line", z);
					tree.set_metadata(parent_id, Color::Black);
					tree.set_metadata(grand_parent_id, Color::Red);
					tree.rotate(grand_parent_id, side.opposite());
					break;
				}
			}
		}

		if let Some(root_id) = tree.root_id() {
			tree.set_metadata(root_id, Color::Black)
		}
	}

	fn rebalance_remove<K, V, T>(tree: &mut T, splice: Splice<Self::Metadata>)
	where
		T: TreeExtMut<K, V, Self::Metadata> + ?Sized,
	{
		if splice.removed.is_red() {
			return;
		}

		// `x` carries an extra black. It may be absent, hence the separate slot.
		let mut x = splice.child;
		let mut slot = splice.slot;

		while let Some((parent_id, side)) = slot {
			if is_red(tree, x) {
				break;
			}

			let mut sibling_id = tree
				.child_of(parent_id, side.opposite())
				.expect("black height violation: missing sibling");

			if is_red(tree, Some(sibling_id)) {
				trace!("remove fixup under {}: red sibling", parent_id);
				tree.set_metadata(sibling_id, Color::Black);
				tree.set_metadata(parent_id, Color::Red);
				tree.rotate(parent_id, side);
				sibling_id = tree
					.child_of(parent_id, side.opposite())
					.expect("black height violation: missing sibling");
			}

			let near = tree.child_of(sibling_id, side);
			let far = tree.child_of(sibling_id, side.opposite());

			if !is_red(tree, near) && !is_red(tree, far) {
				trace!("remove fixup under {}: black nephews, move up", parent_id);
				tree.set_metadata(sibling_id, Color::Red);
				x = Some(parent_id);
				slot = tree.slot_of(parent_id);
			} else {
				if !is_red(tree, far) {
					trace!("remove fixup under {}: red near nephew", parent_id);
					if let Some(near_id) = near {
						tree.set_metadata(near_id, Color::Black)
					}
					tree.set_metadata(sibling_id, Color::Red);
					tree.rotate(sibling_id, side.opposite());
					sibling_id = tree
						.child_of(parent_id, side.opposite())
						.expect("black height violation: missing sibling");
				}

				trace!("remove fixup under {}: red far nephew", parent_id);
				let parent_color = color(tree, Some(parent_id));
				tree.set_metadata(sibling_id, parent_color);
				tree.set_metadata(parent_id, Color::Black);
				if let Some(far_id) = tree.child_of(sibling_id, side.opposite()) {
					tree.set_metadata(far_id, Color::Black)
				}
				tree.rotate(parent_id, side);

				x = tree.root_id();
				break;
			}
		}

		if let Some(x) = x {
			tree.set_metadata(x, Color::Black)
		}
	}

	fn validate<K, V, T>(tree: &T)
	where
		T: TreeExt<K, V, Self::Metadata> + ?Sized,
	{
		if let Some(root_id) = tree.root_id() {
			if is_red(tree, Some(root_id)) {
				panic!("red root")
			}

			black_height(tree, root_id);
		}
	}
}

/// Checks the red-black properties of the given subtree and returns its black height.
fn black_height<K, V, T>(tree: &T, id: usize) -> usize
where
	T: TreeExt<K, V, Color> + ?Sized,
{
	let node = tree.node(id);
	let red = node.metadata().is_red();

	let mut heights = [Side::Left, Side::Right].map(|side| match node.child(side) {
		Some(child_id) => {
			if red && is_red(tree, Some(child_id)) {
				panic!("red node has a red child")
			}

			black_height(tree, child_id)
		}
		None => 0,
	});

	if heights[0] != heights[1] {
		panic!("black height mismatch")
	}

	if !red {
		heights[0] += 1
	}

	heights[0]
}
