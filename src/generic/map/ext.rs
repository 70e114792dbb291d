use crate::generic::{
	map::TreeMap,
	node::{Item, Metadata, Node, Side, Slot},
	policy::Policy,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use log::trace;
use std::borrow::Borrow;

/// Outcome of splicing a node out of the tree.
///
/// This is what a balancing policy needs to know to repair the tree
/// after a removal.
#[derive(Clone, Copy, Debug)]
pub struct Splice<M> {
	/// Position the removed node occupied.
	pub slot: Slot,

	/// Node that took the place of the removed node, if any.
	pub child: Option<usize>,

	/// Metadata of the removed node.
	pub removed: M,
}

impl<M> Splice<M> {
	/// Parent of the spliced position.
	#[inline]
	pub fn parent(&self) -> Option<usize> {
		self.slot.map(|(parent_id, _)| parent_id)
	}
}

/// Extension methods.
///
/// This trait can be imported to access the internal methods of the tree.
/// These methods are not intended to be directly called by users, but can be used to
/// extend the data structure with new functionalities.
/// The balancing policies are written against this trait.
pub trait TreeExt<K, V, M> {
	/// Get the root node id.
	///
	/// Returns `None` if the tree is empty.
	fn root_id(&self) -> Option<usize>;

	/// Number of nodes in the tree.
	fn item_count(&self) -> usize;

	/// Get the node associated to the given `id`.
	///
	/// Panics if `id` does not identify a node of the tree.
	fn node(&self, id: usize) -> &Node<K, V, M>;

	#[inline]
	fn item<'a>(&'a self, id: usize) -> &'a Item<K, V>
	where
		M: 'a,
	{
		self.node(id).item()
	}

	/// Metadata of an optional node.
	#[inline]
	fn metadata_of<'a>(&'a self, id: Option<usize>) -> Option<&'a M>
	where
		K: 'a,
		V: 'a,
	{
		id.map(|id| self.node(id).metadata())
	}

	#[inline]
	fn parent_of(&self, id: usize) -> Option<usize> {
		self.node(id).parent()
	}

	#[inline]
	fn child_of(&self, id: usize, side: Side) -> Option<usize> {
		self.node(id).child(side)
	}

	/// Position of the given node in the tree: its parent and the side it hangs on.
	///
	/// Returns `None` for the root.
	#[inline]
	fn slot_of(&self, id: usize) -> Slot {
		let parent_id = self.node(id).parent()?;
		let side = self
			.node(parent_id)
			.child_side(id)
			.expect("node is not a child of its parent");
		Some((parent_id, side))
	}

	/// Find the node holding the given key.
	///
	/// If no such node exists, returns the slot where the key should be attached.
	#[inline]
	fn address_of<Q: ?Sized>(&self, key: &Q) -> Result<usize, Slot>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		let mut slot = None;
		let mut current = self.root_id();

		while let Some(id) = current {
			let node = self.node(id);
			match node.direction_of(key) {
				Some(side) => {
					slot = Some((id, side));
					current = node.child(side)
				}
				None => return Ok(id),
			}
		}

		Err(slot)
	}

	/// Left-most node of the subtree rooted in `id`.
	#[inline]
	fn leftmost_in(&self, mut id: usize) -> usize {
		while let Some(left_id) = self.node(id).left() {
			id = left_id
		}

		id
	}

	/// Right-most node of the subtree rooted in `id`.
	#[inline]
	fn rightmost_in(&self, mut id: usize) -> usize {
		while let Some(right_id) = self.node(id).right() {
			id = right_id
		}

		id
	}

	/// Node holding the smallest key.
	#[inline]
	fn first_id(&self) -> Option<usize> {
		self.root_id().map(|id| self.leftmost_in(id))
	}

	/// Node holding the greatest key.
	#[inline]
	fn last_id(&self) -> Option<usize> {
		self.root_id().map(|id| self.rightmost_in(id))
	}

	/// In-order successor of the given node.
	#[inline]
	fn next_id(&self, mut id: usize) -> Option<usize> {
		if let Some(right_id) = self.node(id).right() {
			return Some(self.leftmost_in(right_id));
		}

		loop {
			match self.slot_of(id)? {
				(parent_id, Side::Left) => return Some(parent_id),
				(parent_id, Side::Right) => id = parent_id,
			}
		}
	}

	/// In-order predecessor of the given node.
	#[inline]
	fn previous_id(&self, mut id: usize) -> Option<usize> {
		if let Some(left_id) = self.node(id).left() {
			return Some(self.rightmost_in(left_id));
		}

		loop {
			match self.slot_of(id)? {
				(parent_id, Side::Right) => return Some(parent_id),
				(parent_id, Side::Left) => id = parent_id,
			}
		}
	}

	/// Height of the subtree rooted in the given node, `-1` if absent.
	///
	/// Computed level by level, without relying on any cached metric.
	fn subtree_height(&self, id: Option<usize>) -> isize {
		let mut height = -1;
		let mut level: Vec<usize> = id.into_iter().collect();

		while !level.is_empty() {
			height += 1;
			level = level
				.into_iter()
				.flat_map(|id| self.node(id).children())
				.collect();
		}

		height
	}

	/// Checks the binary-search-tree property, the parent links and the item count.
	///
	/// Panics if one of them does not hold.
	fn validate_structure(&self)
	where
		K: Ord,
	{
		let count = match self.root_id() {
			Some(id) => self.validate_node(id, None, None, None),
			None => 0,
		};

		if count != self.item_count() {
			panic!("wrong item count")
		}
	}

	/// Validate the given node and returns the number of nodes in its subtree.
	fn validate_node<'a>(
		&'a self,
		id: usize,
		parent: Option<usize>,
		min: Option<&'a K>,
		max: Option<&'a K>,
	) -> usize
	where
		K: Ord,
	{
		let node = self.node(id);
		node.validate(parent, min, max);

		let mut count = 1;

		if let Some(left_id) = node.left() {
			count += self.validate_node(left_id, Some(id), min, Some(node.key()))
		}

		if let Some(right_id) = node.right() {
			count += self.validate_node(right_id, Some(id), Some(node.key()), max)
		}

		count
	}
}

/// Mutable extension methods.
///
/// Includes the rotation primitives shared by every balancing policy.
pub trait TreeExtMut<K, V, M: Metadata>: TreeExt<K, V, M> {
	/// Set the new known number of items in the tree.
	fn set_len(&mut self, len: usize);

	fn set_root_id(&mut self, id: Option<usize>);

	/// Get the node associated to the given `id` mutably.
	///
	/// Panics if `id` does not identify a node of the tree.
	fn node_mut(&mut self, id: usize) -> &mut Node<K, V, M>;

	/// Store a new node and return its identifier.
	///
	/// The node is not linked to the tree.
	fn allocate_node(&mut self, node: Node<K, V, M>) -> usize;

	/// Release the given node identifier and return the node it used to identify.
	fn release_node(&mut self, id: usize) -> Node<K, V, M>;

	#[inline]
	fn item_mut<'a>(&'a mut self, id: usize) -> &'a mut Item<K, V>
	where
		M: 'a,
	{
		self.node_mut(id).item_mut()
	}

	#[inline]
	fn set_metadata(&mut self, id: usize, metadata: M) {
		*self.node_mut(id).metadata_mut() = metadata
	}

	/// Recompute the metadata of the given node from its children.
	#[inline]
	fn refresh(&mut self, id: usize) {
		let node = self.node(id);
		let left = self.metadata_of(node.left()).copied();
		let right = self.metadata_of(node.right()).copied();
		self.node_mut(id)
			.metadata_mut()
			.refresh(left.as_ref(), right.as_ref())
	}

	/// Hang `child` at the given slot (or make it the root),
	/// updating the child's parent link.
	#[inline]
	fn link(&mut self, slot: Slot, child: Option<usize>) {
		match slot {
			Some((parent_id, side)) => self.node_mut(parent_id).set_child(side, child),
			None => self.set_root_id(child),
		}

		if let Some(child_id) = child {
			self.node_mut(child_id)
				.set_parent(slot.map(|(parent_id, _)| parent_id))
		}
	}

	/// Rotate the subtree rooted in `id` in the given direction.
	///
	/// The pivot is the child of `id` on the opposite side of `direction`:
	/// it takes the place of `id`, which becomes its child on the `direction` side.
	/// The pivot's inner child is moved under `id`.
	/// Returns the new root of the subtree,
	/// or `id` itself if there is no pivot to rotate with.
	///
	/// ```text
	///         x          rotate(x, Left)          y
	///        / \        ---------------->        / \
	///       a   y                               x   c
	///          / \      <----------------      / \
	///         b   c      rotate(y, Right)     a   b
	/// ```
	fn rotate(&mut self, id: usize, direction: Side) -> usize {
		let pivot_side = direction.opposite();
		let pivot_id = match self.child_of(id, pivot_side) {
			Some(pivot_id) => pivot_id,
			None => return id,
		};

		trace!("rotate {} around node {}", direction, id);

		let slot = self.slot_of(id);
		let inner = self.child_of(pivot_id, direction);

		self.link(Some((id, pivot_side)), inner);
		self.link(slot, Some(pivot_id));
		self.link(Some((pivot_id, direction)), Some(id));

		self.refresh(id);
		self.refresh(pivot_id);

		pivot_id
	}

	/// Left rotation: the right child of `id` becomes the subtree root.
	#[inline]
	fn rotate_left(&mut self, id: usize) -> usize {
		self.rotate(id, Side::Left)
	}

	/// Right rotation: the left child of `id` becomes the subtree root.
	#[inline]
	fn rotate_right(&mut self, id: usize) -> usize {
		self.rotate(id, Side::Right)
	}

	/// Allocate a node for the given item and attach it at the given free slot.
	///
	/// The node is allocated before the tree is touched.
	/// No rebalancing is performed.
	fn attach(&mut self, slot: Slot, item: Item<K, V>, metadata: M) -> usize {
		let id = self.allocate_node(Node::new(item, metadata));
		self.link(slot, Some(id));
		let len = self.item_count() + 1;
		self.set_len(len);
		id
	}

	/// Remove the item of the given node from the tree.
	///
	/// If the node has two children, its in-order successor is physically removed
	/// instead, after its item has been moved into the node `id`.
	/// No rebalancing is performed.
	fn detach(&mut self, id: usize) -> (Item<K, V>, Splice<M>) {
		let node = self.node(id);
		let target_id = match (node.left(), node.right()) {
			(Some(_), Some(right_id)) => self.leftmost_in(right_id),
			_ => id,
		};

		let target = self.node(target_id);
		let child = target.left().or_else(|| target.right());
		let slot = self.slot_of(target_id);

		self.link(slot, child);
		let (item, removed) = self.release_node(target_id).into_parts();
		let len = self.item_count() - 1;
		self.set_len(len);

		let item = if target_id == id {
			item
		} else {
			self.node_mut(id).replace_item(item)
		};

		(
			item,
			Splice {
				slot,
				child,
				removed,
			},
		)
	}
}

impl<K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> TreeExt<K, V, P::Metadata>
	for TreeMap<K, V, P, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn root_id(&self) -> Option<usize> {
		self.root
	}

	#[inline]
	fn item_count(&self) -> usize {
		self.len
	}

	#[inline]
	fn node(&self, id: usize) -> &Node<K, V, P::Metadata> {
		C::into_ref(self.nodes.get(id).expect("unknown node identifier"))
	}
}

impl<K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> TreeExtMut<K, V, P::Metadata>
	for TreeMap<K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn set_len(&mut self, new_len: usize) {
		self.len = new_len
	}

	#[inline]
	fn set_root_id(&mut self, id: Option<usize>) {
		self.root = id
	}

	#[inline]
	fn node_mut(&mut self, id: usize) -> &mut Node<K, V, P::Metadata> {
		C::into_mut(self.nodes.get_mut(id).expect("unknown node identifier"))
	}

	#[inline]
	fn allocate_node(&mut self, node: Node<K, V, P::Metadata>) -> usize {
		self.nodes.insert(node)
	}

	#[inline]
	fn release_node(&mut self, id: usize) -> Node<K, V, P::Metadata> {
		self.nodes.remove(id).expect("unknown node identifier")
	}
}
