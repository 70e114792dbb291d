use std::{borrow::Borrow, cmp::Ordering, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod item;
mod metadata;

pub use item::Item;
pub use metadata::{Color, Height, Metadata};

/// Side of a child in its parent node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
	Left,
	Right,
}

impl Side {
	#[inline]
	pub fn opposite(self) -> Side {
		match self {
			Side::Left => Side::Right,
			Side::Right => Side::Left,
		}
	}
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Side::Left => write!(f, "left"),
			Side::Right => write!(f, "right"),
		}
	}
}

/// Position under which a node is attached.
///
/// `None` designates the root of the tree.
pub type Slot = Option<(usize, Side)>;

/// Binary tree node.
///
/// Children identifiers are owning edges: a node is owned by its parent only.
/// The parent identifier is a back-link used to walk up the tree.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Node<K, V, M> {
	item: Item<K, V>,
	parent: usize,
	left: Option<usize>,
	right: Option<usize>,
	metadata: M,
}

impl<K, V, M> Node<K, V, M> {
	/// Creates a new detached node.
	#[inline]
	pub fn new(item: Item<K, V>, metadata: M) -> Node<K, V, M> {
		Node {
			item,
			parent: std::usize::MAX,
			left: None,
			right: None,
			metadata,
		}
	}

	#[inline]
	pub fn parent(&self) -> Option<usize> {
		if self.parent == std::usize::MAX {
			None
		} else {
			Some(self.parent)
		}
	}

	#[inline]
	pub fn set_parent(&mut self, p: Option<usize>) {
		self.parent = p.unwrap_or(std::usize::MAX);
	}

	#[inline]
	pub fn left(&self) -> Option<usize> {
		self.left
	}

	#[inline]
	pub fn right(&self) -> Option<usize> {
		self.right
	}

	#[inline]
	pub fn child(&self, side: Side) -> Option<usize> {
		match side {
			Side::Left => self.left,
			Side::Right => self.right,
		}
	}

	#[inline]
	pub fn set_child(&mut self, side: Side, id: Option<usize>) {
		match side {
			Side::Left => self.left = id,
			Side::Right => self.right = id,
		}
	}

	/// Returns the side of the given child, if it is a child of this node.
	#[inline]
	pub fn child_side(&self, id: usize) -> Option<Side> {
		if self.left == Some(id) {
			Some(Side::Left)
		} else if self.right == Some(id) {
			Some(Side::Right)
		} else {
			None
		}
	}

	#[inline]
	pub fn children(&self) -> impl Iterator<Item = usize> {
		self.left.into_iter().chain(self.right)
	}

	#[inline]
	pub fn item(&self) -> &Item<K, V> {
		&self.item
	}

	#[inline]
	pub fn item_mut(&mut self) -> &mut Item<K, V> {
		&mut self.item
	}

	#[inline]
	pub fn key(&self) -> &K {
		self.item.key()
	}

	#[inline]
	pub fn value(&self) -> &V {
		self.item.value()
	}

	/// Replace the item of this node, returning the previous one.
	#[inline]
	pub fn replace_item(&mut self, item: Item<K, V>) -> Item<K, V> {
		std::mem::replace(&mut self.item, item)
	}

	#[inline]
	pub fn metadata(&self) -> &M {
		&self.metadata
	}

	#[inline]
	pub fn metadata_mut(&mut self) -> &mut M {
		&mut self.metadata
	}

	#[inline]
	pub fn into_item(self) -> Item<K, V> {
		self.item
	}

	#[inline]
	pub fn into_parts(self) -> (Item<K, V>, M) {
		(self.item, self.metadata)
	}

	/// Compare the given key with the key of this node.
	///
	/// Returns `None` if the keys are equal,
	/// or the side of the subtree where the key may be found.
	#[inline]
	pub fn direction_of<Q: ?Sized>(&self, key: &Q) -> Option<Side>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		match self.item.cmp_key(key) {
			Ordering::Equal => None,
			Ordering::Greater => Some(Side::Left),
			Ordering::Less => Some(Side::Right),
		}
	}

	/// Write the label of the node in the DOT language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write_label<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		K: std::fmt::Display,
		V: std::fmt::Display,
		M: std::fmt::Debug,
	{
		write!(
			f,
			"{}|{}|{:?}",
			self.item.key(),
			self.item.value(),
			self.metadata
		)
	}

	/// Checks the local properties of the node.
	///
	/// `min` and `max` are the exclusive key bounds inherited from the ancestors.
	#[inline]
	pub fn validate(&self, parent: Option<usize>, min: Option<&K>, max: Option<&K>)
	where
		K: Ord,
	{
		if self.parent() != parent {
			panic!("wrong parent")
		}

		if self.left.is_some() && self.left == self.right {
			panic!("node has the same left and right child")
		}

		if let Some(min) = min {
			if min >= self.key() {
				panic!("node key is smaller than its left bound")
			}
		}

		if let Some(max) = max {
			if max <= self.key() {
				panic!("node key is greater than its right bound")
			}
		}
	}
}
