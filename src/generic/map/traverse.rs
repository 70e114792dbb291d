use super::{TreeExt, TreeMap};
use crate::generic::{node::Node, policy::Policy};
use cc_traits::{SimpleCollectionRef, Slab};
use smallvec::SmallVec;
use std::{collections::VecDeque, fmt, iter::FusedIterator};

/// Tree traversal order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Order {
	/// Node, then left subtree, then right subtree.
	Pre,

	/// Left subtree, then node, then right subtree: ascending key order.
	In,

	/// Left subtree, then right subtree, then node.
	Post,

	/// Breadth first, level by level, left to right.
	Level,
}

impl fmt::Display for Order {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Order::Pre => write!(f, "pre-order"),
			Order::In => write!(f, "in-order"),
			Order::Post => write!(f, "post-order"),
			Order::Level => write!(f, "level-order"),
		}
	}
}

/// Pending nodes. The stacks rarely grow beyond the height of the tree.
enum Frontier {
	Pre(SmallVec<[usize; 32]>),
	In {
		stack: SmallVec<[usize; 32]>,
		current: Option<usize>,
	},
	/// The flag tells if the children of the node have already been pushed.
	Post(SmallVec<[(usize, bool); 32]>),
	Level(VecDeque<usize>),
}

/// Iterator over the bindings of a [`TreeMap`] in a given [`Order`].
///
/// This `struct` is created by the [`TreeMap::traverse`] method.
pub struct Traverse<'a, K, V, P, C> {
	/// The tree reference.
	map: &'a TreeMap<K, V, P, C>,

	frontier: Frontier,

	/// Number of remaining items.
	len: usize,
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> Traverse<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
	pub(crate) fn new(map: &'a TreeMap<K, V, P, C>, order: Order) -> Self {
		let root = map.root_id();
		let frontier = match order {
			Order::Pre => Frontier::Pre(root.into_iter().collect()),
			Order::In => Frontier::In {
				stack: SmallVec::new(),
				current: root,
			},
			Order::Post => Frontier::Post(root.map(|id| (id, false)).into_iter().collect()),
			Order::Level => Frontier::Level(root.into_iter().collect()),
		};

		Traverse {
			map,
			frontier,
			len: map.len(),
		}
	}

	fn next_id(&mut self) -> Option<usize> {
		let map = self.map;
		match &mut self.frontier {
			Frontier::Pre(stack) => {
				let id = stack.pop()?;
				let node = map.node(id);
				stack.extend(node.right());
				stack.extend(node.left());
				Some(id)
			}
			Frontier::In { stack, current } => {
				while let Some(id) = *current {
					stack.push(id);
					*current = map.node(id).left();
				}

				let id = stack.pop()?;
				*current = map.node(id).right();
				Some(id)
			}
			Frontier::Post(stack) => loop {
				let (id, expanded) = stack.pop()?;
				if expanded {
					break Some(id);
				}

				let node = map.node(id);
				stack.push((id, true));
				stack.extend(node.right().map(|r| (r, false)));
				stack.extend(node.left().map(|l| (l, false)));
			},
			Frontier::Level(queue) => {
				let id = queue.pop_front()?;
				queue.extend(map.node(id).children());
				Some(id)
			}
		}
	}
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> Iterator
	for Traverse<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
	type Item = (&'a K, &'a V);

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.len, Some(self.len))
	}

	#[inline]
	fn next(&mut self) -> Option<(&'a K, &'a V)> {
		let id = self.next_id()?;
		self.len -= 1;
		Some(self.map.item(id).as_pair())
	}
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> FusedIterator
	for Traverse<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> ExactSizeIterator
	for Traverse<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
}
