use crate::generic::{
	node::{Item, Node, Slot},
	policy::Policy,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use log::{debug, warn};
use std::{
	borrow::Borrow,
	fmt,
	iter::{DoubleEndedIterator, ExactSizeIterator, FromIterator, FusedIterator},
	marker::PhantomData,
	ops::Index,
};

mod error;
mod ext;
mod traverse;

pub use error::*;
pub use ext::*;
pub use traverse::*;

/// An ordered map based on a self-balancing binary search tree.
///
/// Nodes are allocated in a slab-like container `C`, and linked together by their identifiers.
/// The balancing strategy is given by the policy `P`:
/// [`RedBlack`](crate::generic::RedBlack), [`Avl`](crate::generic::Avl)
/// or [`Unbalanced`](crate::generic::Unbalanced).
///
/// # Basic usage
///
/// ```
/// use balanced_slab::RbTreeMap;
///
/// let mut scores = RbTreeMap::new();
/// scores.insert("alice", 12);
/// scores.insert("bob", 7);
/// scores.insert("carol", 21);
///
/// assert_eq!(scores.get("bob"), Some(&7));
/// assert_eq!(scores.remove("alice"), Some(12));
/// assert_eq!(scores.len(), 2);
///
/// for (name, score) in &scores {
///     println!("{}: {}", name, score);
/// }
/// ```
///
/// # Node limit
///
/// A map may be given a maximum number of nodes with [`TreeMap::with_node_limit`].
/// Once the limit is reached, [`TreeMap::try_insert`] rejects new keys
/// and leaves the tree untouched.
///
/// # Correctness
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative
/// to any other key, as determined by the [`Ord`] trait, changes while it is in the map.
#[derive(Clone)]
pub struct TreeMap<K, V, P, C> {
	/// Allocated and free nodes.
	nodes: C,

	/// Root node id.
	root: Option<usize>,

	/// Number of items in the tree.
	len: usize,

	/// Maximum number of nodes.
	limit: Option<usize>,

	k: PhantomData<K>,
	v: PhantomData<V>,
	p: PhantomData<P>,
}

impl<K, V, P, C> TreeMap<K, V, P, C> {
	/// Create a new empty tree.
	#[inline]
	pub fn new() -> TreeMap<K, V, P, C>
	where
		C: Default,
	{
		TreeMap {
			nodes: Default::default(),
			root: None,
			len: 0,
			limit: None,
			k: PhantomData,
			v: PhantomData,
			p: PhantomData,
		}
	}

	/// Create a new empty tree holding at most `limit` nodes.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::AvlTreeMap;
	///
	/// let mut map = AvlTreeMap::with_node_limit(1);
	/// assert!(map.try_insert(1, "a").is_ok());
	/// assert!(map.try_insert(1, "b").is_ok());
	/// assert!(map.try_insert(2, "c").is_err());
	/// assert_eq!(map.get(&1), Some(&"b"));
	/// ```
	#[inline]
	pub fn with_node_limit(limit: usize) -> TreeMap<K, V, P, C>
	where
		C: Default,
	{
		let mut map = Self::new();
		map.limit = Some(limit);
		map
	}

	#[inline]
	pub fn node_limit(&self) -> Option<usize> {
		self.limit
	}

	/// Set the maximum number of nodes.
	///
	/// Lowering the limit below the current length does not remove anything,
	/// but prevents any new key from being inserted.
	#[inline]
	pub fn set_node_limit(&mut self, limit: Option<usize>) {
		self.limit = limit
	}

	/// Returns `true` if the map contains no elements.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut a = RbTreeMap::new();
	/// assert!(a.is_empty());
	/// a.insert(1, "a");
	/// assert!(!a.is_empty());
	/// ```
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Returns the number of elements in the map.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut a = RbTreeMap::new();
	/// assert_eq!(a.len(), 0);
	/// a.insert(1, "a");
	/// assert_eq!(a.len(), 1);
	/// ```
	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}
}

impl<K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> TreeMap<K, V, P, C>
where
	C: SimpleCollectionRef,
{
	/// Returns a reference to the value corresponding to the key.
	///
	/// The key may be any borrowed form of the map's key type, but the ordering
	/// on the borrowed form *must* match the ordering on the key type.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut map: RbTreeMap<i32, &str> = RbTreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.get(&1), Some(&"a"));
	/// assert_eq!(map.get(&2), None);
	/// ```
	#[inline]
	pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		self.get_key_value(key).map(|(_, value)| value)
	}

	/// Returns the key-value pair corresponding to the supplied key.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut map = RbTreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
	/// assert_eq!(map.get_key_value(&2), None);
	/// ```
	#[inline]
	pub fn get_key_value<Q: ?Sized>(&self, key: &Q) -> Option<(&K, &V)>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		match self.address_of(key) {
			Ok(id) => Some(self.item(id).as_pair()),
			Err(_) => None,
		}
	}

	/// Returns `true` if the map contains a value for the specified key.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut map = RbTreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.contains_key(&1), true);
	/// assert_eq!(map.contains_key(&2), false);
	/// ```
	#[inline]
	pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		self.address_of(key).is_ok()
	}

	/// Returns the first key-value pair in the map.
	/// The key in this pair is the minimum key in the map.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut map = RbTreeMap::new();
	/// assert_eq!(map.first_key_value(), None);
	/// map.insert(1, "b");
	/// map.insert(2, "a");
	/// assert_eq!(map.first_key_value(), Some((&1, &"b")));
	/// ```
	#[inline]
	pub fn first_key_value(&self) -> Option<(&K, &V)> {
		self.first_id().map(|id| self.item(id).as_pair())
	}

	/// Returns the last key-value pair in the map.
	/// The key in this pair is the maximum key in the map.
	#[inline]
	pub fn last_key_value(&self) -> Option<(&K, &V)> {
		self.last_id().map(|id| self.item(id).as_pair())
	}

	/// Height of the tree.
	///
	/// A single node has height `0`, and an empty tree has height `-1`.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::{BstMap, RbTreeMap};
	///
	/// let mut balanced = RbTreeMap::new();
	/// let mut degenerate = BstMap::new();
	/// assert_eq!(balanced.height(), -1);
	///
	/// for i in 0..7 {
	///     balanced.insert(i, ());
	///     degenerate.insert(i, ());
	/// }
	///
	/// assert_eq!(balanced.height(), 3);
	/// assert_eq!(degenerate.height(), 6);
	/// ```
	#[inline]
	pub fn height(&self) -> isize {
		self.subtree_height(self.root)
	}

	/// Gets an iterator over the entries of the map, sorted by key.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut map = RbTreeMap::new();
	/// map.insert(3, "c");
	/// map.insert(2, "b");
	/// map.insert(1, "a");
	///
	/// for (key, value) in map.iter() {
	///     println!("{}: {}", key, value);
	/// }
	///
	/// let (first_key, first_value) = map.iter().next().unwrap();
	/// assert_eq!((*first_key, *first_value), (1, "a"));
	/// ```
	#[inline]
	pub fn iter(&self) -> Iter<K, V, P, C> {
		Iter::new(self)
	}

	/// Gets an iterator over the keys of the map, in sorted order.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut a = RbTreeMap::new();
	/// a.insert(2, "b");
	/// a.insert(1, "a");
	///
	/// let keys: Vec<_> = a.keys().cloned().collect();
	/// assert_eq!(keys, [1, 2]);
	/// ```
	#[inline]
	pub fn keys(&self) -> Keys<K, V, P, C> {
		Keys { inner: self.iter() }
	}

	/// Gets an iterator over the values of the map, in order by key.
	#[inline]
	pub fn values(&self) -> Values<K, V, P, C> {
		Values { inner: self.iter() }
	}

	/// Visit every binding of the map in the given order.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::{generic::Order, RbTreeMap};
	///
	/// let map: RbTreeMap<_, _> = (1..=3).map(|i| (i, ())).collect();
	///
	/// let pre: Vec<_> = map.traverse(Order::Pre).map(|(k, _)| *k).collect();
	/// assert_eq!(pre, [2, 1, 3]);
	///
	/// let post: Vec<_> = map.traverse(Order::Post).map(|(k, _)| *k).collect();
	/// assert_eq!(post, [1, 3, 2]);
	/// ```
	#[inline]
	pub fn traverse(&self, order: Order) -> Traverse<K, V, P, C> {
		Traverse::new(self, order)
	}

	/// Checks every invariant of the tree:
	/// the key ordering, the parent links, the item count and the balance invariant of the policy.
	///
	/// Panics if one of them does not hold.
	#[inline]
	pub fn validate(&self)
	where
		K: Ord,
	{
		self.validate_structure();
		P::validate::<K, V, Self>(self)
	}

	/// Write the tree in the DOT graph descrption language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		K: std::fmt::Display,
		V: std::fmt::Display,
	{
		write!(f, "digraph tree {{\n\tnode [shape=record];\n")?;
		if let Some(id) = self.root {
			self.dot_write_node(f, id)?
		}
		write!(f, "}}")
	}

	#[cfg(feature = "dot")]
	fn dot_write_node<W: std::io::Write>(&self, f: &mut W, id: usize) -> std::io::Result<()>
	where
		K: std::fmt::Display,
		V: std::fmt::Display,
	{
		let name = format!("n{}", id);
		let node = self.node(id);

		write!(f, "\t{} [label=\"", name)?;
		node.dot_write_label(f)?;
		writeln!(f, "({})\"];", id)?;

		for child_id in node.children() {
			self.dot_write_node(f, child_id)?;
			writeln!(f, "\t{} -> n{}", name, child_id)?;
		}

		Ok(())
	}
}

impl<K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> TreeMap<K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Clears the map, removing all elements.
	///
	/// The node limit is preserved.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut a = RbTreeMap::new();
	/// a.insert(1, "a");
	/// a.clear();
	/// assert!(a.is_empty());
	/// ```
	#[inline]
	pub fn clear(&mut self)
	where
		C: cc_traits::Clear,
	{
		self.root = None;
		self.len = 0;
		self.nodes.clear()
	}

	/// Returns a mutable reference to the value corresponding to the key.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut map = RbTreeMap::new();
	/// map.insert(1, "a");
	/// if let Some(x) = map.get_mut(&1) {
	///     *x = "b";
	/// }
	/// assert_eq!(map[&1], "b");
	/// ```
	#[inline]
	pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		match self.address_of(key) {
			Ok(id) => Some(self.item_mut(id).value_mut()),
			Err(_) => None,
		}
	}

	/// Insert a key-value pair in the tree.
	///
	/// If the map already contains the key, its value is replaced and the old value returned.
	/// The stored key is left untouched.
	///
	/// # Panics
	///
	/// Panics if the key is new and the node limit of the map is reached.
	/// See [`TreeMap::try_insert`] for a non-panicking version.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut map = RbTreeMap::new();
	/// assert_eq!(map.insert(37, "a"), None);
	/// assert_eq!(map.is_empty(), false);
	///
	/// map.insert(37, "b");
	/// assert_eq!(map.insert(37, "c"), Some("b"));
	/// assert_eq!(map[&37], "c");
	/// ```
	#[inline]
	pub fn insert(&mut self, key: K, value: V) -> Option<V>
	where
		K: Ord,
	{
		match self.try_insert(key, value) {
			Ok(old_value) => old_value,
			Err(e) => panic!("{}", e),
		}
	}

	/// Try to insert a key-value pair in the tree.
	///
	/// Replacing the value of an existing key never allocates and always succeeds.
	/// If the key is new and no node can be allocated for it,
	/// the binding is returned in the error and the tree is left unchanged.
	#[inline]
	pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, AllocError<K, V>>
	where
		K: Ord,
	{
		match self.address_of(&key) {
			Ok(id) => Ok(Some(self.item_mut(id).set_value(value))),
			Err(slot) => {
				if let Some(limit) = self.limit {
					if self.len >= limit {
						warn!("node limit of {} reached, insertion rejected", limit);
						return Err(AllocError::new(key, value, limit));
					}
				}

				self.insert_at(slot, Item::new(key, value));
				Ok(None)
			}
		}
	}

	/// Attach a new node holding `item` at the given free slot, then rebalance the tree.
	///
	/// Returns the identifier of the new node.
	/// It is a logic error to use a slot that is not free,
	/// or that is not where the item key belongs.
	#[inline]
	pub fn insert_at(&mut self, slot: Slot, item: Item<K, V>) -> usize {
		let id = self.attach(slot, item, P::leaf_metadata());
		debug!("attached node {} under {:?}", id, slot);
		P::rebalance_insert::<K, V, Self>(self, id);
		id
	}

	/// Remove the item of the given node, then rebalance the tree.
	///
	/// Note that the node `id` itself may survive with the item of its successor.
	#[inline]
	pub fn remove_at(&mut self, id: usize) -> Item<K, V> {
		let (item, splice) = self.detach(id);
		debug!("spliced out node at {:?}", splice.slot);
		P::rebalance_remove::<K, V, Self>(self, splice);
		item
	}

	/// Removes a key from the map, returning the value at the key if the key
	/// was previously in the map.
	///
	/// Removing an absent key is a no-op.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut map = RbTreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.remove(&1), Some("a"));
	/// assert_eq!(map.remove(&1), None);
	/// ```
	#[inline]
	pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		self.remove_entry(key).map(|(_, value)| value)
	}

	/// Removes a key from the map, returning the stored key and value if the key
	/// was previously in the map.
	#[inline]
	pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		match self.address_of(key) {
			Ok(id) => Some(self.remove_at(id).into_pair()),
			Err(_) => None,
		}
	}

	/// Removes and returns the first element in the map.
	/// The key of this element is the minimum key that was in the map.
	///
	/// # Example
	///
	/// Draining elements in ascending order, while keeping a usable map each iteration.
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut map = RbTreeMap::new();
	/// map.insert(1, "a");
	/// map.insert(2, "b");
	/// while let Some((key, _val)) = map.pop_first() {
	///     assert!(map.iter().all(|(k, _v)| *k > key));
	/// }
	/// assert!(map.is_empty());
	/// ```
	#[inline]
	pub fn pop_first(&mut self) -> Option<(K, V)> {
		let id = self.first_id()?;
		Some(self.remove_at(id).into_pair())
	}

	/// Removes and returns the last element in the map.
	/// The key of this element is the maximum key that was in the map.
	#[inline]
	pub fn pop_last(&mut self) -> Option<(K, V)> {
		let id = self.last_id()?;
		Some(self.remove_at(id).into_pair())
	}

	/// Gets a mutable iterator over the entries of the map, sorted by key.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::RbTreeMap;
	///
	/// let mut map = RbTreeMap::new();
	/// map.insert("a", 1);
	/// map.insert("b", 2);
	/// map.insert("c", 3);
	///
	/// // add 10 to the value if the key isn't "a"
	/// for (key, value) in map.iter_mut() {
	///     if key != &"a" {
	///         *value += 10;
	///     }
	/// }
	///
	/// assert_eq!(map[&"c"], 13);
	/// ```
	#[inline]
	pub fn iter_mut(&mut self) -> IterMut<K, V, P, C> {
		IterMut::new(self)
	}

	/// Gets a mutable iterator over the values of the map, in order by key.
	///
	/// # Example
	///
	/// ```
	/// use balanced_slab::AvlTreeMap;
	///
	/// let mut a = AvlTreeMap::new();
	/// a.insert(1, String::from("hello"));
	/// a.insert(2, String::from("goodbye"));
	///
	/// for value in a.values_mut() {
	///     value.push_str("!");
	/// }
	///
	/// let values: Vec<String> = a.values().cloned().collect();
	/// assert_eq!(values, [String::from("hello!"),
	///                     String::from("goodbye!")]);
	/// ```
	#[inline]
	pub fn values_mut(&mut self) -> ValuesMut<K, V, P, C> {
		ValuesMut {
			inner: self.iter_mut(),
		}
	}
}

impl<K, Q: ?Sized, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> Index<&Q>
	for TreeMap<K, V, P, C>
where
	K: Borrow<Q>,
	Q: Ord,
	C: SimpleCollectionRef,
{
	type Output = V;

	/// Returns a reference to the value corresponding to the supplied key.
	///
	/// # Panics
	///
	/// Panics if the key is not present in the map.
	#[inline]
	fn index(&self, key: &Q) -> &V {
		self.get(key).expect("no entry found for key")
	}
}

impl<K, L: PartialEq<K>, V, W: PartialEq<V>, P, Q, C, D> PartialEq<TreeMap<L, W, Q, D>>
	for TreeMap<K, V, P, C>
where
	P: Policy,
	Q: Policy,
	C: Slab<Node<K, V, P::Metadata>> + SimpleCollectionRef,
	D: Slab<Node<L, W, Q::Metadata>> + SimpleCollectionRef,
{
	fn eq(&self, other: &TreeMap<L, W, Q, D>) -> bool {
		self.len() == other.len()
			&& self
				.iter()
				.zip(other.iter())
				.all(|((k, v), (l, w))| l == k && w == v)
	}
}

impl<K: Eq, V: Eq, P: Policy, C: Slab<Node<K, V, P::Metadata>>> Eq for TreeMap<K, V, P, C> where
	C: SimpleCollectionRef
{
}

impl<K: fmt::Debug, V: fmt::Debug, P: Policy, C: Slab<Node<K, V, P::Metadata>>> fmt::Debug
	for TreeMap<K, V, P, C>
where
	C: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

impl<K, V, P, C: Default> Default for TreeMap<K, V, P, C> {
	#[inline]
	fn default() -> Self {
		TreeMap::new()
	}
}

impl<K: Ord, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>> + Default> FromIterator<(K, V)>
	for TreeMap<K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn from_iter<T>(iter: T) -> TreeMap<K, V, P, C>
	where
		T: IntoIterator<Item = (K, V)>,
	{
		let mut map = TreeMap::new();

		for (key, value) in iter {
			map.insert(key, value);
		}

		map
	}
}

impl<K: Ord, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> Extend<(K, V)>
	for TreeMap<K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn extend<T>(&mut self, iter: T)
	where
		T: IntoIterator<Item = (K, V)>,
	{
		for (key, value) in iter {
			self.insert(key, value);
		}
	}
}

pub struct Iter<'a, K, V, P, C> {
	/// The tree reference.
	map: &'a TreeMap<K, V, P, C>,

	/// Next node from the front.
	front: Option<usize>,

	/// Next node from the back.
	back: Option<usize>,

	/// Number of remaining items.
	len: usize,
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> Iter<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn new(map: &'a TreeMap<K, V, P, C>) -> Self {
		Iter {
			map,
			front: map.first_id(),
			back: map.last_id(),
			len: map.len(),
		}
	}
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> Iterator for Iter<'a, K, V, P, C>
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
		if self.len == 0 {
			return None;
		}

		let id = self.front?;
		self.len -= 1;
		self.front = self.map.next_id(id);
		Some(self.map.item(id).as_pair())
	}
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> FusedIterator
	for Iter<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> ExactSizeIterator
	for Iter<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> DoubleEndedIterator
	for Iter<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
		if self.len == 0 {
			return None;
		}

		let id = self.back?;
		self.len -= 1;
		self.back = self.map.previous_id(id);
		Some(self.map.item(id).as_pair())
	}
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> IntoIterator
	for &'a TreeMap<K, V, P, C>
where
	C: SimpleCollectionRef,
{
	type IntoIter = Iter<'a, K, V, P, C>;
	type Item = (&'a K, &'a V);

	#[inline]
	fn into_iter(self) -> Iter<'a, K, V, P, C> {
		self.iter()
	}
}

pub struct IterMut<'a, K, V, P, C> {
	/// The tree reference.
	map: &'a mut TreeMap<K, V, P, C>,

	front: Option<usize>,

	back: Option<usize>,

	len: usize,
}

impl<'a, K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> IterMut<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn new(map: &'a mut TreeMap<K, V, P, C>) -> Self {
		let front = map.first_id();
		let back = map.last_id();
		let len = map.len();
		IterMut {
			map,
			front,
			back,
			len,
		}
	}

	#[inline]
	fn yield_item(&mut self, id: usize) -> &'a mut Item<K, V> {
		let item: *mut Item<K, V> = self.map.item_mut(id);
		// each node is yielded at most once, so the returned references never alias.
		unsafe { &mut *item }
	}

	#[inline]
	fn next_item(&mut self) -> Option<&'a mut Item<K, V>> {
		if self.len == 0 {
			return None;
		}

		let id = self.front?;
		self.len -= 1;
		self.front = self.map.next_id(id);
		Some(self.yield_item(id))
	}

	#[inline]
	fn next_back_item(&mut self) -> Option<&'a mut Item<K, V>> {
		if self.len == 0 {
			return None;
		}

		let id = self.back?;
		self.len -= 1;
		self.back = self.map.previous_id(id);
		Some(self.yield_item(id))
	}
}

impl<'a, K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> Iterator
	for IterMut<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = (&'a K, &'a mut V);

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.len, Some(self.len))
	}

	#[inline]
	fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
		self.next_item().map(Item::as_pair_mut)
	}
}

impl<'a, K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> FusedIterator
	for IterMut<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<'a, K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> ExactSizeIterator
	for IterMut<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<'a, K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> DoubleEndedIterator
	for IterMut<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> {
		self.next_back_item().map(Item::as_pair_mut)
	}
}

impl<'a, K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> IntoIterator
	for &'a mut TreeMap<K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type IntoIter = IterMut<'a, K, V, P, C>;
	type Item = (&'a K, &'a mut V);

	#[inline]
	fn into_iter(self) -> IterMut<'a, K, V, P, C> {
		self.iter_mut()
	}
}

/// An owning iterator over the entries of a [`TreeMap`], sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`TreeMap`]
/// (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V, P, C> {
	/// Remaining nodes.
	nodes: C,

	/// Identifiers of the remaining nodes, in key order.
	ids: std::vec::IntoIter<usize>,

	k: PhantomData<K>,
	v: PhantomData<V>,
	p: PhantomData<P>,
}

impl<K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> IntoIter<K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	pub fn new(map: TreeMap<K, V, P, C>) -> Self {
		let mut ids = Vec::with_capacity(map.len());
		let mut current = map.first_id();
		while let Some(id) = current {
			ids.push(id);
			current = map.next_id(id);
		}

		IntoIter {
			nodes: map.nodes,
			ids: ids.into_iter(),
			k: PhantomData,
			v: PhantomData,
			p: PhantomData,
		}
	}

	#[inline]
	fn take(&mut self, id: usize) -> (K, V) {
		self.nodes
			.remove(id)
			.expect("unknown node identifier")
			.into_item()
			.into_pair()
	}
}

impl<K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> Iterator for IntoIter<K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = (K, V);

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.ids.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<(K, V)> {
		let id = self.ids.next()?;
		Some(self.take(id))
	}
}

impl<K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> FusedIterator
	for IntoIter<K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> ExactSizeIterator
	for IntoIter<K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> DoubleEndedIterator
	for IntoIter<K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<(K, V)> {
		let id = self.ids.next_back()?;
		Some(self.take(id))
	}
}

impl<K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> IntoIterator for TreeMap<K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type IntoIter = IntoIter<K, V, P, C>;
	type Item = (K, V);

	#[inline]
	fn into_iter(self) -> IntoIter<K, V, P, C> {
		IntoIter::new(self)
	}
}

pub struct Keys<'a, K, V, P, C> {
	inner: Iter<'a, K, V, P, C>,
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> Iterator for Keys<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a K;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a K> {
		self.inner.next().map(|(k, _)| k)
	}
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> DoubleEndedIterator
	for Keys<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a K> {
		self.inner.next_back().map(|(k, _)| k)
	}
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> ExactSizeIterator
	for Keys<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
}

pub struct Values<'a, K, V, P, C> {
	inner: Iter<'a, K, V, P, C>,
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> Iterator
	for Values<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a V;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a V> {
		self.inner.next().map(|(_, v)| v)
	}
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> DoubleEndedIterator
	for Values<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a V> {
		self.inner.next_back().map(|(_, v)| v)
	}
}

impl<'a, K, V, P: Policy, C: Slab<Node<K, V, P::Metadata>>> ExactSizeIterator
	for Values<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
{
}

pub struct ValuesMut<'a, K, V, P, C> {
	inner: IterMut<'a, K, V, P, C>,
}

impl<'a, K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> Iterator
	for ValuesMut<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = &'a mut V;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a mut V> {
		self.inner.next().map(|(_, v)| v)
	}
}

impl<'a, K, V, P: Policy, C: SlabMut<Node<K, V, P::Metadata>>> ExactSizeIterator
	for ValuesMut<'a, K, V, P, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

#[cfg(all(test, feature = "std-slab"))]
mod tests {
	use super::*;
	use crate::generic::{node::Side, Color, RedBlack, Unbalanced};
	use slab::Slab as StdSlab;

	type Bst = TreeMap<i32, i32, Unbalanced, StdSlab<Node<i32, i32, ()>>>;

	fn keys_in(map: &Bst, order: Order) -> Vec<i32> {
		map.traverse(order).map(|(k, _)| *k).collect()
	}

	#[test]
	fn rotations_preserve_order() {
		let mut map: Bst = vec![(2, 0), (1, 0), (4, 0), (3, 0), (5, 0)]
			.into_iter()
			.collect();

		let root = map.root_id().unwrap();
		let new_root = map.rotate_left(root);
		map.validate();
		assert_eq!(map.root_id(), Some(new_root));
		assert_eq!(map.item(new_root).key(), &4);
		assert_eq!(keys_in(&map, Order::Pre), [4, 2, 1, 3, 5]);

		let back = map.rotate_right(new_root);
		map.validate();
		assert_eq!(back, root);
		assert_eq!(keys_in(&map, Order::Pre), [2, 1, 4, 3, 5]);
		assert_eq!(keys_in(&map, Order::In), [1, 2, 3, 4, 5]);
	}

	#[test]
	fn rotation_below_the_root() {
		let mut map: Bst = vec![(1, 0), (2, 0), (3, 0), (4, 0)].into_iter().collect();
		assert_eq!(map.height(), 3);

		let two = map.address_of(&2).unwrap();
		let three = map.rotate(two, Side::Left);
		map.validate();
		assert_eq!(map.parent_of(three), map.root_id());
		assert_eq!(map.item(map.child_of(three, Side::Left).unwrap()).key(), &2);
		assert_eq!(map.height(), 2);
	}

	#[test]
	fn rotation_without_pivot_is_noop() {
		let mut map: Bst = vec![(1, 0)].into_iter().collect();
		let root = map.root_id().unwrap();
		assert_eq!(map.rotate_left(root), root);
		assert_eq!(map.rotate_right(root), root);
		map.validate();
	}

	#[test]
	fn detach_two_children_uses_successor() {
		let mut map: Bst = vec![(50, 0), (30, 1), (70, 2), (60, 3), (80, 4)]
			.into_iter()
			.collect();

		let root = map.root_id().unwrap();
		let (item, splice) = map.detach(root);
		assert_eq!(item.into_pair(), (50, 0));
		assert_eq!(map.item(root).key(), &60);
		assert_eq!(splice.child, None);
		assert!(matches!(splice.slot, Some((_, Side::Left))));
		map.validate();
	}

	fn first_item_mut<'a, K, V, M, T>(tree: &'a mut T) -> Option<&'a mut Item<K, V>>
	where
		M: crate::generic::node::Metadata + 'a,
		T: TreeExtMut<K, V, M>,
	{
		let id = tree.first_id()?;
		Some(tree.item_mut(id))
	}

	fn root_metadata<'a, K: 'a, V: 'a, M, T: TreeExt<K, V, M>>(tree: &'a T) -> Option<&'a M> {
		tree.metadata_of(tree.root_id())
	}

	#[test]
	fn generic_accessors() {
		let mut map: TreeMap<i32, i32, RedBlack, StdSlab<Node<i32, i32, Color>>> =
			vec![(2, 20), (1, 10), (3, 30)].into_iter().collect();

		assert_eq!(root_metadata(&map), Some(&Color::Black));
		assert_eq!(root_metadata(&Bst::new()), None);

		*first_item_mut(&mut map).unwrap().value_mut() += 1;
		assert_eq!(map.get(&1), Some(&11));

		let root = map.root_id().unwrap();
		assert_eq!(map.item(root).as_pair(), (&2, &20));
	}

	#[test]
	fn red_black_root_is_black() {
		let mut map: TreeMap<i32, (), RedBlack, StdSlab<Node<i32, (), Color>>> = TreeMap::new();
		map.insert(1, ());
		let root = map.root_id().unwrap();
		assert_eq!(*map.node(root).metadata(), Color::Black);

		map.insert(2, ());
		let child = map.child_of(root, Side::Right).unwrap();
		assert_eq!(*map.node(child).metadata(), Color::Red);
		map.validate();
	}
}
