use std::fmt;

/// Error returned by [`TreeMap::try_insert`](super::TreeMap::try_insert)
/// when no node can be allocated for a new key.
///
/// The tree is left untouched and the rejected binding is handed back.
pub struct AllocError<K, V> {
	key: K,
	value: V,
	limit: usize,
}

impl<K, V> AllocError<K, V> {
	#[inline]
	pub(crate) fn new(key: K, value: V, limit: usize) -> Self {
		AllocError { key, value, limit }
	}

	#[inline]
	pub fn key(&self) -> &K {
		&self.key
	}

	#[inline]
	pub fn value(&self) -> &V {
		&self.value
	}

	/// Node limit of the map that rejected the binding.
	#[inline]
	pub fn limit(&self) -> usize {
		self.limit
	}

	/// Take back the rejected binding.
	#[inline]
	pub fn into_inner(self) -> (K, V) {
		(self.key, self.value)
	}
}

impl<K, V> fmt::Debug for AllocError<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("AllocError")
			.field("limit", &self.limit)
			.finish_non_exhaustive()
	}
}

impl<K, V> fmt::Display for AllocError<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "node limit of {} reached", self.limit)
	}
}

impl<K, V> std::error::Error for AllocError<K, V> {}
