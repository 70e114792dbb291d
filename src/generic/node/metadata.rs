use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-node balancing information.
///
/// Rotations call [`Metadata::refresh`] on the two nodes they relink,
/// the lowered node first, so that metrics cached from the children
/// (such as the node height) stay up to date.
pub trait Metadata: Copy + fmt::Debug {
	/// Recompute the cached metric from the metadata of the children.
	///
	/// `None` stands for an absent child.
	#[inline]
	fn refresh(&mut self, _left: Option<&Self>, _right: Option<&Self>) {}
}

/// The baseline tree carries nothing.
impl Metadata for () {}

/// Red-black node color.
///
/// Absent children are considered black.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Color {
	Red,
	Black,
}

impl Color {
	#[inline]
	pub fn is_red(&self) -> bool {
		*self == Color::Red
	}

	/// Color of an optional node.
	#[inline]
	pub fn of(color: Option<&Color>) -> Color {
		color.copied().unwrap_or(Color::Black)
	}
}

impl Metadata for Color {}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Color::Red => write!(f, "red"),
			Color::Black => write!(f, "black"),
		}
	}
}

/// Height of an AVL node.
///
/// A leaf has height `0` and an absent node has height `-1`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Height(isize);

impl Height {
	/// Height of a freshly inserted node.
	pub const LEAF: Height = Height(0);

	#[inline]
	pub fn get(&self) -> isize {
		self.0
	}

	/// Height of an optional node.
	#[inline]
	pub fn of(height: Option<&Height>) -> isize {
		height.map(Height::get).unwrap_or(-1)
	}
}

impl Metadata for Height {
	#[inline]
	fn refresh(&mut self, left: Option<&Self>, right: Option<&Self>) {
		self.0 = 1 + std::cmp::max(Height::of(left), Height::of(right))
	}
}

impl fmt::Display for Height {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.0.fmt(f)
	}
}
