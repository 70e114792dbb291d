//! Generic binary search tree types.
//!
//! Types defined in this modules are independant of the actual storage type
//! and of the balancing policy.
pub mod node;
pub use node::{Color, Height, Item, Node, Side};

pub mod policy;
pub use policy::{Avl, Policy, RedBlack, Unbalanced};

pub mod map;
pub use map::{AllocError, Order, TreeMap};
