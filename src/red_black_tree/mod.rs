//! Self-balancing binary search tree that colors every node red or black and repairs the coloring
//! after insertions and deletions by walking back up through parent links.

mod map;
mod node;
mod set;
mod tree;

pub use self::map::{RedBlackMap, RedBlackMapIntoIter, RedBlackMapIter};
pub use self::node::Color;
pub use self::set::{RedBlackSet, RedBlackSetIntoIter, RedBlackSetIter};
