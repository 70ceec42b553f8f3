//! Binary search tree that performs no rebalancing, so its shape depends entirely on the order in
//! which keys are inserted.

mod map;
mod node;
mod set;
mod tree;

pub use self::map::{BstMap, BstMapIntoIter, BstMapIter};
pub use self::set::{BstSet, BstSetIntoIter, BstSetIter};
