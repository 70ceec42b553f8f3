//! Ordered maps and sets backed by three kinds of binary search trees.
//!
//! - [`bst`]: an unbalanced binary search tree whose shape follows the insertion order.
//! - [`avl_tree`]: a height balanced tree that rotates nodes whenever the heights of two sibling
//!   subtrees differ by more than one.
//! - [`red_black_tree`]: a color balanced tree whose nodes keep links to their parents and live in
//!   an arena.
//!
//! Every map exposes the same operations: `insert`, `get`, `remove`, ordered traversal, `floor`
//! and `ceil` queries, `height`, a `check_invariants` method that verifies the structure of the
//! tree, and a `render` method that draws the tree through the shared [`render`] module.
//!
//! # Examples
//!
//! ```
//! use ordered_trees::bst::BstMap;
//!
//! let mut map = BstMap::new();
//! for key in &[2, 1, 3] {
//!     map.insert(*key, ());
//! }
//! println!("{}", map.render(|key, _| key.to_string()));
//! ```

mod arena;
mod entry;
mod serialize;

pub mod avl_tree;
pub mod bst;
pub mod error;
pub mod red_black_tree;
pub mod render;
