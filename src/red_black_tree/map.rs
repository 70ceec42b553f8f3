use crate::arena::{NodeId, TypedArena};
use crate::error::{self, Result};
use crate::red_black_tree::node::{Color, Node};
use crate::red_black_tree::tree::Tree;
use crate::render;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};
use std::vec;

/// An ordered map implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black.
/// The root is black, no red node has a red child, and every path from a node down to an absent
/// child passes through the same number of black nodes. Together these keep the longest path at
/// most twice as long as the shortest one. Insertions and deletions restore the coloring with
/// recoloring and at most three rotations, walking back up the tree through parent links.
///
/// Nodes are stored in an arena owned by the map, so a node refers to its children and to its
/// parent by index rather than by pointer.
///
/// # Examples
///
/// ```
/// use ordered_trees::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct RedBlackMap<T, U> {
    tree: Tree<T, U>,
    len: usize,
}

impl<T, U> RedBlackMap<T, U> {
    /// Constructs a new, empty `RedBlackMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMap {
            tree: Tree::new(),
            len: 0,
        }
    }

    /// Constructs a new, empty `RedBlackMap<T, U>` that can hold `capacity` entries before its
    /// node storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::with_capacity(16);
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        RedBlackMap {
            tree: Tree::with_capacity(capacity),
            len: 0,
        }
    }

    /// Stores `value` under `key`. When an equal key is already present, its pair is replaced and
    /// handed back.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)>
    where
        T: Ord,
    {
        match self.tree.insert(key, value) {
            Some(entry) => Some(entry.into_pair()),
            None => {
                self.len += 1;
                None
            },
        }
    }

    /// Unlinks the pair stored under `key` and returns it, or `None` when the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let entry = self.tree.remove(key)?;
        self.len -= 1;
        Some(entry.into_pair())
    }

    /// Returns `true` when the map holds `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Looks up the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.get(key).map(|entry| &entry.value)
    }

    /// Returns the stored key and its value for a particular key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(String::from("a"), 1);
    /// assert_eq!(map.get_key_value("a"), Some((&String::from("a"), &1)));
    /// ```
    pub fn get_key_value<V>(&self, key: &V) -> Option<(&T, &U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.get(key).map(|entry| entry.as_pair())
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.get_mut(key).map(|entry| &mut entry.value)
    }

    /// Number of pairs in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the map holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every pair in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the number of nodes on the longest path from the root to a leaf. An empty map has
    /// height zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, ()> = (1..8).map(|key| (key, ())).collect();
    /// assert_eq!(map.height(), 4);
    /// ```
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns the key-value pair stored at the root of the tree.
    pub fn root(&self) -> Option<(&T, &U)> {
        self.tree.root.map(|id| self.tree.arena[id].entry.as_pair())
    }

    /// Returns the color of the node holding a particular key. Returns `None` if the key does not
    /// exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::{Color, RedBlackMap};
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, ());
    /// map.insert(2, ());
    /// assert_eq!(map.color(&1), Some(Color::Black));
    /// assert_eq!(map.color(&2), Some(Color::Red));
    /// assert_eq!(map.color(&3), None);
    /// ```
    pub fn color<V>(&self, key: &V) -> Option<Color>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.locate(key).map(|id| self.tree.arena[id].color)
    }

    /// Returns the greatest key in the map that is not greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.floor(key).map(|entry| &entry.key)
    }

    /// Returns the least key in the map that is not less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.ceil(key).map(|entry| &entry.key)
    }

    /// Smallest key in the map.
    pub fn min(&self) -> Option<&T> {
        self.tree.min().map(|entry| &entry.key)
    }

    /// Largest key in the map.
    pub fn max(&self) -> Option<&T> {
        self.tree.max().map(|entry| &entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackMapIter<'_, T, U> {
        RedBlackMapIter {
            tree: &self.tree,
            current: self.tree.root,
            stack: Vec::new(),
        }
    }

    /// Draws the tree as ASCII art, labelling every node with `label`. The label function also
    /// receives the color of the node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, ());
    /// map.insert(2, ());
    /// map.insert(3, ());
    /// assert_eq!(
    ///     map.render(|key, _, color| format!("{}({})", key, color)),
    ///     "   _2(B)__\n  /       \\\n1(R)    3(R)",
    /// );
    /// ```
    pub fn render<F>(&self, label: F) -> String
    where
        F: Fn(&T, &U, Color) -> String,
    {
        self.render_lines(label).join("\n")
    }

    /// Writes the drawing produced by [`render`](#method.render) into `out`, one line at a time.
    pub fn render_into<W, F>(&self, out: &mut W, label: F) -> Result<()>
    where
        W: fmt::Write,
        F: Fn(&T, &U, Color) -> String,
    {
        for line in self.render_lines(label) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn render_lines<F>(&self, label: F) -> Vec<String>
    where
        F: Fn(&T, &U, Color) -> String,
    {
        let arena = &self.tree.arena;
        render::render(
            self.tree.root,
            |id| arena[id].left,
            |id| arena[id].right,
            |id| {
                let node = &arena[id];
                label(&node.entry.key, &node.entry.value, node.color)
            },
        )
    }

    /// Verifies the ordering of the keys, the tracked length, the coloring of the tree and the
    /// parent link of every node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map: RedBlackMap<u32, u32> = (0..100).map(|key| (key, key)).collect();
    /// for key in 0..50 {
    ///     map.remove(&key);
    /// }
    /// assert!(map.check_invariants().is_ok());
    /// ```
    pub fn check_invariants(&self) -> Result<()>
    where
        T: Ord,
    {
        error::check_ordered(self.iter().map(|pair| pair.0), self.len)?;
        self.tree.check_colors()
    }
}

impl<T, U> IntoIterator for RedBlackMap<T, U> {
    type IntoIter = RedBlackMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        let ids = self.tree.in_order();
        Self::IntoIter {
            arena: self.tree.arena,
            ids: ids.into_iter(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a RedBlackMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = RedBlackMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackMap<T, U>`.
///
/// Yields owned pairs in ascending key order, consuming the map.
pub struct RedBlackMapIntoIter<T, U> {
    arena: TypedArena<Node<T, U>>,
    ids: vec::IntoIter<NodeId>,
}

impl<T, U> Iterator for RedBlackMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.ids.next()?;
        Some(self.arena.free(id).entry.into_pair())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

/// An iterator for `RedBlackMap<T, U>`.
///
/// Yields borrowed pairs in ascending key order.
pub struct RedBlackMapIter<'a, T, U> {
    tree: &'a Tree<T, U>,
    current: Option<NodeId>,
    stack: Vec<NodeId>,
}

impl<'a, T, U> Iterator for RedBlackMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(id) = self.current {
            self.current = tree.arena[id].left;
            self.stack.push(id);
        }
        self.stack.pop().map(|id| {
            let node = &tree.arena[id];
            self.current = node.right;
            node.entry.as_pair()
        })
    }
}

impl<T, U> Default for RedBlackMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> FromIterator<(T, U)> for RedBlackMap<T, U>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
    {
        let iter = iter.into_iter();
        let mut map = RedBlackMap::with_capacity(iter.size_hint().0);
        map.extend(iter);
        map
    }
}

impl<T, U> Extend<(T, U)> for RedBlackMap<T, U>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (T, U)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, T, U, V> Index<&'a V> for RedBlackMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> IndexMut<&'a V> for RedBlackMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

impl<T, U> PartialEq for RedBlackMap<T, U>
where
    T: PartialEq,
    U: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, U> Eq for RedBlackMap<T, U>
where
    T: Eq,
    U: Eq,
{
}

impl<T, U> fmt::Debug for RedBlackMap<T, U>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
