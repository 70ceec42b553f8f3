use crate::avl_tree::node::Node;
use crate::avl_tree::tree;
use crate::entry::Entry;
use crate::error::{self, Result};
use crate::render;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using an AVL tree.
///
/// An AVL tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of the two child subtrees of any node differ by at most one. Every node caches the
/// height of its subtree. After an insertion or a deletion, the nodes on the modified path are
/// updated bottom-up and rotated whenever a balance factor leaves `[-1, 1]`, so the height of the
/// tree stays logarithmic in the number of entries.
///
/// # Examples
///
/// ```
/// use ordered_trees::avl_tree::AvlMap;
///
/// let mut map = AvlMap::new();
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
pub struct AvlMap<T, U> {
    tree: tree::Tree<T, U>,
    len: usize,
}

impl<T, U> AvlMap<T, U> {
    /// Constructs a new, empty `AvlMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// ```
    pub fn new() -> Self {
        AvlMap { tree: None, len: 0 }
    }

    /// Stores `value` under `key`. When an equal key is already present, its pair is replaced and
    /// handed back.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)>
    where
        T: Ord,
    {
        let AvlMap {
            ref mut tree,
            ref mut len,
        } = self;
        let new_node = Node::new(key, value);
        *len += 1;
        tree::insert(tree, new_node).map(|entry| {
            *len -= 1;
            entry.into_pair()
        })
    }

    /// Unlinks the pair stored under `key` and returns it, or `None` when the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let AvlMap {
            ref mut tree,
            ref mut len,
        } = self;
        tree::remove(tree, key).map(|entry| {
            *len -= 1;
            entry.into_pair()
        })
    }

    /// Returns `true` when the map holds `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
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
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.tree, key).map(|entry| &entry.value)
    }

    /// Returns the stored key and its value for a particular key.
    pub fn get_key_value<V>(&self, key: &V) -> Option<(&T, &U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.tree, key).map(Entry::as_pair)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get_mut(&mut self.tree, key).map(|entry| &mut entry.value)
    }

    /// Number of pairs in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the map holds no pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every pair in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree = None;
        self.len = 0;
    }

    /// Returns the height of the tree, read from the root's cached height. An empty map has
    /// height zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// for key in 0..7 {
    ///     map.insert(key, ());
    /// }
    /// assert_eq!(map.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        tree::height(&self.tree)
    }

    /// Returns the key-value pair stored at the root of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 'a');
    /// map.insert(2, 'b');
    /// map.insert(3, 'c');
    /// assert_eq!(map.root(), Some((&2, &'b')));
    /// ```
    pub fn root(&self) -> Option<(&T, &U)> {
        self.tree.as_ref().map(|node| node.entry.as_pair())
    }

    /// Returns the greatest key in the map that is not greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::floor(&self.tree, key).map(|entry| &entry.key)
    }

    /// Returns the least key in the map that is not less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::ceil(&self.tree, key).map(|entry| &entry.key)
    }

    /// Smallest key in the map.
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.tree).map(|entry| &entry.key)
    }

    /// Largest key in the map.
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.tree).map(|entry| &entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlMapIter<'_, T, U> {
        AvlMapIter {
            current: &self.tree,
            stack: Vec::new(),
        }
    }

    /// Draws the tree as ASCII art, labelling every node with `label`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, ());
    /// map.insert(2, ());
    /// map.insert(3, ());
    /// assert_eq!(map.render(|key, _| key.to_string()), " 2\n/ \\\n1 3");
    /// ```
    pub fn render<F>(&self, label: F) -> String
    where
        F: Fn(&T, &U) -> String,
    {
        self.render_lines(label).join("\n")
    }

    /// Writes the drawing produced by [`render`](#method.render) into `out`, one line at a time.
    pub fn render_into<W, F>(&self, out: &mut W, label: F) -> Result<()>
    where
        W: fmt::Write,
        F: Fn(&T, &U) -> String,
    {
        for line in self.render_lines(label) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn render_lines<F>(&self, label: F) -> Vec<String>
    where
        F: Fn(&T, &U) -> String,
    {
        render::render(
            self.tree.as_deref(),
            |node| node.left.as_deref(),
            |node| node.right.as_deref(),
            |node| label(&node.entry.key, &node.entry.value),
        )
    }

    /// Verifies the ordering of the keys, the tracked length, the cached heights and the balance
    /// factor of every node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = (0..100).map(|key| (key, key)).collect();
    /// assert!(map.check_invariants().is_ok());
    /// ```
    pub fn check_invariants(&self) -> Result<()>
    where
        T: Ord,
    {
        error::check_ordered(self.iter().map(|pair| pair.0), self.len)?;
        tree::check_balance(&self.tree)?;
        Ok(())
    }
}

impl<T, U> IntoIterator for AvlMap<T, U> {
    type IntoIter = AvlMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a AvlMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = AvlMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlMap<T, U>`.
///
/// Yields owned pairs in ascending key order, consuming the map.
pub struct AvlMapIntoIter<T, U> {
    current: tree::Tree<T, U>,
    stack: Vec<Node<T, U>>,
}

impl<T, U> Iterator for AvlMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { entry, right, .. } = node;
            self.current = right;
            entry.into_pair()
        })
    }
}

/// An iterator for `AvlMap<T, U>`.
///
/// Yields borrowed pairs in ascending key order.
pub struct AvlMapIter<'a, T, U> {
    current: &'a tree::Tree<T, U>,
    stack: Vec<&'a Node<T, U>>,
}

impl<'a, T, U> Iterator for AvlMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            node.entry.as_pair()
        })
    }
}

impl<T, U> Default for AvlMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> FromIterator<(T, U)> for AvlMap<T, U>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
    {
        let mut map = AvlMap::new();
        map.extend(iter);
        map
    }
}

impl<T, U> Extend<(T, U)> for AvlMap<T, U>
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

impl<'a, T, U, V> Index<&'a V> for AvlMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> IndexMut<&'a V> for AvlMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

impl<T, U> PartialEq for AvlMap<T, U>
where
    T: PartialEq,
    U: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, U> Eq for AvlMap<T, U>
where
    T: Eq,
    U: Eq,
{
}

impl<T, U> fmt::Debug for AvlMap<T, U>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
