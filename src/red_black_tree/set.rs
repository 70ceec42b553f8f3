use crate::error::Result;
use crate::red_black_tree::map::{RedBlackMap, RedBlackMapIntoIter, RedBlackMapIter};
use crate::red_black_tree::node::Color;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented using a red black tree.
///
/// # Examples
///
/// ```
/// use ordered_trees::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub struct RedBlackSet<T> {
    map: RedBlackMap<T, ()>,
}

impl<T> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        RedBlackSet {
            map: RedBlackMap::new(),
        }
    }

    /// Constructs a new, empty `RedBlackSet<T>` that can hold `capacity` keys before its node
    /// storage reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        RedBlackSet {
            map: RedBlackMap::with_capacity(capacity),
        }
    }

    /// Adds `key` to the set. An equal key already in the set is swapped out and returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.insert(1), None);
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1), Some(1));
    /// ```
    pub fn insert(&mut self, key: T) -> Option<T>
    where
        T: Ord,
    {
        self.map.insert(key, ()).map(|pair| pair.0)
    }

    /// Takes `key` out of the set and returns the stored key, or `None` when it is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.remove(key).map(|pair| pair.0)
    }

    /// Returns `true` when the set holds `key`.
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Number of keys in the set.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` when the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drops every key in the set.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Returns the greatest key in the set that is not greater than `key`.
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.floor(key)
    }

    /// Returns the least key in the set that is not less than `key`.
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.ceil(key)
    }

    /// Smallest key in the set.
    pub fn min(&self) -> Option<&T> {
        self.map.min()
    }

    /// Largest key in the set.
    pub fn max(&self) -> Option<&T> {
        self.map.max()
    }

    /// Walks the keys of the set in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(2);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter {
            map_iter: self.map.iter(),
        }
    }

    /// Draws the tree as ASCII art, labelling every node with `label`.
    pub fn render<F>(&self, label: F) -> String
    where
        F: Fn(&T, Color) -> String,
    {
        self.map.render(|key, _, color| label(key, color))
    }

    /// Verifies the ordering, length, coloring and parent links of the underlying tree.
    pub fn check_invariants(&self) -> Result<()>
    where
        T: Ord,
    {
        self.map.check_invariants()
    }
}

impl<T> IntoIterator for RedBlackSet<T> {
    type IntoIter = RedBlackSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            map_iter: self.map.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a,
{
    type IntoIter = RedBlackSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackSet<T>`.
///
/// Yields the keys in ascending order, consuming the set.
pub struct RedBlackSetIntoIter<T> {
    map_iter: RedBlackMapIntoIter<T, ()>,
}

impl<T> Iterator for RedBlackSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

/// An iterator for `RedBlackSet<T>`.
///
/// Yields borrowed keys in ascending order.
pub struct RedBlackSetIter<'a, T> {
    map_iter: RedBlackMapIter<'a, T, ()>,
}

impl<'a, T> Iterator for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

impl<T> Default for RedBlackSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        RedBlackSet {
            map: iter.into_iter().map(|key| (key, ())).collect(),
        }
    }
}

impl<T> PartialEq for RedBlackSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T> Eq for RedBlackSet<T> where T: Eq {}

impl<T> fmt::Debug for RedBlackSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
