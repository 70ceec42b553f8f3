use crate::bst::map::{BstMap, BstMapIntoIter, BstMapIter};
use crate::error::Result;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented using an unbalanced binary search tree.
///
/// # Examples
///
/// ```
/// use ordered_trees::bst::BstSet;
///
/// let mut set = BstSet::new();
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
pub struct BstSet<T> {
    map: BstMap<T, ()>,
}

impl<T> BstSet<T> {
    /// Constructs a new, empty `BstSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstSet;
    ///
    /// let set: BstSet<u32> = BstSet::new();
    /// ```
    pub fn new() -> Self {
        BstSet { map: BstMap::new() }
    }

    /// Adds `key` to the set. An equal key already in the set is swapped out and returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstSet;
    ///
    /// let mut set = BstSet::new();
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
    /// use ordered_trees::bst::BstSet;
    ///
    /// let mut set = BstSet::new();
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
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstSet;
    ///
    /// let mut set = BstSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
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
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstSet;
    ///
    /// let mut set = BstSet::new();
    /// set.insert(1);
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.floor(key)
    }

    /// Returns the least key in the set that is not less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstSet;
    ///
    /// let mut set = BstSet::new();
    /// set.insert(1);
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
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
    /// use ordered_trees::bst::BstSet;
    ///
    /// let mut set = BstSet::new();
    /// set.insert(3);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> BstSetIter<'_, T> {
        BstSetIter {
            map_iter: self.map.iter(),
        }
    }

    /// Draws the tree as ASCII art, labelling every node with `label`.
    pub fn render<F>(&self, label: F) -> String
    where
        F: Fn(&T) -> String,
    {
        self.map.render(|key, _| label(key))
    }

    /// Verifies the ordering and length invariants of the underlying tree.
    pub fn check_invariants(&self) -> Result<()>
    where
        T: Ord,
    {
        self.map.check_invariants()
    }
}

impl<T> IntoIterator for BstSet<T> {
    type IntoIter = BstSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            map_iter: self.map.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a BstSet<T>
where
    T: 'a,
{
    type IntoIter = BstSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `BstSet<T>`.
///
/// Yields the keys in ascending order, consuming the set.
pub struct BstSetIntoIter<T> {
    map_iter: BstMapIntoIter<T, ()>,
}

impl<T> Iterator for BstSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

/// An iterator for `BstSet<T>`.
///
/// Yields borrowed keys in ascending order.
pub struct BstSetIter<'a, T> {
    map_iter: BstMapIter<'a, T, ()>,
}

impl<'a, T> Iterator for BstSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

impl<T> Default for BstSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for BstSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        BstSet {
            map: iter.into_iter().map(|key| (key, ())).collect(),
        }
    }
}

impl<T> PartialEq for BstSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T> Eq for BstSet<T> where T: Eq {}

impl<T> fmt::Debug for BstSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
