use crate::avl_tree::map::{AvlMap, AvlMapIntoIter, AvlMapIter};
use crate::error::Result;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented using an AVL tree.
///
/// The set is a thin wrapper over `AvlMap<T, ()>`, so it has the same logarithmic height
/// guarantee.
///
/// # Examples
///
/// ```
/// use ordered_trees::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
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
pub struct AvlSet<T> {
    map: AvlMap<T, ()>,
}

impl<T> AvlSet<T> {
    /// Constructs a new, empty `AvlSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        AvlSet { map: AvlMap::new() }
    }

    /// Adds `key` to the set. An equal key already in the set is swapped out and returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
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
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
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
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
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
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
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

    /// Returns the height of the underlying tree.
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Returns the greatest key in the set that is not greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
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
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
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
    /// use ordered_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(2);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlSetIter<'_, T> {
        AvlSetIter {
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

    /// Verifies the ordering, length, height and balance invariants of the underlying tree.
    pub fn check_invariants(&self) -> Result<()>
    where
        T: Ord,
    {
        self.map.check_invariants()
    }
}

impl<T> IntoIterator for AvlSet<T> {
    type IntoIter = AvlSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            map_iter: self.map.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T>
where
    T: 'a,
{
    type IntoIter = AvlSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlSet<T>`.
///
/// Yields the keys in ascending order, consuming the set.
pub struct AvlSetIntoIter<T> {
    map_iter: AvlMapIntoIter<T, ()>,
}

impl<T> Iterator for AvlSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

/// An iterator for `AvlSet<T>`.
///
/// Yields borrowed keys in ascending order.
pub struct AvlSetIter<'a, T> {
    map_iter: AvlMapIter<'a, T, ()>,
}

impl<'a, T> Iterator for AvlSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

impl<T> Default for AvlSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for AvlSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        AvlSet {
            map: iter.into_iter().map(|key| (key, ())).collect(),
        }
    }
}

impl<T> PartialEq for AvlSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T> Eq for AvlSet<T> where T: Eq {}

impl<T> fmt::Debug for AvlSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::AvlSet;

    #[test]
    fn test_len_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_insert_replace() {
        let mut set = AvlSet::new();
        assert_eq!(set.insert(1), None);
        assert_eq!(set.insert(1), Some(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = AvlSet::new();
        set.insert(1);
        assert_eq!(set.remove(&1), Some(1));
        assert!(!set.contains(&1));
    }

    #[test]
    fn test_sorted_inserts_stay_balanced() {
        let set: AvlSet<u32> = (0..15).collect();
        assert_eq!(set.height(), 4);
        assert!(set.check_invariants().is_ok());
    }

    #[test]
    fn test_render_with_label() {
        let set: AvlSet<u32> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(set.render(|key| format!("<{}>", key)), "  _<2>_\n /     \\\n<1>   <3>");
    }

    #[test]
    fn test_into_iter() {
        let set: AvlSet<u32> = vec![1, 5, 3].into_iter().collect();
        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let set: AvlSet<u32> = vec![1, 5, 3].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }
}
