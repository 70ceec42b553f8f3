use crate::bst::node::Node;
use crate::bst::tree;
use crate::entry::Entry;
use crate::error::{self, Result};
use crate::render;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using an unbalanced binary search tree.
///
/// A binary search tree keeps every key in the left subtree of a node smaller than the node's key
/// and every key in the right subtree larger. No rebalancing is done, so the height of the tree
/// depends on the order of insertions: keys inserted in sorted order produce a tree as deep as it
/// has entries. All operations walk the tree iteratively, so a degenerate tree is still a valid
/// tree.
///
/// # Examples
///
/// ```
/// use ordered_trees::bst::BstMap;
///
/// let mut map = BstMap::new();
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
pub struct BstMap<T, U> {
    tree: tree::Tree<T, U>,
    len: usize,
}

impl<T, U> BstMap<T, U> {
    /// Constructs a new, empty `BstMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstMap;
    ///
    /// let map: BstMap<u32, u32> = BstMap::new();
    /// ```
    pub fn new() -> Self {
        BstMap { tree: None, len: 0 }
    }

    /// Stores `value` under `key`. When an equal key is already present, its pair is replaced and
    /// handed back. The shape of the tree does not change in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)>
    where
        T: Ord,
    {
        let BstMap {
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

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None` and leave the map untouched.
    ///
    /// A node with two children is not unlinked: it takes over the entry of its in-order
    /// successor, which is removed from the right subtree instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let BstMap {
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
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
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
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
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

    /// Returns the stored key and its value for a particular key. It will return `None` if the key
    /// does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(String::from("a"), 1);
    /// assert_eq!(map.get_key_value("a"), Some((&String::from("a"), &1)));
    /// assert_eq!(map.get_key_value("b"), None);
    /// ```
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
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
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
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
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
    /// use ordered_trees::bst::BstMap;
    ///
    /// let map: BstMap<u32, u32> = BstMap::new();
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
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        tree::clear(&mut self.tree);
        self.len = 0;
    }

    /// Returns the number of nodes on the longest path from the root to a leaf. An empty map has
    /// height zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// for key in 0..4 {
    ///     map.insert(key, ());
    /// }
    /// assert_eq!(map.height(), 4);
    /// ```
    pub fn height(&self) -> usize {
        tree::height(&self.tree)
    }

    /// Returns the key-value pair stored at the root of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(2, 'b');
    /// map.insert(1, 'a');
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
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
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
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
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
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.tree).map(|entry| &entry.key)
    }

    /// Largest key in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.tree).map(|entry| &entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(2, 2);
    /// map.insert(1, 1);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> BstMapIter<'_, T, U> {
        BstMapIter {
            current: &self.tree,
            stack: Vec::new(),
        }
    }

    /// Draws the tree as ASCII art, labelling every node with `label`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(2, ());
    /// map.insert(1, ());
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

    /// Verifies that the keys are strictly ascending in order and that the tracked length matches
    /// the number of nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// map.insert(0, 0);
    /// assert!(map.check_invariants().is_ok());
    /// ```
    pub fn check_invariants(&self) -> Result<()>
    where
        T: Ord,
    {
        error::check_ordered(self.iter().map(|pair| pair.0), self.len)
    }
}

impl<T, U> Drop for BstMap<T, U> {
    fn drop(&mut self) {
        tree::clear(&mut self.tree);
    }
}

impl<T, U> IntoIterator for BstMap<T, U> {
    type IntoIter = BstMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(mut self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree.take(),
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a BstMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = BstMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `BstMap<T, U>`.
///
/// Yields owned pairs in ascending key order, consuming the map.
pub struct BstMapIntoIter<T, U> {
    current: tree::Tree<T, U>,
    stack: Vec<Node<T, U>>,
}

impl<T, U> Iterator for BstMapIntoIter<T, U> {
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

impl<T, U> Drop for BstMapIntoIter<T, U> {
    fn drop(&mut self) {
        tree::clear(&mut self.current);
        for node in &mut self.stack {
            tree::clear(&mut node.right);
        }
    }
}

/// An iterator for `BstMap<T, U>`.
///
/// Yields borrowed pairs in ascending key order.
pub struct BstMapIter<'a, T, U> {
    current: &'a tree::Tree<T, U>,
    stack: Vec<&'a Node<T, U>>,
}

impl<'a, T, U> Iterator for BstMapIter<'a, T, U>
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

impl<T, U> Default for BstMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> FromIterator<(T, U)> for BstMap<T, U>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
    {
        let mut map = BstMap::new();
        map.extend(iter);
        map
    }
}

impl<T, U> Extend<(T, U)> for BstMap<T, U>
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

impl<'a, T, U, V> Index<&'a V> for BstMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> IndexMut<&'a V> for BstMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

impl<T, U> PartialEq for BstMap<T, U>
where
    T: PartialEq,
    U: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, U> Eq for BstMap<T, U>
where
    T: Eq,
    U: Eq,
{
}

impl<T, U> fmt::Debug for BstMap<T, U>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::BstMap;
    use crate::error::Error;

    const KEYS: [u32; 10] = [7, 3, 10, 1, 5, 9, 12, 4, 6, 11];

    fn reference_map() -> BstMap<u32, ()> {
        KEYS.iter().map(|key| (*key, ())).collect()
    }

    #[test]
    fn test_len_empty() {
        let map: BstMap<u32, u32> = BstMap::new();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: BstMap<u32, u32> = BstMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let map: BstMap<u32, u32> = BstMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    #[test]
    fn test_empty_lookup_and_remove() {
        let mut map: BstMap<u32, u32> = BstMap::new();
        assert_eq!(map.get(&1), None);
        assert_eq!(map.remove(&1), None);
        assert_eq!(map.len(), 0);
        assert_eq!(map.height(), 0);
        assert!(map.root().is_none());
    }

    #[test]
    fn test_insert() {
        let mut map = BstMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_replace() {
        let mut map = BstMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert_eq!(map.insert(1, 3), Some((1, 1)));
        assert_eq!(map.get(&1), Some(&3));
        assert_eq!(map.len(), 1);
        assert_eq!(map.height(), 1);
    }

    #[test]
    fn test_remove() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert!(!map.contains_key(&1));
    }

    #[test]
    fn test_reference_sequence() {
        let mut map = reference_map();
        assert_eq!(
            map.iter().map(|pair| *pair.0).collect::<Vec<u32>>(),
            vec![1, 3, 4, 5, 6, 7, 9, 10, 11, 12],
        );

        assert_eq!(map.remove(&7), Some((7, ())));
        assert!(!map.contains_key(&7));
        assert!(map.contains_key(&6));
        assert_eq!(map.root(), Some((&9, &())));
        assert_eq!(map.len(), 9);
        assert!(map.check_invariants().is_ok());
    }

    #[test]
    fn test_remove_leaf_and_single_child() {
        let mut map = reference_map();
        assert_eq!(map.remove(&4), Some((4, ())));
        assert_eq!(map.remove(&12), Some((12, ())));
        assert_eq!(
            map.iter().map(|pair| *pair.0).collect::<Vec<u32>>(),
            vec![1, 3, 5, 6, 7, 9, 10, 11],
        );
        assert!(map.check_invariants().is_ok());
    }

    #[test]
    fn test_render_reference_sequence() {
        let map = reference_map();
        let expected = vec![
            "  ___7__",
            " /      \\",
            " 3_    10___",
            "/  \\  /     \\",
            "1  5  9    12",
            "  / \\     /",
            "  4 6    11",
        ];
        assert_eq!(map.render(|key, _| key.to_string()), expected.join("\n"));

        let mut out = String::new();
        map.render_into(&mut out, |key, _| key.to_string()).unwrap();
        assert_eq!(out, format!("{}\n", expected.join("\n")));
    }

    #[test]
    fn test_render_empty() {
        let map: BstMap<u32, u32> = BstMap::new();
        assert_eq!(map.render(|key, _| key.to_string()), "");
    }

    #[test]
    fn test_check_invariants_length_mismatch() {
        let mut map = reference_map();
        map.len += 1;
        match map.check_invariants() {
            Err(Error::LengthMismatch { expected, actual }) => {
                assert_eq!(expected, 11);
                assert_eq!(actual, 10);
            },
            _ => panic!("Expected a length mismatch."),
        }
    }

    #[test]
    fn test_degenerate_tree() {
        let mut map = BstMap::new();
        for key in 0..5_000u32 {
            map.insert(key, key);
        }
        assert_eq!(map.height(), 5_000);
        assert_eq!(map.get(&4_999), Some(&4_999));
        assert_eq!(map.remove(&0), Some((0, 0)));
        assert_eq!(map.min(), Some(&1));
        assert!(map.check_invariants().is_ok());
    }

    #[test]
    fn test_min_max() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.min(), Some(&1));
        assert_eq!(map.max(), Some(&5));
    }

    #[test]
    fn test_get_mut() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_floor_ceil() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.floor(&0), None);
        assert_eq!(map.floor(&2), Some(&1));
        assert_eq!(map.floor(&4), Some(&3));
        assert_eq!(map.floor(&6), Some(&5));

        assert_eq!(map.ceil(&0), Some(&1));
        assert_eq!(map.ceil(&2), Some(&3));
        assert_eq!(map.ceil(&4), Some(&5));
        assert_eq!(map.ceil(&6), None);
    }

    #[test]
    fn test_into_iter() {
        let mut map = BstMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_into_iter_partially_consumed() {
        let map: BstMap<u32, u32> = (0..1_000).map(|key| (key, key)).collect();
        let mut iter = map.into_iter();
        assert_eq!(iter.next(), Some((0, 0)));
        assert_eq!(iter.next(), Some((1, 1)));
    }

    #[test]
    fn test_iter() {
        let mut map = BstMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
    }
}
