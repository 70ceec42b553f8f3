use crate::arena::{NodeId, TypedArena};
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::red_black_tree::node::{Color, Node};
use log::{debug, trace};
use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::mem;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A red black tree whose nodes live in an arena and refer to their children and parent by id.
///
/// `None` stands in for the sentinel leaf: it is black, it has no parent, and it is shared by
/// every node of every tree.
pub struct Tree<T, U> {
    pub arena: TypedArena<Node<T, U>>,
    pub root: Option<NodeId>,
}

impl<T, U> Tree<T, U> {
    pub fn new() -> Self {
        Tree {
            arena: TypedArena::new(),
            root: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            arena: TypedArena::with_capacity(capacity),
            root: None,
        }
    }

    pub fn color(&self, tree: Option<NodeId>) -> Color {
        match tree {
            Some(id) => self.arena[id].color,
            None => Color::Black,
        }
    }

    pub fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.arena[id].left,
            Side::Right => self.arena[id].right,
        }
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.arena[id].left = child,
            Side::Right => self.arena[id].right = child,
        }
    }

    fn side_of(&self, parent: NodeId, child: Option<NodeId>) -> Side {
        if self.arena[parent].left == child {
            Side::Left
        } else {
            Side::Right
        }
    }

    // Points whichever link held `old` at `new`. A node without a parent is the root.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(parent, Some(old));
                self.set_child(parent, side, new);
            },
        }
    }

    // Moves `id` down towards `side`; its child on the opposite side takes its place.
    pub fn rotate(&mut self, id: NodeId, side: Side) {
        trace!("Rotating {:?}", side);
        let pivot = self
            .child(id, side.opposite())
            .expect("Expected pivot child node to be `Some`.");
        let inner = self.child(pivot, side);
        self.set_child(id, side.opposite(), inner);
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(id);
        }

        let parent = self.arena[id].parent;
        self.arena[pivot].parent = parent;
        self.replace_child(parent, id, Some(pivot));

        self.set_child(pivot, side, Some(id));
        self.arena[id].parent = Some(pivot);
    }

    pub fn locate<V>(&self, key: &V) -> Option<NodeId>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(id) = curr {
            curr = match self.arena[id].entry.cmp_key(key) {
                Ordering::Less => self.arena[id].left,
                Ordering::Greater => self.arena[id].right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    fn min_node(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.arena[id].left {
            id = left;
        }
        id
    }

    fn max_node(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.arena[id].right {
            id = right;
        }
        id
    }

    pub fn insert(&mut self, key: T, value: U) -> Option<Entry<T, U>>
    where
        T: Ord,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut curr = self.root;
        while let Some(id) = curr {
            side = match self.arena[id].entry.cmp_key(&key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    let new_entry = Entry::new(key, value);
                    return Some(mem::replace(&mut self.arena[id].entry, new_entry));
                },
            };
            parent = Some(id);
            curr = self.child(id, side);
        }

        let id = self.arena.allocate(Node::new(key, value, parent));
        match parent {
            None => self.root = Some(id),
            Some(parent) => self.set_child(parent, side, Some(id)),
        }
        self.insert_fixup(id);
        None
    }

    fn insert_fixup(&mut self, mut id: NodeId) {
        loop {
            let parent = match self.arena[id].parent {
                Some(parent) if self.arena[parent].color == Color::Red => parent,
                _ => break,
            };
            // a red node is never the root
            let grandparent = self.arena[parent]
                .parent
                .expect("Expected red parent node to have a parent.");
            let side = self.side_of(grandparent, Some(parent));

            match self.child(grandparent, side.opposite()) {
                Some(uncle) if self.arena[uncle].color == Color::Red => {
                    trace!("Insert fixup: red uncle");
                    self.arena[parent].color = Color::Black;
                    self.arena[uncle].color = Color::Black;
                    self.arena[grandparent].color = Color::Red;
                    id = grandparent;
                },
                _ => {
                    if self.side_of(parent, Some(id)) != side {
                        trace!("Insert fixup: inner grandchild");
                        id = parent;
                        self.rotate(id, side);
                    }
                    trace!("Insert fixup: outer grandchild");
                    let parent = self.arena[id]
                        .parent
                        .expect("Expected rotated node to have a parent.");
                    self.arena[parent].color = Color::Black;
                    self.arena[grandparent].color = Color::Red;
                    self.rotate(grandparent, side.opposite());
                },
            }
        }

        if let Some(root) = self.root {
            self.arena[root].color = Color::Black;
        }
    }

    pub fn remove<V>(&mut self, key: &V) -> Option<Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let target = self.locate(key)?;
        let spliced = match (self.arena[target].left, self.arena[target].right) {
            (Some(_), Some(right)) => self.min_node(right),
            _ => target,
        };

        // `spliced` has at most one child, which moves up into its place
        let child = self.arena[spliced].left.or(self.arena[spliced].right);
        let parent = self.arena[spliced].parent;
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
        self.replace_child(parent, spliced, child);

        let Node { entry, color, .. } = self.arena.free(spliced);
        let ret = if spliced == target {
            entry
        } else {
            debug!("Splicing in-order successor into a node with two children");
            mem::replace(&mut self.arena[target].entry, entry)
        };

        if color == Color::Black {
            self.remove_fixup(child, parent);
        }
        Some(ret)
    }

    // `tree` carries an extra black. Its parent is passed separately since the sentinel has none.
    fn remove_fixup(&mut self, mut tree: Option<NodeId>, mut parent: Option<NodeId>) {
        while tree != self.root && self.color(tree) == Color::Black {
            let curr_parent = match parent {
                Some(parent) => parent,
                None => break,
            };
            let side = self.side_of(curr_parent, tree);
            let mut sibling = self
                .child(curr_parent, side.opposite())
                .expect("Expected sibling of doubly black node to be `Some`.");

            if self.arena[sibling].color == Color::Red {
                trace!("Remove fixup: red sibling");
                self.arena[sibling].color = Color::Black;
                self.arena[curr_parent].color = Color::Red;
                self.rotate(curr_parent, side);
                sibling = self
                    .child(curr_parent, side.opposite())
                    .expect("Expected sibling of doubly black node to be `Some`.");
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.opposite());
            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                trace!("Remove fixup: black sibling with black children");
                self.arena[sibling].color = Color::Red;
                tree = Some(curr_parent);
                parent = self.arena[curr_parent].parent;
                continue;
            }

            if self.color(far) == Color::Black {
                trace!("Remove fixup: black sibling with red near child");
                let near = near.expect("Expected red near child node to be `Some`.");
                self.arena[near].color = Color::Black;
                self.arena[sibling].color = Color::Red;
                self.rotate(sibling, side.opposite());
                sibling = self
                    .child(curr_parent, side.opposite())
                    .expect("Expected sibling of doubly black node to be `Some`.");
            }

            trace!("Remove fixup: black sibling with red far child");
            let parent_color = self.arena[curr_parent].color;
            self.arena[sibling].color = parent_color;
            self.arena[curr_parent].color = Color::Black;
            if let Some(far) = self.child(sibling, side.opposite()) {
                self.arena[far].color = Color::Black;
            }
            self.rotate(curr_parent, side);
            tree = self.root;
            parent = None;
        }

        if let Some(id) = tree {
            self.arena[id].color = Color::Black;
        }
    }

    pub fn get<V>(&self, key: &V) -> Option<&Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.locate(key).map(|id| &self.arena[id].entry)
    }

    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let id = self.locate(key)?;
        Some(&mut self.arena[id].entry)
    }

    pub fn ceil<V>(&self, key: &V) -> Option<&Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut ret = None;
        while let Some(id) = curr {
            curr = match self.arena[id].entry.cmp_key(key) {
                Ordering::Less => {
                    ret = Some(id);
                    self.arena[id].left
                },
                Ordering::Greater => self.arena[id].right,
                Ordering::Equal => return Some(&self.arena[id].entry),
            };
        }
        ret.map(|id| &self.arena[id].entry)
    }

    pub fn floor<V>(&self, key: &V) -> Option<&Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut ret = None;
        while let Some(id) = curr {
            curr = match self.arena[id].entry.cmp_key(key) {
                Ordering::Less => self.arena[id].left,
                Ordering::Greater => {
                    ret = Some(id);
                    self.arena[id].right
                },
                Ordering::Equal => return Some(&self.arena[id].entry),
            };
        }
        ret.map(|id| &self.arena[id].entry)
    }

    pub fn min(&self) -> Option<&Entry<T, U>> {
        self.root.map(|id| &self.arena[self.min_node(id)].entry)
    }

    pub fn max(&self) -> Option<&Entry<T, U>> {
        self.root.map(|id| &self.arena[self.max_node(id)].entry)
    }

    pub fn height(&self) -> usize {
        let mut ret = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            ret = cmp::max(ret, depth);
            let node = &self.arena[id];
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        ret
    }

    // Ids of every node, in order.
    pub fn in_order(&self) -> Vec<NodeId> {
        let mut ret = Vec::with_capacity(self.arena.len());
        let mut stack = Vec::new();
        let mut curr = self.root;
        loop {
            while let Some(id) = curr {
                stack.push(id);
                curr = self.arena[id].left;
            }
            match stack.pop() {
                Some(id) => {
                    ret.push(id);
                    curr = self.arena[id].right;
                },
                None => break,
            }
        }
        ret
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Checks that the root is black and has no parent, that no red node has a red child, that
    /// every child links back to its parent, and that every path to the sentinel crosses the same
    /// number of black nodes.
    pub fn check_colors(&self) -> Result<()> {
        if let Some(root) = self.root {
            if self.arena[root].color == Color::Red {
                return Err(Error::RedRoot);
            }
            if self.arena[root].parent.is_some() {
                return Err(Error::BrokenParentLink);
            }
        }
        self.check_black_height(self.root).map(|_| ())
    }

    // Returns the number of black nodes on every path from `tree` to the sentinel, counting the
    // sentinel.
    fn check_black_height(&self, tree: Option<NodeId>) -> Result<usize> {
        let id = match tree {
            Some(id) => id,
            None => return Ok(1),
        };
        let node = &self.arena[id];
        for child in [node.left, node.right].iter().flatten() {
            if self.arena[*child].parent != Some(id) {
                return Err(Error::BrokenParentLink);
            }
            if node.color == Color::Red && self.arena[*child].color == Color::Red {
                return Err(Error::RedViolation);
            }
        }

        let left = self.check_black_height(node.left)?;
        let right = self.check_black_height(node.right)?;
        if left != right {
            return Err(Error::BlackHeightMismatch { left, right });
        }
        match node.color {
            Color::Black => Ok(left + 1),
            Color::Red => Ok(left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Side, Tree};
    use crate::error::Error;
    use crate::red_black_tree::node::Color;

    fn keys(tree: &Tree<u32, ()>) -> Vec<u32> {
        tree.in_order()
            .into_iter()
            .map(|id| tree.arena[id].entry.key)
            .collect()
    }

    fn build(keys: &[u32]) -> Tree<u32, ()> {
        let mut tree = Tree::new();
        for key in keys {
            tree.insert(*key, ());
            assert!(tree.check_colors().is_ok());
        }
        tree
    }

    fn key_of(tree: &Tree<u32, ()>, id: Option<super::NodeId>) -> Option<u32> {
        id.map(|id| tree.arena[id].entry.key)
    }

    #[test]
    fn test_rotate_updates_links() {
        let mut tree = build(&[2, 1, 4, 3, 5]);
        let root = tree.root.expect("Expected non-empty tree.");
        tree.rotate(root, Side::Left);

        let new_root = tree.root.expect("Expected non-empty tree.");
        assert_eq!(key_of(&tree, Some(new_root)), Some(4));
        assert!(tree.arena[new_root].parent.is_none());
        assert_eq!(key_of(&tree, tree.arena[new_root].left), Some(2));
        assert_eq!(key_of(&tree, tree.arena[root].right), Some(3));
        assert_eq!(tree.arena[root].parent, Some(new_root));
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5]);

        tree.rotate(new_root, Side::Right);
        assert_eq!(tree.root, Some(root));
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5]);
        assert!(tree.check_colors().is_ok());
    }

    #[test]
    fn test_insert_ascending() {
        let tree = build(&[1, 2, 3, 4, 5, 6, 7]);
        let root = tree.root.expect("Expected non-empty tree.");
        assert_eq!(tree.arena[root].entry.key, 2);
        assert_eq!(tree.color(Some(root)), Color::Black);
        assert_eq!(tree.height(), 4);

        let right = tree.arena[root].right;
        assert_eq!(key_of(&tree, right), Some(4));
        assert_eq!(tree.color(right), Color::Red);
    }

    #[test]
    fn test_insert_inner_grandchild() {
        let tree = build(&[3, 1, 2]);
        let root = tree.root.expect("Expected non-empty tree.");
        assert_eq!(tree.arena[root].entry.key, 2);
        assert_eq!(tree.color(tree.arena[root].left), Color::Red);
        assert_eq!(tree.color(tree.arena[root].right), Color::Red);
    }

    #[test]
    fn test_remove_keeps_colors_valid() {
        let mut tree = build(&(0..64).collect::<Vec<u32>>());
        for key in (0..64).step_by(2) {
            assert_eq!(tree.remove(&key).map(|entry| entry.key), Some(key));
            assert!(tree.check_colors().is_ok());
        }
        assert_eq!(keys(&tree), (0..64).filter(|key| key % 2 == 1).collect::<Vec<u32>>());
        assert_eq!(tree.arena.len(), 32);
        assert!(tree.remove(&0).is_none());
    }

    #[test]
    fn test_remove_root_until_empty() {
        let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        while let Some(root) = tree.root {
            let key = tree.arena[root].entry.key;
            assert_eq!(tree.remove(&key).map(|entry| entry.key), Some(key));
            assert!(tree.check_colors().is_ok());
        }
        assert_eq!(tree.arena.len(), 0);
    }

    #[test]
    fn test_check_colors_red_root() {
        let mut tree = build(&[1]);
        let root = tree.root.expect("Expected non-empty tree.");
        tree.arena[root].color = Color::Red;
        match tree.check_colors() {
            Err(Error::RedRoot) => {},
            _ => panic!("Expected a red root."),
        }
    }

    #[test]
    fn test_check_colors_red_violation() {
        let mut tree = build(&[2, 1, 3, 4]);
        let three = tree.arena[tree.root.expect("Expected non-empty tree.")]
            .right
            .expect("Expected right child.");
        tree.arena[three].color = Color::Red;
        match tree.check_colors() {
            Err(Error::RedViolation) => {},
            _ => panic!("Expected a red node with a red child."),
        }
    }

    #[test]
    fn test_check_colors_black_height() {
        let mut tree = build(&[2, 1, 3]);
        let one = tree.arena[tree.root.expect("Expected non-empty tree.")]
            .left
            .expect("Expected left child.");
        tree.arena[one].color = Color::Black;
        match tree.check_colors() {
            Err(Error::BlackHeightMismatch { left: 2, right: 1 }) => {},
            _ => panic!("Expected a black height mismatch."),
        }
    }

    #[test]
    fn test_check_colors_broken_parent_link() {
        let mut tree = build(&[2, 1, 3]);
        let root = tree.root.expect("Expected non-empty tree.");
        let one = tree.arena[root].left.expect("Expected left child.");
        let three = tree.arena[root].right;
        tree.arena[one].parent = three;
        match tree.check_colors() {
            Err(Error::BrokenParentLink) => {},
            _ => panic!("Expected a broken parent link."),
        }
    }
}
