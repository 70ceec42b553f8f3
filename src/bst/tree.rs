use crate::bst::node::Node;
use crate::entry::Entry;
use log::debug;
use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::mem;

pub type Tree<T, U> = Option<Box<Node<T, U>>>;

// Every operation walks the tree with a loop instead of recursing: an unbalanced tree can be as
// deep as it has nodes.

// Returns the link that holds `key`, or the empty link where `key` would be attached.
fn locate<'a, T, U, V>(mut tree: &'a mut Tree<T, U>, key: &V) -> &'a mut Tree<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    loop {
        let ordering = match tree.as_ref() {
            Some(node) => node.entry.cmp_key(key),
            None => break,
        };
        match ordering {
            Ordering::Less => tree = &mut { tree }.as_mut().expect("Expected non-empty tree.").left,
            Ordering::Greater => {
                tree = &mut { tree }.as_mut().expect("Expected non-empty tree.").right
            },
            Ordering::Equal => break,
        }
    }
    tree
}

fn remove_min<T, U>(mut tree: &mut Tree<T, U>) -> Option<Box<Node<T, U>>> {
    while tree.as_ref().map_or(false, |node| node.left.is_some()) {
        tree = &mut { tree }.as_mut().expect("Expected non-empty tree.").left;
    }
    let mut node = tree.take()?;
    *tree = node.right.take();
    Some(node)
}

pub fn insert<T, U>(tree: &mut Tree<T, U>, new_node: Node<T, U>) -> Option<Entry<T, U>>
where
    T: Ord,
{
    let slot = locate(tree, &new_node.entry.key);
    if let Some(node) = slot.as_mut() {
        return Some(mem::replace(&mut node.entry, new_node.entry));
    }
    *slot = Some(Box::new(new_node));
    None
}

pub fn remove<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> Option<Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let slot = locate(tree, key);
    let has_two_children = slot.as_ref().map_or(false, |node| node.has_two_children());

    if has_two_children {
        // the successor takes over this node's entry; the node itself stays in place
        let node = slot.as_mut().expect("Expected non-empty tree.");
        let successor = remove_min(&mut node.right).expect("Expected non-empty right subtree.");
        debug!("Splicing in-order successor into a node with two children");
        let Node { entry, .. } = *successor;
        return Some(mem::replace(&mut node.entry, entry));
    }

    let mut node = slot.take()?;
    *slot = node.left.take().or_else(|| node.right.take());
    Some(node.entry)
}

pub fn get<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    while let Some(node) = curr {
        match node.entry.cmp_key(key) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return Some(&node.entry),
        }
    }
    None
}

pub fn get_mut<'a, T, U, V>(tree: &'a mut Tree<T, U>, key: &V) -> Option<&'a mut Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    locate(tree, key).as_mut().map(|node| &mut node.entry)
}

pub fn ceil<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    let mut ret = None;
    while let Some(node) = curr {
        match node.entry.cmp_key(key) {
            Ordering::Less => {
                ret = Some(&node.entry);
                curr = &node.left;
            },
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return Some(&node.entry),
        }
    }
    ret
}

pub fn floor<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    let mut ret = None;
    while let Some(node) = curr {
        match node.entry.cmp_key(key) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => {
                ret = Some(&node.entry);
                curr = &node.right;
            },
            Ordering::Equal => return Some(&node.entry),
        }
    }
    ret
}

pub fn min<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    let mut curr = tree.as_ref()?;
    while let Some(ref left_node) = curr.left {
        curr = left_node;
    }
    Some(&curr.entry)
}

pub fn max<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    let mut curr = tree.as_ref()?;
    while let Some(ref right_node) = curr.right {
        curr = right_node;
    }
    Some(&curr.entry)
}

pub fn height<T, U>(tree: &Tree<T, U>) -> usize {
    let mut ret = 0;
    let mut stack = Vec::new();
    if let Some(node) = tree {
        stack.push((&**node, 1));
    }
    while let Some((node, depth)) = stack.pop() {
        ret = cmp::max(ret, depth);
        if let Some(ref child) = node.left {
            stack.push((&**child, depth + 1));
        }
        if let Some(ref child) = node.right {
            stack.push((&**child, depth + 1));
        }
    }
    ret
}

// Tears the tree down one node at a time so that dropping a degenerate tree does not recurse.
pub fn clear<T, U>(tree: &mut Tree<T, U>) {
    let mut stack: Vec<Box<Node<T, U>>> = tree.take().into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

#[cfg(test)]
mod tests {
    use super::{clear, height, insert, remove, Tree};
    use crate::bst::node::Node;

    fn build(keys: &[u32]) -> Tree<u32, ()> {
        let mut tree = None;
        for key in keys {
            insert(&mut tree, Node::new(*key, ()));
        }
        tree
    }

    #[test]
    fn test_remove_two_children_keeps_node_in_place() {
        let mut tree = build(&[7, 3, 10, 9, 12, 11]);
        let root_ptr = tree.as_ref().map(|node| &**node as *const Node<u32, ()>);

        assert_eq!(remove(&mut tree, &7).map(|entry| entry.key), Some(7));

        let root = tree.as_ref().expect("Expected non-empty tree.");
        assert_eq!(Some(&**root as *const Node<u32, ()>), root_ptr);
        assert_eq!(root.entry.key, 9);
        assert_eq!(root.left.as_ref().map(|node| node.entry.key), Some(3));
        let right = root.right.as_ref().expect("Expected right subtree.");
        assert_eq!(right.entry.key, 10);
        assert!(right.left.is_none());
    }

    #[test]
    fn test_remove_successor_with_right_child() {
        let mut tree = build(&[5, 2, 9, 7, 8]);
        remove(&mut tree, &5);
        let root = tree.as_ref().expect("Expected non-empty tree.");
        assert_eq!(root.entry.key, 7);
        let right = root.right.as_ref().expect("Expected right subtree.");
        assert_eq!(right.left.as_ref().map(|node| node.entry.key), Some(8));
    }

    #[test]
    fn test_height_degenerate() {
        let keys: Vec<u32> = (0..10_000).collect();
        let mut tree = build(&keys);
        assert_eq!(height(&tree), 10_000);
        clear(&mut tree);
        assert!(tree.is_none());
        assert_eq!(height(&tree), 0);
    }
}
