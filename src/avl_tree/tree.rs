use crate::avl_tree::node::Node;
use crate::entry::Entry;
use crate::error::{Error, Result};
use log::{debug, trace};
use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::mem;

pub type Tree<T, U> = Option<Box<Node<T, U>>>;

pub fn height<T, U>(tree: &Tree<T, U>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.height,
    }
}

// The demoted node is updated before the promoted one since the latter's height depends on it.
fn rotate_left<T, U>(mut node: Box<Node<T, U>>) -> Box<Node<T, U>> {
    let mut child = node.right.take().expect("Expected right child node to be `Some`.");
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right<T, U>(mut node: Box<Node<T, U>>) -> Box<Node<T, U>> {
    let mut child = node.left.take().expect("Expected left child node to be `Some`.");
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

// Restores the height and the balance factor of the root of `tree`, assuming both of its subtrees
// are already balanced. The sign of the heavy child's balance factor picks between a single and a
// double rotation.
fn balance<T, U>(tree: &mut Tree<T, U>) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance() > 1 {
        let child = node.left.take().expect("Expected left child node to be `Some`.");
        if child.balance() < 0 {
            trace!("Rebalancing left-right case");
            node.left = Some(rotate_left(child));
        } else {
            trace!("Rebalancing left-left case");
            node.left = Some(child);
        }
        node = rotate_right(node);
    } else if node.balance() < -1 {
        let child = node.right.take().expect("Expected right child node to be `Some`.");
        if child.balance() > 0 {
            trace!("Rebalancing right-left case");
            node.right = Some(rotate_right(child));
        } else {
            trace!("Rebalancing right-right case");
            node.right = Some(child);
        }
        node = rotate_left(node);
    }

    *tree = Some(node);
}

// precondition: there exists a minimum node in the tree
fn remove_min<T, U>(tree: &mut Tree<T, U>) -> Box<Node<T, U>> {
    if let Some(ref mut node) = tree {
        if node.left.is_some() {
            let ret = remove_min(&mut node.left);
            balance(tree);
            return ret;
        }
    }

    let mut node = tree.take().expect("Expected a non-empty tree.");
    *tree = node.right.take();
    node
}

pub fn insert<T, U>(tree: &mut Tree<T, U>, new_node: Node<T, U>) -> Option<Entry<T, U>>
where
    T: Ord,
{
    let ret = match tree {
        Some(ref mut node) => match node.entry.cmp_key(&new_node.entry.key) {
            Ordering::Less => insert(&mut node.left, new_node),
            Ordering::Greater => insert(&mut node.right, new_node),
            Ordering::Equal => return Some(mem::replace(&mut node.entry, new_node.entry)),
        },
        None => {
            *tree = Some(Box::new(new_node));
            return None;
        },
    };

    balance(tree);
    ret
}

pub fn remove<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> Option<Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let ret = {
        let node = tree.as_mut()?;
        match node.entry.cmp_key(key) {
            Ordering::Less => remove(&mut node.left, key),
            Ordering::Greater => remove(&mut node.right, key),
            Ordering::Equal => {
                if node.left.is_some() && node.right.is_some() {
                    debug!("Splicing in-order successor into a node with two children");
                    // the successor comes out of the right subtree and its entry moves up here
                    let Node { entry, .. } = *remove_min(&mut node.right);
                    Some(mem::replace(&mut node.entry, entry))
                } else {
                    let mut removed = tree.take().expect("Expected a non-empty tree.");
                    *tree = removed.left.take().or_else(|| removed.right.take());
                    return Some(removed.entry);
                }
            },
        }
    };

    if ret.is_some() {
        balance(tree);
    }
    ret
}

pub fn get<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match node.entry.cmp_key(key) {
        Ordering::Less => get(&node.left, key),
        Ordering::Greater => get(&node.right, key),
        Ordering::Equal => Some(&node.entry),
    })
}

pub fn get_mut<'a, T, U, V>(tree: &'a mut Tree<T, U>, key: &V) -> Option<&'a mut Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_mut().and_then(|node| match node.entry.cmp_key(key) {
        Ordering::Less => get_mut(&mut node.left, key),
        Ordering::Greater => get_mut(&mut node.right, key),
        Ordering::Equal => Some(&mut node.entry),
    })
}

pub fn ceil<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match node.entry.cmp_key(key) {
        Ordering::Greater => ceil(&node.right, key),
        Ordering::Less => ceil(&node.left, key).or(Some(&node.entry)),
        Ordering::Equal => Some(&node.entry),
    })
}

pub fn floor<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match node.entry.cmp_key(key) {
        Ordering::Less => floor(&node.left, key),
        Ordering::Greater => floor(&node.right, key).or(Some(&node.entry)),
        Ordering::Equal => Some(&node.entry),
    })
}

pub fn min<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.entry
    })
}

pub fn max<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.entry
    })
}

// Recomputes every height bottom-up, comparing it against the cached one and checking the balance
// factor. Returns the height of `tree`.
pub fn check_balance<T, U>(tree: &Tree<T, U>) -> Result<usize> {
    let node = match tree {
        Some(node) => node,
        None => return Ok(0),
    };
    let left = check_balance(&node.left)?;
    let right = check_balance(&node.right)?;
    let actual = cmp::max(left, right) + 1;
    if node.height != actual {
        return Err(Error::HeightMismatch {
            stored: node.height,
            actual,
        });
    }
    let balance = left as isize - right as isize;
    if balance.abs() > 1 {
        return Err(Error::Unbalanced { balance });
    }
    Ok(actual)
}

#[cfg(test)]
mod tests {
    use super::{check_balance, insert, remove, rotate_left, rotate_right, Tree};
    use crate::avl_tree::node::Node;
    use crate::error::Error;

    fn keys(tree: &Tree<u32, ()>) -> Vec<u32> {
        let mut ret = Vec::new();
        if let Some(node) = tree {
            ret.extend(keys(&node.left));
            ret.push(node.entry.key);
            ret.extend(keys(&node.right));
        }
        ret
    }

    fn leaf(key: u32) -> Option<Box<Node<u32, ()>>> {
        Some(Box::new(Node::new(key, ())))
    }

    #[test]
    fn test_rotations_preserve_order_and_heights() {
        let mut root = Box::new(Node::new(2, ()));
        root.left = leaf(1);
        let mut right = Box::new(Node::new(4, ()));
        right.left = leaf(3);
        right.right = leaf(5);
        right.update();
        root.right = Some(right);
        root.update();

        let rotated = rotate_left(root);
        assert_eq!(rotated.entry.key, 4);
        assert_eq!(rotated.height, 3);
        let tree = Some(rotated);
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5]);
        assert_eq!(tree.as_ref().and_then(|n| n.left.as_ref()).map(|n| n.height), Some(2));

        let rotated = rotate_right(tree.expect("Expected non-empty tree."));
        assert_eq!(rotated.entry.key, 2);
        let tree = Some(rotated);
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5]);
        assert!(check_balance(&tree).is_ok());
    }

    #[test]
    fn test_double_rotation_cases() {
        for order in &[[3, 1, 2], [1, 3, 2]] {
            let mut tree = None;
            for key in order.iter() {
                insert(&mut tree, Node::new(*key, ()));
            }
            assert_eq!(tree.as_ref().map(|node| node.entry.key), Some(2));
            assert_eq!(check_balance(&tree).ok(), Some(2));
        }
    }

    #[test]
    fn test_remove_rebalances_successor_path() {
        let mut tree = None;
        for key in &[5, 2, 8, 1, 4, 7, 10, 3, 6, 9, 11, 12] {
            insert(&mut tree, Node::new(*key, ()));
        }
        remove(&mut tree, &5);
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 6, 7, 8, 9, 10, 11, 12]);
        assert!(check_balance(&tree).is_ok());
    }

    #[test]
    fn test_check_balance_reports_stale_height() {
        let mut root = Box::new(Node::new(2, ()));
        root.left = leaf(1);
        let tree = Some(root);
        match check_balance(&tree) {
            Err(Error::HeightMismatch { stored: 1, actual: 2 }) => {},
            _ => panic!("Expected a height mismatch."),
        }
    }

    #[test]
    fn test_check_balance_reports_imbalance() {
        let mut middle = Box::new(Node::new(2, ()));
        middle.left = leaf(1);
        middle.update();
        let mut root = Box::new(Node::new(3, ()));
        root.left = Some(middle);
        root.update();
        match check_balance(&Some(root)) {
            Err(Error::Unbalanced { balance: 2 }) => {},
            _ => panic!("Expected an unbalanced node."),
        }
    }
}
