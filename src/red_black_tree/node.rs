use crate::arena::NodeId;
use crate::entry::Entry;
use std::fmt;

/// The color of a node in a red black tree.
///
/// An absent child counts as a black node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "R"),
            Color::Black => write!(f, "B"),
        }
    }
}

pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub color: Color,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

impl<T, U> Node<T, U> {
    // new nodes are always red so that inserting one never changes a black height
    pub fn new(key: T, value: U, parent: Option<NodeId>) -> Self {
        Node {
            entry: Entry::new(key, value),
            color: Color::Red,
            left: None,
            right: None,
            parent,
        }
    }
}
