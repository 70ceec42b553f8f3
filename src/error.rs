//! Errors reported when a tree fails one of its structural checks.

use std::error;
use std::fmt;
use std::result;

/// An error describing which structural invariant a tree violates.
///
/// Absent keys are never reported through this type: lookups and removals of missing keys return
/// `None`. These errors are produced by the `check_invariants` method of each map and set, and by
/// writing a rendered tree into a formatter.
#[derive(Debug)]
pub enum Error {
    /// An in-order traversal did not yield strictly ascending keys.
    Unordered,
    /// The tracked number of entries disagrees with the number of nodes in the tree.
    LengthMismatch { expected: usize, actual: usize },
    /// An avl node caches a height that differs from the height of its subtree.
    HeightMismatch { stored: usize, actual: usize },
    /// The heights of the two subtrees of an avl node differ by more than one.
    Unbalanced { balance: isize },
    /// The root of a red black tree is red.
    RedRoot,
    /// A red node of a red black tree has a red child.
    RedViolation,
    /// Two paths from the same red black node reach the sentinel through a different number of
    /// black nodes.
    BlackHeightMismatch { left: usize, right: usize },
    /// A red black node does not point back at the node that owns it.
    BrokenParentLink,
    /// Writing a rendered tree failed.
    Fmt(fmt::Error),
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Error {
        Error::Fmt(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Fmt(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Unordered => write!(f, "keys are not in strictly ascending order"),
            Error::LengthMismatch { expected, actual } => write!(
                f,
                "tree tracks {} entries but contains {} nodes",
                expected, actual,
            ),
            Error::HeightMismatch { stored, actual } => write!(
                f,
                "node stores height {} but its subtree has height {}",
                stored, actual,
            ),
            Error::Unbalanced { balance } => write!(f, "node has balance factor {}", balance),
            Error::RedRoot => write!(f, "root node is red"),
            Error::RedViolation => write!(f, "red node has a red child"),
            Error::BlackHeightMismatch { left, right } => write!(
                f,
                "black height of left subtree is {} but black height of right subtree is {}",
                left, right,
            ),
            Error::BrokenParentLink => write!(f, "child does not link back to its parent"),
            Error::Fmt(error) => write!(f, "{}", error),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

// Shared by every map: keys must come out of an in-order walk strictly ascending, and there must
// be exactly `len` of them.
pub(crate) fn check_ordered<'a, T, I>(keys: I, len: usize) -> Result<()>
where
    T: 'a + Ord,
    I: Iterator<Item = &'a T>,
{
    let mut count = 0;
    let mut prev = None;
    for key in keys {
        if let Some(prev) = prev {
            if prev >= key {
                return Err(Error::Unordered);
            }
        }
        prev = Some(key);
        count += 1;
    }
    if count != len {
        return Err(Error::LengthMismatch {
            expected: len,
            actual: count,
        });
    }
    Ok(())
}
