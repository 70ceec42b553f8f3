use std::borrow::Borrow;
use std::cmp::Ordering;

/// A key-value pair stored inside a node of any of the trees.
#[derive(Debug, PartialEq)]
pub struct Entry<T, U> {
    pub key: T,
    pub value: U,
}

impl<T, U> Entry<T, U> {
    pub fn new(key: T, value: U) -> Self {
        Entry { key, value }
    }

    pub fn into_pair(self) -> (T, U) {
        (self.key, self.value)
    }

    pub fn as_pair(&self) -> (&T, &U) {
        (&self.key, &self.value)
    }

    pub fn cmp_key<V>(&self, key: &V) -> Ordering
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        key.cmp(self.key.borrow())
    }
}
