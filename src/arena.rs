//! Index-based node storage for trees whose nodes point at each other.

use std::mem;
use std::ops::{Index, IndexMut};

/// A handle to an object stored in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

enum Slot<T> {
    Occupied(T),
    Vacant(Option<NodeId>),
}

/// An allocator for a single type of object backed by one `Vec`.
///
/// Freed slots are threaded into a free list and handed out again by later allocations, so a
/// `NodeId` is only meaningful until the object it refers to is freed. Every object still in the
/// arena is dropped with it.
pub struct TypedArena<T> {
    head: Option<NodeId>,
    slots: Vec<Slot<T>>,
    len: usize,
}

impl<T> TypedArena<T> {
    pub fn new() -> Self {
        TypedArena {
            head: None,
            slots: Vec::new(),
            len: 0,
        }
    }

    /// Constructs an empty arena with room for `capacity` objects before it reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        TypedArena {
            head: None,
            slots: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Stores `value` and returns its handle, reusing the most recently freed slot if there is
    /// one.
    pub fn allocate(&mut self, value: T) -> NodeId {
        self.len += 1;
        match self.head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                NodeId(self.slots.len() - 1)
            },
            Some(id) => {
                match mem::replace(&mut self.slots[id.0], Slot::Occupied(value)) {
                    Slot::Vacant(next) => self.head = next,
                    Slot::Occupied(_) => panic!("Expected a vacant slot."),
                }
                id
            },
        }
    }

    /// Removes the object behind `id` from the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to an occupied slot.
    pub fn free(&mut self, id: NodeId) -> T {
        let next = self.head;
        let slot = match self.slots.get_mut(id.0) {
            Some(slot) => slot,
            None => panic!("Error: attempting to free an invalid slot."),
        };
        match mem::replace(slot, Slot::Vacant(next)) {
            Slot::Occupied(value) => {
                self.len -= 1;
                self.head = Some(id);
                value
            },
            Slot::Vacant(_) => panic!("Error: attempting to free a vacant slot."),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Drops every object in the arena. Capacity is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Index<NodeId> for TypedArena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.get(id).expect("Error: node id does not refer to an allocated node.")
    }
}

impl<T> IndexMut<NodeId> for TypedArena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.get_mut(id).expect("Error: node id does not refer to an allocated node.")
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeId, TypedArena};

    #[test]
    fn test_allocate() {
        let mut arena = TypedArena::new();
        assert_eq!(arena.allocate(0), NodeId(0));
        assert_eq!(arena.allocate(0), NodeId(1));
        assert_eq!(arena.allocate(0), NodeId(2));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_slots() {
        let mut arena = TypedArena::with_capacity(4);
        let a = arena.allocate('a');
        let b = arena.allocate('b');
        assert_eq!(arena.free(a), 'a');
        assert_eq!(arena.free(b), 'b');
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.allocate('c'), b);
        assert_eq!(arena.allocate('d'), a);
        assert_eq!(arena.allocate('e'), NodeId(2));
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_slot() {
        let mut arena = TypedArena::new();
        let id = arena.allocate(0);
        arena.free(id);
        arena.free(id);
    }

    #[test]
    #[should_panic]
    fn test_free_invalid_slot() {
        let mut arena: TypedArena<u32> = TypedArena::new();
        arena.free(NodeId(0));
    }

    #[test]
    fn test_get() {
        let mut arena = TypedArena::new();
        let id = arena.allocate(1);
        assert_eq!(arena.get(id), Some(&1));
        assert_eq!(arena.get(NodeId(1)), None);
        arena.free(id);
        assert_eq!(arena.get(id), None);
    }

    #[test]
    fn test_index_mut() {
        let mut arena = TypedArena::new();
        let id = arena.allocate(1);
        arena[id] += 1;
        assert_eq!(arena[id], 2);
        *arena.get_mut(id).unwrap() = 5;
        assert_eq!(arena[id], 5);
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new();
        arena.allocate(1);
        arena.allocate(2);
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.allocate(3), NodeId(0));
    }
}
