//! Doubly linked recency list backed by [`SlotArena`].
//!
//! Nodes live in the arena and link to each other by `SlotId`, so an outside
//! index can hold a handle to any node and the list can detach, re-attach,
//! or free that node in O(1) without raw pointers.
//!
//! ```text
//!   head ─► [id_2] ◄──► [id_0] ◄──► [id_1] ◄── tail
//!           (front)                  (back)
//! ```
//!
//! The cache keeps most-recently-used at the front and evicts from the back:
//! - `push_front(value)`: new node at the front, O(1)
//! - `move_to_front(id)`: detach + attach at the front, O(1)
//! - `pop_back()` / `remove(id)`: detach + free the slot, O(1)

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed doubly linked list with stable node handles.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` is currently a node in this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Returns the value at the front, if any.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    /// Returns the value at the back, if any.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns the id of the back node, if any.
    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns the value for node `id`, if present.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value for node `id`, if present.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Inserts a new node at the front and returns its id.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        if let Some(old_head) = self.head {
            if let Some(node) = self.arena.get_mut(old_head) {
                node.prev = Some(id);
            }
        } else {
            self.tail = Some(id);
        }
        self.head = Some(id);
        id
    }

    /// Inserts a new node at the back and returns its id.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        if let Some(old_tail) = self.tail {
            if let Some(node) = self.arena.get_mut(old_tail) {
                node.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        id
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes node `id` from the list and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves an existing node to the front; returns `false` if `id` is not
    /// present.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if Some(id) == self.head {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Clears the list and frees all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Returns an iterator over values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.arena.get_mut(prev_id) {
                prev_node.next = next;
            }
        } else {
            self.head = next;
        }

        if let Some(next_id) = next {
            if let Some(next_node) = self.arena.get_mut(next_id) {
                next_node.prev = prev;
            }
        } else {
            self.tail = prev;
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }

        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        } else {
            return;
        }
        if let Some(old_head) = old_head {
            if let Some(head_node) = self.arena.get_mut(old_head) {
                head_node.prev = Some(id);
            }
        } else {
            self.tail = Some(id);
        }
        self.head = Some(id);
    }

    /// Walks the list and asserts link integrity. Test/debug builds only.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            assert!(seen.insert(id), "cycle at {:?}", id);
            let node = self.arena.get(id).expect("linked node missing from arena");
            assert_eq!(node.prev, prev);
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len());
        }

        assert_eq!(prev, self.tail);
        assert_eq!(count, self.len());
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back value iterator over an [`IntrusiveList`].
pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_basics() {
        let mut list = IntrusiveList::new();
        list.push_front("b");
        let a = list.push_front("a");
        list.push_back("c");

        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&"a"));
        assert_eq!(list.back(), Some(&"c"));

        assert_eq!(list.pop_back(), Some("c"));
        assert_eq!(list.pop_back(), Some("b"));
        assert_eq!(list.pop_back(), Some("a"));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        assert!(!list.contains(a));
    }

    #[test]
    fn move_to_front_reorders() {
        let mut list = IntrusiveList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert!(list.move_to_front(c));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["c", "a", "b"]);
        assert_eq!(list.back_id(), Some(b));

        // Front node is a no-op move.
        assert!(list.move_to_front(c));
        assert_eq!(list.front(), Some(&"c"));

        // Moving the tail updates the tail pointer.
        assert!(list.move_to_front(b));
        assert_eq!(list.back_id(), Some(a));
        list.debug_validate_invariants();
    }

    #[test]
    fn move_to_front_missing_id_is_false() {
        let mut list = IntrusiveList::new();
        let a = list.push_front(1);
        list.remove(a);
        assert!(!list.move_to_front(a));
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = IntrusiveList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["a", "c"]);

        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.front(), Some(&"c"));
        assert_eq!(list.back(), Some(&"c"));

        assert_eq!(list.remove(c), Some("c"));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn get_mut_updates_value() {
        let mut list = IntrusiveList::new();
        let id = list.push_front(5);
        if let Some(v) = list.get_mut(id) {
            *v = 7;
        }
        assert_eq!(list.get(id), Some(&7));
    }

    #[test]
    fn clear_resets_state() {
        let mut list = IntrusiveList::with_capacity(8);
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.pop_back(), None);
        list.debug_validate_invariants();
    }

    #[test]
    fn invariants_hold_after_mixed_ops() {
        let mut list = IntrusiveList::new();
        let mut ids = Vec::new();
        for i in 0..10 {
            ids.push(list.push_front(i));
        }
        list.move_to_front(ids[7]);
        list.remove(ids[3]);
        list.pop_back();
        list.move_to_front(ids[0]);
        list.debug_validate_invariants();
        assert_eq!(list.len(), 8);
    }
}
