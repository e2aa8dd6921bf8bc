//! Slot storage with stable ids and free-slot reuse.
//!
//! Records referenced from both an index and a linked list need handles that
//! stay valid while other records come and go. `SlotArena` hands out a
//! `SlotId` per insert; removed slots go on a free list and are reused by
//! later inserts, so the backing vector never shifts live entries.

/// Stable handle to a slot in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Vector-backed slot arena with a free list.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty arena with reserved slot capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value` and returns its stable id, reusing a freed slot if one
    /// is available.
    pub fn insert(&mut self, value: T) -> SlotId {
        let idx = if let Some(idx) = self.free.pop() {
            self.slots[idx] = Some(value);
            idx
        } else {
            self.slots.push(Some(value));
            self.slots.len() - 1
        };
        self.len += 1;
        SlotId(idx)
    }

    /// Frees the slot `id` and returns its value, if occupied.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        let value = slot.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(value)
    }

    /// Returns the value at `id`, if occupied.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    /// Returns a mutable reference to the value at `id`, if occupied.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Returns `true` if `id` refers to an occupied slot.
    pub fn contains(&self, id: SlotId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Frees every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut arena = SlotArena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));

        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.len(), 1);
        assert!(!arena.contains(a));
        assert!(arena.contains(b));
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = SlotArena::with_capacity(4);
        let a = arena.insert(1);
        arena.insert(2);
        assert_eq!(arena.remove(a), Some(1));

        let c = arena.insert(3);
        assert_eq!(c.index(), a.index());
        assert_eq!(arena.get(c), Some(&3));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut arena = SlotArena::new();
        let id = arena.insert(10);
        if let Some(v) = arena.get_mut(id) {
            *v = 20;
        }
        assert_eq!(arena.get(id), Some(&20));
    }

    #[test]
    fn clear_resets_everything() {
        let mut arena = SlotArena::new();
        let a = arena.insert("x");
        arena.insert("y");
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.len(), 0);
        assert!(!arena.contains(a));
        assert_eq!(arena.get(a), None);
    }

    #[test]
    fn stale_id_after_reuse_reads_new_value() {
        // SlotIds are stable, not generational: a stale id whose slot was
        // reused observes the new occupant. Callers (the recency list and
        // cache index) remove ids from circulation before freeing slots.
        let mut arena = SlotArena::new();
        let a = arena.insert("old");
        arena.remove(a);
        let b = arena.insert("new");
        assert_eq!(a.index(), b.index());
        assert_eq!(arena.get(a), Some(&"new"));
    }
}
