//! Generational arena for circuit gates.
//!
//! Gates are addressed through [`GateId`] handles instead of raw vector
//! indices. A handle carries the generation of the slot it was minted for, so
//! a handle to a removed gate keeps resolving to `None` even after the slot is
//! reused. This removes the need to rewrite wire endpoints when a gate is
//! deleted: handles to surviving gates stay valid unchanged.

use std::fmt;

/// A stable handle to a gate in an [`Arena`].
///
/// # Invariants
///
/// - `index` addresses a slot that existed when the handle was minted.
/// - The handle resolves only while the slot's generation matches.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GateId {
    index: u32,
    generation: u32,
}

impl GateId {
    /// Returns the raw slot index. Suitable only for diagnostics; the index
    /// alone does not identify a gate across removals.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot storage with generational handles.
///
/// Iteration order is slot order: insertion order, except that freed slots are
/// reused most-recently-freed first. The circuit relies on this order being
/// stable between mutations.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    /// Indices of vacant slots, reused in LIFO order.
    free: Vec<u32>,
    /// Number of occupied slots.
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a value and returns its handle.
    pub fn insert(&mut self, value: T) -> GateId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(slot.value.is_none());
            slot.value = Some(value);
            GateId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            GateId {
                index,
                generation: 0,
            }
        }
    }

    /// Removes the value behind `id`, if the handle still resolves.
    ///
    /// The slot's generation is bumped so the removed handle (and any copy of
    /// it) goes stale immediately.
    pub fn remove(&mut self, id: GateId) -> Option<T> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation || slot.value.is_none() {
            return None;
        }
        let value = slot.value.take();
        slot.generation += 1;
        self.free.push(id.index);
        self.len -= 1;
        value
    }

    pub fn contains(&self, id: GateId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: GateId) -> Option<&T> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.value.as_ref()
    }

    pub fn get_mut(&mut self, id: GateId) -> Option<&mut T> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Removes all values and invalidates all outstanding handles.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation += 1;
                self.free.push(index as u32);
            }
        }
        self.len = 0;
    }

    /// Iterates occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (GateId, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value.as_ref().map(|value| {
                (
                    GateId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    value,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (GateId, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| {
                let generation = slot.generation;
                slot.value.as_mut().map(move |value| {
                    (
                        GateId {
                            index: index as u32,
                            generation,
                        },
                        value,
                    )
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_insert_get() {
        let mut arena = Arena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));
    }

    #[test]
    fn test_stale_handle() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        assert_eq!(arena.remove(a), Some(1));
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.remove(a), None);

        // The slot is reused, but the old handle must not alias the new value.
        let b = arena.insert(2);
        assert_eq!(b.index(), a.index());
        assert_ne!(a, b);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(b), Some(&2));
    }

    #[test]
    fn test_iteration_order() {
        let mut arena = Arena::new();
        let a = arena.insert("a");
        let _b = arena.insert("b");
        let _c = arena.insert("c");
        arena.remove(a);
        let values: Vec<_> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!["b", "c"]);

        // Freed slot is reused at the front of slot order.
        arena.insert("d");
        let values: Vec<_> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec!["d", "b", "c"]);
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        let b = arena.insert(2);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(b), None);
    }
}
