//! Fixed-capacity object pool for transient entities
//!
//! Slots are built lazily, up to `max_slots`, and are never removed. A released
//! slot stays in place with its active flag cleared until a later `acquire`
//! hands it out again.

use crate::config::ConfigError;

/// Entities that can live in an `EntityPool`
pub trait Poolable {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

/// Stable index of a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    slots: Vec<T>,
    max_slots: usize,
}

impl<T: Poolable> EntityPool<T> {
    pub fn new(max_slots: usize) -> Result<Self, ConfigError> {
        if max_slots == 0 {
            return Err(ConfigError::ZeroCapacity { field: "max_slots" });
        }
        Ok(Self {
            slots: Vec::new(),
            max_slots,
        })
    }

    /// Check out a slot, reusing the first inactive one before building a new one.
    ///
    /// The returned entity is marked active; the caller reinitializes the rest of
    /// its state. Returns `None` when every slot is in use and the pool is full.
    pub fn acquire(&mut self, build: impl FnOnce() -> T) -> Option<(SlotId, &mut T)> {
        let index = match self.slots.iter().position(|s| !s.is_active()) {
            Some(i) => i,
            None if self.slots.len() < self.max_slots => {
                self.slots.push(build());
                self.slots.len() - 1
            }
            None => {
                log::debug!("Pool saturated ({} slots)", self.max_slots);
                return None;
            }
        };
        let slot = &mut self.slots[index];
        slot.set_active(true);
        Some((SlotId(index), slot))
    }

    /// Return a slot to the free set. The slot itself is kept for reuse.
    pub fn release(&mut self, id: SlotId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.set_active(false);
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0)
    }

    /// All constructed slots, active or not
    pub fn slots(&self) -> &[T] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [T] {
        &mut self.slots
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|s| s.is_active())
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter(|s| s.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    /// Number of slots constructed so far
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_slots
    }
}
