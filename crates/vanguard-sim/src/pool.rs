//! Fixed-capacity object pool.
//!
//! Acquisition is a linear scan for the lowest-index inactive slot. At the
//! pool sizes used here (hundreds of slots) the scan is cheap, and it fixes
//! the slot order that collision tie-breaks depend on: active slots are
//! always visited lowest index first.
//!
//! A full pool is not an error. `acquire` returns `None` and the caller
//! drops whatever it wanted to spawn.

use vanguard_core::components::Entity;

/// Anything that can live in an `EntityPool` slot.
pub trait Poolable: Default {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
}

impl Poolable for Entity {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Pre-allocated slots for one entity family. Never grows.
#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    slots: Vec<T>,
}

impl<T: Poolable> EntityPool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| T::default()).collect(),
        }
    }

    /// Claim the first free slot, reset to default and marked active.
    pub fn acquire(&mut self) -> Option<&mut T> {
        self.acquire_slot().map(|(_, item)| item)
    }

    /// Like `acquire`, also reporting which slot was claimed.
    pub fn acquire_slot(&mut self) -> Option<(usize, &mut T)> {
        let slot = self.slots.iter().position(|item| !item.is_active())?;
        let item = &mut self.slots[slot];
        *item = T::default();
        item.set_active(true);
        Some((slot, item))
    }

    /// Mark a slot inactive. Out-of-range or already-free slots are ignored.
    pub fn release(&mut self, slot: usize) {
        if let Some(item) = self.slots.get_mut(slot) {
            item.set_active(false);
        }
    }

    /// Release every slot.
    pub fn clear(&mut self) {
        for item in &mut self.slots {
            item.set_active(false);
        }
    }

    /// Active slot, or `None` if free or out of range.
    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot).filter(|item| item.is_active())
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots.get_mut(slot).filter(|item| item.is_active())
    }

    pub fn for_each_active(&self, mut f: impl FnMut(usize, &T)) {
        for (slot, item) in self.iter_active() {
            f(slot, item);
        }
    }

    pub fn for_each_active_mut(&mut self, mut f: impl FnMut(usize, &mut T)) {
        for (slot, item) in self.slots.iter_mut().enumerate() {
            if item.is_active() {
                f(slot, item);
            }
        }
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_active())
    }

    /// Release every active slot for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        for item in &mut self.slots {
            if item.is_active() && !keep(item) {
                item.set_active(false);
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|item| item.is_active()).count()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_saturated(&self) -> bool {
        self.active_count() == self.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_until_saturated() {
        let mut pool: EntityPool<Entity> = EntityPool::with_capacity(3);
        for _ in 0..3 {
            assert!(pool.acquire().is_some());
        }
        assert!(pool.is_saturated());
        assert!(pool.acquire().is_none());
        assert_eq!(pool.active_count(), 3);
    }

    #[test]
    fn test_release_reuses_lowest_slot() {
        let mut pool: EntityPool<Entity> = EntityPool::with_capacity(4);
        for _ in 0..4 {
            pool.acquire();
        }
        pool.release(2);
        pool.release(1);
        let (slot, _) = pool.acquire_slot().unwrap();
        assert_eq!(slot, 1);
    }

    #[test]
    fn test_acquired_slot_is_reset() {
        let mut pool: EntityPool<Entity> = EntityPool::with_capacity(1);
        pool.acquire().unwrap().hp = 42;
        pool.release(0);
        let fresh = pool.acquire().unwrap();
        assert_eq!(fresh.hp, 0);
        assert!(fresh.active);
    }

    #[test]
    fn test_release_out_of_range_is_noop() {
        let mut pool: EntityPool<Entity> = EntityPool::with_capacity(2);
        pool.acquire();
        pool.release(99);
        pool.release(1);
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_iteration_in_slot_order() {
        let mut pool: EntityPool<Entity> = EntityPool::with_capacity(5);
        for i in 0..5 {
            pool.acquire().unwrap().hp = i;
        }
        pool.release(0);
        pool.release(3);

        let mut seen = Vec::new();
        pool.for_each_active(|slot, e| seen.push((slot, e.hp)));
        assert_eq!(seen, vec![(1, 1), (2, 2), (4, 4)]);
    }

    #[test]
    fn test_get_hides_inactive() {
        let mut pool: EntityPool<Entity> = EntityPool::with_capacity(2);
        pool.acquire();
        assert!(pool.get(0).is_some());
        assert!(pool.get(1).is_none());
        assert!(pool.get_mut(7).is_none());
    }

    #[test]
    fn test_retain_and_clear() {
        let mut pool: EntityPool<Entity> = EntityPool::with_capacity(4);
        for i in 0..4 {
            pool.acquire().unwrap().hp = i;
        }
        pool.retain(|e| e.hp % 2 == 0);
        assert_eq!(pool.active_count(), 2);
        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.capacity(), 4);
    }
}
