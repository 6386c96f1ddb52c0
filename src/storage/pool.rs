//! Fixed-capacity slot arena shared by the vertex and edge stores.
//!
//! Slots are addressed by stable indices. Allocation takes the lowest free
//! index, so iteration over occupied slots is always ascending slot order.

/// A pool of `capacity` slots, each either free or holding a `T`.
#[derive(Debug, Clone)]
pub struct SlotPool<T> {
    slots: Vec<Option<T>>,
    occupied: usize,
}

impl<T> SlotPool<T> {
    /// Creates a pool with every slot free.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots, occupied: 0 }
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Number of free slots.
    pub fn free_slots(&self) -> usize {
        self.slots.len() - self.occupied
    }

    /// Stores `value` in the first free slot and returns its index.
    ///
    /// Returns `None` without touching any slot when the pool is full.
    pub fn allocate(&mut self, value: T) -> Option<usize> {
        let idx = self.slots.iter().position(Option::is_none)?;
        self.slots[idx] = Some(value);
        self.occupied += 1;
        Some(idx)
    }

    /// Frees slot `idx` and returns its previous contents.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range or the slot is already free.
    pub fn release(&mut self, idx: usize) -> T {
        assert!(
            idx < self.slots.len(),
            "slot {idx} out of range (capacity {})",
            self.slots.len()
        );
        let value = self.slots[idx]
            .take()
            .unwrap_or_else(|| panic!("slot {idx} released while free"));
        self.occupied -= 1;
        value
    }

    /// Returns the value in slot `idx` if occupied.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Returns `true` if `idx` is in range and occupied.
    pub fn is_occupied(&self, idx: usize) -> bool {
        self.get(idx).is_some()
    }

    /// Iterates occupied slots in pool order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|value| (idx, value)))
    }

    /// Marks every slot free.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.occupied = 0;
    }
}
