//! Inventory - The keys an agent carries
//!
//! An ordered multiset with a hard capacity. Order only matters for
//! `take_random` (which picks by index) and for the access resolver's
//! "first matching key" rule.

use super::token::KeyType;
use crate::port::random::RandomSource;

/// Default number of keys an agent can hold
pub const DEFAULT_CAPACITY: usize = 3;

/// Bounded, ordered multiset of keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    keys: Vec<KeyType>,
    capacity: usize,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Build an inventory from keys, dropping whatever exceeds capacity
    pub fn with_keys(capacity: usize, keys: impl IntoIterator<Item = KeyType>) -> Self {
        let mut inventory = Self::new(capacity);
        for key in keys {
            inventory.add(key);
        }
        inventory
    }

    // ========== Getters ==========

    pub fn keys(&self) -> &[KeyType] {
        &self.keys
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.keys.len() >= self.capacity
    }

    pub fn contains(&self, key: KeyType) -> bool {
        self.keys.contains(&key)
    }

    // ========== Mutations ==========

    /// Append a key. Returns false (and changes nothing) at capacity.
    pub fn add(&mut self, key: KeyType) -> bool {
        if self.is_full() {
            return false;
        }
        self.keys.push(key);
        debug_assert!(self.keys.len() <= self.capacity);
        true
    }

    /// Remove the first key of this kind
    pub fn remove(&mut self, key: KeyType) -> bool {
        match self.keys.iter().position(|k| *k == key) {
            Some(index) => {
                self.keys.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove and return a uniformly chosen key; `None` when empty
    pub fn take_random(&mut self, rng: &mut dyn RandomSource) -> Option<KeyType> {
        if self.keys.is_empty() {
            return None;
        }
        let index = rng.index(self.keys.len());
        Some(self.keys.remove(index))
    }

    /// Remove the keys at the given indices (as reported by the access resolver)
    ///
    /// Returns the removed keys in the order the indices were given.
    /// Out-of-range or repeated indices are skipped.
    pub fn remove_indices(&mut self, indices: &[usize]) -> Vec<KeyType> {
        let mut removed = Vec::with_capacity(indices.len());
        let mut taken = vec![false; self.keys.len()];
        for &index in indices {
            if index < self.keys.len() && !taken[index] {
                taken[index] = true;
                removed.push(self.keys[index]);
            }
        }
        let mut position = 0;
        self.keys.retain(|_| {
            let keep = !taken[position];
            position += 1;
            keep
        });
        removed
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
