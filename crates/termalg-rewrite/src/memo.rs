//! A bounded memo table.
//!
//! Maps keys to previously computed values. When full, the table is cleared
//! before the next insertion, which keeps the bookkeeping trivial.

use std::hash::Hash;

use hashbrown::HashMap;

/// A memo table with hit and miss counters.
#[derive(Debug)]
pub struct MemoTable<K, V> {
    map: HashMap<K, V>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<K: Eq + Hash, V: Clone> MemoTable<K, V> {
    /// Creates a table holding at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity.min(1024)),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up a key, counting the hit or miss.
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.map.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores a value.
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        if self.map.len() >= self.capacity && !self.map.contains_key(&key) {
            self.map.clear();
        }
        self.map.insert(key, value);
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of successful lookups.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Returns the number of failed lookups.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_table() {
        let mut table = MemoTable::with_capacity(2);

        assert_eq!(table.get(&"a"), None);
        table.insert("a", 1);
        table.insert("b", 2);
        assert_eq!(table.get(&"a"), Some(1));
        assert_eq!(table.len(), 2);

        // Full: the next new key starts over.
        table.insert("c", 3);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&"a"), None);
        assert_eq!(table.get(&"c"), Some(3));

        assert_eq!(table.hits(), 2);
        assert_eq!(table.misses(), 2);
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut table = MemoTable::with_capacity(0);
        table.insert(1, 1);
        assert!(table.is_empty());
    }
}
