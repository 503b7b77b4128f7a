//! Open-addressing hash table with linear probing.
//!
//! Keys are placed starting at `hash(key) mod capacity` and probe forward,
//! wrapping at the end of the slot array. After any insert that pushes the
//! load factor above [`MAX_LOAD_FACTOR`] the table doubles and reinserts every
//! pair. The table never shrinks.
//!
//! Removal leaves a tombstone instead of an empty slot. Clearing the slot
//! outright would cut the probe chain of any key that was placed past it, and
//! a later `search` for that key would stop early at the hole.
use log::debug;
use rustc_hash::FxBuildHasher;
use std::hash::{BuildHasher, Hash};

/// Capacity used by `HashTable::new()`.
pub const DEFAULT_CAPACITY: usize = 32;

/// Occupancy ratio above which an insert triggers a rehash.
pub const MAX_LOAD_FACTOR: f64 = 0.7;

#[derive(Clone, Debug)]
enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied(K, V),
}

impl<K, V> Slot<K, V> {
    fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(..))
    }
}

/// An associative map using open addressing.
///
/// # Examples
/// ```
/// use chain_reaction::hash_table::HashTable;
/// let mut table = HashTable::new();
/// assert!(table.insert("ply", 4));
/// assert!(!table.insert("ply", 9), "duplicate keys are rejected");
/// assert_eq!(table.search(&"ply"), Some(&4));
/// assert!(table.modify(&"ply", 3));
/// assert!(table.remove(&"ply"));
/// assert_eq!(table.search(&"ply"), None);
/// ```
#[derive(Clone, Debug)]
pub struct HashTable<K, V, S = FxBuildHasher> {
    slots: Vec<Slot<K, V>>,
    occupied: usize,
    hasher: S,
}

impl<K: Hash + Eq, V> HashTable<K, V> {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with `capacity` slots (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher)
    }
}

impl<K: Hash + Eq, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashTable<K, V, S> {
    /// Creates an empty table that hashes keys with `hasher`.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        HashTable {
            slots: Self::empty_slots(capacity.max(1)),
            occupied: 0,
            hasher,
        }
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding a key.
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Inserts `key` with `value`.
    ///
    /// Returns `false` and leaves the table untouched if `key` is already
    /// present. Otherwise stores the pair in the first free slot of its probe
    /// sequence (reusing a tombstone when one comes first) and returns `true`.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let capacity = self.capacity();
        let home = self.home_slot(&key);
        let mut free = None;

        for i in 0..capacity {
            let idx = (home + i) % capacity;
            match &self.slots[idx] {
                Slot::Empty => {
                    free.get_or_insert(idx);
                    break;
                }
                Slot::Tombstone => {
                    free.get_or_insert(idx);
                }
                Slot::Occupied(k, _) if *k == key => return false,
                Slot::Occupied(..) => {}
            }
        }

        let Some(idx) = free else {
            // Unreachable while the load factor holds, but a full table is
            // recoverable: grow and retry.
            self.rehash();
            return self.insert(key, value);
        };

        self.slots[idx] = Slot::Occupied(key, value);
        self.occupied += 1;

        if self.load_factor() > MAX_LOAD_FACTOR {
            self.rehash();
        }
        true
    }

    /// Returns the value stored under `key`, or `None` if it is absent.
    pub fn search(&self, key: &K) -> Option<&V> {
        let idx = self.find(key)?;
        match &self.slots[idx] {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    /// Overwrites the value stored under `key`. Returns `false` if `key` is absent.
    pub fn modify(&mut self, key: &K, value: V) -> bool {
        let Some(idx) = self.find(key) else {
            return false;
        };
        match &mut self.slots[idx] {
            Slot::Occupied(_, v) => {
                *v = value;
                true
            }
            _ => false,
        }
    }

    /// Removes `key`. Returns `false` if `key` is absent.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(idx) = self.find(key) else {
            return false;
        };
        self.slots[idx] = Slot::Tombstone;
        self.occupied -= 1;
        true
    }

    /// Iterates over stored pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        })
    }

    fn load_factor(&self) -> f64 {
        self.occupied as f64 / self.capacity() as f64
    }

    fn home_slot(&self, key: &K) -> usize {
        (self.hasher.hash_one(key) % self.capacity() as u64) as usize
    }

    /// Walks the probe sequence of `key`; stops at the first empty slot.
    fn find(&self, key: &K) -> Option<usize> {
        let capacity = self.capacity();
        let home = self.home_slot(key);
        for i in 0..capacity {
            let idx = (home + i) % capacity;
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied(k, _) if k == key => return Some(idx),
                _ => {}
            }
        }
        None
    }

    /// Doubles the capacity and reinserts every pair. Tombstones are dropped.
    fn rehash(&mut self) {
        let new_capacity = self.capacity() * 2;
        debug!(
            "rehash: {} occupied, capacity {} -> {}",
            self.occupied,
            self.capacity(),
            new_capacity
        );
        let old = std::mem::replace(&mut self.slots, Self::empty_slots(new_capacity));
        for slot in old {
            if let Slot::Occupied(k, v) = slot {
                self.place(k, v);
            }
        }
    }

    /// Stores a pair known to be absent, without the duplicate scan or load check.
    fn place(&mut self, key: K, value: V) {
        let capacity = self.capacity();
        let home = self.home_slot(&key);
        for i in 0..capacity {
            let idx = (home + i) % capacity;
            if !self.slots[idx].is_occupied() {
                self.slots[idx] = Slot::Occupied(key, value);
                return;
            }
        }
    }

    fn empty_slots(capacity: usize) -> Vec<Slot<K, V>> {
        std::iter::repeat_with(|| Slot::Empty).take(capacity).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::Hasher;

    /// Hashes integer keys to themselves so probe chains are predictable.
    #[derive(Clone, Copy, Default)]
    struct IdentityState;

    struct IdentityHasher(u64);

    impl Hasher for IdentityHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            for b in bytes {
                self.0 = (self.0 << 8) | u64::from(*b);
            }
        }

        fn write_u64(&mut self, n: u64) {
            self.0 = n;
        }
    }

    impl BuildHasher for IdentityState {
        type Hasher = IdentityHasher;

        fn build_hasher(&self) -> IdentityHasher {
            IdentityHasher(0)
        }
    }

    fn identity_table(capacity: usize) -> HashTable<u64, &'static str, IdentityState> {
        HashTable::with_capacity_and_hasher(capacity, IdentityState)
    }

    #[test]
    fn test_no_rehash_below_threshold() {
        let mut table = HashTable::new();
        for k in 0..22u32 {
            assert!(table.insert(k, k * 10));
        }
        // 22 / 32 = 0.6875
        assert_eq!(table.capacity(), 32);
        assert_eq!(table.occupied_count(), 22);
    }

    #[test]
    fn test_rehash_doubles_and_preserves_mappings() {
        let mut table = HashTable::new();
        for k in 0..23u32 {
            assert!(table.insert(k, k * 10));
        }
        // 23 / 32 = 0.71875 crosses the threshold on the last insert.
        assert_eq!(table.capacity(), 64);
        assert_eq!(table.occupied_count(), 23);
        for k in 0..23u32 {
            assert_eq!(table.search(&k), Some(&(k * 10)), "key {} lost in rehash", k);
        }
    }

    #[test]
    fn test_duplicate_insert_keeps_existing_value() {
        let mut table = HashTable::new();
        assert!(table.insert("a", 1));
        assert!(!table.insert("a", 2));
        assert_eq!(table.search(&"a"), Some(&1));
        assert_eq!(table.occupied_count(), 1);
    }

    #[test]
    fn test_modify_and_remove_absent_keys() {
        let mut table: HashTable<&str, i32> = HashTable::default();
        assert!(!table.modify(&"missing", 5));
        assert!(!table.remove(&"missing"));
        assert_eq!(table.search(&"missing"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_colliding_keys_probe_linearly() {
        let mut table = identity_table(32);
        assert!(table.insert(0, "zero"));
        assert!(table.insert(32, "thirty-two"));
        assert!(table.insert(64, "sixty-four"));
        assert!(matches!(table.slots[0], Slot::Occupied(0, _)));
        assert!(matches!(table.slots[1], Slot::Occupied(32, _)));
        assert!(matches!(table.slots[2], Slot::Occupied(64, _)));
    }

    #[test]
    fn test_probe_wraps_around_end() {
        let mut table = identity_table(32);
        assert!(table.insert(31, "last"));
        assert!(table.insert(63, "wrapped"));
        assert!(matches!(table.slots[0], Slot::Occupied(63, _)));
        assert_eq!(table.search(&63), Some(&"wrapped"));
    }

    #[test]
    fn test_remove_keeps_later_chain_reachable() {
        let mut table = identity_table(32);
        table.insert(0, "zero");
        table.insert(32, "thirty-two");
        table.insert(64, "sixty-four");

        assert!(table.remove(&32));
        assert!(matches!(table.slots[1], Slot::Tombstone));
        assert_eq!(table.search(&64), Some(&"sixty-four"));
        assert!(table.modify(&64, "still here"));
        assert!(!table.insert(64, "dup"), "duplicate check must probe past tombstones");
        assert_eq!(table.search(&64), Some(&"still here"));
    }

    #[test]
    fn test_insert_reuses_tombstone() {
        let mut table = identity_table(32);
        table.insert(0, "zero");
        table.insert(32, "thirty-two");
        table.insert(64, "sixty-four");
        table.remove(&32);

        assert!(table.insert(96, "ninety-six"));
        assert!(matches!(table.slots[1], Slot::Occupied(96, _)));
        assert_eq!(table.occupied_count(), 3);
    }

    #[test]
    fn test_rehash_drops_tombstones() {
        let mut table = identity_table(4);
        table.insert(0, "a");
        table.insert(4, "b");
        table.remove(&0);
        table.insert(1, "c");
        // 2 / 4 = 0.5; one more pushes it over.
        table.insert(2, "d");
        assert_eq!(table.capacity(), 8);
        assert!(table.slots.iter().all(|s| !matches!(s, Slot::Tombstone)));
        assert_eq!(table.search(&4), Some(&"b"));
        assert_eq!(table.search(&1), Some(&"c"));
        assert_eq!(table.search(&2), Some(&"d"));
    }

    #[test]
    fn test_iter_visits_live_pairs_in_slot_order() {
        let mut table = identity_table(8);
        table.insert(5, "five");
        table.insert(1, "one");
        table.insert(3, "three");
        table.remove(&3);
        let pairs: Vec<(u64, &str)> = table.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs, vec![(1, "one"), (5, "five")]);
    }
}
