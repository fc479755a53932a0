//! Fixed-capacity open-addressing table
//!
//! [`HashTable`] maps a short name to a value using linear probing over a
//! fixed array of slots. The same type backs both the reserved-word table
//! (loaded once before scanning starts) and the symbol table (grown one
//! declaration at a time by the grammar).
//!
//! # Hashing
//!
//! A key hashes to the sum of its character codes, treating the key as if it
//! were right-padded with spaces up to [`MAX_TOKEN_LEN`], reduced modulo the
//! table capacity. Keys that differ only in trailing padding therefore share
//! a home slot; lookups always finish with an exact string comparison.
//!
//! # Capacity
//!
//! The table never grows. Once every slot on a key's probe sequence is taken
//! by other keys, [`HashTable::insert`] returns [`Insertion::Full`].

use crate::config::{HASH_TABLE_SIZE, MAX_TOKEN_LEN};

/// A key/value pair stored in exactly one slot of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    pub key: String,
    pub value: V,
}

/// Result of [`HashTable::insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The key now occupies the given slot
    Inserted(usize),
    /// The key was already present at the given slot; nothing changed
    Duplicate(usize),
    /// No free slot was found on the probe sequence
    Full,
}

/// Open-addressing table with `N` slots and linear probing
#[derive(Debug, Clone)]
pub struct HashTable<V, const N: usize = HASH_TABLE_SIZE> {
    slots: [Option<Entry<V>>; N],
    len: usize,
}

impl<V, const N: usize> HashTable<V, N> {
    pub fn new() -> Self {
        HashTable {
            slots: std::array::from_fn(|_| None),
            len: 0,
        }
    }

    /// Home slot for `key`.
    pub fn hash(key: &str) -> usize {
        let mut sum: usize = 0;
        let mut counted = 0;
        for ch in key.chars().take(MAX_TOKEN_LEN) {
            sum += ch as usize;
            counted += 1;
        }
        // pad short keys with spaces
        sum += (MAX_TOKEN_LEN - counted) * (' ' as usize);
        sum % N
    }

    /// Slot holding `key`, if present.
    ///
    /// Probes forward from the home slot, stopping at the first empty slot or
    /// after visiting every slot once.
    pub fn lookup(&self, key: &str) -> Option<usize> {
        let mut index = Self::hash(key);
        for _ in 0..N {
            match &self.slots[index] {
                None => return None,
                Some(entry) if entry.key == key => return Some(index),
                Some(_) => index = (index + 1) % N,
            }
        }
        None
    }

    /// Insert `key` unless it is already present.
    ///
    /// The first insert of a key wins: a repeated insert reports
    /// [`Insertion::Duplicate`] and keeps the original value.
    pub fn insert(&mut self, key: &str, value: V) -> Insertion {
        let mut index = Self::hash(key);
        for _ in 0..N {
            match &self.slots[index] {
                None => {
                    self.slots[index] = Some(Entry {
                        key: key.to_string(),
                        value,
                    });
                    self.len += 1;
                    return Insertion::Inserted(index);
                }
                Some(entry) if entry.key == key => return Insertion::Duplicate(index),
                Some(_) => index = (index + 1) % N,
            }
        }
        Insertion::Full
    }

    /// Entry stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Entry<V>> {
        self.lookup(key).and_then(|index| self.slots[index].as_ref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Entry in slot `index`, `None` when the slot is empty or out of range.
    pub fn slot(&self, index: usize) -> Option<&Entry<V>> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Every slot in index order, empty ones included.
    pub fn slots(&self) -> impl Iterator<Item = (usize, Option<&Entry<V>>)> {
        self.slots.iter().enumerate().map(|(i, slot)| (i, slot.as_ref()))
    }

    /// Occupied slots in index order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Entry<V>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|entry| (i, entry)))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub fn capacity(&self) -> usize {
        N
    }
}

impl<V, const N: usize> Default for HashTable<V, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Table = HashTable<u8, HASH_TABLE_SIZE>;

    #[test]
    fn test_hash_pads_with_spaces() {
        // "A" + seven spaces = 65 + 7 * 32 = 289, 289 % 30 = 19
        assert_eq!(Table::hash("A"), 19);
        assert_eq!(Table::hash("A"), Table::hash("A "));
    }

    #[test]
    fn test_hash_ignores_characters_past_bound() {
        assert_eq!(
            Table::hash("ABCDEFGH"),
            Table::hash("ABCDEFGHXYZ")
        );
    }

    #[test]
    fn test_insert_then_lookup() {
        let mut table = Table::new();
        let slot = match table.insert("COUNT", 7) {
            Insertion::Inserted(slot) => slot,
            other => panic!("Expected insert, got {:?}", other),
        };
        assert_eq!(table.lookup("COUNT"), Some(slot));
        assert_eq!(table.get("COUNT").map(|e| e.value), Some(7));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_duplicate_keeps_first_value() {
        let mut table = Table::new();
        let first = table.insert("X", 1);
        let second = table.insert("X", 2);

        assert!(matches!(first, Insertion::Inserted(_)));
        assert!(matches!(second, Insertion::Duplicate(_)));
        assert_eq!(table.get("X").map(|e| e.value), Some(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_collisions_probe_forward() {
        // "AB" and "BA" sum to the same value
        let mut table = Table::new();
        let a = table.insert("AB", 1);
        let b = table.insert("BA", 2);

        let (Insertion::Inserted(a), Insertion::Inserted(b)) = (a, b) else {
            panic!("Expected both inserts to succeed");
        };
        assert_eq!(b, (a + 1) % HASH_TABLE_SIZE);
        assert_eq!(table.lookup("AB"), Some(a));
        assert_eq!(table.lookup("BA"), Some(b));
    }

    #[test]
    fn test_probe_wraps_around() {
        let mut table: HashTable<u8, 3> = HashTable::new();
        let home = HashTable::<u8, 3>::hash("A");
        // fill the home slot and everything after it up to the end
        let mut keys = Vec::new();
        for candidate in ["A", "B", "C", "D", "E", "F", "G"] {
            if HashTable::<u8, 3>::hash(candidate) == home {
                keys.push(candidate);
            }
        }
        assert!(keys.len() >= 3, "need three colliding keys");

        for key in &keys[..3] {
            assert!(matches!(table.insert(key, 0), Insertion::Inserted(_)));
        }
        assert!(table.is_full());
        assert_eq!(table.lookup(keys[2]), Some((home + 2) % 3));
    }

    #[test]
    fn test_full_table() {
        let mut table: HashTable<u8, 4> = HashTable::new();
        for key in ["P", "Q", "R", "S"] {
            assert!(matches!(table.insert(key, 0), Insertion::Inserted(_)));
        }
        assert_eq!(table.insert("T", 0), Insertion::Full);
        // existing keys are still reported as duplicates, not full
        assert!(matches!(table.insert("Q", 9), Insertion::Duplicate(_)));
    }

    #[test]
    fn test_lookup_requires_exact_match() {
        let mut table = Table::new();
        table.insert("AB ", 1);
        assert_eq!(table.lookup("AB"), None);

        table.insert("AB", 2);
        let padded = table.lookup("AB ");
        let plain = table.lookup("AB");
        assert!(padded.is_some() && plain.is_some());
        assert_ne!(padded, plain);
    }

    #[test]
    fn test_lookup_stops_at_empty_slot() {
        let table = Table::new();
        assert_eq!(table.lookup("MISSING"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_slots_include_empty() {
        let mut table: HashTable<u8, 5> = HashTable::new();
        table.insert("Z", 3);
        let slots: Vec<_> = table.slots().collect();
        assert_eq!(slots.len(), 5);
        assert_eq!(slots.iter().filter(|(_, e)| e.is_some()).count(), 1);
        assert_eq!(table.entries().count(), 1);
    }
}
