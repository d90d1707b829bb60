//! Single-threaded open-addressing hash table with quadratic probing.

use std::{
    borrow::Borrow,
    fmt,
    hash::{DefaultHasher, Hash, Hasher},
    mem,
};

use tracing::{debug, trace};

use crate::{
    error::{Result, TableError},
    primes::next_prime_at_or_above,
    probe::ProbeSeq,
    slot::{Slot, empty_slots},
};

/// An associative container built over a fixed-size slot array using open
/// addressing with quadratic probing.
///
/// Collisions are resolved by walking the probe sequence
/// `(hash + k²) mod capacity`; deletions leave tombstones so that probe
/// chains stay intact; capacities are always prime and grow to the next
/// prime at or above double the current capacity once the live-entry count
/// reaches 49% of capacity.
///
/// Keys must uphold the standard contract that `Hash` is consistent with
/// `Eq` and stable for as long as the key lives in the table; mutating a
/// key behind the table's back (e.g. through interior mutability) in a way
/// that changes its hash or equality leaves the table in an unspecified
/// state.
///
/// Not thread-safe: a `QuadMap` is exclusively owned and every operation
/// is a direct, synchronous computation over the in-memory slot array.
pub struct QuadMap<K, V> {
    /// The slot array; its length is the table's capacity, always a prime
    /// at or above [`Self::MIN_CAPACITY`].
    slots: Box<[Slot<K, V>]>,
    /// Number of live (occupied) entries. Always equals the count of
    /// occupied slots.
    len: usize,
}

/// Outcome of one insertion walk.
enum InsertSlot {
    /// A live entry with a matching key sits at this index.
    Existing(usize),
    /// A usable free slot: the first tombstone seen on the walk if there
    /// was one, otherwise the empty slot that terminated it.
    Free(usize),
    /// The attempt bound ran out without finding a usable slot. Only
    /// possible when the walk saw nothing but unrelated live entries,
    /// which heavy tombstone-free saturation would require; the caller
    /// grows the table and retries.
    Exhausted,
}

/// Hashes a key with the standard library's default hasher.
fn hash_of<Q: Hash + ?Sized>(key: &Q) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

impl<K, V> QuadMap<K, V> {
    /// Smallest capacity a table ever has; also the capacity of a freshly
    /// created or cleared table.
    pub const MIN_CAPACITY: usize = 11;

    /// Load factor threshold as an integer percentage: the table grows once
    /// `len / capacity` reaches 49%.
    const GROWTH_THRESHOLD_PERCENT: usize = 49;

    /// Creates an empty table with the minimum capacity.
    #[must_use]
    pub fn new() -> Self {
        Self { slots: empty_slots(Self::MIN_CAPACITY), len: 0 }
    }

    /// Creates an empty table whose capacity is the smallest prime at or
    /// above `capacity` (and never below the minimum capacity).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = next_prime_at_or_above(capacity.max(Self::MIN_CAPACITY));
        Self { slots: empty_slots(capacity), len: 0 }
    }

    /// Returns the number of live entries, in O(1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the table (always prime).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the current ratio of live entries to slots.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    /// Returns a lazy iterator over the live `(key, value)` pairs in
    /// increasing slot-index order. Each call starts a fresh walk.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: &self.slots, index: 0 }
    }

    /// Drops every entry and resets the table to a fresh minimum-capacity
    /// store with no tombstones.
    pub fn clear(&mut self) {
        trace!(capacity = Self::MIN_CAPACITY, "clearing table");
        self.slots = empty_slots(Self::MIN_CAPACITY);
        self.len = 0;
    }

    /// True when the live-entry count has reached the growth threshold.
    fn past_load_threshold(&self) -> bool {
        self.len.saturating_mul(100) >=
            self.slots.len().saturating_mul(Self::GROWTH_THRESHOLD_PERCENT)
    }
}

impl<K, V> QuadMap<K, V>
where
    K: Eq + Hash,
{
    /// Returns a reference to the value stored for `key`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if the probe walk reaches an empty slot
    /// without matching the key.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index(key)?;
        match self.slots.get(index) {
            Some(Slot::Occupied { value, .. }) => Ok(value),
            // find_index only ever returns occupied indices.
            _ => Err(TableError::KeyNotFound),
        }
    }

    /// Inserts `key → value`, overwriting in place if an equal key is
    /// already present. Returns the previous value on overwrite.
    ///
    /// A successful new-key insertion triggers the capacity check: once the
    /// live-entry count reaches 49% of capacity the table grows to the
    /// smallest prime at or above double the current capacity.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = hash_of(&key);
        let previous = self.insert_hashed(hash, key, value);
        if previous.is_none() && self.past_load_threshold() {
            self.grow();
        }
        previous
    }

    /// Removes the entry for `key`, marks its slot as a tombstone and
    /// returns the removed value.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] under the same condition as [`Self::get`].
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index(key)?;
        self.remove_at(index).map(|(_, value)| value).ok_or(TableError::KeyNotFound)
    }

    /// Returns `true` if the table holds a live entry for `key`. Never
    /// fails; an unsuccessful probe walk converts into `false`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_index(key).is_ok()
    }

    /// If `key` is present, returns a clone of its current value and leaves
    /// the table unchanged; otherwise inserts `key → value` and returns
    /// `value`.
    pub fn set_default(&mut self, key: K, value: V) -> V
    where
        V: Clone,
    {
        match self.get(&key) {
            Ok(current) => current.clone(),
            Err(_) => {
                self.insert(key, value.clone());
                value
            }
        }
    }

    /// Removes and returns one value.
    ///
    /// With `Some(key)` this behaves like [`Self::get`] followed by
    /// [`Self::remove`]. With `None` it removes the first live entry in
    /// slot-index order; that choice is deterministic but not part of the
    /// contract.
    ///
    /// # Errors
    ///
    /// [`TableError::EmptyTable`] when the table has no live entries (even
    /// if a key was supplied); otherwise [`TableError::KeyNotFound`] when
    /// the supplied key is absent.
    pub fn pop<Q>(&mut self, key: Option<&Q>) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.is_empty() {
            return Err(TableError::EmptyTable);
        }
        match key {
            Some(key) => self.remove(key),
            None => self.pop_item().map(|(_, value)| value),
        }
    }

    /// Removes and returns the first live `(key, value)` pair in slot-index
    /// order.
    ///
    /// # Errors
    ///
    /// [`TableError::EmptyTable`] when the table has no live entries.
    pub fn pop_item(&mut self) -> Result<(K, V)> {
        let index = self
            .slots
            .iter()
            .position(Slot::is_occupied)
            .ok_or(TableError::EmptyTable)?;
        self.remove_at(index).ok_or(TableError::EmptyTable)
    }

    /// Search-for-existing walk: probes until an empty slot (key absent),
    /// skipping tombstones, and returns the index of the live entry whose
    /// key matches.
    ///
    /// The match requires both equal keys and equal hashes; the stored hash
    /// makes the second half free and defends against keys whose equality
    /// and hash have drifted apart.
    fn find_index<Q>(&self, key: &Q) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = hash_of(key);
        for index in ProbeSeq::new(hash, self.slots.len()) {
            match self.slots.get(index) {
                None | Some(Slot::Empty) => return Err(TableError::KeyNotFound),
                Some(Slot::Tombstone) => {}
                Some(Slot::Occupied { hash: stored, key: stored_key, .. }) => {
                    if *stored == hash && stored_key.borrow() == key {
                        return Ok(index);
                    }
                }
            }
        }
        // Attempt bound exhausted. A live key is always found within the
        // bound it was inserted under, so the key is absent.
        Err(TableError::KeyNotFound)
    }

    /// Search-for-insertion-slot walk. Records the first tombstone seen and
    /// keeps probing past it: an equal key further down the chain must win
    /// over slot reuse. On reaching an empty slot the recorded tombstone,
    /// if any, is preferred, which trims tombstone accumulation along the
    /// key's probe chain.
    fn insertion_slot<Q>(&self, hash: u64, key: &Q) -> InsertSlot
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut reuse = None;
        for index in ProbeSeq::new(hash, self.slots.len()) {
            match self.slots.get(index) {
                None | Some(Slot::Empty) => {
                    return InsertSlot::Free(reuse.unwrap_or(index));
                }
                Some(Slot::Tombstone) => {
                    if reuse.is_none() {
                        reuse = Some(index);
                    }
                }
                Some(Slot::Occupied { hash: stored, key: stored_key, .. }) => {
                    if *stored == hash && stored_key.borrow() == key {
                        return InsertSlot::Existing(index);
                    }
                }
            }
        }
        // No empty slot within the bound; a recorded tombstone is still a
        // sound target because the whole bound was scanned for the key.
        match reuse {
            Some(index) => InsertSlot::Free(index),
            None => InsertSlot::Exhausted,
        }
    }

    /// Insertion with a precomputed hash: the normal path used by public
    /// insertion and by rehashing on growth. Grows and retries if the walk
    /// exhausts its attempt bound.
    fn insert_hashed(&mut self, hash: u64, key: K, value: V) -> Option<V> {
        loop {
            match self.insertion_slot(hash, &key) {
                InsertSlot::Existing(index) => {
                    if let Some(Slot::Occupied { value: stored, .. }) =
                        self.slots.get_mut(index)
                    {
                        return Some(mem::replace(stored, value));
                    }
                    // insertion_slot only reports Existing for occupied
                    // slots; nothing sensible to do here.
                    return None;
                }
                InsertSlot::Free(index) => {
                    if let Some(slot) = self.slots.get_mut(index) {
                        *slot = Slot::Occupied { hash, key, value };
                        self.len = self.len.saturating_add(1);
                    }
                    return None;
                }
                InsertSlot::Exhausted => self.grow(),
            }
        }
    }

    /// Vacates the slot at `index` if it holds a live entry: the slot
    /// becomes a tombstone and ownership of the pair moves to the caller.
    fn remove_at(&mut self, index: usize) -> Option<(K, V)> {
        let slot = self.slots.get_mut(index)?;
        if slot.is_occupied() {
            if let Slot::Occupied { key, value, .. } = mem::replace(slot, Slot::Tombstone) {
                self.len = self.len.saturating_sub(1);
                return Some((key, value));
            }
        }
        None
    }

    /// Grows to the smallest prime at or above double the current capacity
    /// and rehashes every live entry, in increasing slot-index order,
    /// through the normal insertion path. Tombstones are not carried over.
    /// The table never shrinks.
    fn grow(&mut self) {
        let target = next_prime_at_or_above(self.slots.len().saturating_mul(2));
        debug!(
            old_capacity = self.slots.len(),
            new_capacity = target,
            len = self.len,
            "growing table"
        );
        let old = mem::replace(&mut self.slots, empty_slots(target));
        self.len = 0;
        for slot in old.into_vec() {
            if let Slot::Occupied { hash, key, value } = slot {
                // Probe sequences are capacity-dependent, so every entry's
                // slot is recomputed against the new capacity. Keys are
                // distinct, hence no previous value to drop.
                self.insert_hashed(hash, key, value);
            }
        }
    }
}

impl<K, V> Default for QuadMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> QuadMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Returns the live keys as a `Vec`, in slot-index order.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(key, _)| key.clone()).collect()
    }

    /// Returns the live `(key, value)` pairs as a `Vec`, in slot-index
    /// order. Pairing with [`Self::keys`] and [`Self::values`] is
    /// consistent because all three walk the same slots in the same order.
    #[must_use]
    pub fn items(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
    }
}

impl<K, V> QuadMap<K, V>
where
    V: Clone,
{
    /// Returns the live values as a `Vec`, in slot-index order.
    #[must_use]
    pub fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }
}

/// Structural copy: a fresh minimum-capacity table is rebuilt from the live
/// entries through the normal insertion path, so tombstones are not copied
/// and the clone's capacity reflects only its live contents.
impl<K, V> Clone for QuadMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        for (key, value) in self.iter() {
            copy.insert(key.clone(), value.clone());
        }
        copy
    }
}

/// Two tables are equal when they have the same number of live entries and
/// every `(key, value)` pair of the left operand is present, with an equal
/// value, in the right one. Equal lengths make the one-directional check
/// sufficient; the type system already restricts comparison to `QuadMap`s
/// of the same key and value types.
impl<K, V> PartialEq for QuadMap<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        self.iter().all(|(key, value)| {
            other.get(key).is_ok_and(|found| found == value)
        })
    }
}

impl<K, V> Eq for QuadMap<K, V>
where
    K: Eq + Hash,
    V: Eq,
{
}

impl<K, V> fmt::Debug for QuadMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Extend<(K, V)> for QuadMap<K, V>
where
    K: Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for QuadMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Lazy iterator over the live entries of a [`QuadMap`], in increasing
/// slot-index order.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// The table's slot array.
    slots: &'a [Slot<K, V>],
    /// Next slot index to examine.
    index: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied { key, value, .. } = slot {
                return Some((key, value));
            }
        }
        None
    }
}
