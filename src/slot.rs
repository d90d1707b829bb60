//! Slot state for the open-addressing store.

/// Storage state of a single position in the slot array.
///
/// The tagged variant couples the lifetime of the key and value to the
/// occupancy of the slot: a vacated slot cannot keep stale data around.
#[derive(Debug, Clone)]
pub(crate) enum Slot<K, V> {
    /// Never occupied since the last rebuild. Terminates every probe walk:
    /// reaching `Empty` means the key is definitively absent.
    Empty,
    /// Previously occupied, now deleted. Skipped by searches (the key may
    /// lie further down the probe chain) but reusable by insertions.
    Tombstone,
    /// A live entry, together with the key's full 64-bit hash.
    ///
    /// The stored hash is computed once at insertion and reused both for
    /// the hash half of the key match and for rehashing on growth, so the
    /// key's `Hash` impl is never re-invoked after insertion.
    Occupied {
        /// Full hash of `key` at the time of insertion.
        hash: u64,
        /// The entry's key.
        key: K,
        /// The entry's value.
        value: V,
    },
}

impl<K, V> Slot<K, V> {
    /// Returns `true` for live entries.
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied { .. })
    }
}

/// Allocates a fresh all-`Empty` slot array of the given capacity.
pub(crate) fn empty_slots<K, V>(capacity: usize) -> Box<[Slot<K, V>]> {
    (0..capacity).map(|_| Slot::Empty).collect()
}
