//! Quadratic probe sequence shared by every table walk.
//!
//! Lookup, insertion and membership testing all examine candidate slots in
//! the exact same order for a given `(hash, capacity)` pair; they differ only
//! in how they react to what each slot holds.

/// Iterator over the candidate slot indices for one key.
///
/// Attempt `k = 0, 1, 2, …` yields `(hash + k²) mod capacity`. The sequence
/// is bounded at `capacity` attempts: a key inserted into a table of this
/// capacity was placed within that bound, so any walk that exhausts it
/// without an answer has proven the key absent (or, on the insertion path,
/// that the table needs to grow).
#[derive(Debug, Clone)]
pub(crate) struct ProbeSeq {
    /// Full hash of the probed key.
    hash: u64,
    /// Capacity of the table being probed.
    capacity: usize,
    /// Next attempt number.
    attempt: usize,
}

impl ProbeSeq {
    /// Starts a probe sequence for `hash` against a table of `capacity`
    /// slots. `capacity` must be non-zero; the table never shrinks below
    /// its minimum prime capacity.
    pub(crate) fn new(hash: u64, capacity: usize) -> Self {
        Self { hash, capacity, attempt: 0 }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    // u128 intermediates: attempt² cannot overflow and capacity is non-zero,
    // so neither the square nor the modulus can fault.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn next(&mut self) -> Option<usize> {
        if self.attempt >= self.capacity {
            return None;
        }
        let k = self.attempt as u128;
        let index = (u128::from(self.hash) + k * k) % (self.capacity as u128);
        self.attempt = self.attempt.saturating_add(1);
        // The modulus keeps the result below capacity, which fits in usize.
        Some(index as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_index_is_hash_mod_capacity() {
        let mut seq = ProbeSeq::new(40, 11);
        assert_eq!(seq.next(), Some(7));
    }

    #[test]
    fn test_sequence_matches_quadratic_offsets() {
        let indices: Vec<usize> = ProbeSeq::new(3, 11).take(5).collect();
        // (3 + k²) mod 11 for k = 0..5
        assert_eq!(indices, vec![3, 4, 7, 1, 8]);
    }

    #[test]
    fn test_deterministic_replay() {
        let first: Vec<usize> = ProbeSeq::new(12_345, 23).collect();
        let second: Vec<usize> = ProbeSeq::new(12_345, 23).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bounded_at_capacity_attempts() {
        assert_eq!(ProbeSeq::new(99, 11).count(), 11);
    }

    #[test]
    fn test_prime_capacity_first_half_distinct() {
        // With a prime capacity the first ⌈capacity / 2⌉ candidates are
        // distinct, which is what makes the 0.49 load factor safe.
        let mut indices: Vec<usize> = ProbeSeq::new(5, 23).take(12).collect();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), 12);
    }

    #[test]
    fn test_large_hash_does_not_overflow() {
        let indices: Vec<usize> = ProbeSeq::new(u64::MAX, 13).take(3).collect();
        for index in indices {
            assert!(index < 13);
        }
    }
}
