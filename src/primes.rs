//! Prime number utilities backing the capacity manager.
//!
//! Capacities are always prime: with a prime modulus the quadratic probe
//! sequence `(hash + k²) mod capacity` produces distinct indices for the
//! first `⌈capacity / 2⌉` attempts, which keeps probe chains short below the
//! growth threshold.

/// Returns the smallest prime greater than or equal to `n`.
///
/// The capacity manager only ever calls this with `n >= 2`, but smaller
/// inputs are clamped rather than rejected.
#[allow(clippy::arithmetic_side_effects)] // candidate stays far below usize::MAX
pub(crate) fn next_prime_at_or_above(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

/// Trial-division primality test: checks 2 and 3, then factors of the form
/// `6k ± 1` up to the square root of `n`.
#[allow(clippy::arithmetic_side_effects)] // divisors start at 2, never zero
fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut factor: usize = 5;
    while factor.saturating_mul(factor) <= n {
        if n % factor == 0 || n % (factor + 2) == 0 {
            return false;
        }
        factor += 6;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(11));
        assert!(!is_prime(21));
        assert!(is_prime(23));
        assert!(is_prime(97));
        assert!(!is_prime(100));
        assert!(is_prime(7919));
    }

    #[test]
    fn test_next_prime_at_or_above() {
        assert_eq!(next_prime_at_or_above(0), 2);
        assert_eq!(next_prime_at_or_above(2), 2);
        assert_eq!(next_prime_at_or_above(11), 11);
        assert_eq!(next_prime_at_or_above(12), 13);
        assert_eq!(next_prime_at_or_above(22), 23);
        assert_eq!(next_prime_at_or_above(46), 47);
        assert_eq!(next_prime_at_or_above(90), 97);
    }

    #[test]
    fn test_doubling_chain_from_minimum_capacity() {
        // The capacity sequence the table actually walks when growing.
        let mut capacity = 11;
        let mut chain = Vec::new();
        for _ in 0..4 {
            capacity = next_prime_at_or_above(2 * capacity);
            chain.push(capacity);
        }
        assert_eq!(chain, vec![23, 47, 97, 197]);
    }
}
