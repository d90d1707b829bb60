//! # quadmap
//!
//! An associative container built from scratch over a fixed-size slot array
//! using open addressing with quadratic probing.
//!
//! The interesting part is the probing/resizing engine that gives
//! array-backed storage dictionary semantics:
//!
//! - **Quadratic probing**: collisions resolve by examining slots
//!   `(hash + k²) mod capacity` for `k = 0, 1, 2, …`; lookup, insertion and
//!   membership testing all walk the identical sequence.
//! - **Tombstones**: deletion marks a slot as vacated rather than empty, so
//!   probe chains through it stay intact; vacated slots are reused by later
//!   insertions.
//! - **Prime capacities**: the table's capacity is always a prime (minimum
//!   11) and grows to the smallest prime at or above double the current
//!   capacity once the live-entry count reaches 49% of capacity, keeping
//!   every operation amortized O(1).
//!
//! Single-threaded by design; there is no internal synchronization. Wrap a
//! [`QuadMap`] in a lock if you need shared access.
//!
//! ## Usage
//!
//! ```rust
//! use quadmap::{QuadMap, TableError};
//!
//! let mut map = QuadMap::new();
//!
//! // Insert and look up values
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//! assert_eq!(map.get("apple"), Ok(&1));
//!
//! // Overwriting keeps the entry count unchanged
//! map.insert("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Ok(&10));
//! assert_eq!(map.len(), 2);
//!
//! // Deletion leaves a tombstone behind the scenes
//! assert_eq!(map.remove("apple"), Ok(10));
//! assert_eq!(map.get("apple"), Err(TableError::KeyNotFound));
//!
//! // Pop the remaining entries, then observe the empty-table failure
//! assert_eq!(map.pop(None::<&str>), Ok(2));
//! assert_eq!(map.pop_item(), Err(TableError::EmptyTable));
//! ```

/// Module defining the error types of table operations
mod error;
/// Module providing the prime utilities behind capacity selection
mod primes;
/// Module generating the quadratic probe sequence
mod probe;
/// Module defining the slot states of the open-addressing store
mod slot;
/// Module implementing the hash table and its public operation set
mod table;

pub use error::{Result, TableError};
pub use table::{Iter, QuadMap};
