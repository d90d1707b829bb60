//! Error types for table operations.

use thiserror::Error;

/// Result type alias for fallible [`QuadMap`](crate::QuadMap) operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Failures reported by [`QuadMap`](crate::QuadMap) operations.
///
/// Every failure surfaces synchronously to the immediate caller; nothing is
/// retried or deferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// The probe walk reached an empty slot without matching the key.
    #[error("key not found")]
    KeyNotFound,
    /// A `pop` variant was called on a table with no live entries.
    #[error("cannot pop from an empty table")]
    EmptyTable,
}
