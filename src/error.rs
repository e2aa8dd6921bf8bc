//! Error types for the weightcache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (zero total capacity).
//! - [`RejectedEntry`]: Returned when an entry cannot be admitted: its size
//!   cost exceeds the total capacity, or (defensively) it still does not fit
//!   after every resident entry has been evicted.
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (debug-only `check_invariants` methods).
//!
//! Every failure is surfaced synchronously on the call that produced it; the
//! cache performs no internal retries and is left in a consistent state
//! after any failed operation.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache construction parameters are invalid.
///
/// Produced by [`WeightedLruCache::new`](crate::cache::WeightedLruCache::new)
/// when the total capacity is zero. Fatal to construction; never recovered
/// internally.
///
/// # Example
///
/// ```
/// use weightcache::cache::WeightedLruCache;
/// use weightcache::error::ConfigError;
/// # use weightcache::traits::Cacheable;
/// # struct E;
/// # impl Cacheable for E {
/// #     type Key = u64;
/// #     fn key(&self) -> u64 { 0 }
/// #     fn size_cost(&self) -> usize { 1 }
/// # }
///
/// let err: ConfigError = WeightedLruCache::<E>::new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// RejectedEntry
// ---------------------------------------------------------------------------

/// Error returned when an entry cannot be admitted to the cache.
///
/// Caller-recoverable: retry with a smaller entry or build a larger cache.
/// Carries the offending size cost and the configured total capacity so the
/// caller can decide which.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Size cost the rejected entry reported.
    pub size_cost: usize,
    /// Total capacity of the cache that rejected it.
    pub total_capacity: usize,
}

impl fmt::Display for RejectedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry with size cost {} rejected by cache with total capacity {}",
            self.size_cost, self.total_capacity
        )
    }
}

impl std::error::Error for RejectedEntry {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by debug-only `check_invariants` methods. Carries a
/// human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("total capacity must be > 0");
        assert_eq!(err.to_string(), "total capacity must be > 0");
        assert_eq!(err.message(), "total capacity must be > 0");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn rejected_entry_display_carries_numbers() {
        let err = RejectedEntry {
            size_cost: 12,
            total_capacity: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("index/list length mismatch");
        assert_eq!(err.to_string(), "index/list length mismatch");
    }

    #[test]
    fn all_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
        assert_error::<RejectedEntry>();
        assert_error::<InvariantError>();
    }
}
