//! The entry contract the cache is polymorphic over.
//!
//! Any payload type can be stored as long as it can name itself and price
//! itself: the cache never inspects an entry beyond these two calls.

use std::hash::Hash;

/// A value that can be stored in a [`WeightedLruCache`].
///
/// The two methods form the entire contract between caller payloads and the
/// cache:
///
/// - [`key`](Cacheable::key) must be stable and unique per logical entry.
///   Inserting a second entry with the same key overwrites the first.
/// - [`size_cost`](Cacheable::size_cost) is read **once**, at insertion
///   time, in the same unit as the cache's total capacity (bytes, weighted
///   units, whatever the caller picks). Mutating a stored value so that it
///   would report a different size afterwards yields undefined capacity
///   accounting; the cache never re-queries it.
///
/// [`WeightedLruCache`]: crate::cache::WeightedLruCache
///
/// # Example
///
/// ```
/// use weightcache::traits::Cacheable;
///
/// struct Page {
///     id: u64,
///     data: Vec<u8>,
/// }
///
/// impl Cacheable for Page {
///     type Key = u64;
///
///     fn key(&self) -> u64 {
///         self.id
///     }
///
///     fn size_cost(&self) -> usize {
///         self.data.len()
///     }
/// }
/// ```
pub trait Cacheable {
    /// Lookup key type. Cloned into the index on insertion.
    type Key: Eq + Hash + Clone;

    /// Returns the stable unique key for this entry.
    fn key(&self) -> Self::Key;

    /// Returns the size cost of this entry, in capacity units.
    fn size_cost(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unit(&'static str);

    impl Cacheable for Unit {
        type Key = &'static str;

        fn key(&self) -> &'static str {
            self.0
        }

        fn size_cost(&self) -> usize {
            1
        }
    }

    #[test]
    fn trait_is_object_safe_enough_for_generics() {
        fn total_cost<E: Cacheable>(entries: &[E]) -> usize {
            entries.iter().map(|e| e.size_cost()).sum()
        }

        let entries = [Unit("a"), Unit("b")];
        assert_eq!(total_cost(&entries), 2);
        assert_eq!(entries[0].key(), "a");
    }
}
