//! Size-bounded LRU cache engine.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │                     WeightedLruCache<E>                       │
//!   │                                                               │
//!   │   ┌─────────────────────────────────────────────────────┐     │
//!   │   │  FxHashMap<E::Key, SlotId>  (index)                 │     │
//!   │   └────────────────────────┬────────────────────────────┘     │
//!   │                            │                                  │
//!   │   ┌────────────────────────▼────────────────────────────┐     │
//!   │   │  IntrusiveList<Record<E>>  (recency list)           │     │
//!   │   │                                                     │     │
//!   │   │  front ─► [MRU] ◄──► ... ◄──► [LRU] ◄─ back         │     │
//!   │   │                                                     │     │
//!   │   │  Record { key, entry: Arc<E>, weight }              │     │
//!   │   └─────────────────────────────────────────────────────┘     │
//!   │                                                               │
//!   │   remaining: usize   (remaining + Σ weight == total capacity) │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Index and list are always in 1:1 correspondence: every key maps to
//! exactly one list node and every node's key is in the index. `get`
//! promotes its record to the front; inserting past capacity evicts from
//! the back, one record at a time, exactly until the new entry fits.
//!
//! The core is single-threaded; `get` mutates the list even though it looks
//! read-only, so sharing requires serializing every operation. With the
//! `concurrency` feature, [`ConcurrentWeightedLruCache`] wraps the whole
//! engine behind one `parking_lot::RwLock` (never separate locks for index
//! and list; promotion must touch both atomically).

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::ds::{IntrusiveList, SlotId};
use crate::error::{ConfigError, RejectedEntry};
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, CacheMetricsSnapshot};
use crate::traits::Cacheable;

#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;

/// One resident entry: the payload plus the accounting read at insert time.
struct Record<E: Cacheable> {
    key: E::Key,
    entry: Arc<E>,
    weight: usize,
}

/// Size-bounded LRU cache over any [`Cacheable`] entry type.
///
/// Capacity is a weight budget, not an entry count: each entry consumes
/// `size_cost()` units, read once at insertion. Lookups, inserts, and
/// removals are O(1); an insert that must evict is O(evicted).
///
/// # Example
///
/// ```
/// use weightcache::cache::WeightedLruCache;
/// use weightcache::traits::Cacheable;
///
/// #[derive(Debug)]
/// struct Doc {
///     id: u64,
///     body: String,
/// }
///
/// impl Cacheable for Doc {
///     type Key = u64;
///
///     fn key(&self) -> u64 {
///         self.id
///     }
///
///     fn size_cost(&self) -> usize {
///         self.body.len()
///     }
/// }
///
/// let mut cache: WeightedLruCache<Doc> = WeightedLruCache::new(10).unwrap();
/// cache.insert(Doc { id: 1, body: "aaaa".into() }).unwrap();
/// cache.insert(Doc { id: 2, body: "bbbb".into() }).unwrap();
///
/// // A third 4-unit doc exceeds the budget; doc 1 is least recently used.
/// cache.insert(Doc { id: 3, body: "cccc".into() }).unwrap();
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// assert!(cache.contains(&3));
/// assert_eq!(cache.available_capacity(), 2);
/// ```
pub struct WeightedLruCache<E: Cacheable> {
    index: FxHashMap<E::Key, SlotId>,
    recency: IntrusiveList<Record<E>>,
    total_capacity: usize,
    remaining: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<E: Cacheable> WeightedLruCache<E> {
    /// Creates a cache with the given total capacity, in the same unit the
    /// entries report their size cost in.
    ///
    /// Fails with [`ConfigError`] if `total_capacity` is zero: such a cache
    /// could never admit anything.
    pub fn new(total_capacity: usize) -> Result<Self, ConfigError> {
        if total_capacity == 0 {
            return Err(ConfigError::new("total capacity must be > 0"));
        }
        Ok(Self {
            index: FxHashMap::default(),
            recency: IntrusiveList::new(),
            total_capacity,
            remaining: total_capacity,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        })
    }

    /// Looks up an entry by key and promotes it to most-recently-used.
    ///
    /// A hit counts as a use. A miss mutates nothing. Use [`peek`] for a
    /// lookup that must not disturb eviction order.
    ///
    /// [`peek`]: WeightedLruCache::peek
    pub fn get(&mut self, key: &E::Key) -> Option<Arc<E>> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.misses += 1;
                }
                return None;
            }
        };

        self.recency.move_to_front(id);

        #[cfg(feature = "metrics")]
        {
            self.metrics.hits += 1;
        }

        self.debug_audit();
        self.recency.get(id).map(|record| Arc::clone(&record.entry))
    }

    /// Looks up an entry by key without promoting it.
    pub fn peek(&self, key: &E::Key) -> Option<Arc<E>> {
        let &id = self.index.get(key)?;
        self.recency.get(id).map(|record| Arc::clone(&record.entry))
    }

    /// Inserts an entry, evicting least-recently-used records as needed.
    ///
    /// Returns the previous entry if one with the same key was overwritten.
    /// The overwritten record's weight is released before the new one is
    /// accounted, so an overwrite never double-counts.
    ///
    /// Fails with [`RejectedEntry`], without touching the cache, if the
    /// entry's size cost exceeds the total capacity: such an entry could
    /// never fit and evicting for it would only do damage. Eviction runs
    /// from the tail exactly until the entry fits, never further.
    pub fn insert(&mut self, entry: E) -> Result<Option<Arc<E>>, RejectedEntry> {
        self.insert_arc(Arc::new(entry))
    }

    /// Same as [`insert`](WeightedLruCache::insert) for an already-shared
    /// entry.
    pub fn insert_arc(&mut self, entry: Arc<E>) -> Result<Option<Arc<E>>, RejectedEntry> {
        let weight = entry.size_cost();
        if weight > self.total_capacity {
            return Err(self.reject(weight));
        }

        let key = entry.key();
        let previous = self.take_record(&key).map(|record| record.entry);

        while self.remaining < weight {
            if self.evict_one().is_none() {
                break;
            }
        }

        // Unreachable once the up-front check passed: draining the list
        // frees the full capacity. Kept so a failed insert can never leave
        // the accounting inconsistent.
        if self.remaining < weight {
            return Err(self.reject(weight));
        }

        let id = self.recency.push_front(Record {
            key: key.clone(),
            entry,
            weight,
        });
        self.index.insert(key, id);
        self.remaining -= weight;

        #[cfg(feature = "metrics")]
        {
            if previous.is_some() {
                self.metrics.updates += 1;
            } else {
                self.metrics.inserts += 1;
            }
        }

        self.debug_audit();
        Ok(previous)
    }

    /// Removes the entry for `key`, restoring its weight to the budget.
    ///
    /// Returns the removed entry, or `None` (a no-op) if the key was absent.
    pub fn remove(&mut self, key: &E::Key) -> Option<Arc<E>> {
        let record = self.take_record(key)?;

        #[cfg(feature = "metrics")]
        {
            self.metrics.removes += 1;
        }

        self.debug_audit();
        Some(record.entry)
    }

    /// Removes and returns the least-recently-used entry.
    pub fn pop_lru(&mut self) -> Option<Arc<E>> {
        let entry = self.evict_one()?;
        self.debug_audit();
        Some(entry)
    }

    /// Returns the least-recently-used entry without removing or promoting
    /// it.
    pub fn peek_lru(&self) -> Option<Arc<E>> {
        self.recency.back().map(|record| Arc::clone(&record.entry))
    }

    /// Returns `true` if an entry for `key` is resident. No promotion.
    pub fn contains(&self, key: &E::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the configured total capacity.
    pub fn total_capacity(&self) -> usize {
        self.total_capacity
    }

    /// Returns the unused part of the capacity budget.
    pub fn available_capacity(&self) -> usize {
        self.remaining
    }

    /// Returns the total size cost of resident entries.
    pub fn used_weight(&self) -> usize {
        self.total_capacity - self.remaining
    }

    /// Removes every entry and restores the full capacity budget.
    pub fn clear(&mut self) {
        self.index.clear();
        self.recency.clear();
        self.remaining = self.total_capacity;
    }

    /// Returns a copy of the operation counters.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.used_weight())
    }

    /// Audits the full engine state. Test/debug builds only.
    ///
    /// Checks the 1:1 index/list correspondence, the capacity equation
    /// `remaining + Σ weight == total_capacity`, and list link integrity.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.recency.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys but recency list has {} nodes",
                self.index.len(),
                self.recency.len()
            )));
        }

        if self.remaining > self.total_capacity {
            return Err(InvariantError::new(format!(
                "remaining capacity {} exceeds total {}",
                self.remaining, self.total_capacity
            )));
        }

        let resident: usize = self.recency.iter().map(|record| record.weight).sum();
        if self.remaining + resident != self.total_capacity {
            return Err(InvariantError::new(format!(
                "capacity equation broken: remaining {} + resident {} != total {}",
                self.remaining, resident, self.total_capacity
            )));
        }

        for (key, &id) in &self.index {
            match self.recency.get(id) {
                Some(record) if record.key == *key => {}
                Some(_) => {
                    return Err(InvariantError::new(
                        "index entry points at a node with a different key",
                    ));
                }
                None => {
                    return Err(InvariantError::new(
                        "index entry points at a node missing from the list",
                    ));
                }
            }
        }

        self.recency.debug_validate_invariants();
        Ok(())
    }

    /// Unlinks the record for `key` from both structures and restores its
    /// weight. Shared by `remove` and the overwrite path of `insert`.
    fn take_record(&mut self, key: &E::Key) -> Option<Record<E>> {
        let id = self.index.remove(key)?;
        let record = self.recency.remove(id)?;
        self.remaining += record.weight;
        Some(record)
    }

    /// Evicts the tail record: list removal, index removal, and weight
    /// restoration as one atomic step.
    fn evict_one(&mut self) -> Option<Arc<E>> {
        let record = self.recency.pop_back()?;
        self.index.remove(&record.key);
        self.remaining += record.weight;

        #[cfg(feature = "metrics")]
        {
            self.metrics.evictions += 1;
        }

        Some(record.entry)
    }

    fn reject(&mut self, weight: usize) -> RejectedEntry {
        #[cfg(feature = "metrics")]
        {
            self.metrics.rejections += 1;
        }
        RejectedEntry {
            size_cost: weight,
            total_capacity: self.total_capacity,
        }
    }

    #[inline]
    fn debug_audit(&self) {
        #[cfg(debug_assertions)]
        {
            debug_assert_eq!(self.index.len(), self.recency.len());
            debug_assert!(self.remaining <= self.total_capacity);
        }
    }
}

impl<E: Cacheable> fmt::Debug for WeightedLruCache<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedLruCache")
            .field("len", &self.len())
            .field("total_capacity", &self.total_capacity)
            .field("available_capacity", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// Whole-engine single-lock wrapper for shared use.
///
/// Promotion mutates the recency list, so `get` takes the write lock even
/// though it reads; only [`peek`](ConcurrentWeightedLruCache::peek) and the
/// introspection methods run under the read lock. Cloning shares the same
/// underlying cache.
#[cfg(feature = "concurrency")]
pub struct ConcurrentWeightedLruCache<E: Cacheable> {
    inner: Arc<parking_lot::RwLock<WeightedLruCache<E>>>,
}

#[cfg(feature = "concurrency")]
impl<E: Cacheable> Clone for ConcurrentWeightedLruCache<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<E: Cacheable> ConcurrentWeightedLruCache<E> {
    /// Creates a shared cache with the given total capacity.
    pub fn new(total_capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(parking_lot::RwLock::new(WeightedLruCache::new(
                total_capacity,
            )?)),
        })
    }

    /// Looks up and promotes an entry. Takes the write lock.
    pub fn get(&self, key: &E::Key) -> Option<Arc<E>> {
        let mut cache = self.inner.write();
        cache.get(key)
    }

    /// Looks up an entry without promoting it. Takes the read lock.
    pub fn peek(&self, key: &E::Key) -> Option<Arc<E>> {
        let cache = self.inner.read();
        cache.peek(key)
    }

    /// Inserts an entry, evicting as needed.
    pub fn insert(&self, entry: E) -> Result<Option<Arc<E>>, RejectedEntry> {
        let mut cache = self.inner.write();
        cache.insert(entry)
    }

    /// Inserts an already-shared entry, evicting as needed.
    pub fn insert_arc(&self, entry: Arc<E>) -> Result<Option<Arc<E>>, RejectedEntry> {
        let mut cache = self.inner.write();
        cache.insert_arc(entry)
    }

    /// Removes the entry for `key`.
    pub fn remove(&self, key: &E::Key) -> Option<Arc<E>> {
        let mut cache = self.inner.write();
        cache.remove(key)
    }

    /// Removes and returns the least-recently-used entry.
    pub fn pop_lru(&self) -> Option<Arc<E>> {
        let mut cache = self.inner.write();
        cache.pop_lru()
    }

    /// Returns `true` if an entry for `key` is resident.
    pub fn contains(&self, key: &E::Key) -> bool {
        let cache = self.inner.read();
        cache.contains(key)
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        let cache = self.inner.read();
        cache.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        let cache = self.inner.read();
        cache.is_empty()
    }

    /// Returns the configured total capacity.
    pub fn total_capacity(&self) -> usize {
        let cache = self.inner.read();
        cache.total_capacity()
    }

    /// Returns the unused part of the capacity budget.
    pub fn available_capacity(&self) -> usize {
        let cache = self.inner.read();
        cache.available_capacity()
    }

    /// Returns the total size cost of resident entries.
    pub fn used_weight(&self) -> usize {
        let cache = self.inner.read();
        cache.used_weight()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut cache = self.inner.write();
        cache.clear();
    }

    /// Returns a copy of the operation counters.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        let cache = self.inner.read();
        cache.metrics_snapshot()
    }
}
