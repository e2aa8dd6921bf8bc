//! Operation counters for the cache engine.
//!
//! The core is `&mut`-driven, so plain `u64` counters suffice; a
//! [`CacheMetricsSnapshot`] copies them out for reporting. All counters are
//! cumulative since construction (`clear` does not reset them).

/// Internal counter block owned by the cache engine.
#[derive(Debug, Default)]
pub(crate) struct CacheMetrics {
    pub(crate) hits: u64,
    pub(crate) misses: u64,
    pub(crate) inserts: u64,
    pub(crate) updates: u64,
    pub(crate) removes: u64,
    pub(crate) evictions: u64,
    pub(crate) rejections: u64,
}

impl CacheMetrics {
    pub(crate) fn snapshot(&self, len: usize, used_weight: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            hits: self.hits,
            misses: self.misses,
            inserts: self.inserts,
            updates: self.updates,
            removes: self.removes,
            evictions: self.evictions,
            rejections: self.rejections,
            len,
            used_weight,
        }
    }
}

/// Point-in-time copy of the engine's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    /// `get` calls that found an entry (and promoted it).
    pub hits: u64,
    /// `get` calls that found nothing.
    pub misses: u64,
    /// Inserts that created a new record.
    pub inserts: u64,
    /// Inserts that overwrote an existing record.
    pub updates: u64,
    /// Explicit removals that found an entry.
    pub removes: u64,
    /// Records evicted from the tail to make room.
    pub evictions: u64,
    /// Inserts rejected because the entry could not fit.
    pub rejections: u64,
    /// Entry count at snapshot time.
    pub len: usize,
    /// Total size cost of resident entries at snapshot time.
    pub used_weight: usize,
}

impl CacheMetricsSnapshot {
    /// Total `get` calls observed.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit ratio in `[0.0, 1.0]`; `0.0` when no lookups have happened.
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.lookups();
        if lookups == 0 {
            return 0.0;
        }
        self.hits as f64 / lookups as f64
    }
}
