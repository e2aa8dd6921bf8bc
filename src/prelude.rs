//! Convenience re-exports for typical use.

pub use crate::cache::WeightedLruCache;
#[cfg(feature = "concurrency")]
pub use crate::cache::ConcurrentWeightedLruCache;
pub use crate::error::{ConfigError, RejectedEntry};
#[cfg(feature = "metrics")]
pub use crate::metrics::CacheMetricsSnapshot;
pub use crate::traits::Cacheable;
