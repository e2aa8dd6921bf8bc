//! weightcache: a size-bounded in-process LRU cache.
//!
//! Entries report their own size cost through the [`Cacheable`] trait; the
//! cache tracks remaining capacity in the same unit and evicts from the
//! least-recently-used end until a pending insert fits. All operations are
//! synchronous, O(1) amortized, and leave the cache consistent on failure.
//!
//! [`Cacheable`]: crate::traits::Cacheable
//!
//! ```
//! use weightcache::prelude::*;
//!
//! struct Blob {
//!     name: String,
//!     bytes: Vec<u8>,
//! }
//!
//! impl Cacheable for Blob {
//!     type Key = String;
//!
//!     fn key(&self) -> String {
//!         self.name.clone()
//!     }
//!
//!     fn size_cost(&self) -> usize {
//!         self.bytes.len()
//!     }
//! }
//!
//! let mut cache: WeightedLruCache<Blob> = WeightedLruCache::new(1024).unwrap();
//! cache
//!     .insert(Blob {
//!         name: "a".to_string(),
//!         bytes: vec![0; 512],
//!     })
//!     .unwrap();
//! assert!(cache.contains(&"a".to_string()));
//! assert_eq!(cache.available_capacity(), 512);
//! ```

pub mod cache;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
