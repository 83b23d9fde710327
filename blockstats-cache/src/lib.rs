//! TTL cache for blockstats.
//!
//! Generic in-memory cache with configurable capacity and expiration.
//! Values are stored with their concrete type, so reads never need a cast.

mod cache;

pub use cache::{CacheConfig, CacheStats, TtlCache};
