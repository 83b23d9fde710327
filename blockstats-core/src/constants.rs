//! Constants for the stats read path.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE POLICY
// ═══════════════════════════════════════════════════════════════════════════════

/// Cache key under which the stats summary is stored.
///
/// Every stats lookup uses this key; it is never derived from the request.
pub const STATS_CACHE_KEY: &str = "stats";

/// How long a computed stats summary stays readable in the cache, in seconds.
pub const STATS_CACHE_TTL_SECS: u64 = 60;

/// [`STATS_CACHE_TTL_SECS`] as a [`Duration`].
pub const STATS_CACHE_TTL: Duration = Duration::from_secs(STATS_CACHE_TTL_SECS);

/// Default interval between sweeps of expired cache entries, in seconds.
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 600;

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

/// Machine-readable code returned when stats could not be produced.
pub const STATS_UNAVAILABLE_CODE: &str = "STATS_UNAVAILABLE";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_is_one_minute() {
        assert_eq!(STATS_CACHE_TTL, Duration::from_secs(60));
    }
}
