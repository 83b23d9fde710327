//! App state: config, stats cache, stats source.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use blockstats_cache::{CacheConfig, TtlCache};
use blockstats_core::constants::{DEFAULT_CLEANUP_INTERVAL_SECS, STATS_CACHE_TTL_SECS};
use blockstats_core::traits::StatRepository;
use blockstats_core::types::Stat;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Interval between sweeps of expired cache entries
    pub cleanup_interval_secs: u64,
    /// Per-request deadline; `None` leaves requests unbounded
    pub request_timeout_secs: Option<u64>,
    /// JSON snapshot backing the stats source
    pub stats_file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cleanup_interval_secs: DEFAULT_CLEANUP_INTERVAL_SECS,
            request_timeout_secs: None,
            stats_file: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        Self {
            cleanup_interval_secs: env_u64("CACHE_CLEANUP_INTERVAL_SECS")
                .unwrap_or(defaults.cleanup_interval_secs),
            request_timeout_secs: env_u64("REQUEST_TIMEOUT_SECS").filter(|s| *s > 0),
            stats_file: std::env::var("STATS_FILE").ok().map(PathBuf::from),
        }
    }

    /// Interval between cache sweeps.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }

    /// Per-request deadline, if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Shared state handed to every request handler.
pub struct AppState {
    /// Server configuration
    pub config: ApiConfig,
    /// Process-wide stats cache
    pub cache: Arc<TtlCache<Stat>>,
    /// Authoritative stats source
    pub repository: Arc<dyn StatRepository>,
    /// When the state was built, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Creates state with a fresh, empty cache.
    pub fn new(config: ApiConfig, repository: Arc<dyn StatRepository>) -> Self {
        let cache = Arc::new(TtlCache::with_config(CacheConfig {
            default_ttl_seconds: STATS_CACHE_TTL_SECS,
            ..CacheConfig::default()
        }));
        Self::with_cache(config, repository, cache)
    }

    /// Creates state around an existing cache, e.g. one shared with
    /// another router or warmed before the server starts.
    pub fn with_cache(
        config: ApiConfig,
        repository: Arc<dyn StatRepository>,
        cache: Arc<TtlCache<Stat>>,
    ) -> Self {
        Self {
            config,
            cache,
            repository,
            started_at: Instant::now(),
        }
    }
}
