//! API route handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use blockstats_core::constants::{STATS_CACHE_KEY, STATS_CACHE_TTL, STATS_CACHE_TTL_SECS};
use blockstats_core::types::Stat;

use crate::dto::HealthResponse;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /stats
///
/// Serves the cached summary while it is fresh. On a miss the source is
/// queried once and a successful result is cached under the stats key;
/// failures are never cached. If the request is dropped mid-query the
/// future stops before the cache write.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<Stat>> {
    if let Some(stat) = state.cache.get(STATS_CACHE_KEY) {
        debug!(total_blocks = stat.total_blocks, "Stats cache hit");
        return Ok(Json(stat));
    }

    debug!("Stats cache miss, querying source");
    let stat = state.repository.find_current_stats().await?;

    state
        .cache
        .set_with_ttl(STATS_CACHE_KEY, stat.clone(), STATS_CACHE_TTL);

    debug!(
        total_blocks = stat.total_blocks,
        ttl_secs = STATS_CACHE_TTL_SECS,
        "Cached fresh stats"
    );

    Ok(Json(stat))
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let cache = state.cache.stats();

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        cache_entries: cache.total_entries,
        cache_hits: cache.hits,
        cache_misses: cache.misses,
    })
}
