//! DTOs for API responses.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Entries currently held by the stats cache
    pub cache_entries: usize,
    /// Cache lookups served from a live entry
    pub cache_hits: u64,
    /// Cache lookups that fell through to the source
    pub cache_misses: u64,
}
