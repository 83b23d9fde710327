//! Common traits for blockstats.
//!
//! These traits are the seams between the read path and the systems it
//! depends on, so each side can be swapped or mocked independently.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Stat;

// ═══════════════════════════════════════════════════════════════════════════════
// STATS SOURCE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Authoritative source of aggregate statistics.
///
/// Implementations might use:
/// - In-memory storage (for testing/development)
/// - A JSON snapshot exported by the indexer
/// - SQL aggregate queries against the indexer database
///
/// The query is bounded by the caller's future: dropping it abandons the
/// query, so implementations must not leave shared state half-updated
/// across an `.await`.
#[async_trait]
pub trait StatRepository: Send + Sync {
    /// Computes the current aggregate statistics.
    async fn find_current_stats(&self) -> Result<Stat>;
}

#[async_trait]
impl<T: StatRepository + ?Sized> StatRepository for Arc<T> {
    async fn find_current_stats(&self) -> Result<Stat> {
        (**self).find_current_stats().await
    }
}
