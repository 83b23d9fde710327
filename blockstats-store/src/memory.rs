//! In-memory stats source.
//!
//! Holds the current aggregate record in process memory. Useful for local
//! development and as a controllable source in tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use blockstats_core::error::{Result, StatsError};
use blockstats_core::traits::StatRepository;
use blockstats_core::types::Stat;

/// In-memory stats source.
///
/// # Thread Safety
///
/// All operations are thread-safe and can be called concurrently.
#[derive(Debug, Default)]
pub struct MemoryStatRepository {
    /// Current record, if one has been published
    current: RwLock<Option<Stat>>,
    /// Number of queries served or failed
    queries: AtomicU64,
}

impl MemoryStatRepository {
    /// Creates an empty source. Queries fail until a record is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source that already holds `stat`.
    pub fn with_stat(stat: Stat) -> Self {
        Self {
            current: RwLock::new(Some(stat)),
            queries: AtomicU64::new(0),
        }
    }

    /// Replaces the current record.
    pub fn set(&self, stat: Stat) {
        *self.current.write() = Some(stat);
    }

    /// Removes the current record.
    pub fn clear(&self) {
        *self.current.write() = None;
    }

    /// Returns how many times the source has been queried.
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatRepository for MemoryStatRepository {
    #[instrument(skip(self))]
    async fn find_current_stats(&self) -> Result<Stat> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        let stat = self
            .current
            .read()
            .clone()
            .ok_or_else(|| StatsError::SourceQuery("no stats have been computed yet".into()))?;

        debug!(total_blocks = stat.total_blocks, "Loaded stats from memory");
        Ok(stat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_returns_current_stat() {
        let repo = MemoryStatRepository::with_stat(Stat::new(100));
        let stat = repo.find_current_stats().await.unwrap();
        assert_eq!(stat, Stat::new(100));
        assert_eq!(repo.query_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_source_fails() {
        let repo = MemoryStatRepository::new();
        let err = repo.find_current_stats().await.unwrap_err();
        assert!(matches!(err, StatsError::SourceQuery(_)));
        assert_eq!(repo.query_count(), 1);
    }

    #[tokio::test]
    async fn test_set_and_clear() {
        let repo = MemoryStatRepository::new();
        repo.set(Stat::new(5).with_proofs(2));
        assert_eq!(repo.find_current_stats().await.unwrap().num_proofs, Some(2));

        repo.clear();
        assert!(repo.find_current_stats().await.is_err());
        assert_eq!(repo.query_count(), 2);
    }

    #[test]
    fn test_concurrent_queries_are_counted() {
        let repo = MemoryStatRepository::with_stat(Stat::new(1));
        tokio_test::block_on(async {
            let (a, b) = tokio::join!(repo.find_current_stats(), repo.find_current_stats());
            assert!(a.is_ok() && b.is_ok());
        });
        assert_eq!(repo.query_count(), 2);
    }
}
