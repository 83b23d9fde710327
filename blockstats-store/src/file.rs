//! File-based stats source.
//!
//! Reads a JSON snapshot of the aggregate record written by the indexer.
//! The file is re-read on every query, so the snapshot can be replaced
//! while the server runs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, instrument, warn};

use blockstats_core::error::{Result, StatsError};
use blockstats_core::traits::StatRepository;
use blockstats_core::types::Stat;

/// File-based stats source.
///
/// # File Format
///
/// A single JSON object in the same camelCase shape the API serves:
///
/// ```text
/// {"totalBlocks": 100, "numProofs": 42}
/// ```
#[derive(Clone, Debug)]
pub struct FileStatRepository {
    /// Path to the snapshot file
    path: PathBuf,
}

impl FileStatRepository {
    /// Creates a source reading from `path`.
    ///
    /// The file does not need to exist yet; queries fail until it does.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `stat` as the new snapshot.
    ///
    /// Writes to a temporary file first and renames it into place, so a
    /// concurrent query never observes a partial snapshot.
    #[instrument(skip(self, stat))]
    pub async fn save(&self, stat: &Stat) -> Result<()> {
        let serialized = serde_json::to_vec_pretty(stat)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &serialized).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!(path = ?self.path, "Stats snapshot saved");
        Ok(())
    }
}

#[async_trait]
impl StatRepository for FileStatRepository {
    #[instrument(skip(self), fields(path = ?self.path))]
    async fn find_current_stats(&self) -> Result<Stat> {
        let contents = fs::read(&self.path).await.map_err(|e| {
            warn!(error = %e, "Failed to read stats snapshot");
            StatsError::Storage(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        let stat: Stat = serde_json::from_slice(&contents).map_err(|e| {
            StatsError::SourceQuery(format!("malformed stats snapshot: {}", e))
        })?;

        debug!(total_blocks = stat.total_blocks, "Loaded stats snapshot");
        Ok(stat)
    }
}
