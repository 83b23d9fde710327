//! Error types for blockstats.
//!
//! A single error hierarchy built with `thiserror`. The stats read path
//! treats every variant the same way: the request fails and nothing is cached.

use thiserror::Error;

/// Result type alias using `StatsError`.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Main error type for all blockstats operations.
#[derive(Debug, Error)]
pub enum StatsError {
    // ═══════════════════════════════════════════════════════════════════════════
    // SOURCE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The stats source could not produce a result.
    #[error("Stats query failed: {0}")]
    SourceQuery(String),

    /// The storage backing the stats source failed.
    #[error("Storage error: {0}")]
    Storage(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // I/O & CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StatsError {
    /// Returns true if the error came from the stats source or its storage.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            StatsError::SourceQuery(_) | StatsError::Storage(_) | StatsError::Io(_)
        )
    }
}
