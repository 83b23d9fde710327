//! # blockstats Store
//!
//! Implementations of the authoritative stats source.
//!
//! - **Memory**: a settable in-process record for development and testing
//! - **File**: a JSON snapshot re-read on every query
//!
//! ## Example
//!
//! ```rust,ignore
//! use blockstats_store::{MemoryStatRepository, StatRepository};
//! use blockstats_core::Stat;
//!
//! let repo = MemoryStatRepository::with_stat(Stat::new(100));
//! let stat = repo.find_current_stats().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;
mod file;

pub use memory::MemoryStatRepository;
pub use file::FileStatRepository;

// Re-export the trait from core
pub use blockstats_core::traits::StatRepository;
