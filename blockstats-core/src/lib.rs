//! # blockstats Core
//!
//! Core types, errors, and traits shared by every blockstats crate.
//!
//! - **Types**: the [`Stat`] aggregate record served to clients
//! - **Errors**: [`StatsError`] and the crate-wide [`Result`] alias
//! - **Constants**: cache key and TTL used by the stats read path
//! - **Traits**: [`StatRepository`], the seam to the authoritative stats source
//!
//! ## Example
//!
//! ```rust
//! use blockstats_core::Stat;
//!
//! let stat = Stat::new(100);
//! let json = serde_json::to_string(&stat).unwrap();
//! assert_eq!(json, r#"{"totalBlocks":100}"#);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, StatsError};
pub use traits::*;
pub use types::*;
