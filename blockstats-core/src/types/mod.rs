//! Domain types for blockstats.
//!
//! - [`Stat`]: aggregate statistics computed by the stats source

mod stat;

pub use stat::*;
