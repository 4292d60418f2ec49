//! Race Average - finish time averaging for multi-day races
//!
//! This crate parses finish times written as `HH:MM XM, DAY n`, averages the
//! minutes elapsed since the race start, and provides the red-fill colour
//! helper used when rendering rating remainders. A small set-associative
//! cache with pluggable replacement policies lives in [`cache`].

pub mod cache;
pub mod color;
pub mod config;
pub mod error;
pub mod race;
pub mod types;

// Re-export commonly used types
pub use error::{RaceAverageError, Result};
pub use types::*;

// Re-export key components
pub use cache::{Cache, CacheOptions, ReplacementPolicy};
pub use color::{red_fill, red_fill_style, Rgb};
pub use race::{ElapsedTimeAverager, RaceSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
