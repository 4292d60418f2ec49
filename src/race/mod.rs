//! Race finish time averaging
//!
//! This module parses finish times, converts them to elapsed minutes since
//! the race start, and averages them.

pub mod averager;
pub mod parser;
pub mod statistics;

// Re-export commonly used types
pub use averager::ElapsedTimeAverager;
pub use parser::parse_finish_time;
pub use statistics::{ElapsedStats, RaceSummary};
