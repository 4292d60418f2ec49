//! Replacement policies
//!
//! When every set already holds a block at a key's index, the cache asks its
//! policy which set to evict.

use chrono::{DateTime, Utc};
use std::fmt;

/// Usage bookkeeping for a single cache block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockUsage {
    /// When the block was first written
    pub created: DateTime<Utc>,
    /// When the value last changed
    pub last_modified: DateTime<Utc>,
    /// When the block was last read (initially its creation time)
    pub last_read: DateTime<Utc>,
    /// Number of reads served by this block
    pub use_count: u64,
    /// Logical clock of the last read or write; strictly increasing per cache
    pub position: u64,
}

impl BlockUsage {
    pub(crate) fn new(position: u64) -> Self {
        let now = Utc::now();
        Self {
            created: now,
            last_modified: now,
            last_read: now,
            use_count: 0,
            position,
        }
    }

    pub(crate) fn record_read(&mut self, position: u64) {
        self.last_read = Utc::now();
        self.use_count += 1;
        self.position = position;
    }

    pub(crate) fn record_write(&mut self, position: u64) {
        self.last_modified = Utc::now();
        self.position = position;
    }
}

/// Strategy for choosing which set gives up its block
pub trait ReplacementPolicy: Send + Sync + fmt::Debug {
    /// Pick a set to evict. `candidates[set]` is the usage of that set's block
    /// at the contested index; the slice is never empty.
    fn choose_set(&self, candidates: &[&BlockUsage]) -> usize;
}

/// Least recently read, by wall-clock timestamp
#[derive(Debug, Clone, Copy, Default)]
pub struct Lru;

/// Most recently read, by wall-clock timestamp
#[derive(Debug, Clone, Copy, Default)]
pub struct Mru;

/// Least recently used, by the cache's logical clock
///
/// Prefer this over [`Lru`] when accesses are closer together than the
/// timestamp resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPosition;

/// Most recently used, by the cache's logical clock
#[derive(Debug, Clone, Copy, Default)]
pub struct MruPosition;

impl ReplacementPolicy for Lru {
    fn choose_set(&self, candidates: &[&BlockUsage]) -> usize {
        first_min_by_key(candidates, |usage| usage.last_read)
    }
}

impl ReplacementPolicy for Mru {
    fn choose_set(&self, candidates: &[&BlockUsage]) -> usize {
        first_max_by_key(candidates, |usage| usage.last_read)
    }
}

impl ReplacementPolicy for LruPosition {
    fn choose_set(&self, candidates: &[&BlockUsage]) -> usize {
        first_min_by_key(candidates, |usage| usage.position)
    }
}

impl ReplacementPolicy for MruPosition {
    fn choose_set(&self, candidates: &[&BlockUsage]) -> usize {
        first_max_by_key(candidates, |usage| usage.position)
    }
}

// Ties go to the lowest set
fn first_min_by_key<T: Ord>(candidates: &[&BlockUsage], key: impl Fn(&BlockUsage) -> T) -> usize {
    candidates
        .iter()
        .enumerate()
        .min_by_key(|(_, usage)| key(usage))
        .map_or(0, |(set, _)| set)
}

fn first_max_by_key<T: Ord>(candidates: &[&BlockUsage], key: impl Fn(&BlockUsage) -> T) -> usize {
    // max_by_key keeps the last maximum, so walk backwards
    candidates
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, usage)| key(usage))
        .map_or(0, |(set, _)| set)
}
