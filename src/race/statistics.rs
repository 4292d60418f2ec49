//! Statistics over a batch of elapsed times
//!
//! The averager folds elapsed minutes into [`ElapsedStats`] and reads the
//! rounded average or a full [`RaceSummary`] back out of it.

use crate::types::RoundingMode;
use serde::Serialize;

/// Running totals for elapsed minutes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElapsedStats {
    /// Number of samples collected
    pub sample_count: u64,
    /// Sum of all elapsed minutes (for calculating mean)
    pub sum_minutes: i64,
    /// Smallest elapsed time observed
    pub min_minutes: Option<i64>,
    /// Largest elapsed time observed
    pub max_minutes: Option<i64>,
}

impl ElapsedStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new elapsed time sample
    pub fn add_sample(&mut self, elapsed_minutes: i64) {
        self.sample_count += 1;
        self.sum_minutes += elapsed_minutes;
        self.min_minutes = Some(
            self.min_minutes
                .map_or(elapsed_minutes, |min| min.min(elapsed_minutes)),
        );
        self.max_minutes = Some(
            self.max_minutes
                .map_or(elapsed_minutes, |max| max.max(elapsed_minutes)),
        );
    }

    /// Exact arithmetic mean, `None` when no samples were added
    pub fn mean(&self) -> Option<f64> {
        if self.sample_count == 0 {
            return None;
        }
        Some(self.sum_minutes as f64 / self.sample_count as f64)
    }

    /// Mean rounded to whole minutes, `None` when no samples were added
    pub fn rounded_mean(&self, rounding: RoundingMode) -> Option<i64> {
        if self.sample_count == 0 {
            return None;
        }
        Some(rounding.round_quotient(self.sum_minutes, self.sample_count as i64))
    }

    /// Build a summary of the collected samples
    pub fn summary(&self, rounding: RoundingMode) -> Option<RaceSummary> {
        Some(RaceSummary {
            count: self.sample_count,
            mean_minutes: self.mean()?,
            average_minutes: self.rounded_mean(rounding)?,
            fastest_minutes: self.min_minutes?,
            slowest_minutes: self.max_minutes?,
            rounding,
        })
    }
}

impl FromIterator<i64> for ElapsedStats {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut stats = Self::new();
        for elapsed in iter {
            stats.add_sample(elapsed);
        }
        stats
    }
}

/// Summary of a batch of finish times
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceSummary {
    pub count: u64,
    /// Unrounded mean elapsed minutes
    pub mean_minutes: f64,
    /// Mean elapsed minutes rounded with `rounding`
    pub average_minutes: i64,
    pub fastest_minutes: i64,
    pub slowest_minutes: i64,
    pub rounding: RoundingMode,
}
