//! Average elapsed time calculation
//!
//! Finish times are converted to absolute minutes since a shared epoch, so
//! elapsed time is a plain subtraction even across day boundaries.

use crate::config::RaceSettings;
use crate::error::{RaceAverageError, Result};
use crate::race::parser::parse_finish_time;
use crate::race::statistics::{ElapsedStats, RaceSummary};
use crate::types::{
    RaceTime, RoundingMode, DEFAULT_RACE_START, MAX_FINISH_TIMES, MIN_FINISH_TIMES,
};
use tracing::debug;

/// Averages finish times relative to a fixed race start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTimeAverager {
    start: RaceTime,
    rounding: RoundingMode,
}

impl ElapsedTimeAverager {
    /// Create an averager starting at 08:00 AM on day 1 that rounds ties away from zero
    pub fn new() -> Self {
        Self::with_rounding(RoundingMode::default())
    }

    /// Create an averager with the default start and the given rounding mode
    pub fn with_rounding(rounding: RoundingMode) -> Self {
        Self {
            start: default_start(),
            rounding,
        }
    }

    /// Create an averager with a custom race start
    pub fn with_start(start: &str, rounding: RoundingMode) -> Result<Self> {
        let start = parse_finish_time(start).map_err(|e| RaceAverageError::ConfigurationError {
            message: format!("Invalid race start: {}", e),
        })?;

        Ok(Self { start, rounding })
    }

    /// Create an averager from configuration
    pub fn from_config(settings: &RaceSettings) -> Result<Self> {
        Self::with_start(&settings.start, settings.rounding)
    }

    pub fn start(&self) -> RaceTime {
        self.start
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Minutes from the race start to a single finish time
    pub fn elapsed_minutes(&self, time: &str) -> Result<i64> {
        let finish = parse_finish_time(time)?;
        Ok(finish.minutes_since(&self.start))
    }

    /// Rounded mean elapsed minutes over 1 to 50 finish times
    pub fn average_minutes<S: AsRef<str>>(&self, times: &[S]) -> Result<i64> {
        let stats = self.collect(times)?;
        stats.rounded_mean(self.rounding).ok_or_else(|| {
            RaceAverageError::InvalidInputCount {
                count: times.len(),
            }
            .into()
        })
    }

    /// Count, mean, rounded average, fastest and slowest over 1 to 50 finish times
    pub fn summarize<S: AsRef<str>>(&self, times: &[S]) -> Result<RaceSummary> {
        let stats = self.collect(times)?;
        stats.summary(self.rounding).ok_or_else(|| {
            RaceAverageError::InvalidInputCount {
                count: times.len(),
            }
            .into()
        })
    }

    fn collect<S: AsRef<str>>(&self, times: &[S]) -> Result<ElapsedStats> {
        check_count(times.len())?;

        let mut stats = ElapsedStats::new();
        for time in times {
            let elapsed = self.elapsed_minutes(time.as_ref())?;
            debug!(time = time.as_ref(), elapsed, "Parsed finish time");
            stats.add_sample(elapsed);
        }

        debug!(
            count = stats.sample_count,
            sum = stats.sum_minutes,
            start = %self.start,
            "Collected elapsed times"
        );
        Ok(stats)
    }
}

impl Default for ElapsedTimeAverager {
    fn default() -> Self {
        Self::new()
    }
}

fn check_count(count: usize) -> Result<()> {
    if !(MIN_FINISH_TIMES..=MAX_FINISH_TIMES).contains(&count) {
        return Err(RaceAverageError::InvalidInputCount { count }.into());
    }
    Ok(())
}

fn default_start() -> RaceTime {
    parse_finish_time(DEFAULT_RACE_START).expect("DEFAULT_RACE_START is a valid finish time")
}
