//! Common types used throughout the race averaging crate

use crate::error::RaceAverageError;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in one hour
pub const MINUTES_PER_HOUR: i64 = 60;

/// Hours in one day
pub const HOURS_PER_DAY: i64 = 24;

/// Minutes in one race day
pub const MINUTES_PER_DAY: i64 = MINUTES_PER_HOUR * HOURS_PER_DAY;

/// Fewest finish times accepted by a single averaging call
pub const MIN_FINISH_TIMES: usize = 1;

/// Most finish times accepted by a single averaging call
pub const MAX_FINISH_TIMES: usize = 50;

/// Default race start: 8 in the morning of the first day
pub const DEFAULT_RACE_START: &str = "08:00 AM, DAY 1";

/// AM/PM designator of a 12-hour clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    AM,
    PM,
}

impl Meridiem {
    /// Convert a 12-hour clock hour (1-12) to a 24-hour clock hour (0-23)
    pub fn to_24_hour(self, hour: u32) -> u32 {
        match (self, hour) {
            (Meridiem::AM, 12) => 0,
            (Meridiem::AM, h) => h,
            (Meridiem::PM, 12) => 12,
            (Meridiem::PM, h) => h + 12,
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::AM => write!(f, "AM"),
            Meridiem::PM => write!(f, "PM"),
        }
    }
}

/// A parsed finish time: a clock time on a numbered race day
///
/// The canonical text form is `HH:MM XM, DAY n`. Parsing lives in
/// [`crate::race::parser`]; `FromStr` delegates there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RaceTime {
    clock: NaiveTime,
    day: u32,
}

impl RaceTime {
    pub(crate) fn new(clock: NaiveTime, day: u32) -> Self {
        Self { clock, day }
    }

    /// Clock time of day in 24-hour form
    pub fn clock(&self) -> NaiveTime {
        self.clock
    }

    /// Race day number, starting at 1
    pub fn day(&self) -> u32 {
        self.day
    }

    /// AM/PM half of the day
    pub fn meridiem(&self) -> Meridiem {
        let (is_pm, _) = self.clock.hour12();
        if is_pm {
            Meridiem::PM
        } else {
            Meridiem::AM
        }
    }

    /// Minutes since midnight of this time's day
    pub fn minutes_of_day(&self) -> i64 {
        i64::from(self.clock.hour()) * MINUTES_PER_HOUR + i64::from(self.clock.minute())
    }

    /// Minutes since the shared epoch (day 0, midnight)
    pub fn absolute_minutes(&self) -> i64 {
        self.minutes_of_day() + i64::from(self.day) * MINUTES_PER_DAY
    }

    /// Signed minutes from `start` to this time
    pub fn minutes_since(&self, start: &RaceTime) -> i64 {
        self.absolute_minutes() - start.absolute_minutes()
    }
}

impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, DAY {}", self.clock.format("%I:%M %p"), self.day)
    }
}

impl FromStr for RaceTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::race::parser::parse_finish_time(s)
    }
}

impl TryFrom<String> for RaceTime {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RaceTime> for String {
    fn from(time: RaceTime) -> Self {
        time.to_string()
    }
}

/// How an exact `.5` average is rounded to whole minutes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// 240.5 -> 241, -240.5 -> -241
    #[default]
    HalfAwayFromZero,
    /// 240.5 -> 240, 241.5 -> 242
    HalfToEven,
}

impl RoundingMode {
    /// Divide `sum` by `count` and round to the nearest integer.
    ///
    /// Uses exact integer arithmetic so ties are detected precisely.
    /// `count` must be positive.
    pub fn round_quotient(self, sum: i64, count: i64) -> i64 {
        debug_assert!(count > 0);

        let floor = sum.div_euclid(count);
        let remainder = sum.rem_euclid(count);

        match (2 * remainder).cmp(&count) {
            std::cmp::Ordering::Less => floor,
            std::cmp::Ordering::Greater => floor + 1,
            std::cmp::Ordering::Equal => match self {
                // floor is already the value away from zero for a negative tie
                RoundingMode::HalfAwayFromZero if sum < 0 => floor,
                RoundingMode::HalfAwayFromZero => floor + 1,
                RoundingMode::HalfToEven if floor % 2 == 0 => floor,
                RoundingMode::HalfToEven => floor + 1,
            },
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::HalfAwayFromZero => write!(f, "half-away-from-zero"),
            RoundingMode::HalfToEven => write!(f, "half-to-even"),
        }
    }
}

impl FromStr for RoundingMode {
    type Err = RaceAverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "half-away-from-zero" | "away-from-zero" => Ok(RoundingMode::HalfAwayFromZero),
            "half-to-even" | "to-even" | "bankers" => Ok(RoundingMode::HalfToEven),
            _ => Err(RaceAverageError::ConfigurationError {
                message: format!("Invalid rounding mode: {}", s),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meridiem_conversion() {
        assert_eq!(Meridiem::AM.to_24_hour(12), 0);
        assert_eq!(Meridiem::AM.to_24_hour(1), 1);
        assert_eq!(Meridiem::AM.to_24_hour(11), 11);
        assert_eq!(Meridiem::PM.to_24_hour(12), 12);
        assert_eq!(Meridiem::PM.to_24_hour(1), 13);
        assert_eq!(Meridiem::PM.to_24_hour(11), 23);
    }

    #[test]
    fn test_absolute_minutes_of_default_start() {
        let start: RaceTime = DEFAULT_RACE_START.parse().unwrap();
        assert_eq!(start.absolute_minutes(), 1920);
        assert_eq!(start.meridiem(), Meridiem::AM);
        assert_eq!(start.day(), 1);
    }

    #[test]
    fn test_display_is_canonical() {
        let time: RaceTime = "01:58 PM, DAY 20".parse().unwrap();
        assert_eq!(time.to_string(), "01:58 PM, DAY 20");
        assert_eq!(time.meridiem(), Meridiem::PM);

        let midnight: RaceTime = "12:00 AM, DAY 3".parse().unwrap();
        assert_eq!(midnight.to_string(), "12:00 AM, DAY 3");
        assert_eq!(midnight.minutes_of_day(), 0);
    }

    #[test]
    fn test_minutes_since_crosses_days() {
        let start: RaceTime = "11:30 PM, DAY 1".parse().unwrap();
        let finish: RaceTime = "12:15 AM, DAY 2".parse().unwrap();
        assert_eq!(finish.minutes_since(&start), 45);
        assert_eq!(start.minutes_since(&finish), -45);
    }

    #[test]
    fn test_race_time_serde() {
        let time: RaceTime = "02:00 PM, DAY 19".parse().unwrap();
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"02:00 PM, DAY 19\"");

        let back: RaceTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, time);

        assert!(serde_json::from_str::<RaceTime>("\"2:00 PM, DAY 19\"").is_err());
    }

    #[test]
    fn test_round_quotient_half_away_from_zero() {
        let mode = RoundingMode::HalfAwayFromZero;
        assert_eq!(mode.round_quotient(481, 2), 241);
        assert_eq!(mode.round_quotient(-481, 2), -241);
        assert_eq!(mode.round_quotient(81718, 3), 27239);
        assert_eq!(mode.round_quotient(5, 3), 2);
        assert_eq!(mode.round_quotient(-5, 3), -2);
        assert_eq!(mode.round_quotient(0, 7), 0);
    }

    #[test]
    fn test_round_quotient_half_to_even() {
        let mode = RoundingMode::HalfToEven;
        assert_eq!(mode.round_quotient(481, 2), 240);
        assert_eq!(mode.round_quotient(483, 2), 242);
        assert_eq!(mode.round_quotient(-481, 2), -240);
        assert_eq!(mode.round_quotient(-483, 2), -242);
        assert_eq!(mode.round_quotient(7, 4), 2);
    }

    #[test]
    fn test_rounding_mode_parsing() {
        assert_eq!(
            "half-away-from-zero".parse::<RoundingMode>().unwrap(),
            RoundingMode::HalfAwayFromZero
        );
        assert_eq!(
            "HALF_TO_EVEN".parse::<RoundingMode>().unwrap(),
            RoundingMode::HalfToEven
        );
        assert!("nearest".parse::<RoundingMode>().is_err());
        assert_eq!(RoundingMode::default(), RoundingMode::HalfAwayFromZero);
    }
}
