//! Test fixtures for integration testing

#![allow(dead_code)]

use race_average::types::{MINUTES_PER_DAY, MINUTES_PER_HOUR};

/// Finish times with their elapsed minutes from the default 08:00 AM, DAY 1 start
pub const KNOWN_FINISHES: &[(&str, i64)] = &[
    ("08:00 AM, DAY 1", 0),
    ("12:00 PM, DAY 1", 240),
    ("12:01 PM, DAY 1", 241),
    ("11:59 PM, DAY 1", 959),
    ("12:00 AM, DAY 2", 960),
    ("08:00 AM, DAY 2", 1440),
    ("02:00 PM, DAY 19", 26280),
    ("02:00 PM, DAY 20", 27720),
    ("01:58 PM, DAY 20", 27718),
];

/// Format a finish time in canonical form from its 24-hour parts
pub fn finish_time(hour24: u32, minute: u32, day: u32) -> String {
    let (hour12, meridiem) = match hour24 {
        0 => (12, "AM"),
        1..=11 => (hour24, "AM"),
        12 => (12, "PM"),
        _ => (hour24 - 12, "PM"),
    };
    format!("{:02}:{:02} {}, DAY {}", hour12, minute, meridiem, day)
}

/// Elapsed minutes from the default start computed independently of the crate
pub fn expected_elapsed(hour24: u32, minute: u32, day: u32) -> i64 {
    i64::from(day) * MINUTES_PER_DAY + i64::from(hour24) * MINUTES_PER_HOUR + i64::from(minute)
        - 1920
}

/// `count` copies of a valid finish time
pub fn repeated(count: usize) -> Vec<String> {
    vec!["09:30 AM, DAY 1".to_string(); count]
}
