//! Finish time parsing
//!
//! Finish times use the fixed grammar
//!
//! ```text
//! finish_time = hour ":" minute " " meridiem ", DAY " day
//! hour        = 2DIGIT            ; 01-12
//! minute      = 2DIGIT            ; 00-59
//! meridiem    = "AM" / "PM"
//! day         = 1*DIGIT           ; >= 1
//! ```
//!
//! Every field is validated and a failure names the field that was wrong.

use crate::error::{RaceAverageError, Result};
use crate::types::{Meridiem, RaceTime};
use chrono::NaiveTime;

const DAY_SEPARATOR: &str = ", ";
const DAY_PREFIX: &str = "DAY ";

/// Parse a finish time such as `"02:00 PM, DAY 19"`
pub fn parse_finish_time(input: &str) -> Result<RaceTime> {
    let (clock, day) = input.split_once(DAY_SEPARATOR).ok_or_else(|| {
        RaceAverageError::malformed(input, "expected \", DAY n\" after the clock time")
    })?;

    let clock = parse_clock(input, clock)?;
    let day = parse_day(input, day)?;

    Ok(RaceTime::new(clock, day))
}

fn parse_clock(input: &str, clock: &str) -> Result<NaiveTime> {
    let (hour_minute, meridiem) = clock.split_once(' ').ok_or_else(|| {
        RaceAverageError::malformed(input, "expected a space between the time and AM/PM")
    })?;
    let (hour, minute) = hour_minute
        .split_once(':')
        .ok_or_else(|| RaceAverageError::malformed(input, "expected HH:MM"))?;

    let hour = two_digits(hour)
        .ok_or_else(|| RaceAverageError::malformed(input, "hour must be two digits"))?;
    if !(1..=12).contains(&hour) {
        return Err(RaceAverageError::malformed(
            input,
            format!("hour {:02} is outside 01-12", hour),
        )
        .into());
    }

    let minute = two_digits(minute)
        .ok_or_else(|| RaceAverageError::malformed(input, "minute must be two digits"))?;
    if minute > 59 {
        return Err(RaceAverageError::malformed(
            input,
            format!("minute {:02} is outside 00-59", minute),
        )
        .into());
    }

    let meridiem = parse_meridiem(meridiem).ok_or_else(|| {
        RaceAverageError::malformed(input, format!("unknown meridiem {:?}", meridiem))
    })?;

    NaiveTime::from_hms_opt(meridiem.to_24_hour(hour), minute, 0).ok_or_else(|| {
        RaceAverageError::malformed(input, "clock time does not exist").into()
    })
}

fn parse_meridiem(s: &str) -> Option<Meridiem> {
    match s {
        "AM" => Some(Meridiem::AM),
        "PM" => Some(Meridiem::PM),
        _ => None,
    }
}

fn parse_day(input: &str, day: &str) -> Result<u32> {
    let digits = day
        .strip_prefix(DAY_PREFIX)
        .ok_or_else(|| RaceAverageError::malformed(input, "expected \"DAY\" before the day"))?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RaceAverageError::malformed(input, "day must be a whole number").into());
    }

    let day: u32 = digits
        .parse()
        .map_err(|_| RaceAverageError::malformed(input, "day number is too large"))?;
    if day == 0 {
        return Err(RaceAverageError::malformed(input, "day must be at least 1").into());
    }

    Ok(day)
}

fn two_digits(s: &str) -> Option<u32> {
    if s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}
