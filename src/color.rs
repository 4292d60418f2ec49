//! Red-fill colour for rating remainders
//!
//! Maps the fractional part of a value onto a shade between white (0%) and a
//! dark red (100%), producing a CSS `color` declaration for templates.

use crate::error::{RaceAverageError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const COLOR_MAX: f64 = 255.0;
const RED_MAX: f64 = 204.0;

/// An 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    /// CSS declaration, e.g. `color:rgb(242, 191, 191)`
    pub fn css_style(&self) -> String {
        format!("color:{}", self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Shade of red for the fractional part of `percent`.
///
/// Only the remainder modulo 1 is used, so `2.25` and `0.25` give the same
/// colour. Negative values wrap the same way (`-0.25` acts like `0.75`).
pub fn red_fill(percent: f64) -> Result<Rgb> {
    if !percent.is_finite() {
        return Err(RaceAverageError::InvalidPercentage {
            value: percent.to_string(),
        }
        .into());
    }

    let percent = percent.rem_euclid(1.0) * 100.0;

    let red_rate = -(COLOR_MAX - RED_MAX) / 100.0;
    let green_blue_rate = -(COLOR_MAX / 100.0);

    let r = to_channel(COLOR_MAX + red_rate * percent);
    let g = to_channel(COLOR_MAX + green_blue_rate * percent);

    Ok(Rgb { r, g, b: g })
}

/// CSS declaration for [`red_fill`]
pub fn red_fill_style(percent: f64) -> Result<String> {
    Ok(red_fill(percent)?.css_style())
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, COLOR_MAX) as u8
}
