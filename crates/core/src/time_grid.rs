//! # Time Grid
//!
//! Wall-clock primitives shared by the availability engine and the booking
//! write path. Times of day are carried as minutes since midnight so that
//! interval arithmetic stays in plain integers; `ClockTime` is the typed,
//! validated form that crosses API and storage boundaries as an `HH:MM` string.
//!
//! All intervals are half-open: `[start, end)`. Two intervals that merely touch
//! (`a.end == b.start`) do not overlap.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{BookingError, BookingResult};

/// Minutes in a calendar day. `24:00` is representable as a closing time only.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parses an `HH:MM` string into minutes since midnight.
///
/// Hours may be one or two digits. `24:00` is accepted and maps to
/// [`MINUTES_PER_DAY`]; any other hour above 23 or minute above 59 is rejected.
pub fn parse_time(s: &str) -> BookingResult<u32> {
    let invalid = || BookingError::validation(format!("Invalid time '{}', expected HH:MM", s));

    let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;

    match (hours, minutes) {
        (24, 0) => Ok(MINUTES_PER_DAY),
        (h, m) if h < 24 && m < 60 => Ok(h * 60 + m),
        _ => Err(invalid()),
    }
}

/// Formats minutes since midnight as `HH:MM`.
pub fn format_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Adds `m` minutes to `t`. The result is not wrapped at midnight: a slot that
/// starts at 23:45 and lasts 30 minutes ends at minute 1455.
pub fn add_minutes(t: u32, m: u32) -> u32 {
    t.saturating_add(m)
}

/// Half-open interval overlap: true iff `start_a < end_b && start_b < end_a`.
pub fn overlaps(start_a: u32, end_a: u32, start_b: u32, end_b: u32) -> bool {
    start_a < end_b && start_b < end_a
}

/// A validated time of day, stored as minutes since midnight.
///
/// Serializes to and from the `HH:MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    /// Unchecked constructor for compile-time constants.
    pub(crate) const fn hm(hours: u32, minutes: u32) -> Self {
        ClockTime(hours * 60 + minutes)
    }

    /// Builds a time from hours and minutes, rejecting anything past `24:00`.
    pub fn from_hm(hours: u32, minutes: u32) -> BookingResult<Self> {
        let invalid = || BookingError::validation(format!("Invalid time {}:{:02}", hours, minutes));
        if minutes >= 60 {
            return Err(invalid());
        }
        Self::from_minutes(hours.saturating_mul(60).saturating_add(minutes)).ok_or_else(invalid)
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes <= MINUTES_PER_DAY).then_some(ClockTime(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    /// True for `24:00`, which is only meaningful as a closing time.
    pub fn is_end_of_day(self) -> bool {
        self.0 == MINUTES_PER_DAY
    }

    /// The interval `[self, self + duration)` in minutes.
    pub fn span(self, duration: u32) -> Interval {
        Interval::new(self.0, add_minutes(self.0, duration))
    }
}

impl FromStr for ClockTime {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s).map(ClockTime)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_time(self.0))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A half-open span of minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_time(self.start), format_time(self.end))
    }
}
