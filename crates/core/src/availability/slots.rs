use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    errors::BookingError,
    time_grid::{ClockTime, add_minutes},
};

/// Fixed slot granularity in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// How a slot or reservation may relate to closing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClosingPolicy {
    /// Any start strictly before closing is allowed, even if it ends after.
    #[default]
    AllowOverrun,
    /// The whole span has to end at or before closing.
    WithinHours,
}

impl ClosingPolicy {
    /// Whether `[start, start + length)` is acceptable against `close`.
    pub fn permits(self, start: u32, length: u32, close: u32) -> bool {
        match self {
            ClosingPolicy::AllowOverrun => start < close,
            ClosingPolicy::WithinHours => add_minutes(start, length) <= close,
        }
    }
}

impl fmt::Display for ClosingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClosingPolicy::AllowOverrun => f.write_str("allow-overrun"),
            ClosingPolicy::WithinHours => f.write_str("within-hours"),
        }
    }
}

impl FromStr for ClosingPolicy {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "allow-overrun" => Ok(ClosingPolicy::AllowOverrun),
            "within-hours" => Ok(ClosingPolicy::WithinHours),
            other => Err(BookingError::validation(format!(
                "Unknown closing policy '{}', expected allow-overrun or within-hours",
                other
            ))),
        }
    }
}

/// Candidate slot starts for one working window.
///
/// Walks from `open` in [`SLOT_MINUTES`] steps while the start is before
/// `close`. The iterator is finite and `Clone`, so a copy taken before
/// iteration restarts the walk.
#[derive(Debug, Clone)]
pub struct SlotCandidates {
    next: u32,
    close: u32,
    policy: ClosingPolicy,
}

impl SlotCandidates {
    pub fn new(open: ClockTime, close: ClockTime, policy: ClosingPolicy) -> Self {
        Self {
            next: open.minutes(),
            close: close.minutes(),
            policy,
        }
    }
}

impl Iterator for SlotCandidates {
    type Item = ClockTime;

    fn next(&mut self) -> Option<ClockTime> {
        while self.next < self.close {
            let current = self.next;
            self.next = add_minutes(current, SLOT_MINUTES);
            if self.policy.permits(current, SLOT_MINUTES, self.close) {
                return ClockTime::from_minutes(current);
            }
        }
        None
    }
}
