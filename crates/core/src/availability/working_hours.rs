use chrono::{Datelike, NaiveDate};

use crate::{
    models::employee::{DayOfWeek, Employee},
    time_grid::ClockTime,
};

/// Opening time used when a weekday entry leaves `open` unset.
pub const DEFAULT_OPEN: ClockTime = ClockTime::hm(9, 0);
/// Closing time used when a weekday entry leaves `close` unset.
pub const DEFAULT_CLOSE: ClockTime = ClockTime::hm(17, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingHours {
    Open { open: ClockTime, close: ClockTime },
    Closed,
}

impl WorkingHours {
    pub fn is_closed(&self) -> bool {
        matches!(self, WorkingHours::Closed)
    }
}

/// Looks up the employee's window for the weekday of `date`.
///
/// A missing weekday entry, or one flagged `closed`, resolves to
/// [`WorkingHours::Closed`]. An entry without `open`/`close` uses
/// [`DEFAULT_OPEN`]/[`DEFAULT_CLOSE`]. A window that does not open before it
/// closes is treated as closed.
pub fn resolve_working_hours(employee: &Employee, date: NaiveDate) -> WorkingHours {
    let day = DayOfWeek::from(date.weekday());

    let Some(hours) = employee.availability.get(&day) else {
        return WorkingHours::Closed;
    };
    if hours.closed {
        return WorkingHours::Closed;
    }

    let open = hours.open.unwrap_or(DEFAULT_OPEN);
    let close = hours.close.unwrap_or(DEFAULT_CLOSE);
    if open >= close {
        return WorkingHours::Closed;
    }

    WorkingHours::Open { open, close }
}
