//! # Availability Engine
//!
//! Computes the bookable slots of one employee on one calendar day and
//! re-checks a concrete reservation interval against the same rules.
//!
//! The read path runs in four stages:
//!
//! 1. [`working_hours`] resolves the weekday window, or reports the day closed.
//! 2. [`exclusions`] reports vacations and the breaks recurring on that weekday.
//! 3. [`slots`] walks the window in fixed 30 minute steps.
//! 4. [`conflict`] drops every candidate that overlaps a break or an active
//!    reservation.
//!
//! The write path ([`DayPlan::check_booking`]) uses the same resolved plan so
//! that whatever the read side offers, the write side accepts, and vice versa.

pub mod conflict;
pub mod exclusions;
pub mod slots;
pub mod working_hours;

use chrono::NaiveDate;

pub use conflict::{Obstruction, first_obstruction, is_admissible};
pub use exclusions::{Exclusions, breaks_for_day, is_on_vacation, resolve_exclusions};
pub use slots::{ClosingPolicy, SLOT_MINUTES, SlotCandidates};
pub use working_hours::{DEFAULT_CLOSE, DEFAULT_OPEN, WorkingHours, resolve_working_hours};

use crate::{
    errors::{BookingError, BookingResult},
    models::{employee::Employee, reservation::Reservation},
    time_grid::{ClockTime, Interval, format_time},
};

/// Everything known about one employee's day, resolved once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub hours: WorkingHours,
    pub exclusions: Exclusions,
    /// Intervals of the active reservations assigned to this employee on `date`.
    pub booked: Vec<Interval>,
}

impl DayPlan {
    /// Resolves the plan. `reservations` may contain anything; only active
    /// reservations of this employee on `date` are kept.
    pub fn resolve(employee: &Employee, date: NaiveDate, reservations: &[Reservation]) -> Self {
        let mut booked: Vec<Interval> = reservations
            .iter()
            .filter(|res| res.is_active())
            .filter(|res| res.employee_id == Some(employee.id) && res.date == date)
            .map(Reservation::interval)
            .collect();
        booked.sort_by_key(|interval| interval.start);

        Self {
            date,
            hours: resolve_working_hours(employee, date),
            exclusions: resolve_exclusions(employee, date),
            booked,
        }
    }

    /// Candidate starts before filtering, or `None` when nothing can be offered
    /// at all (vacation or closed day).
    pub fn candidates(&self, policy: ClosingPolicy) -> Option<SlotCandidates> {
        if self.exclusions.on_vacation {
            return None;
        }
        match self.hours {
            WorkingHours::Closed => None,
            WorkingHours::Open { open, close } => Some(SlotCandidates::new(open, close, policy)),
        }
    }

    pub fn available_slots(&self, policy: ClosingPolicy) -> Vec<ClockTime> {
        let Some(candidates) = self.candidates(policy) else {
            return Vec::new();
        };
        candidates
            .filter(|slot| is_admissible(slot.span(SLOT_MINUTES), &self.exclusions.breaks, &self.booked))
            .collect()
    }

    /// Decides whether `[time, time + duration)` can be committed.
    ///
    /// Every rejection is a [`BookingError::Conflict`] naming what is in the way.
    pub fn check_booking(&self, time: ClockTime, duration: u32, policy: ClosingPolicy) -> BookingResult<()> {
        let requested = time.span(duration);

        if self.exclusions.on_vacation {
            return Err(BookingError::conflict(format!(
                "Employee is on vacation on {}",
                self.date
            )));
        }

        let (open, close) = match self.hours {
            WorkingHours::Closed => {
                return Err(BookingError::conflict(format!(
                    "Employee does not work on {}",
                    self.date.format("%A, %Y-%m-%d")
                )));
            }
            WorkingHours::Open { open, close } => (open, close),
        };

        if time < open || !policy.permits(time.minutes(), duration, close.minutes()) {
            return Err(BookingError::conflict(format!(
                "{} is outside working hours {}-{}",
                requested, open, close
            )));
        }

        match first_obstruction(requested, &self.exclusions.breaks, &self.booked) {
            None => Ok(()),
            Some(Obstruction::Break(brk)) => Err(BookingError::conflict(format!(
                "{} overlaps the employee's break {}",
                requested, brk
            ))),
            Some(Obstruction::Reservation(res)) => Err(BookingError::conflict(format!(
                "{} overlaps an existing reservation at {} (until {})",
                requested,
                format_time(res.start),
                format_time(res.end)
            ))),
        }
    }
}

/// Bookable slots for `employee` on `date`.
pub fn available_slots(
    employee: &Employee,
    date: NaiveDate,
    reservations: &[Reservation],
    policy: ClosingPolicy,
) -> Vec<ClockTime> {
    DayPlan::resolve(employee, date, reservations).available_slots(policy)
}
