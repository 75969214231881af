use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    availability::{DEFAULT_CLOSE, DEFAULT_OPEN},
    errors::{BookingError, BookingResult},
    time_grid::ClockTime,
};

/// Day of the week, keyed the way schedules are stored (`"monday"` … `"sunday"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }
}

/// Opening window for one weekday. Unset `open`/`close` fall back to the
/// defaults applied by the working-hours resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DayHours {
    #[serde(default)]
    pub open: Option<ClockTime>,
    #[serde(default)]
    pub close: Option<ClockTime>,
    #[serde(default)]
    pub closed: bool,
}

pub type WeeklyHours = BTreeMap<DayOfWeek, DayHours>;

/// Inclusive range of calendar days on which the employee takes no bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Vacation {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Vacation {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// A recurring weekly pause inside working hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Break {
    pub day: DayOfWeek,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

/// The parts of an employee record the availability engine reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmployeeSchedule {
    #[serde(default)]
    pub availability: WeeklyHours,
    #[serde(default)]
    pub vacations: Vec<Vacation>,
    #[serde(default)]
    pub breaks: Vec<Break>,
}

impl EmployeeSchedule {
    pub fn validate(&self) -> BookingResult<()> {
        for (day, hours) in &self.availability {
            if hours.open.is_some_and(ClockTime::is_end_of_day) {
                return Err(BookingError::validation(format!(
                    "Opening time on {:?} cannot be 24:00",
                    day
                )));
            }
            if hours.closed {
                continue;
            }

            // Compare the window the resolver will actually use.
            let open = hours.open.unwrap_or(DEFAULT_OPEN);
            let close = hours.close.unwrap_or(DEFAULT_CLOSE);
            if open >= close {
                return Err(BookingError::validation(format!(
                    "Opening time {} must be before closing time {} on {:?}",
                    open, close, day
                )));
            }
        }

        for vacation in &self.vacations {
            if vacation.start_date > vacation.end_date {
                return Err(BookingError::validation(format!(
                    "Vacation starting {} ends before it starts ({})",
                    vacation.start_date, vacation.end_date
                )));
            }
        }

        for brk in &self.breaks {
            if brk.start_time >= brk.end_time {
                return Err(BookingError::validation(format!(
                    "Break on {:?} must start before it ends ({}-{})",
                    brk.day, brk.start_time, brk.end_time
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub availability: WeeklyHours,
    pub vacations: Vec<Vacation>,
    pub breaks: Vec<Break>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateEmployeeRequest {
    pub name: String,
    #[serde(default)]
    pub availability: WeeklyHours,
    #[serde(default)]
    pub vacations: Vec<Vacation>,
    #[serde(default)]
    pub breaks: Vec<Break>,
}

impl CreateEmployeeRequest {
    pub fn validate(&self) -> BookingResult<()> {
        if self.name.trim().is_empty() {
            return Err(BookingError::validation("Employee name must not be empty"));
        }
        self.schedule().validate()
    }

    pub fn schedule(&self) -> EmployeeSchedule {
        EmployeeSchedule {
            availability: self.availability.clone(),
            vacations: self.vacations.clone(),
            breaks: self.breaks.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub employee: Employee,
}
