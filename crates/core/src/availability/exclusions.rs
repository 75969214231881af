use chrono::{Datelike, NaiveDate};

use crate::{
    models::employee::{DayOfWeek, Employee},
    time_grid::Interval,
};

/// Everything that blocks an otherwise open day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    pub on_vacation: bool,
    pub breaks: Vec<Interval>,
}

pub fn is_on_vacation(employee: &Employee, date: NaiveDate) -> bool {
    employee.vacations.iter().any(|vacation| vacation.contains(date))
}

/// Break intervals recurring on `day`, ordered by start.
pub fn breaks_for_day(employee: &Employee, day: DayOfWeek) -> Vec<Interval> {
    let mut breaks: Vec<Interval> = employee
        .breaks
        .iter()
        .filter(|brk| brk.day == day)
        .map(|brk| Interval::new(brk.start_time.minutes(), brk.end_time.minutes()))
        .collect();
    breaks.sort_by_key(|interval| interval.start);
    breaks
}

pub fn resolve_exclusions(employee: &Employee, date: NaiveDate) -> Exclusions {
    Exclusions {
        on_vacation: is_on_vacation(employee, date),
        breaks: breaks_for_day(employee, DayOfWeek::from(date.weekday())),
    }
}
