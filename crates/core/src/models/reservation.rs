use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    time_grid::{ClockTime, Interval},
};

/// Longest reservation accepted, in minutes.
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    /// Pending and confirmed reservations hold their slot.
    pub fn is_active(self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }

    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "completed" => Ok(ReservationStatus::Completed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(BookingError::validation(format!(
                "Unknown reservation status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub business_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub service: String,
    pub date: NaiveDate,
    pub time: ClockTime,
    pub duration: u32,
    pub price: f64,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub notes: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn interval(&self) -> Interval {
        self.time.span(self.duration)
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Body of `POST /reservations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateReservationRequest {
    pub business_id: Uuid,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    pub service: String,
    pub date: NaiveDate,
    pub time: ClockTime,
    pub duration: u32,
    pub price: f64,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateReservationRequest {
    /// Field-level checks that do not need any stored state.
    pub fn validate(&self) -> BookingResult<()> {
        let required = [
            ("service", &self.service),
            ("clientName", &self.client_name),
            ("clientEmail", &self.client_email),
            ("clientPhone", &self.client_phone),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(BookingError::validation(format!("{} is required", field)));
            }
        }

        if !self.client_email.contains('@') {
            return Err(BookingError::validation(format!(
                "clientEmail '{}' is not a valid email address",
                self.client_email
            )));
        }
        if self.time.is_end_of_day() {
            return Err(BookingError::validation("time must be between 00:00 and 23:59"));
        }
        if self.duration == 0 || self.duration > MAX_DURATION_MINUTES {
            return Err(BookingError::validation(format!(
                "duration must be between 1 and {} minutes",
                MAX_DURATION_MINUTES
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(BookingError::validation("price must be a non-negative number"));
        }

        Ok(())
    }

    pub fn interval(&self) -> Interval {
        self.time.span(self.duration)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation: Reservation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateReservationStatusRequest {
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListResponse {
    pub reservations: Vec<Reservation>,
}
