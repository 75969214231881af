use chrono::{DateTime, NaiveDate, Utc};
use eyre::{eyre, Report};
use serde::{Deserialize, Serialize};
use slotbook_core::{
    models::{
        business::Business,
        employee::{Break, Employee, Vacation, WeeklyHours},
        reservation::Reservation,
    },
    time_grid::ClockTime,
};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBusiness {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEmployee {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub availability: Json<WeeklyHours>,
    pub vacations: Json<Vec<Vacation>>,
    pub breaks: Json<Vec<Break>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservation {
    pub id: Uuid,
    pub business_id: Uuid,
    pub employee_id: Option<Uuid>,
    pub service: String,
    pub reservation_date: NaiveDate,
    pub start_minute: i32,
    pub duration_minutes: i32,
    pub price: f64,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbBusiness> for Business {
    fn from(row: DbBusiness) -> Self {
        Business {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

impl From<DbEmployee> for Employee {
    fn from(row: DbEmployee) -> Self {
        Employee {
            id: row.id,
            business_id: row.business_id,
            name: row.name,
            availability: row.availability.0,
            vacations: row.vacations.0,
            breaks: row.breaks.0,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<DbReservation> for Reservation {
    type Error = Report;

    fn try_from(row: DbReservation) -> Result<Self, Self::Error> {
        let time = u32::try_from(row.start_minute)
            .ok()
            .and_then(ClockTime::from_minutes)
            .ok_or_else(|| eyre!("Reservation {} has invalid start minute {}", row.id, row.start_minute))?;
        let duration = u32::try_from(row.duration_minutes)
            .map_err(|_| eyre!("Reservation {} has invalid duration {}", row.id, row.duration_minutes))?;
        let status = row
            .status
            .parse()
            .map_err(|e| eyre!("Reservation {} has invalid status: {}", row.id, e))?;

        Ok(Reservation {
            id: row.id,
            business_id: row.business_id,
            employee_id: row.employee_id,
            service: row.service,
            date: row.reservation_date,
            time,
            duration,
            price: row.price,
            client_name: row.client_name,
            client_email: row.client_email,
            client_phone: row.client_phone,
            notes: row.notes,
            status,
            created_at: row.created_at,
        })
    }
}
