use async_trait::async_trait;
use chrono::NaiveDate;
use slotbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        business::Business,
        employee::{Employee, EmployeeSchedule},
        reservation::{CreateReservationRequest, Reservation, ReservationStatus},
    },
    store::BookingStore,
};
use uuid::Uuid;

use crate::{
    DbPool,
    repositories::{business, employee, reservation},
    schema::RESERVATION_OVERLAP_CONSTRAINT,
};

/// SQLSTATE raised when an exclusion constraint rejects a row.
const EXCLUSION_VIOLATION: &str = "23P01";

/// [`BookingStore`] backed by PostgreSQL.
///
/// Overlap protection for concurrent writers lives in the
/// `reservations_no_overlap` exclusion constraint, so it holds across server
/// instances sharing one database.
#[derive(Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn is_overlap_violation(report: &eyre::Report) -> bool {
    match report.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => {
            db_err.code().as_deref() == Some(EXCLUSION_VIOLATION)
                || db_err.constraint() == Some(RESERVATION_OVERLAP_CONSTRAINT)
        }
        _ => false,
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn create_business(&self, name: String) -> BookingResult<Business> {
        let row = business::create_business(&self.pool, &name).await?;
        Ok(row.into())
    }

    async fn get_business(&self, id: Uuid) -> BookingResult<Option<Business>> {
        let row = business::get_business_by_id(&self.pool, id).await?;
        Ok(row.map(Into::into))
    }

    async fn create_employee(
        &self,
        business_id: Uuid,
        name: String,
        schedule: EmployeeSchedule,
    ) -> BookingResult<Employee> {
        let row = employee::create_employee(&self.pool, business_id, &name, &schedule).await?;
        Ok(row.into())
    }

    async fn get_employee(&self, business_id: Uuid, employee_id: Uuid) -> BookingResult<Option<Employee>> {
        let row = employee::get_employee(&self.pool, business_id, employee_id).await?;
        Ok(row.map(Into::into))
    }

    async fn update_employee_schedule(
        &self,
        business_id: Uuid,
        employee_id: Uuid,
        schedule: EmployeeSchedule,
    ) -> BookingResult<Option<Employee>> {
        let row = employee::update_employee_schedule(&self.pool, business_id, employee_id, &schedule).await?;
        Ok(row.map(Into::into))
    }

    async fn reservations_for_day(&self, employee_id: Uuid, date: NaiveDate) -> BookingResult<Vec<Reservation>> {
        let rows = reservation::get_reservations_for_day(&self.pool, employee_id, date).await?;
        let reservations = rows
            .into_iter()
            .map(Reservation::try_from)
            .collect::<eyre::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    async fn get_reservation(&self, id: Uuid) -> BookingResult<Option<Reservation>> {
        let row = reservation::get_reservation_by_id(&self.pool, id).await?;
        Ok(row.map(Reservation::try_from).transpose()?)
    }

    async fn insert_reservation(&self, request: CreateReservationRequest) -> BookingResult<Reservation> {
        match reservation::create_reservation(&self.pool, &request).await {
            Ok(row) => Ok(Reservation::try_from(row)?),
            Err(report) if is_overlap_violation(&report) => {
                tracing::warn!(
                    "Exclusion constraint rejected reservation for employee {:?} on {} at {}",
                    request.employee_id, request.date, request.time
                );
                Err(BookingError::conflict(format!(
                    "{} on {} overlaps an existing reservation",
                    request.interval(),
                    request.date
                )))
            }
            Err(report) => Err(report.into()),
        }
    }

    async fn update_reservation_status(
        &self,
        id: Uuid,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> BookingResult<Option<Reservation>> {
        let row = reservation::update_reservation_status(&self.pool, id, from, to).await?;
        Ok(row.map(Reservation::try_from).transpose()?)
    }
}
