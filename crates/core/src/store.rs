//! Persistence seam used by the availability read path and by booking admission.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    errors::BookingResult,
    models::{
        business::Business,
        employee::{Employee, EmployeeSchedule},
        reservation::{CreateReservationRequest, Reservation, ReservationStatus},
    },
};

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn create_business(&self, name: String) -> BookingResult<Business>;

    async fn get_business(&self, id: Uuid) -> BookingResult<Option<Business>>;

    async fn create_employee(
        &self,
        business_id: Uuid,
        name: String,
        schedule: EmployeeSchedule,
    ) -> BookingResult<Employee>;

    /// Only returns the employee when it belongs to `business_id`.
    async fn get_employee(&self, business_id: Uuid, employee_id: Uuid) -> BookingResult<Option<Employee>>;

    async fn update_employee_schedule(
        &self,
        business_id: Uuid,
        employee_id: Uuid,
        schedule: EmployeeSchedule,
    ) -> BookingResult<Option<Employee>>;

    /// All reservations of the employee on `date`, any status, ordered by time.
    async fn reservations_for_day(&self, employee_id: Uuid, date: NaiveDate) -> BookingResult<Vec<Reservation>>;

    async fn get_reservation(&self, id: Uuid) -> BookingResult<Option<Reservation>>;

    /// Persists a new `pending` reservation.
    ///
    /// Implementations must refuse with `BookingError::Conflict` an insert whose
    /// interval overlaps an active reservation of the same employee on the same
    /// date, atomically with the write.
    async fn insert_reservation(&self, request: CreateReservationRequest) -> BookingResult<Reservation>;

    /// Moves a reservation from `from` to `to`. Returns `None` when the
    /// reservation is missing or no longer in `from`.
    async fn update_reservation_status(
        &self,
        id: Uuid,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> BookingResult<Option<Reservation>>;
}
