//! In-memory storage for development and testing

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use slotbook_core::{
    errors::{BookingError, BookingResult},
    models::{
        business::Business,
        employee::{Employee, EmployeeSchedule},
        reservation::{CreateReservationRequest, Reservation, ReservationStatus},
    },
    store::BookingStore,
};
use tokio::sync::Mutex;
use uuid::Uuid;

/// [`BookingStore`] kept in process memory.
///
/// Reservation inserts are serialized by a single writer lock and refuse an
/// interval that overlaps an active reservation of the same employee on the
/// same date, matching the PostgreSQL exclusion constraint.
#[derive(Default)]
pub struct MemoryBookingStore {
    businesses: DashMap<Uuid, Business>,
    employees: DashMap<Uuid, Employee>,
    reservations: DashMap<Uuid, Reservation>,
    writer: Mutex<()>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reservations, any status.
    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn create_business(&self, name: String) -> BookingResult<Business> {
        let business = Business {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        };
        self.businesses.insert(business.id, business.clone());
        Ok(business)
    }

    async fn get_business(&self, id: Uuid) -> BookingResult<Option<Business>> {
        Ok(self.businesses.get(&id).map(|b| b.clone()))
    }

    async fn create_employee(
        &self,
        business_id: Uuid,
        name: String,
        schedule: EmployeeSchedule,
    ) -> BookingResult<Employee> {
        if !self.businesses.contains_key(&business_id) {
            return Err(BookingError::not_found(format!(
                "Business with ID {} not found",
                business_id
            )));
        }

        let employee = Employee {
            id: Uuid::new_v4(),
            business_id,
            name,
            availability: schedule.availability,
            vacations: schedule.vacations,
            breaks: schedule.breaks,
            created_at: Utc::now(),
        };
        self.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn get_employee(&self, business_id: Uuid, employee_id: Uuid) -> BookingResult<Option<Employee>> {
        Ok(self
            .employees
            .get(&employee_id)
            .filter(|e| e.business_id == business_id)
            .map(|e| e.clone()))
    }

    async fn update_employee_schedule(
        &self,
        business_id: Uuid,
        employee_id: Uuid,
        schedule: EmployeeSchedule,
    ) -> BookingResult<Option<Employee>> {
        let Some(mut employee) = self.employees.get_mut(&employee_id) else {
            return Ok(None);
        };
        if employee.business_id != business_id {
            return Ok(None);
        }

        employee.availability = schedule.availability;
        employee.vacations = schedule.vacations;
        employee.breaks = schedule.breaks;
        Ok(Some(employee.clone()))
    }

    async fn reservations_for_day(&self, employee_id: Uuid, date: NaiveDate) -> BookingResult<Vec<Reservation>> {
        let mut reservations: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|r| r.employee_id == Some(employee_id) && r.date == date)
            .map(|r| r.clone())
            .collect();
        reservations.sort_by_key(|r| r.time);
        Ok(reservations)
    }

    async fn get_reservation(&self, id: Uuid) -> BookingResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn insert_reservation(&self, request: CreateReservationRequest) -> BookingResult<Reservation> {
        let _writer = self.writer.lock().await;

        if !self.businesses.contains_key(&request.business_id) {
            return Err(BookingError::not_found(format!(
                "Business with ID {} not found",
                request.business_id
            )));
        }

        let requested = request.interval();
        if let Some(employee_id) = request.employee_id {
            let overlapping = self.reservations.iter().any(|r| {
                r.is_active()
                    && r.employee_id == Some(employee_id)
                    && r.date == request.date
                    && r.interval().overlaps(&requested)
            });
            if overlapping {
                return Err(BookingError::conflict(format!(
                    "{} on {} overlaps an existing reservation",
                    requested, request.date
                )));
            }
        }

        let reservation = Reservation {
            id: Uuid::new_v4(),
            business_id: request.business_id,
            employee_id: request.employee_id,
            service: request.service,
            date: request.date,
            time: request.time,
            duration: request.duration,
            price: request.price,
            client_name: request.client_name,
            client_email: request.client_email,
            client_phone: request.client_phone,
            notes: request.notes,
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
        };
        self.reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn update_reservation_status(
        &self,
        id: Uuid,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> BookingResult<Option<Reservation>> {
        let Some(mut reservation) = self.reservations.get_mut(&id) else {
            return Ok(None);
        };
        if reservation.status != from {
            return Ok(None);
        }

        reservation.status = to;
        Ok(Some(reservation.clone()))
    }
}
