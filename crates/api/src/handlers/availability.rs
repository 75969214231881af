//! # Availability Handlers
//!
//! Answers "which start times can this employee take on this date". The
//! employee's day is resolved once into a [`DayPlan`]: working hours, breaks,
//! vacation and the active reservations of that date. Candidate starts are
//! then walked on the 30-minute grid and a candidate is offered only when the
//! probe slot starting there overlaps neither a break nor a reservation.
//!
//! The result is a snapshot. A slot returned here can be taken by another
//! client before this one books it; booking re-checks at commit time.

use axum::{Json, extract::State};
use slotbook_core::{
    availability::DayPlan,
    errors::BookingError,
    models::availability::{AvailabilityQuery, AvailabilityResponse},
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    ApiState,
    middleware::{error_handling::AppError, extract::ValidQuery},
};

/// Lists free slot start times for one employee on one date
///
/// # Endpoint
///
/// ```text
/// GET /availability?businessId=<uuid>&date=YYYY-MM-DD&employeeId=<uuid>
/// ```
///
/// An empty list (not an error) is returned when the employee does not work
/// that day, is on vacation, or has no room left.
///
/// # Errors
///
/// * `BookingError::Validation` - Missing or malformed query parameters
/// * `BookingError::NotFound` - Business or employee not found
/// * `BookingError::Database` - Storage failure
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    ValidQuery(query): ValidQuery<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    state
        .store
        .get_business(query.business_id)
        .await?
        .ok_or_else(|| BookingError::not_found(format!("Business with ID {} not found", query.business_id)))?;

    let employee = state
        .store
        .get_employee(query.business_id, query.employee_id)
        .await?
        .ok_or_else(|| {
            BookingError::not_found(format!(
                "Employee with ID {} not found in business {}",
                query.employee_id, query.business_id
            ))
        })?;

    let reservations = state.store.reservations_for_day(employee.id, query.date).await?;
    let plan = DayPlan::resolve(&employee, query.date, &reservations);
    let available_slots = plan.available_slots(state.closing_policy);

    debug!(
        "Availability for employee {} on {}: {} slots",
        employee.id,
        query.date,
        available_slots.len()
    );

    Ok(Json(AvailabilityResponse { available_slots }))
}
