use axum::{Json, extract::State, http::StatusCode};
use slotbook_core::{
    errors::BookingError,
    models::{
        availability::DayQuery,
        reservation::{
            CreateReservationRequest, ReservationListResponse, ReservationResponse,
            UpdateReservationStatusRequest,
        },
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        error_handling::AppError,
        extract::{ValidJson, ValidPath, ValidQuery},
    },
};

/// `POST /reservations`
///
/// Admission re-checks the interval against the employee's day while holding
/// the per-employee, per-date lock, so two requests for the same slot yield
/// one `201` and one `409`.
#[axum::debug_handler]
pub async fn create_reservation(
    State(state): State<Arc<ApiState>>,
    ValidJson(payload): ValidJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), AppError> {
    let reservation = state.admission.admit(payload).await?;

    Ok((StatusCode::CREATED, Json(ReservationResponse { reservation })))
}

#[axum::debug_handler]
pub async fn get_reservation(
    State(state): State<Arc<ApiState>>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<ReservationResponse>, AppError> {
    let reservation = state
        .store
        .get_reservation(id)
        .await?
        .ok_or_else(|| BookingError::not_found(format!("Reservation with ID {} not found", id)))?;

    Ok(Json(ReservationResponse { reservation }))
}

/// `PATCH /reservations/:id/status`
#[axum::debug_handler]
pub async fn update_reservation_status(
    State(state): State<Arc<ApiState>>,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(payload): ValidJson<UpdateReservationStatusRequest>,
) -> Result<Json<ReservationResponse>, AppError> {
    let reservation = state.admission.transition(id, payload.status).await?;

    Ok(Json(ReservationResponse { reservation }))
}

/// `GET /businesses/:id/employees/:employee_id/reservations?date=YYYY-MM-DD`
///
/// Every reservation of the day, cancelled and completed ones included.
#[axum::debug_handler]
pub async fn list_employee_reservations(
    State(state): State<Arc<ApiState>>,
    ValidPath((business_id, employee_id)): ValidPath<(Uuid, Uuid)>,
    ValidQuery(query): ValidQuery<DayQuery>,
) -> Result<Json<ReservationListResponse>, AppError> {
    state
        .store
        .get_employee(business_id, employee_id)
        .await?
        .ok_or_else(|| {
            BookingError::not_found(format!(
                "Employee with ID {} not found in business {}",
                employee_id, business_id
            ))
        })?;

    let reservations = state.store.reservations_for_day(employee_id, query.date).await?;

    Ok(Json(ReservationListResponse { reservations }))
}
