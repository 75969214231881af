use axum::{Json, extract::State, http::StatusCode};
use slotbook_core::{
    errors::BookingError,
    models::{
        business::{BusinessResponse, CreateBusinessRequest},
        employee::{CreateEmployeeRequest, EmployeeResponse, EmployeeSchedule},
    },
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{
        error_handling::AppError,
        extract::{ValidJson, ValidPath},
    },
};

#[axum::debug_handler]
pub async fn create_business(
    State(state): State<Arc<ApiState>>,
    ValidJson(payload): ValidJson<CreateBusinessRequest>,
) -> Result<(StatusCode, Json<BusinessResponse>), AppError> {
    payload.validate()?;

    let business = state.store.create_business(payload.name.trim().to_string()).await?;
    info!("Created business {} ({})", business.id, business.name);

    Ok((StatusCode::CREATED, Json(BusinessResponse { business })))
}

/// `POST /businesses/:id/employees`
///
/// Weekdays left out of `availability` are closed. A listed weekday without
/// `open` or `close` falls back to 09:00 and 17:00.
#[axum::debug_handler]
pub async fn create_employee(
    State(state): State<Arc<ApiState>>,
    ValidPath(business_id): ValidPath<Uuid>,
    ValidJson(payload): ValidJson<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), AppError> {
    payload.validate()?;

    state
        .store
        .get_business(business_id)
        .await?
        .ok_or_else(|| BookingError::not_found(format!("Business with ID {} not found", business_id)))?;

    let schedule = payload.schedule();
    let employee = state
        .store
        .create_employee(business_id, payload.name.trim().to_string(), schedule)
        .await?;
    info!("Created employee {} in business {}", employee.id, business_id);

    Ok((StatusCode::CREATED, Json(EmployeeResponse { employee })))
}

#[axum::debug_handler]
pub async fn get_employee(
    State(state): State<Arc<ApiState>>,
    ValidPath((business_id, employee_id)): ValidPath<(Uuid, Uuid)>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let employee = state
        .store
        .get_employee(business_id, employee_id)
        .await?
        .ok_or_else(|| {
            BookingError::not_found(format!(
                "Employee with ID {} not found in business {}",
                employee_id, business_id
            ))
        })?;

    Ok(Json(EmployeeResponse { employee }))
}

/// `PUT /businesses/:id/employees/:employee_id/schedule`
///
/// Replaces weekly hours, vacations and breaks as a whole. Existing
/// reservations are left untouched even if they no longer fit.
#[axum::debug_handler]
pub async fn update_employee_schedule(
    State(state): State<Arc<ApiState>>,
    ValidPath((business_id, employee_id)): ValidPath<(Uuid, Uuid)>,
    ValidJson(schedule): ValidJson<EmployeeSchedule>,
) -> Result<Json<EmployeeResponse>, AppError> {
    schedule.validate()?;

    let employee = state
        .store
        .update_employee_schedule(business_id, employee_id, schedule)
        .await?
        .ok_or_else(|| {
            BookingError::not_found(format!(
                "Employee with ID {} not found in business {}",
                employee_id, business_id
            ))
        })?;
    info!("Updated schedule of employee {}", employee.id);

    Ok(Json(EmployeeResponse { employee }))
}
