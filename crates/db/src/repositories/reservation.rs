use crate::models::DbReservation;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use slotbook_core::models::reservation::{CreateReservationRequest, ReservationStatus};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const RESERVATION_COLUMNS: &str = "id, business_id, employee_id, service, reservation_date, \
    start_minute, duration_minutes, price, client_name, client_email, client_phone, notes, \
    status, created_at";

/// Inserts a `pending` reservation.
///
/// An overlap with another active reservation of the same employee on the same
/// day fails with the `reservations_no_overlap` exclusion violation.
pub async fn create_reservation(
    pool: &Pool<Postgres>,
    request: &CreateReservationRequest,
) -> Result<DbReservation> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating reservation: id={}, business_id={}, employee_id={:?}, date={}, time={}, duration={}",
        id, request.business_id, request.employee_id, request.date, request.time, request.duration
    );

    let query = format!(
        r#"
        INSERT INTO reservations (
            id, business_id, employee_id, service, reservation_date, start_minute,
            duration_minutes, price, client_name, client_email, client_phone, notes,
            status, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING {}
        "#,
        RESERVATION_COLUMNS
    );

    let reservation = sqlx::query_as::<_, DbReservation>(&query)
        .bind(id)
        .bind(request.business_id)
        .bind(request.employee_id)
        .bind(&request.service)
        .bind(request.date)
        .bind(request.time.minutes() as i32)
        .bind(request.duration as i32)
        .bind(request.price)
        .bind(&request.client_name)
        .bind(&request.client_email)
        .bind(&request.client_phone)
        .bind(&request.notes)
        .bind(ReservationStatus::Pending.as_str())
        .bind(now)
        .fetch_one(pool)
        .await?;

    Ok(reservation)
}

pub async fn get_reservation_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbReservation>> {
    let query = format!("SELECT {} FROM reservations WHERE id = $1", RESERVATION_COLUMNS);

    let reservation = sqlx::query_as::<_, DbReservation>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(reservation)
}

pub async fn get_reservations_for_day(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbReservation>> {
    let query = format!(
        r#"
        SELECT {}
        FROM reservations
        WHERE employee_id = $1 AND reservation_date = $2
        ORDER BY start_minute ASC
        "#,
        RESERVATION_COLUMNS
    );

    let reservations = sqlx::query_as::<_, DbReservation>(&query)
        .bind(employee_id)
        .bind(date)
        .fetch_all(pool)
        .await?;

    Ok(reservations)
}

/// Compare-and-set on the status column. Returns `None` when the row is
/// missing or its status is no longer `from`.
pub async fn update_reservation_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    from: ReservationStatus,
    to: ReservationStatus,
) -> Result<Option<DbReservation>> {
    let query = format!(
        r#"
        UPDATE reservations
        SET status = $3
        WHERE id = $1 AND status = $2
        RETURNING {}
        "#,
        RESERVATION_COLUMNS
    );

    let reservation = sqlx::query_as::<_, DbReservation>(&query)
        .bind(id)
        .bind(from.as_str())
        .bind(to.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(reservation)
}
