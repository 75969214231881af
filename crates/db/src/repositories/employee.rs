use crate::models::DbEmployee;
use chrono::Utc;
use eyre::Result;
use slotbook_core::models::employee::EmployeeSchedule;
use sqlx::{Pool, Postgres, types::Json};
use uuid::Uuid;

pub async fn create_employee(
    pool: &Pool<Postgres>,
    business_id: Uuid,
    name: &str,
    schedule: &EmployeeSchedule,
) -> Result<DbEmployee> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating employee: id={}, business_id={}, name={}",
        id, business_id, name
    );

    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        INSERT INTO employees (id, business_id, name, availability, vacations, breaks, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, business_id, name, availability, vacations, breaks, created_at
        "#,
    )
    .bind(id)
    .bind(business_id)
    .bind(name)
    .bind(Json(&schedule.availability))
    .bind(Json(&schedule.vacations))
    .bind(Json(&schedule.breaks))
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(employee)
}

/// Looks the employee up within its business; an employee of another business is not found.
pub async fn get_employee(
    pool: &Pool<Postgres>,
    business_id: Uuid,
    employee_id: Uuid,
) -> Result<Option<DbEmployee>> {
    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        SELECT id, business_id, name, availability, vacations, breaks, created_at
        FROM employees
        WHERE id = $1 AND business_id = $2
        "#,
    )
    .bind(employee_id)
    .bind(business_id)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

pub async fn update_employee_schedule(
    pool: &Pool<Postgres>,
    business_id: Uuid,
    employee_id: Uuid,
    schedule: &EmployeeSchedule,
) -> Result<Option<DbEmployee>> {
    tracing::debug!(
        "Updating schedule of employee {} in business {}",
        employee_id, business_id
    );

    let employee = sqlx::query_as::<_, DbEmployee>(
        r#"
        UPDATE employees
        SET availability = $3, vacations = $4, breaks = $5
        WHERE id = $1 AND business_id = $2
        RETURNING id, business_id, name, availability, vacations, breaks, created_at
        "#,
    )
    .bind(employee_id)
    .bind(business_id)
    .bind(Json(&schedule.availability))
    .bind(Json(&schedule.vacations))
    .bind(Json(&schedule.breaks))
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}
