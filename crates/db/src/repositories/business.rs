use crate::models::DbBusiness;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_business(pool: &Pool<Postgres>, name: &str) -> Result<DbBusiness> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating business: id={}, name={}", id, name);

    let business = sqlx::query_as::<_, DbBusiness>(
        r#"
        INSERT INTO businesses (id, name, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, name, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(business)
}

pub async fn get_business_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBusiness>> {
    let business = sqlx::query_as::<_, DbBusiness>(
        r#"
        SELECT id, name, created_at
        FROM businesses
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if business.is_none() {
        tracing::debug!("Business not found: id={}", id);
    }

    Ok(business)
}
