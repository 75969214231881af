use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Name of the constraint that keeps active reservations of one employee from overlapping.
pub const RESERVATION_OVERLAP_CONSTRAINT: &str = "reservations_no_overlap";

const STATEMENTS: &[&str] = &[
    // Needed for the `=` operator on UUID/DATE inside a GiST exclusion constraint
    "CREATE EXTENSION IF NOT EXISTS btree_gist",
    r#"
    CREATE TABLE IF NOT EXISTS businesses (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name VARCHAR(255) NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        business_id UUID NOT NULL REFERENCES businesses(id),
        name VARCHAR(255) NOT NULL,
        availability JSONB NOT NULL DEFAULT '{}'::jsonb,
        vacations JSONB NOT NULL DEFAULT '[]'::jsonb,
        breaks JSONB NOT NULL DEFAULT '[]'::jsonb,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reservations (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        business_id UUID NOT NULL REFERENCES businesses(id),
        employee_id UUID NULL REFERENCES employees(id),
        service VARCHAR(255) NOT NULL,
        reservation_date DATE NOT NULL,
        start_minute INTEGER NOT NULL,
        duration_minutes INTEGER NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        client_name VARCHAR(255) NOT NULL,
        client_email VARCHAR(255) NOT NULL,
        client_phone VARCHAR(64) NOT NULL,
        notes TEXT NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'pending',
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT valid_start_minute CHECK (start_minute >= 0 AND start_minute < 1440),
        CONSTRAINT valid_duration CHECK (duration_minutes > 0),
        CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'completed', 'cancelled')),
        CONSTRAINT reservations_no_overlap EXCLUDE USING gist (
            employee_id WITH =,
            reservation_date WITH =,
            int4range(start_minute, start_minute + duration_minutes) WITH &&
        ) WHERE (employee_id IS NOT NULL AND status IN ('pending', 'confirmed'))
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_employees_business_id ON employees(business_id)",
    "CREATE INDEX IF NOT EXISTS idx_reservations_business_id ON reservations(business_id)",
    "CREATE INDEX IF NOT EXISTS idx_reservations_employee_date ON reservations(employee_id, reservation_date)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
