//! # Slotbook DB
//!
//! PostgreSQL persistence for the booking service, plus an in-memory store
//! and mocks for tests. Both stores implement
//! [`slotbook_core::store::BookingStore`].

pub mod memory;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub use memory::MemoryBookingStore;
pub use store::PgBookingStore;

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}
