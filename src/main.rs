use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotbook_api::config::ApiConfig;
use slotbook_core::store::BookingStore;
use slotbook_db::{MemoryBookingStore, PgBookingStore, create_pool, schema::initialize_database};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    slotbook_api::init_tracing(config.log_level)?;

    let store: Arc<dyn BookingStore> = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database...");
            let db_pool = create_pool(database_url).await?;
            initialize_database(&db_pool).await?;
            Arc::new(PgBookingStore::new(db_pool))
        }
        None => {
            warn!("DATABASE_URL is not set, reservations are kept in memory and lost on restart");
            Arc::new(MemoryBookingStore::new())
        }
    };

    // Start API server
    slotbook_api::start_server(config, store).await?;

    Ok(())
}
