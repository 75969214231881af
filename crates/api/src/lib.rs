//! # Slotbook API
//!
//! The API crate provides the web server for the Slotbook reservation service.
//! It exposes availability lookup, reservation booking and the owner-side
//! business and employee management needed to drive them.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into store and admission calls
//! - **Middleware**: Error mapping and validating extractors
//! - **Config**: Environment-driven configuration
//!
//! Handlers depend only on [`BookingStore`], so the same router runs over
//! PostgreSQL, the in-memory store or a mock.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error mapping and extractors
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, StatusCode, header},
};
use eyre::Result;
use slotbook_core::{admission::BookingAdmission, availability::ClosingPolicy, store::BookingStore};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Storage for businesses, employees and reservations
    pub store: Arc<dyn BookingStore>,
    /// Serialized write path for new reservations and status changes
    pub admission: BookingAdmission,
    /// Closing-time rule shared by availability and admission
    pub closing_policy: ClosingPolicy,
}

impl ApiState {
    pub fn new(store: Arc<dyn BookingStore>, closing_policy: ClosingPolicy) -> Self {
        Self {
            admission: BookingAdmission::new(store.clone(), closing_policy),
            store,
            closing_policy,
        }
    }
}

/// Installs the global `tracing` subscriber at `level`.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the application router with all routes and layers attached.
pub fn build_router(state: Arc<ApiState>, config: &config::ApiConfig) -> Router {
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot lookup
        .merge(routes::availability::routes())
        // Booking and lifecycle
        .merge(routes::reservations::routes())
        // Owner-side setup
        .merge(routes::businesses::routes())
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Request timeout, answered with 408
    let timeout = Duration::from_secs(config.request_timeout);
    app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|err: BoxError| async move {
                if err.is::<tower::timeout::error::Elapsed>() {
                    (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, format!("Unhandled internal error: {}", err))
                }
            }))
            .timeout(timeout),
    )
    .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(AllowOrigin::list(origins))
}

/// Starts the API server with the provided configuration and store
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use std::sync::Arc;
/// use slotbook_api::{config::ApiConfig, start_server};
/// use slotbook_db::MemoryBookingStore;
///
/// let config = ApiConfig::from_env()?;
/// start_server(config, Arc::new(MemoryBookingStore::new())).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn BookingStore>) -> Result<()> {
    let state = Arc::new(ApiState::new(store, config.closing_policy));
    let app = build_router(state, &config);

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Server listening on http://{} (closing policy: {})",
        addr, config.closing_policy
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
