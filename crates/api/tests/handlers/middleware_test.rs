use axum::http::StatusCode;
use rstest::rstest;
use serde_json::Value;
use slotbook_api::{
    config::{ApiConfig, parse_log_level},
    middleware::error_handling::{AppError, map_error},
};
use slotbook_core::errors::BookingError;
use tracing::Level;

use crate::test_utils::TestContext;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case(BookingError::validation("Invalid input"), StatusCode::BAD_REQUEST)]
#[case(BookingError::not_found("Resource not found"), StatusCode::NOT_FOUND)]
#[case(BookingError::conflict("Slot taken"), StatusCode::CONFLICT)]
#[case(BookingError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    BookingError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] status: StatusCode) {
    assert_eq!(AppError(error).status(), status);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = map_error(BookingError::conflict("10:00-10:30 is taken"));

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Booking conflict: 10:00-10:30 is taken");
}

#[tokio::test]
async fn test_eyre_report_maps_to_internal_error() {
    let error: AppError = eyre::eyre!("pool timed out").into();

    assert!(matches!(error.0, BookingError::Database(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new().await;

    let health = ctx.server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>()["status"], "ok");

    let version = ctx.server.get("/version").await;
    version.assert_status_ok();
    assert_eq!(version.json::<Value>()["name"], "slotbook-api");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let ctx = TestContext::new().await;

    ctx.server.get("/schedules").await.assert_status(StatusCode::NOT_FOUND);
}

#[rstest]
#[case("debug", Level::DEBUG)]
#[case("WARN", Level::WARN)]
#[case("verbose", Level::INFO)]
fn test_log_level_parsing(#[case] raw: &str, #[case] level: Level) {
    assert_eq!(parse_log_level(raw), level);
}

#[test]
fn test_default_config() {
    let config = ApiConfig::default();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert!(config.database_url.is_none());
    assert_eq!(config.request_timeout, 30);
}
