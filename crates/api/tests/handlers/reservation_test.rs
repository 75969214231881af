use std::{future::IntoFuture, sync::Arc};

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use slotbook_core::{availability::ClosingPolicy, errors::BookingError};
use slotbook_db::mock::repositories::MockBookingRepo;
use uuid::Uuid;

use crate::test_utils::{MONDAY, TUESDAY, TestContext, booking_body, server_over};

fn reservation_id(body: &Value) -> String {
    body["reservation"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_reservation_returns_created() {
    let ctx = TestContext::new().await;

    let response = ctx.server.post("/reservations").json(&ctx.booking("10:00", 45)).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["reservation"]["status"], "pending");
    assert_eq!(body["reservation"]["time"], "10:00");
    assert_eq!(body["reservation"]["duration"], 45);
    assert_eq!(body["reservation"]["employeeId"], json!(ctx.employee.id));
    assert_eq!(ctx.store.reservation_count(), 1);
}

#[tokio::test]
async fn test_simultaneous_bookings_for_same_slot() {
    let ctx = TestContext::new().await;

    let (first, second) = tokio::join!(
        ctx.server.post("/reservations").json(&ctx.booking("10:00", 30)).into_future(),
        ctx.server.post("/reservations").json(&ctx.booking("10:00", 30)).into_future(),
    );

    let mut statuses = vec![first.status_code(), second.status_code()];
    statuses.sort_by_key(|status| status.as_u16());
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);
    assert_eq!(ctx.store.reservation_count(), 1);
}

#[tokio::test]
async fn test_booking_a_taken_interval_is_conflict() {
    let ctx = TestContext::new().await;
    ctx.server
        .post("/reservations")
        .json(&ctx.booking("10:00", 60))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx.server.post("/reservations").json(&ctx.booking("10:30", 30)).await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("existing reservation"));
}

#[rstest]
#[case("12:15", 30, "break")]
#[case("08:00", 60, "outside working hours")]
#[case("17:00", 30, "outside working hours")]
#[tokio::test]
async fn test_schedule_rejections_are_conflicts(
    #[case] time: &str,
    #[case] duration: u32,
    #[case] reason: &str,
) {
    let ctx = TestContext::new().await;

    let response = ctx.server.post("/reservations").json(&ctx.booking(time, duration)).await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains(reason), "{}", message);
}

#[tokio::test]
async fn test_booking_on_closed_day_is_conflict() {
    let ctx = TestContext::new().await;
    let mut body = ctx.booking("10:00", 30);
    body["date"] = json!(TUESDAY);

    ctx.server
        .post("/reservations")
        .json(&body)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_overrun_past_close_follows_policy() {
    let lenient = TestContext::new().await;
    lenient
        .server
        .post("/reservations")
        .json(&lenient.booking("16:30", 60))
        .await
        .assert_status(StatusCode::CREATED);

    let strict = TestContext::with_policy(ClosingPolicy::WithinHours).await;
    strict
        .server
        .post("/reservations")
        .json(&strict.booking("16:30", 60))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unassigned_reservation_skips_schedule() {
    let ctx = TestContext::new().await;
    let mut body = booking_body(ctx.business.id, None, "07:00", 30);
    body["date"] = json!(TUESDAY);

    let response = ctx.server.post("/reservations").json(&body).await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["reservation"]["employeeId"], Value::Null);
}

#[rstest]
#[case("duration", json!(0))]
#[case("price", json!(-5))]
#[case("clientEmail", json!("nobody"))]
#[case("service", json!(""))]
#[case("time", json!("24:00"))]
#[tokio::test]
async fn test_invalid_fields_are_bad_request(#[case] field: &str, #[case] value: Value) {
    let ctx = TestContext::new().await;
    let mut body = ctx.booking("10:00", 30);
    body[field] = value;

    ctx.server
        .post("/reservations")
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(ctx.store.reservation_count(), 0);
}

#[rstest]
#[case::missing_field("clientPhone", None)]
#[case::unknown_field("couponCode", Some(json!("SUMMER")))]
#[case::malformed_time("time", Some(json!("10.30")))]
#[case::malformed_date("date", Some(json!("2024-02-30")))]
#[tokio::test]
async fn test_malformed_body_is_bad_request(#[case] field: &str, #[case] value: Option<Value>) {
    let ctx = TestContext::new().await;
    let mut body = ctx.booking("10:00", 30);
    match value {
        Some(value) => body[field] = value,
        None => {
            body.as_object_mut().unwrap().remove(field);
        }
    }

    let response = ctx.server.post("/reservations").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_unknown_business_or_employee_is_not_found() {
    let ctx = TestContext::new().await;

    ctx.server
        .post("/reservations")
        .json(&booking_body(Uuid::new_v4(), Some(ctx.employee.id), "10:00", 30))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.server
        .post("/reservations")
        .json(&booking_body(ctx.business.id, Some(Uuid::new_v4()), "10:00", 30))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_reservation() {
    let ctx = TestContext::new().await;
    let created = ctx.server.post("/reservations").json(&ctx.booking("09:00", 30)).await;
    let id = reservation_id(&created.json());

    let response = ctx.server.get(&format!("/reservations/{}", id)).await;
    response.assert_status_ok();
    assert_eq!(reservation_id(&response.json()), id);

    ctx.server
        .get(&format!("/reservations/{}", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    ctx.server
        .get("/reservations/not-a-uuid")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_lifecycle() {
    let ctx = TestContext::new().await;
    let created = ctx.server.post("/reservations").json(&ctx.booking("09:00", 30)).await;
    let path = format!("/reservations/{}/status", reservation_id(&created.json()));

    let confirmed = ctx.server.patch(&path).json(&json!({ "status": "confirmed" })).await;
    confirmed.assert_status_ok();
    assert_eq!(confirmed.json::<Value>()["reservation"]["status"], "confirmed");

    ctx.server
        .patch(&path)
        .json(&json!({ "status": "pending" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .patch(&path)
        .json(&json!({ "status": "completed" }))
        .await
        .assert_status_ok();

    ctx.server
        .patch(&path)
        .json(&json!({ "status": "cancelled" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .patch(&path)
        .json(&json!({ "status": "archived" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_employee_reservations_for_day() {
    let ctx = TestContext::new().await;
    for time in ["14:00", "09:00"] {
        ctx.server
            .post("/reservations")
            .json(&ctx.booking(time, 30))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = ctx
        .server
        .get(&format!(
            "/businesses/{}/employees/{}/reservations",
            ctx.business.id, ctx.employee.id
        ))
        .add_query_param("date", MONDAY)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let times: Vec<&str> = body["reservations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["time"].as_str().unwrap())
        .collect();
    assert_eq!(times, vec!["09:00", "14:00"]);
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let mut store = MockBookingRepo::new();
    store
        .expect_get_business()
        .returning(|_| Err(BookingError::Database(eyre::eyre!("connection refused"))));
    let server = server_over(Arc::new(store), ClosingPolicy::default());

    let response = server
        .post("/reservations")
        .json(&booking_body(Uuid::new_v4(), Some(Uuid::new_v4()), "10:00", 30))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Database error"));
}
