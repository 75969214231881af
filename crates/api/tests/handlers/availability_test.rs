use axum::http::StatusCode;
use axum_test::TestResponse;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotbook_core::availability::ClosingPolicy;
use uuid::Uuid;

use crate::test_utils::{MONDAY, TUESDAY, TestContext};

async fn availability(ctx: &TestContext, employee_id: Uuid, date: &str) -> TestResponse {
    ctx.server
        .get("/availability")
        .add_query_param("businessId", ctx.business.id)
        .add_query_param("date", date)
        .add_query_param("employeeId", employee_id)
        .await
}

fn slots(response: &TestResponse) -> Vec<String> {
    let body: Value = response.json();
    body["availableSlots"]
        .as_array()
        .expect("availableSlots array")
        .iter()
        .map(|slot| slot.as_str().unwrap().to_string())
        .collect()
}

fn half_hours(from: &str, to: &str) -> Vec<String> {
    let parse = |s: &str| {
        let (h, m) = s.split_once(':').unwrap();
        h.parse::<u32>().unwrap() * 60 + m.parse::<u32>().unwrap()
    };
    (parse(from)..parse(to))
        .step_by(30)
        .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
        .collect()
}

#[tokio::test]
async fn test_full_day_without_breaks() {
    let ctx = TestContext::new().await;
    let created = ctx
        .server
        .post(&format!("/businesses/{}/employees", ctx.business.id))
        .json(&json!({
            "name": "Alex",
            "availability": { "monday": { "open": "09:00", "close": "17:00" } }
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let employee_id: Uuid = created.json::<Value>()["employee"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    let response = availability(&ctx, employee_id, MONDAY).await;

    response.assert_status_ok();
    let slots = slots(&response);
    assert_eq!(slots.len(), 16);
    assert_eq!(slots, half_hours("09:00", "17:00"));
}

#[tokio::test]
async fn test_break_removes_its_slots() {
    let ctx = TestContext::new().await;

    let response = availability(&ctx, ctx.employee.id, MONDAY).await;

    let mut expected = half_hours("09:00", "12:00");
    expected.extend(half_hours("13:00", "17:00"));
    assert_eq!(slots(&response), expected);
}

#[tokio::test]
async fn test_confirmed_reservation_removes_overlapping_slots() {
    let ctx = TestContext::new().await;
    let created = ctx.server.post("/reservations").json(&ctx.booking("10:00", 60)).await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<Value>()["reservation"]["id"].as_str().unwrap().to_string();
    ctx.server
        .patch(&format!("/reservations/{}/status", id))
        .json(&json!({ "status": "confirmed" }))
        .await
        .assert_status_ok();

    let slots = slots(&availability(&ctx, ctx.employee.id, MONDAY).await);

    assert!(!slots.contains(&"10:00".to_string()));
    assert!(!slots.contains(&"10:30".to_string()));
    assert!(slots.contains(&"09:30".to_string()));
    assert!(slots.contains(&"11:00".to_string()));
}

#[tokio::test]
async fn test_cancelled_reservation_frees_slots() {
    let ctx = TestContext::new().await;
    let created = ctx.server.post("/reservations").json(&ctx.booking("10:00", 60)).await;
    let id = created.json::<Value>()["reservation"]["id"].as_str().unwrap().to_string();
    ctx.server
        .patch(&format!("/reservations/{}/status", id))
        .json(&json!({ "status": "cancelled" }))
        .await
        .assert_status_ok();

    let slots = slots(&availability(&ctx, ctx.employee.id, MONDAY).await);

    assert!(slots.contains(&"10:00".to_string()));
    assert!(slots.contains(&"10:30".to_string()));
}

#[tokio::test]
async fn test_vacation_empties_the_day() {
    let ctx = TestContext::new().await;
    ctx.server
        .put(&format!(
            "/businesses/{}/employees/{}/schedule",
            ctx.business.id, ctx.employee.id
        ))
        .json(&json!({
            "availability": { "monday": { "open": "09:00", "close": "17:00" } },
            "vacations": [{ "startDate": "2024-07-01", "endDate": "2024-07-14" }]
        }))
        .await
        .assert_status_ok();

    let inside = availability(&ctx, ctx.employee.id, "2024-07-08").await;
    inside.assert_status_ok();
    inside.assert_json(&json!({ "availableSlots": [] }));

    let after = availability(&ctx, ctx.employee.id, MONDAY).await;
    assert_eq!(slots(&after).len(), 16);
}

#[tokio::test]
async fn test_closed_day_is_empty_not_an_error() {
    let ctx = TestContext::new().await;

    let response = availability(&ctx, ctx.employee.id, TUESDAY).await;

    response.assert_status_ok();
    response.assert_json(&json!({ "availableSlots": [] }));
}

#[tokio::test]
async fn test_within_hours_policy_drops_last_slot_only_when_probe_overruns() {
    let ctx = TestContext::with_policy(ClosingPolicy::WithinHours).await;

    let slots = slots(&availability(&ctx, ctx.employee.id, MONDAY).await);

    // The 30-minute probe at 16:30 still ends exactly at close.
    assert_eq!(slots.last().map(String::as_str), Some("16:30"));
}

#[tokio::test]
async fn test_missing_parameter_is_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .server
        .get("/availability")
        .add_query_param("businessId", ctx.business.id)
        .add_query_param("date", MONDAY)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("employeeId"));
}

#[tokio::test]
async fn test_malformed_date_is_bad_request() {
    let ctx = TestContext::new().await;

    let response = availability(&ctx, ctx.employee.id, "15/07/2024").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_business_or_employee_is_not_found() {
    let ctx = TestContext::new().await;

    availability(&ctx, Uuid::new_v4(), MONDAY)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.server
        .get("/availability")
        .add_query_param("businessId", Uuid::new_v4())
        .add_query_param("date", MONDAY)
        .add_query_param("employeeId", ctx.employee.id)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
