use axum::http::StatusCode;
use axum_test::TestServer;
use mentorbook_api::build_router;
use mentorbook_core::models::booking::BookingStatus;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{booking, monday_rule, stored, time, TestContext};

fn server(ctx: TestContext) -> TestServer {
    TestServer::new(build_router(ctx.build_state())).unwrap()
}

#[tokio::test]
async fn test_health() {
    let server = server(TestContext::new());

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_version_reports_auto_confirm() {
    let mut ctx = TestContext::new();
    ctx.settings.auto_confirm = false;
    let server = server(ctx);

    let body: Value = server.get("/version").await.json();

    assert_eq!(body["auto_confirm"], false);
}

#[tokio::test]
async fn test_slots_over_http() {
    let mut ctx = TestContext::new();
    let mentor = Uuid::new_v4();
    ctx.with_calendar(
        vec![monday_rule(mentor, time(9, 0), time(10, 0))],
        vec![booking(mentor, time(9, 30), 30, BookingStatus::Confirmed)],
    );
    let server = server(ctx);

    let response = server
        .get(&format!("/api/mentors/{}/slots", mentor))
        .add_query_param("date", "2025-01-06")
        .add_query_param("duration_minutes", 30)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["slots"],
        json!([
            { "start_time": "09:00:00", "end_time": "09:30:00", "available": true },
            { "start_time": "09:30:00", "end_time": "10:00:00", "available": false },
        ])
    );
}

#[tokio::test]
async fn test_bad_duration_is_400() {
    let server = server(TestContext::new());

    let response = server
        .get(&format!("/api/mentors/{}/slots", Uuid::new_v4()))
        .add_query_param("date", "2025-01-06")
        .add_query_param("duration_minutes", 0)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("duration"));
}

#[tokio::test]
async fn test_missing_booking_is_404() {
    let mut ctx = TestContext::new();
    ctx.store.expect_get_booking().returning(|_| Ok(None));
    let server = server(ctx);

    let response = server.get(&format!("/api/bookings/{}", Uuid::new_v4())).await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_booking_over_http() {
    let mut ctx = TestContext::new();
    let mentor = Uuid::new_v4();
    ctx.with_calendar(vec![monday_rule(mentor, time(9, 0), time(11, 0))], vec![]);
    ctx.store
        .expect_insert_booking()
        .returning(|b| Ok(stored(b)));
    let server = server(ctx);

    let response = server
        .post("/api/bookings")
        .json(&json!({
            "mentor_id": mentor,
            "student_id": Uuid::new_v4(),
            "date": "2025-01-06",
            "start_time": "10:00",
            "duration_minutes": 60,
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["status"], "confirmed");
    assert_eq!(body["end_time"], "11:00:00");
}

#[tokio::test]
async fn test_taken_slot_is_409() {
    let mut ctx = TestContext::new();
    let mentor = Uuid::new_v4();
    ctx.with_calendar(
        vec![monday_rule(mentor, time(9, 0), time(11, 0))],
        vec![booking(mentor, time(10, 0), 60, BookingStatus::Confirmed)],
    );
    ctx.store.expect_insert_booking().never();
    let server = server(ctx);

    let response = server
        .post("/api/bookings")
        .json(&json!({
            "mentor_id": mentor,
            "student_id": Uuid::new_v4(),
            "date": "2025-01-06",
            "start_time": "10:00",
            "duration_minutes": 60,
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_non_numeric_duration_is_json_400() {
    let server = server(TestContext::new());

    let response = server
        .get(&format!("/api/mentors/{}/slots", Uuid::new_v4()))
        .add_query_param("date", "2025-01-06")
        .add_query_param("duration_minutes", "abc")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input:"));
}

#[tokio::test]
async fn test_malformed_booking_id_is_json_400() {
    let server = server(TestContext::new());

    let response = server.get("/api/bookings/not-a-uuid").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_booking_body_is_json_400() {
    let server = server(TestContext::new());

    let response = server
        .post("/api/bookings")
        .json(&json!({ "mentor_id": Uuid::new_v4(), "date": "2025-01-06" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_store_failure_hides_details() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_get_booking()
        .returning(|_| Err(mentorbook_core::errors::BookingError::Upstream(
            eyre::eyre!("relation \"bookings\" does not exist"),
        )));
    let server = server(ctx);

    let response = server.get(&format!("/api/bookings/{}", Uuid::new_v4())).await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    response.assert_json(&json!({ "error": "Upstream service unavailable" }));
}
