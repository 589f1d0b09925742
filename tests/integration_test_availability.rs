mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

// 2030-03-04 is a Monday (day_of_week = 1). The seeded schedule covers
// 09:00-18:00 UTC.
const MONDAY: i32 = 1;

#[tokio::test]
async fn double_booking_same_slot_is_rejected() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    let payload = json!({
        "client_name": "Ana",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:00:00Z"
    });

    let first = app.post("/api/v1/appointments", payload.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.post("/api/v1/appointments", payload).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = parse_body(second).await;
    assert_eq!(body["error"], "slot already reserved");
}

#[tokio::test]
async fn back_to_back_appointments_are_legal() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    let first = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Starts exactly when the previous one ends.
    let second = app.post("/api/v1/appointments", json!({
        "client_name": "Bruno",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:30:00Z"
    })).await;
    assert_eq!(second.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn partial_overlap_is_rejected() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let long_service = app.seed_service("Corte e Barba", 60).await;
    let short_service = app.seed_service("Corte", 30).await;

    let first = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": long_service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.post("/api/v1/appointments", json!({
        "client_name": "Bruno",
        "service_id": short_service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:30:00Z"
    })).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn schedule_block_rejects_booking() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    let block = app.post(&format!("/api/v1/professionals/{}/blocks", pro), json!({
        "start_time": "2030-03-04T13:00:00Z",
        "end_time": "2030-03-04T14:00:00Z",
        "reason": "dentist"
    })).await;
    assert_eq!(block.status(), StatusCode::CREATED);

    let res = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:15:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "professional blocked: dentist");
}

#[tokio::test]
async fn fit_in_bypasses_conflicts() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    let first = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Same slot, but forced in.
    let fit_in = app.post("/api/v1/appointments", json!({
        "client_name": "Bruno",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:00:00Z",
        "is_fit_in": true
    })).await;
    assert_eq!(fit_in.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn fit_in_still_occupies_its_slot() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    let fit_in = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:00:00Z",
        "is_fit_in": true
    })).await;
    assert_eq!(fit_in.status(), StatusCode::CREATED);

    // A later regular booking must see the fit-in as a conflict.
    let regular = app.post("/api/v1/appointments", json!({
        "client_name": "Bruno",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    assert_eq!(regular.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn missing_professional_bypasses_conflicts() {
    let app = TestApp::new().await;
    let service = app.seed_service("Corte", 30).await;

    let first = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.post("/api/v1/appointments", json!({
        "client_name": "Bruno",
        "service_id": service,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    assert_eq!(second.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn cancelled_appointment_frees_the_slot() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    let first = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_id = parse_body(first).await["id"].as_str().unwrap().to_string();

    let cancel = app.put(
        &format!("/api/v1/appointments/{}/status", first_id),
        json!({ "status": "cancelled" }),
    ).await;
    assert_eq!(cancel.status(), StatusCode::OK);

    let rebook = app.post("/api/v1/appointments", json!({
        "client_name": "Bruno",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    assert_eq!(rebook.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn unknown_service_falls_back_to_thirty_minutes() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;

    // service_id does not resolve, booking still proceeds with a 30-minute
    // default width.
    let first = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": "nonexistent-service",
        "professional_id": pro,
        "scheduled_at": "2030-03-04T16:00:00Z"
    })).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let body = parse_body(first).await;
    assert_eq!(body["end_time"], "2030-03-04T16:30:00Z");

    // The default width is wide enough to conflict with a booking at 16:15.
    let overlapping = app.post("/api/v1/appointments", json!({
        "client_name": "Bruno",
        "service_id": "nonexistent-service",
        "professional_id": pro,
        "scheduled_at": "2030-03-04T16:15:00Z"
    })).await;
    assert_eq!(overlapping.status(), StatusCode::CONFLICT);
}
