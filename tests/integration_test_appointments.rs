mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

const MONDAY: i32 = 1;

#[tokio::test]
async fn appointment_requires_a_client() {
    let app = TestApp::new().await;
    let service = app.seed_service("Corte", 30).await;

    let res = app.post("/api/v1/appointments", json!({
        "service_id": service,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.post("/api/v1/appointments", json!({
        "client_name": "",
        "service_id": service,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_lead_is_rejected() {
    let app = TestApp::new().await;
    let service = app.seed_service("Corte", 30).await;

    let res = app.post("/api/v1/appointments", json!({
        "lead_id": "nope",
        "service_id": service,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn garbage_timestamp_is_rejected() {
    let app = TestApp::new().await;
    let service = app.seed_service("Corte", 30).await;

    let res = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "scheduled_at": "next tuesday"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn naive_timestamp_is_normalized_to_shop_timezone() {
    let app = TestApp::with_timezone("America/Sao_Paulo").await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    // 13:00 local in Sao Paulo (UTC-3) is 16:00 UTC.
    let res = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:00:00"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["scheduled_at"], "2030-03-04T16:00:00Z");
    assert_eq!(body["end_time"], "2030-03-04T16:30:00Z");
}

#[tokio::test]
async fn status_transitions_and_invalid_status() {
    let app = TestApp::new().await;
    let service = app.seed_service("Corte", 30).await;

    let res = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    for status in ["confirmed", "completed"] {
        let res = app.put(&format!("/api/v1/appointments/{}/status", id), json!({ "status": status })).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(parse_body(res).await["status"], status);
    }

    let res = app.put(&format!("/api/v1/appointments/{}/status", id), json!({ "status": "eaten_by_wolves" })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cancelled_appointment_remains_visible() {
    let app = TestApp::new().await;
    let service = app.seed_service("Corte", 30).await;

    let res = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    app.put(&format!("/api/v1/appointments/{}/status", id), json!({ "status": "cancelled" })).await;

    // Cancellation is a status change, not a delete.
    let res = app.get(&format!("/api/v1/appointments/{}", id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "cancelled");

    let res = app.get("/api/v1/appointments").await;
    let list = parse_body(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_and_get_roundtrip() {
    let app = TestApp::new().await;
    let service = app.seed_service("Corte", 30).await;

    for (name, at) in [("Ana", "2030-03-04T13:00:00Z"), ("Bruno", "2030-03-04T15:00:00Z")] {
        let res = app.post("/api/v1/appointments", json!({
            "client_name": name,
            "service_id": service,
            "scheduled_at": at
        })).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app.get("/api/v1/appointments").await;
    assert_eq!(res.status(), StatusCode::OK);
    let list = parse_body(res).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    // Ordered by start time.
    assert_eq!(list[0]["client_name"], "Ana");
    assert_eq!(list[1]["client_name"], "Bruno");

    let missing = app.get("/api/v1/appointments/nope").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_filters_by_professional_and_date() {
    let app = TestApp::new().await;
    let carlos = app.seed_professional("Carlos", MONDAY).await;
    let rafael = app.seed_professional("Rafael", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    for (pro, at) in [
        (&carlos, "2030-03-04T13:00:00Z"),
        (&rafael, "2030-03-04T13:00:00Z"),
        (&carlos, "2030-03-11T13:00:00Z"),
    ] {
        let res = app.post("/api/v1/appointments", json!({
            "client_name": "Ana",
            "service_id": service,
            "professional_id": pro,
            "scheduled_at": at
        })).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app.get(&format!("/api/v1/appointments?professional_id={}", carlos)).await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 2);

    let res = app.get("/api/v1/appointments?date=2030-03-04").await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 2);

    let res = app.get(&format!("/api/v1/appointments?professional_id={}&date=2030-03-04", carlos)).await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);
}
