mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

const MONDAY: i32 = 1;

async fn assert_not_working(app: &TestApp, pro: &str, service: &str, scheduled_at: &str) {
    let res = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": scheduled_at
    })).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "professional not working this day");
}

#[tokio::test]
async fn no_weekly_row_means_not_working() {
    let app = TestApp::new().await;
    // Works Tuesdays only; 2030-03-04 is a Monday.
    let pro = app.seed_professional("Carlos", 2).await;
    let service = app.seed_service("Corte", 30).await;

    assert_not_working(&app, &pro, &service, "2030-03-04T13:00:00Z").await;
}

#[tokio::test]
async fn inactive_day_means_not_working() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    let res = app.put(&format!("/api/v1/professionals/{}/schedule", pro), json!({
        "days": [{ "day_of_week": MONDAY, "start_time": "09:00", "end_time": "18:00", "is_active": false }]
    })).await;
    assert_eq!(res.status(), StatusCode::OK);

    assert_not_working(&app, &pro, &service, "2030-03-04T13:00:00Z").await;
}

#[tokio::test]
async fn booking_outside_working_hours_is_rejected() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    // Before opening.
    assert_not_working(&app, &pro, &service, "2030-03-04T08:00:00Z").await;
    // Would run past closing: 17:45 + 30min > 18:00.
    assert_not_working(&app, &pro, &service, "2030-03-04T17:45:00Z").await;

    // Ends exactly at closing: allowed.
    let res = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T17:30:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn break_interval_is_not_bookable() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    let res = app.put(&format!("/api/v1/professionals/{}/schedule", pro), json!({
        "days": [{
            "day_of_week": MONDAY,
            "start_time": "09:00",
            "end_time": "18:00",
            "break_start": "12:00",
            "break_end": "13:00"
        }]
    })).await;
    assert_eq!(res.status(), StatusCode::OK);

    assert_not_working(&app, &pro, &service, "2030-03-04T12:15:00Z").await;

    // Touching the break boundary is fine.
    let before = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T11:30:00Z"
    })).await;
    assert_eq!(before.status(), StatusCode::CREATED);
    let after = app.post("/api/v1/appointments", json!({
        "client_name": "Bruno",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    assert_eq!(after.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn closed_holiday_blocks_every_booking() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    let holiday = app.post("/api/v1/holidays", json!({
        "date": "2030-03-04",
        "description": "Feriado municipal",
        "is_closed": true
    })).await;
    assert_eq!(holiday.status(), StatusCode::CREATED);

    assert_not_working(&app, &pro, &service, "2030-03-04T13:00:00Z").await;
}

#[tokio::test]
async fn reduced_hours_holiday_clips_the_window() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    let holiday = app.post("/api/v1/holidays", json!({
        "date": "2030-03-04",
        "description": "Véspera de feriado",
        "is_closed": false,
        "open_time": "10:00",
        "close_time": "14:00"
    })).await;
    assert_eq!(holiday.status(), StatusCode::CREATED);

    // 09:00 is inside the weekly hours but before the clipped opening.
    assert_not_working(&app, &pro, &service, "2030-03-04T09:00:00Z").await;
    // 14:00 onward is past the clipped closing.
    assert_not_working(&app, &pro, &service, "2030-03-04T14:00:00Z").await;

    let inside = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T11:00:00Z"
    })).await;
    assert_eq!(inside.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn fit_in_bypasses_schedule_gating() {
    let app = TestApp::new().await;
    // No weekly schedule at all for Mondays.
    let pro = app.seed_professional("Carlos", 2).await;
    let service = app.seed_service("Corte", 30).await;

    let res = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:00:00Z",
        "is_fit_in": true
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn holiday_deletion_reopens_the_day() {
    let app = TestApp::new().await;
    let pro = app.seed_professional("Carlos", MONDAY).await;
    let service = app.seed_service("Corte", 30).await;

    let holiday = app.post("/api/v1/holidays", json!({
        "date": "2030-03-04",
        "description": "Feriado",
        "is_closed": true
    })).await;
    assert_eq!(holiday.status(), StatusCode::CREATED);
    let holiday_id = parse_body(holiday).await["id"].as_str().unwrap().to_string();

    assert_not_working(&app, &pro, &service, "2030-03-04T13:00:00Z").await;

    let delete = app.router.clone();
    use tower::ServiceExt;
    let res = delete.oneshot(
        axum::http::Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/holidays/{}", holiday_id))
            .body(axum::body::Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let rebook = app.post("/api/v1/appointments", json!({
        "client_name": "Ana",
        "service_id": service,
        "professional_id": pro,
        "scheduled_at": "2030-03-04T13:00:00Z"
    })).await;
    assert_eq!(rebook.status(), StatusCode::CREATED);
}
