use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{appointment, health, holiday, lead, professional, service, webhook};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Appointments
        .route("/api/v1/appointments", post(appointment::create_appointment).get(appointment::list_appointments))
        .route("/api/v1/appointments/slots", get(appointment::get_slots))
        .route("/api/v1/appointments/{id}", get(appointment::get_appointment))
        .route("/api/v1/appointments/{id}/status", put(appointment::update_appointment_status))

        // Professionals & schedules
        .route("/api/v1/professionals", post(professional::create_professional).get(professional::list_professionals))
        .route("/api/v1/professionals/{id}/schedule", get(professional::get_schedule).put(professional::update_schedule))
        .route("/api/v1/professionals/{id}/blocks", get(professional::list_blocks).post(professional::create_block))
        .route("/api/v1/blocks/{id}", delete(professional::delete_block))

        // Services
        .route("/api/v1/services", get(service::list_services).post(service::create_service))
        .route("/api/v1/services/{id}", put(service::update_service).delete(service::delete_service))

        // Holidays
        .route("/api/v1/holidays", get(holiday::list_holidays).post(holiday::create_holiday))
        .route("/api/v1/holidays/{id}", delete(holiday::delete_holiday))

        // Leads
        .route("/api/v1/leads", get(lead::list_leads).post(lead::create_lead))
        .route("/api/v1/leads/{id}", get(lead::get_lead).put(lead::update_lead))

        // Inbound messaging
        .route("/api/v1/webhooks/whatsapp", post(webhook::receive_whatsapp))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
