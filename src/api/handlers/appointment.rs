use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use chrono::{NaiveDate, TimeZone, Utc};
use tracing::info;

use crate::api::dtos::requests::{
    CreateAppointmentRequest, ListAppointmentsQuery, SlotsQuery, UpdateAppointmentStatusRequest,
};
use crate::api::dtos::responses::SlotsResponse;
use crate::domain::models::appointment::VALID_STATUSES;
use crate::domain::services::availability::occupied_slots;
use crate::domain::services::booking::{self, NewAppointmentIntent};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let intent = NewAppointmentIntent {
        lead_id: payload.lead_id,
        client_name: payload.client_name,
        service_id: payload.service_id,
        professional_id: payload.professional_id,
        scheduled_at: payload.scheduled_at,
        is_fit_in: payload.is_fit_in,
        notes: payload.notes,
    };

    let appointment = booking::create_appointment(&state, intent).await?;
    info!("appointment {} created at {}", appointment.id, appointment.scheduled_at);

    Ok((StatusCode::CREATED, Json(appointment)))
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAppointmentsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut appointments = state.appointment_repo.list().await?;

    if let Some(professional_id) = &query.professional_id {
        appointments.retain(|a| a.professional_id.as_deref() == Some(professional_id.as_str()));
    }
    if let Some(date) = &query.date {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid date format".into()))?;
        let tz = state.config.shop_tz();
        appointments.retain(|a| a.scheduled_at.with_timezone(&tz).date_naive() == date);
    }

    Ok(Json(appointments))
}

pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = state.appointment_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;
    Ok(Json(appointment))
}

pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !VALID_STATUSES.contains(&payload.status.as_str()) {
        return Err(AppError::Validation(format!("Invalid status: {}", payload.status)));
    }

    let appointment = state.appointment_repo.update_status(&id, &payload.status).await?;
    info!("appointment {} moved to status {}", appointment.id, appointment.status);
    Ok(Json(appointment))
}

/// Occupancy of the 07:00-22:00 display grid for one professional and one
/// local calendar date.
pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    let tz = state.config.shop_tz();
    let day_start = tz.from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
        .single()
        .ok_or(AppError::Validation("Invalid local time (ambiguous or skipped due to DST)".into()))?
        .with_timezone(&Utc);
    let day_end = tz.from_local_datetime(&date.and_hms_opt(23, 59, 59).unwrap())
        .single()
        .ok_or(AppError::Validation("Invalid local time (ambiguous or skipped due to DST)".into()))?
        .with_timezone(&Utc);

    let appointments = state.appointment_repo
        .list_for_professional_between(&query.professional_id, day_start, day_end)
        .await?;

    Ok(Json(SlotsResponse {
        professional_id: query.professional_id,
        date: query.date,
        slots: occupied_slots(date, tz, &appointments),
    }))
}
