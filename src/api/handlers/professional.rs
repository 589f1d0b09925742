use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateBlockRequest, CreateProfessionalRequest, UpdateScheduleRequest};
use crate::domain::models::professional::Professional;
use crate::domain::models::schedule::{ScheduleBlock, WorkSchedule, WorkScheduleDay};
use crate::domain::services::availability::parse_hhmm_pair;
use crate::domain::services::booking::parse_start_time;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_professional(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateProfessionalRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }

    let professional = Professional::new(payload.name, payload.email, payload.phone, payload.role);
    let created = state.professional_repo.create(&professional).await?;
    info!("professional {} created", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_professionals(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let professionals = state.professional_repo.list().await?;
    Ok(Json(professionals))
}

pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.professional_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Professional not found".into()))?;
    let days = state.schedule_repo.list_work_days(&id).await?;
    Ok(Json(days))
}

/// Replaces the weekly rows supplied in the payload. Days not mentioned keep
/// their current configuration.
pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.professional_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Professional not found".into()))?;

    let mut saved = Vec::with_capacity(payload.days.len());
    for day in payload.days {
        if !(0..=6).contains(&day.day_of_week) {
            return Err(AppError::Validation(format!("Invalid day_of_week: {}", day.day_of_week)));
        }
        let (start, end) = parse_hhmm_pair(&day.start_time, &day.end_time)
            .ok_or(AppError::Validation("Times must be HH:MM with start before end".into()))?;
        if let (Some(bs), Some(be)) = (&day.break_start, &day.break_end) {
            let (bs, be) = parse_hhmm_pair(bs, be)
                .ok_or(AppError::Validation("Break times must be HH:MM with start before end".into()))?;
            if bs < start || be > end {
                return Err(AppError::Validation("Break must fall inside working hours".into()));
            }
        }

        let schedule = WorkSchedule::new(WorkScheduleDay {
            professional_id: id.clone(),
            day_of_week: day.day_of_week,
            start_time: day.start_time,
            end_time: day.end_time,
            break_start: day.break_start,
            break_end: day.break_end,
            is_active: day.is_active,
        });
        saved.push(state.schedule_repo.upsert_work_day(&schedule).await?);
    }

    info!("schedule updated for professional {}", id);
    Ok(Json(saved))
}

pub async fn list_blocks(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let blocks = state.schedule_repo.list_blocks(&id).await?;
    Ok(Json(blocks))
}

pub async fn create_block(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<CreateBlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.professional_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Professional not found".into()))?;

    let tz = state.config.shop_tz();
    let start = parse_start_time(&payload.start_time, tz)?;
    let end = parse_start_time(&payload.end_time, tz)?;
    if start >= end {
        return Err(AppError::Validation("start_time must be before end_time".into()));
    }

    let block = ScheduleBlock::new(id, start, end, payload.reason);
    let created = state.schedule_repo.create_block(&block).await?;
    info!("block {} created for professional {}", created.id, created.professional_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_block(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.schedule_repo.delete_block(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
