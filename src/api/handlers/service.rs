use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateServiceRequest, UpdateServiceRequest};
use crate::domain::models::service::{NewServiceParams, Service};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    if payload.duration_minutes <= 0 {
        return Err(AppError::Validation("duration_minutes must be positive".into()));
    }
    if payload.price_cents < 0 {
        return Err(AppError::Validation("price_cents must not be negative".into()));
    }

    let service = Service::new(NewServiceParams {
        name: payload.name,
        description: payload.description,
        duration_minutes: payload.duration_minutes,
        price_cents: payload.price_cents,
        commission_percent: payload.commission_percent,
    });
    let created = state.service_repo.create(&service).await?;
    info!("service {} created", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let services = state.service_repo.list().await?;
    Ok(Json(services))
}

pub async fn update_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut service = state.service_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Service not found".into()))?;

    if let Some(name) = payload.name {
        service.name = name;
    }
    if let Some(description) = payload.description {
        service.description = Some(description);
    }
    if let Some(duration) = payload.duration_minutes {
        if duration <= 0 {
            return Err(AppError::Validation("duration_minutes must be positive".into()));
        }
        service.duration_minutes = duration;
    }
    if let Some(price) = payload.price_cents {
        if price < 0 {
            return Err(AppError::Validation("price_cents must not be negative".into()));
        }
        service.price_cents = price;
    }
    if let Some(commission) = payload.commission_percent {
        service.commission_percent = Some(commission);
    }
    if let Some(is_active) = payload.is_active {
        service.is_active = is_active;
    }

    let updated = state.service_repo.update(&service).await?;
    Ok(Json(updated))
}

pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.service_repo.deactivate(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
