use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateLeadRequest, UpdateLeadRequest};
use crate::domain::models::lead::Lead;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateLeadRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.is_none() && payload.whatsapp.is_none() {
        return Err(AppError::Validation("Either name or whatsapp is required".into()));
    }

    let mut lead = Lead::new(payload.name, payload.whatsapp, payload.source.as_deref().unwrap_or("manual"));
    lead.email = payload.email;
    lead.notes = payload.notes;

    let created = state.lead_repo.create(&lead).await?;
    info!("lead {} created", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_leads(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let leads = state.lead_repo.list().await?;
    Ok(Json(leads))
}

pub async fn get_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let lead = state.lead_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Lead not found".into()))?;
    Ok(Json(lead))
}

pub async fn update_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateLeadRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut lead = state.lead_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Lead not found".into()))?;

    if let Some(name) = payload.name {
        lead.name = Some(name);
    }
    if let Some(whatsapp) = payload.whatsapp {
        lead.whatsapp = Some(whatsapp);
    }
    if let Some(email) = payload.email {
        lead.email = Some(email);
    }
    if let Some(stage) = payload.stage {
        lead.stage = stage;
    }
    if let Some(notes) = payload.notes {
        lead.notes = Some(notes);
    }
    if let Some(preferred_barber) = payload.preferred_barber {
        lead.preferred_barber = Some(preferred_barber);
    }

    let updated = state.lead_repo.update(&lead).await?;
    Ok(Json(updated))
}
