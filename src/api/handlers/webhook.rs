use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::api::dtos::requests::WhatsAppWebhookRequest;
use crate::api::dtos::responses::WebhookResponse;
use crate::domain::models::crm::{Conversation, Message, Task};
use crate::domain::models::lead::Lead;
use crate::domain::services::assistant::{self, BackendLog};
use crate::domain::services::booking::{self, NewAppointmentIntent};
use crate::error::AppError;
use crate::state::AppState;

const HISTORY_LIMIT: i64 = 20;

/// Inbound WhatsApp message. The lead is found or created by phone number,
/// the conversation history goes to the assistant, and the structured
/// backend_log it returns drives CRM updates and, when confirmed, a booking.
pub async fn receive_whatsapp(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WhatsAppWebhookRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.from.trim().is_empty() || payload.message.trim().is_empty() {
        return Err(AppError::Validation("from and message are required".into()));
    }

    let mut lead = match state.lead_repo.find_by_whatsapp(&payload.from).await? {
        Some(existing) => existing,
        None => {
            let lead = Lead::new(payload.contact_name.clone(), Some(payload.from.clone()), "whatsapp");
            let created = state.lead_repo.create(&lead).await?;
            info!("lead {} created from whatsapp contact", created.id);
            created
        }
    };
    lead.last_contact_at = Some(Utc::now());

    let conversation = match state.crm_repo.find_active_conversation(&lead.id, "whatsapp").await? {
        Some(existing) => existing,
        None => {
            let external_id = payload.external_id.clone().or_else(|| Some(payload.from.clone()));
            let conversation = Conversation::new(lead.id.clone(), "whatsapp", external_id);
            state.crm_repo.create_conversation(&conversation).await?
        }
    };

    let history = state.crm_repo.list_recent_messages(&conversation.id, HISTORY_LIMIT).await?;
    state.crm_repo
        .append_message(&Message::new(conversation.id.clone(), "user", payload.message.clone(), None))
        .await?;

    let turns = assistant::build_turns(&lead, &history, &payload.message);
    let completion = state.assistant.complete(&turns).await?;
    let reply = assistant::parse_reply(&completion);

    // The raw completion is kept alongside the assistant message so the
    // structured log can be audited later.
    let backend_log_json = reply.backend_log.is_some().then(|| completion.clone());
    state.crm_repo
        .append_message(&Message::new(conversation.id.clone(), "assistant", reply.response.clone(), backend_log_json))
        .await?;

    let mut appointment_id = None;
    if let Some(log) = &reply.backend_log {
        appointment_id = apply_backend_log(&state, &mut lead, log).await?;
    }

    let lead = state.lead_repo.update(&lead).await?;

    Ok(Json(WebhookResponse {
        reply: reply.response,
        lead_id: lead.id,
        appointment_id,
    }))
}

/// CRM side effects are best-effort: a bad name or a lost slot must not fail
/// the webhook, the customer still gets the assistant's reply.
async fn apply_backend_log(
    state: &Arc<AppState>,
    lead: &mut Lead,
    log: &BackendLog,
) -> Result<Option<String>, AppError> {
    if let Some(stage) = &log.current_stage {
        lead.stage = stage.clone();
    }
    if let Some(fields) = &log.updated_fields {
        assistant::apply_updated_fields(lead, fields);
    }

    for tag_name in &log.tags_to_apply {
        match state.crm_repo.find_tag_by_name(tag_name).await? {
            Some(tag) => state.crm_repo.tag_lead(&lead.id, &tag.id).await?,
            None => warn!("assistant suggested unknown tag '{}'", tag_name),
        }
    }

    if let Some(task) = &log.suggested_task {
        let due_at = task.due_in_hours.map(|h| Utc::now() + Duration::hours(h));
        let created = state.crm_repo
            .create_task(&Task::new(
                lead.id.clone(),
                task.title.clone(),
                task.task_type.as_deref().unwrap_or("follow_up"),
                due_at,
            ))
            .await?;
        info!("task {} created for lead {}", created.id, lead.id);
    }

    let Some(suggestion) = &log.suggested_appointment else {
        return Ok(None);
    };
    let Some(preferred_time) = &suggestion.preferred_time else {
        warn!("suggested appointment without preferred_time, skipping");
        return Ok(None);
    };

    let services = state.service_repo.list().await?;
    let service = match assistant::resolve_service(&suggestion.service, &services) {
        Ok(service) => service,
        Err(e) => {
            warn!("could not resolve service '{}': {}", suggestion.service, e);
            return Ok(None);
        }
    };

    let professional_id = match &suggestion.barber {
        Some(name) => {
            let professionals = state.professional_repo.list().await?;
            match assistant::resolve_professional(name, &professionals) {
                Ok(professional) => Some(professional.id.clone()),
                Err(e) => {
                    warn!("could not resolve professional '{}': {}", name, e);
                    return Ok(None);
                }
            }
        }
        None => None,
    };

    let intent = NewAppointmentIntent {
        lead_id: Some(lead.id.clone()),
        client_name: None,
        service_id: service.id.clone(),
        professional_id,
        scheduled_at: preferred_time.clone(),
        is_fit_in: false,
        notes: Some("booked via whatsapp assistant".to_string()),
    };

    match booking::create_appointment(state, intent).await {
        Ok(appointment) => {
            info!("appointment {} booked via assistant for lead {}", appointment.id, lead.id);
            lead.stage = "scheduled".to_string();
            Ok(Some(appointment.id))
        }
        Err(e) => {
            warn!("assistant booking rejected: {}", e);
            Ok(None)
        }
    }
}
