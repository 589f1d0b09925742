use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, info_span, warn, Instrument};
use chrono_tz::Tz;

use crate::domain::models::appointment::Appointment;
use crate::error::AppError;
use crate::state::AppState;

const POLL_INTERVAL_SECS: u64 = 60;
const REMINDER_WINDOW_HOURS: i64 = 24;

/// Polls for appointments starting within the next 24 hours and sends each
/// lead one WhatsApp reminder. reminder_sent flips only after a successful
/// send, so failed sends are retried on the next tick.
pub async fn start_reminder_worker(state: Arc<AppState>) {
    info!("Starting appointment reminder worker...");

    loop {
        let now = Utc::now();
        let horizon = now + chrono::Duration::hours(REMINDER_WINDOW_HOURS);

        match state.appointment_repo.list_reminder_due(now, horizon).await {
            Ok(appointments) => {
                for appointment in appointments {
                    let span = info_span!(
                        "appointment_reminder",
                        appointment_id = %appointment.id,
                        scheduled_at = %appointment.scheduled_at
                    );

                    let state = state.clone();
                    async move {
                        match send_reminder(&state, &appointment).await {
                            Ok(true) => info!("Reminder sent"),
                            Ok(false) => info!("Reminder skipped, no reachable contact"),
                            Err(e) => error!("Reminder failed: {}", e),
                        }
                    }
                    .instrument(span)
                    .await;
                }
            }
            Err(e) => error!("Failed to fetch due reminders: {:?}", e),
        }

        sleep(Duration::from_secs(POLL_INTERVAL_SECS)).await;
    }
}

/// Returns whether a message actually went out. Appointments without a lead
/// or without a WhatsApp number are marked sent so they are not re-polled
/// forever.
async fn send_reminder(state: &Arc<AppState>, appointment: &Appointment) -> Result<bool, AppError> {
    let lead = match &appointment.lead_id {
        Some(lead_id) => state.lead_repo.find_by_id(lead_id).await?,
        None => None,
    };

    let Some(whatsapp) = lead.as_ref().and_then(|l| l.whatsapp.clone()) else {
        warn!("Appointment has no WhatsApp contact, marking reminded");
        state.appointment_repo.mark_reminder_sent(&appointment.id).await?;
        return Ok(false);
    };

    let client_name = lead
        .as_ref()
        .and_then(|l| l.name.clone())
        .or_else(|| appointment.client_name.clone())
        .unwrap_or_else(|| "cliente".to_string());

    let service_name = state
        .service_repo
        .find_by_id(&appointment.service_id)
        .await?
        .map(|s| s.name)
        .unwrap_or_else(|| "atendimento".to_string());

    let professional_name = match &appointment.professional_id {
        Some(id) => state
            .professional_repo
            .find_by_id(id)
            .await?
            .map(|p| p.name)
            .unwrap_or_else(|| "nossa equipe".to_string()),
        None => "nossa equipe".to_string(),
    };

    let tz: Tz = state.config.shop_tz();
    let local_time = appointment.scheduled_at.with_timezone(&tz);
    let body = format!(
        "Olá {}, lembrete do seu agendamento: {} com {} em {}. Confirmado?",
        client_name,
        service_name,
        professional_name,
        local_time.format("%d/%m/%Y %H:%M")
    );

    state.messenger.send_text(&whatsapp, &body).await?;
    state.appointment_repo.mark_reminder_sent(&appointment.id).await?;
    Ok(true)
}
