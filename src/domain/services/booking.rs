use chrono::{DateTime, Datelike, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::domain::models::appointment::{Appointment, NewAppointmentParams};
use crate::domain::services::availability::{
    self, BookingCandidate, DaySnapshot,
};
use crate::error::AppError;
use crate::state::AppState;

/// Booking request after DTO validation, before conflict resolution.
pub struct NewAppointmentIntent {
    pub lead_id: Option<String>,
    pub client_name: Option<String>,
    pub service_id: String,
    pub professional_id: Option<String>,
    pub scheduled_at: String,
    pub is_fit_in: bool,
    pub notes: Option<String>,
}

/// Parses a client-supplied timestamp. RFC 3339 strings keep their offset;
/// bare local timestamps are interpreted in the shop timezone. Ambiguous or
/// non-existent local times (DST transitions) are rejected rather than
/// guessed.
pub fn parse_start_time(raw: &str, tz: Tz) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|_| AppError::Validation(format!("Invalid timestamp: {}", raw)))?;

    tz.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            AppError::Validation("Invalid local time (ambiguous or skipped due to DST)".to_string())
        })
}

/// Full booking path: validation, availability resolution, then the
/// conflict-checked insert. Every appointment, including fit-ins, goes
/// through here.
pub async fn create_appointment(
    state: &AppState,
    intent: NewAppointmentIntent,
) -> Result<Appointment, AppError> {
    if intent.lead_id.is_none() && intent.client_name.as_deref().is_none_or(str::is_empty) {
        return Err(AppError::Validation(
            "Either lead_id or client_name is required".to_string(),
        ));
    }
    if intent.service_id.is_empty() {
        return Err(AppError::Validation("service_id is required".to_string()));
    }

    if let Some(lead_id) = &intent.lead_id {
        state
            .lead_repo
            .find_by_id(lead_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lead {} not found", lead_id)))?;
    }

    let tz = state.config.shop_tz();
    let starts_at = parse_start_time(&intent.scheduled_at, tz)?;

    // An unknown service is not fatal: the booking proceeds with the
    // default width so a walk-in can still be recorded.
    let service = state.service_repo.find_by_id(&intent.service_id).await?;
    let duration_min = availability::effective_duration_min(service.as_ref());
    let ends_at = starts_at + Duration::minutes(duration_min);

    if let Some(professional_id) = &intent.professional_id
        && !intent.is_fit_in
    {
        state
            .professional_repo
            .find_by_id(professional_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Professional {} not found", professional_id))
            })?;

        let local_date = starts_at.with_timezone(&tz).date_naive();
        let day_start = tz
            .from_local_datetime(&local_date.and_hms_opt(0, 0, 0).unwrap())
            .single()
            .ok_or_else(|| AppError::InternalWithMsg("day start not representable".to_string()))?
            .with_timezone(&Utc);
        let day_end = tz
            .from_local_datetime(&local_date.and_hms_opt(23, 59, 59).unwrap())
            .single()
            .ok_or_else(|| AppError::InternalWithMsg("day end not representable".to_string()))?
            .with_timezone(&Utc);

        let day_of_week = local_date.weekday().num_days_from_sunday() as i32;
        let work_schedule = state
            .schedule_repo
            .find_work_day(professional_id, day_of_week)
            .await?;
        let holiday = state.holiday_repo.find_by_date(local_date).await?;
        let blocks = state
            .schedule_repo
            .list_blocks_overlapping(professional_id, day_start, day_end)
            .await?;
        let appointments = state
            .appointment_repo
            .list_for_professional_between(professional_id, day_start, day_end)
            .await?;

        let candidate = BookingCandidate {
            professional_id: Some(professional_id.clone()),
            starts_at,
            ends_at,
            is_fit_in: false,
        };
        let snapshot = DaySnapshot {
            work_schedule: work_schedule.as_ref(),
            holiday: holiday.as_ref(),
            blocks: &blocks,
            appointments: &appointments,
        };
        availability::resolve(&candidate, &snapshot, tz)?;
    }

    let appointment = Appointment::new(NewAppointmentParams {
        lead_id: intent.lead_id,
        client_name: intent.client_name,
        service_id: intent.service_id,
        professional_id: intent.professional_id,
        start: starts_at,
        duration_min,
        is_fit_in: intent.is_fit_in,
        notes: intent.notes,
    });

    state.appointment_repo.create(&appointment).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_keeps_its_offset() {
        let tz: Tz = "America/Sao_Paulo".parse().unwrap();
        let dt = parse_start_time("2030-03-04T13:00:00-03:00", tz).unwrap();
        assert_eq!(dt.to_rfc3339(), "2030-03-04T16:00:00+00:00");
    }

    #[test]
    fn naive_timestamp_uses_shop_timezone() {
        let tz: Tz = "America/Sao_Paulo".parse().unwrap();
        let dt = parse_start_time("2030-03-04T13:00:00", tz).unwrap();
        assert_eq!(dt.to_rfc3339(), "2030-03-04T16:00:00+00:00");

        let short = parse_start_time("2030-03-04T13:00", tz).unwrap();
        assert_eq!(short, dt);
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        let tz: Tz = "UTC".parse().unwrap();
        assert!(matches!(
            parse_start_time("tomorrow at noon", tz),
            Err(AppError::Validation(_))
        ));
    }
}
