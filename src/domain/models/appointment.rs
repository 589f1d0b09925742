use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;

pub const STATUS_SCHEDULED: &str = "scheduled";
pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";
pub const STATUS_NO_SHOW: &str = "no_show";

pub const VALID_STATUSES: [&str; 5] = [
    STATUS_SCHEDULED,
    STATUS_CONFIRMED,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
    STATUS_NO_SHOW,
];

/// A booked service occurrence. Never physically deleted: cancellation is a
/// status transition, and cancelled rows are invisible to conflict checks.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Appointment {
    pub id: String,
    pub lead_id: Option<String>,
    pub client_name: Option<String>,
    pub service_id: String,
    pub professional_id: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub is_fit_in: bool,
    pub notes: Option<String>,
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewAppointmentParams {
    pub lead_id: Option<String>,
    pub client_name: Option<String>,
    pub service_id: String,
    pub professional_id: Option<String>,
    pub start: DateTime<Utc>,
    pub duration_min: i64,
    pub is_fit_in: bool,
    pub notes: Option<String>,
}

impl Appointment {
    pub fn new(params: NewAppointmentParams) -> Self {
        let end_time = params.start + Duration::minutes(params.duration_min);

        Self {
            id: Uuid::new_v4().to_string(),
            lead_id: params.lead_id,
            client_name: params.client_name,
            service_id: params.service_id,
            professional_id: params.professional_id,
            scheduled_at: params.start,
            end_time,
            status: STATUS_SCHEDULED.to_string(),
            is_fit_in: params.is_fit_in,
            notes: params.notes,
            reminder_sent: false,
            created_at: Utc::now(),
        }
    }
}
