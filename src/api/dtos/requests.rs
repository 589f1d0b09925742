use serde::Deserialize;

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub lead_id: Option<String>,
    pub client_name: Option<String>,
    pub service_id: String,
    pub professional_id: Option<String>,
    /// RFC 3339, or a bare local timestamp interpreted in the shop timezone.
    pub scheduled_at: String,
    #[serde(default)]
    pub is_fit_in: bool,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct ListAppointmentsQuery {
    pub professional_id: Option<String>,
    /// Local calendar date, YYYY-MM-DD.
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub professional_id: String,
    /// Local calendar date, YYYY-MM-DD.
    pub date: String,
}

#[derive(Deserialize)]
pub struct CreateProfessionalRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct WorkScheduleDayRequest {
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub break_start: Option<String>,
    pub break_end: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct UpdateScheduleRequest {
    pub days: Vec<WorkScheduleDayRequest>,
}

#[derive(Deserialize)]
pub struct CreateBlockRequest {
    /// RFC 3339 or bare local timestamps, same rules as appointments.
    pub start_time: String,
    pub end_time: String,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub commission_percent: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i64>,
    pub commission_percent: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateHolidayRequest {
    /// Local calendar date, YYYY-MM-DD.
    pub date: String,
    pub description: String,
    #[serde(default = "default_true")]
    pub is_closed: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateLeadRequest {
    pub name: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateLeadRequest {
    pub name: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub stage: Option<String>,
    pub notes: Option<String>,
    pub preferred_barber: Option<String>,
}

/// Inbound WhatsApp message, already unwrapped from the provider envelope.
#[derive(Deserialize)]
pub struct WhatsAppWebhookRequest {
    pub from: String,
    pub message: String,
    pub external_id: Option<String>,
    pub contact_name: Option<String>,
}
