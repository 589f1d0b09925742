use serde::Serialize;

use crate::domain::services::availability::SlotStatus;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub professional_id: String,
    pub date: String,
    pub slots: Vec<SlotStatus>,
}

#[derive(Serialize)]
pub struct WebhookResponse {
    pub reply: String,
    pub lead_id: String,
    pub appointment_id: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
