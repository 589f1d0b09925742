use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::models::appointment::Appointment;
use crate::domain::models::crm::{Conversation, Message, Tag, Task};
use crate::domain::models::holiday::Holiday;
use crate::domain::models::lead::Lead;
use crate::domain::models::professional::Professional;
use crate::domain::models::schedule::{ScheduleBlock, WorkSchedule};
use crate::domain::models::service::Service;
use crate::error::AppError;

#[async_trait]
pub trait ProfessionalRepository: Send + Sync {
    async fn create(&self, professional: &Professional) -> Result<Professional, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Professional>, AppError>;
    async fn list(&self) -> Result<Vec<Professional>, AppError>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: &Service) -> Result<Service, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Service>, AppError>;
    async fn list(&self) -> Result<Vec<Service>, AppError>;
    async fn update(&self, service: &Service) -> Result<Service, AppError>;
    async fn deactivate(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Inserts the appointment, re-running the overlap check against
    /// non-cancelled rows inside the same transaction so two concurrent
    /// requests cannot both pass the pre-check and land on the same slot.
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, AppError>;
    async fn list(&self) -> Result<Vec<Appointment>, AppError>;
    /// Non-cancelled appointments for one professional intersecting [from, to].
    async fn list_for_professional_between(
        &self,
        professional_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppError>;
    async fn update_status(&self, id: &str, status: &str) -> Result<Appointment, AppError>;
    /// Scheduled, unreminded appointments starting within [from, to].
    async fn list_reminder_due(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppError>;
    async fn mark_reminder_sent(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn upsert_work_day(&self, schedule: &WorkSchedule) -> Result<WorkSchedule, AppError>;
    async fn find_work_day(
        &self,
        professional_id: &str,
        day_of_week: i32,
    ) -> Result<Option<WorkSchedule>, AppError>;
    async fn list_work_days(&self, professional_id: &str) -> Result<Vec<WorkSchedule>, AppError>;
    async fn create_block(&self, block: &ScheduleBlock) -> Result<ScheduleBlock, AppError>;
    async fn list_blocks(&self, professional_id: &str) -> Result<Vec<ScheduleBlock>, AppError>;
    async fn list_blocks_overlapping(
        &self,
        professional_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ScheduleBlock>, AppError>;
    async fn delete_block(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait HolidayRepository: Send + Sync {
    async fn create(&self, holiday: &Holiday) -> Result<Holiday, AppError>;
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<Holiday>, AppError>;
    async fn list(&self) -> Result<Vec<Holiday>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn create(&self, lead: &Lead) -> Result<Lead, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Lead>, AppError>;
    async fn find_by_whatsapp(&self, whatsapp: &str) -> Result<Option<Lead>, AppError>;
    async fn list(&self) -> Result<Vec<Lead>, AppError>;
    async fn update(&self, lead: &Lead) -> Result<Lead, AppError>;
}

#[async_trait]
pub trait CrmRepository: Send + Sync {
    async fn find_active_conversation(
        &self,
        lead_id: &str,
        channel: &str,
    ) -> Result<Option<Conversation>, AppError>;
    async fn create_conversation(&self, conversation: &Conversation) -> Result<Conversation, AppError>;
    async fn append_message(&self, message: &Message) -> Result<Message, AppError>;
    /// Oldest-first slice of the most recent messages in a conversation.
    async fn list_recent_messages(
        &self,
        conversation_id: &str,
        limit: i64,
    ) -> Result<Vec<Message>, AppError>;
    async fn create_task(&self, task: &Task) -> Result<Task, AppError>;
    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>, AppError>;
    async fn tag_lead(&self, lead_id: &str, tag_id: &str) -> Result<(), AppError>;
}

/// One turn handed to the language model gateway.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[async_trait]
pub trait AssistantGateway: Send + Sync {
    /// Returns the raw assistant completion for the given turns.
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, AppError>;
}

#[async_trait]
pub trait MessageGateway: Send + Sync {
    async fn send_text(&self, to: &str, body: &str) -> Result<(), AppError>;
}
