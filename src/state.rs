use std::sync::Arc;
use crate::domain::ports::{
    AppointmentRepository, AssistantGateway, CrmRepository, HolidayRepository,
    LeadRepository, MessageGateway, ProfessionalRepository, ScheduleRepository,
    ServiceRepository,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub professional_repo: Arc<dyn ProfessionalRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub appointment_repo: Arc<dyn AppointmentRepository>,
    pub schedule_repo: Arc<dyn ScheduleRepository>,
    pub holiday_repo: Arc<dyn HolidayRepository>,
    pub lead_repo: Arc<dyn LeadRepository>,
    pub crm_repo: Arc<dyn CrmRepository>,
    pub assistant: Arc<dyn AssistantGateway>,
    pub messenger: Arc<dyn MessageGateway>,
}
