pub mod sqlite_appointment_repo;
pub mod sqlite_crm_repo;
pub mod sqlite_holiday_repo;
pub mod sqlite_lead_repo;
pub mod sqlite_professional_repo;
pub mod sqlite_schedule_repo;
pub mod sqlite_service_repo;

pub mod postgres_appointment_repo;
pub mod postgres_crm_repo;
pub mod postgres_holiday_repo;
pub mod postgres_lead_repo;
pub mod postgres_professional_repo;
pub mod postgres_schedule_repo;
pub mod postgres_service_repo;
