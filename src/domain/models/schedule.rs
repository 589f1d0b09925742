use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One row of a professional's recurring weekly availability.
/// At most one row per (professional, day-of-week); day-of-week follows the
/// 0=Sunday convention. Times are local "HH:MM" strings in the shop timezone.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct WorkSchedule {
    pub id: String,
    pub professional_id: String,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub break_start: Option<String>,
    pub break_end: Option<String>,
    pub is_active: bool,
}

pub struct WorkScheduleDay {
    pub professional_id: String,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub break_start: Option<String>,
    pub break_end: Option<String>,
    pub is_active: bool,
}

impl WorkSchedule {
    pub fn new(day: WorkScheduleDay) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            professional_id: day.professional_id,
            day_of_week: day.day_of_week,
            start_time: day.start_time,
            end_time: day.end_time,
            break_start: day.break_start,
            break_end: day.break_end,
            is_active: day.is_active,
        }
    }
}

/// An ad-hoc exclusion interval for one professional, independent of the
/// recurring weekly hours.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ScheduleBlock {
    pub id: String,
    pub professional_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ScheduleBlock {
    pub fn new(professional_id: String, start_time: DateTime<Utc>, end_time: DateTime<Utc>, reason: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            professional_id,
            start_time,
            end_time,
            reason,
            created_at: Utc::now(),
        }
    }
}
