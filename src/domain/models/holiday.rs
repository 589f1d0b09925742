use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Shop-wide calendar override. A closed holiday makes every professional
/// unbookable; a reduced-hours holiday clips the working window to
/// open_time..close_time.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Holiday {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    pub is_closed: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Holiday {
    pub fn new(date: NaiveDate, description: String, is_closed: bool, open_time: Option<String>, close_time: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            description,
            is_closed,
            open_time,
            close_time,
            created_at: Utc::now(),
        }
    }
}
