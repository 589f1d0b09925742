use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub commission_percent: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewServiceParams {
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub commission_percent: Option<i32>,
}

impl Service {
    pub fn new(params: NewServiceParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            description: params.description,
            duration_minutes: params.duration_minutes,
            price_cents: params.price_cents,
            commission_percent: params.commission_percent,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
