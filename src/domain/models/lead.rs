use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Lead {
    pub id: String,
    pub name: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub stage: String,
    pub source: String,
    pub notes: Option<String>,
    pub preferred_barber: Option<String>,
    pub last_contact_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    pub fn new(name: Option<String>, whatsapp: Option<String>, source: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            whatsapp,
            email: None,
            stage: "lead".to_string(),
            source: source.to_string(),
            notes: None,
            preferred_barber: None,
            last_contact_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
