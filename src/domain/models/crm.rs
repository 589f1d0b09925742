use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Conversation {
    pub id: String,
    pub lead_id: String,
    pub channel: String,
    pub external_id: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(lead_id: String, channel: &str, external_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            lead_id,
            channel: channel.to_string(),
            external_id,
            status: "active".to_string(),
            created_at: Utc::now(),
        }
    }
}

/// One turn of a conversation. Assistant messages carry the structured
/// backend_log JSON the model returned alongside the user-facing text.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub role: String,
    pub content: String,
    pub backend_log: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(conversation_id: String, role: &str, content: String, backend_log: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            conversation_id,
            role: role.to_string(),
            content,
            backend_log,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Task {
    pub id: String,
    pub lead_id: String,
    pub title: String,
    pub task_type: String,
    pub status: String,
    pub due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(lead_id: String, title: String, task_type: &str, due_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            lead_id,
            title,
            task_type: task_type.to_string(),
            status: "pending".to_string(),
            due_at,
            created_at: Utc::now(),
        }
    }
}
