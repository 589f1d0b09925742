use crate::domain::{models::crm::{Conversation, Message, Tag, Task}, ports::CrmRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;

pub struct PostgresCrmRepo {
    pool: PgPool,
}

impl PostgresCrmRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrmRepository for PostgresCrmRepo {
    async fn find_active_conversation(&self, lead_id: &str, channel: &str) -> Result<Option<Conversation>, AppError> {
        sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE lead_id = $1 AND channel = $2 AND status = 'active' ORDER BY created_at DESC LIMIT 1").bind(lead_id).bind(channel).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn create_conversation(&self, conversation: &Conversation) -> Result<Conversation, AppError> {
        sqlx::query_as::<_, Conversation>(
            "INSERT INTO conversations (id, lead_id, channel, external_id, status, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"
        )
            .bind(&conversation.id).bind(&conversation.lead_id).bind(&conversation.channel)
            .bind(&conversation.external_id).bind(&conversation.status).bind(conversation.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn append_message(&self, message: &Message) -> Result<Message, AppError> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (id, conversation_id, role, content, backend_log, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"
        )
            .bind(&message.id).bind(&message.conversation_id).bind(&message.role)
            .bind(&message.content).bind(&message.backend_log).bind(message.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_recent_messages(&self, conversation_id: &str, limit: i64) -> Result<Vec<Message>, AppError> {
        let mut messages = sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE conversation_id = $1 ORDER BY created_at DESC LIMIT $2").bind(conversation_id).bind(limit).fetch_all(&self.pool).await.map_err(AppError::Database)?;
        messages.reverse();
        Ok(messages)
    }
    async fn create_task(&self, task: &Task) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, lead_id, title, task_type, status, due_at, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *"
        )
            .bind(&task.id).bind(&task.lead_id).bind(&task.title).bind(&task.task_type)
            .bind(&task.status).bind(task.due_at).bind(task.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>, AppError> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE LOWER(name) = LOWER($1)").bind(name).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn tag_lead(&self, lead_id: &str, tag_id: &str) -> Result<(), AppError> {
        sqlx::query("INSERT INTO lead_tags (lead_id, tag_id, created_at) VALUES ($1, $2, $3) ON CONFLICT (lead_id, tag_id) DO NOTHING").bind(lead_id).bind(tag_id).bind(Utc::now()).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
