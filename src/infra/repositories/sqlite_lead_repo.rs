use crate::domain::{models::lead::Lead, ports::LeadRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::Utc;

pub struct SqliteLeadRepo {
    pool: SqlitePool,
}

impl SqliteLeadRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadRepository for SqliteLeadRepo {
    async fn create(&self, lead: &Lead) -> Result<Lead, AppError> {
        sqlx::query_as::<_, Lead>(
            "INSERT INTO leads (id, name, whatsapp, email, stage, source, notes, preferred_barber, last_contact_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&lead.id).bind(&lead.name).bind(&lead.whatsapp).bind(&lead.email).bind(&lead.stage)
            .bind(&lead.source).bind(&lead.notes).bind(&lead.preferred_barber).bind(lead.last_contact_at)
            .bind(lead.created_at).bind(lead.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Lead>, AppError> {
        sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_whatsapp(&self, whatsapp: &str) -> Result<Option<Lead>, AppError> {
        sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE whatsapp = ?").bind(whatsapp).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Lead>, AppError> {
        sqlx::query_as::<_, Lead>("SELECT * FROM leads ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, lead: &Lead) -> Result<Lead, AppError> {
        sqlx::query_as::<_, Lead>(
            "UPDATE leads SET name=?, whatsapp=?, email=?, stage=?, notes=?, preferred_barber=?, last_contact_at=?, updated_at=? WHERE id=? RETURNING *"
        )
            .bind(&lead.name).bind(&lead.whatsapp).bind(&lead.email).bind(&lead.stage).bind(&lead.notes)
            .bind(&lead.preferred_barber).bind(lead.last_contact_at).bind(Utc::now()).bind(&lead.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))
    }
}
