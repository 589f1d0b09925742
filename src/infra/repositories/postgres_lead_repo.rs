use crate::domain::{models::lead::Lead, ports::LeadRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;

pub struct PostgresLeadRepo {
    pool: PgPool,
}

impl PostgresLeadRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadRepository for PostgresLeadRepo {
    async fn create(&self, lead: &Lead) -> Result<Lead, AppError> {
        sqlx::query_as::<_, Lead>(
            "INSERT INTO leads (id, name, whatsapp, email, stage, source, notes, preferred_barber, last_contact_at, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *"
        )
            .bind(&lead.id).bind(&lead.name).bind(&lead.whatsapp).bind(&lead.email).bind(&lead.stage)
            .bind(&lead.source).bind(&lead.notes).bind(&lead.preferred_barber).bind(lead.last_contact_at)
            .bind(lead.created_at).bind(lead.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Lead>, AppError> {
        sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_whatsapp(&self, whatsapp: &str) -> Result<Option<Lead>, AppError> {
        sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE whatsapp = $1").bind(whatsapp).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Lead>, AppError> {
        sqlx::query_as::<_, Lead>("SELECT * FROM leads ORDER BY created_at DESC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, lead: &Lead) -> Result<Lead, AppError> {
        sqlx::query_as::<_, Lead>(
            "UPDATE leads SET name=$1, whatsapp=$2, email=$3, stage=$4, notes=$5, preferred_barber=$6, last_contact_at=$7, updated_at=$8 WHERE id=$9 RETURNING *"
        )
            .bind(&lead.name).bind(&lead.whatsapp).bind(&lead.email).bind(&lead.stage).bind(&lead.notes)
            .bind(&lead.preferred_barber).bind(lead.last_contact_at).bind(Utc::now()).bind(&lead.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Lead not found".to_string()))
    }
}
