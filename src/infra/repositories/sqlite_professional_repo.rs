use crate::domain::{models::professional::Professional, ports::ProfessionalRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteProfessionalRepo {
    pool: SqlitePool,
}

impl SqliteProfessionalRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfessionalRepository for SqliteProfessionalRepo {
    async fn create(&self, professional: &Professional) -> Result<Professional, AppError> {
        sqlx::query_as::<_, Professional>(
            "INSERT INTO professionals (id, name, email, phone, role, is_active, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&professional.id).bind(&professional.name).bind(&professional.email).bind(&professional.phone)
            .bind(&professional.role).bind(professional.is_active).bind(professional.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Professional>, AppError> {
        sqlx::query_as::<_, Professional>("SELECT * FROM professionals WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Professional>, AppError> {
        sqlx::query_as::<_, Professional>("SELECT * FROM professionals WHERE is_active = 1 ORDER BY name ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
