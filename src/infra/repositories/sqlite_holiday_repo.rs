use crate::domain::{models::holiday::Holiday, ports::HolidayRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::NaiveDate;

pub struct SqliteHolidayRepo {
    pool: SqlitePool,
}

impl SqliteHolidayRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HolidayRepository for SqliteHolidayRepo {
    async fn create(&self, holiday: &Holiday) -> Result<Holiday, AppError> {
        sqlx::query_as::<_, Holiday>(
            "INSERT INTO holidays (id, date, description, is_closed, open_time, close_time, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&holiday.id).bind(holiday.date).bind(&holiday.description).bind(holiday.is_closed)
            .bind(&holiday.open_time).bind(&holiday.close_time).bind(holiday.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<Holiday>, AppError> {
        sqlx::query_as::<_, Holiday>("SELECT * FROM holidays WHERE date = ?").bind(date).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Holiday>, AppError> {
        sqlx::query_as::<_, Holiday>("SELECT * FROM holidays ORDER BY date ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM holidays WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Holiday not found".into())); }
        Ok(())
    }
}
