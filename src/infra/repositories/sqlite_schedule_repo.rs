use crate::domain::{models::schedule::{ScheduleBlock, WorkSchedule}, ports::ScheduleRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::{DateTime, Utc};

pub struct SqliteScheduleRepo {
    pool: SqlitePool,
}

impl SqliteScheduleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepo {
    async fn upsert_work_day(&self, schedule: &WorkSchedule) -> Result<WorkSchedule, AppError> {
        sqlx::query_as::<_, WorkSchedule>(
            "INSERT INTO work_schedules (id, professional_id, day_of_week, start_time, end_time, break_start, break_end, is_active)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (professional_id, day_of_week) DO UPDATE SET
                 start_time = excluded.start_time,
                 end_time = excluded.end_time,
                 break_start = excluded.break_start,
                 break_end = excluded.break_end,
                 is_active = excluded.is_active
             RETURNING *"
        )
            .bind(&schedule.id).bind(&schedule.professional_id).bind(schedule.day_of_week).bind(&schedule.start_time)
            .bind(&schedule.end_time).bind(&schedule.break_start).bind(&schedule.break_end).bind(schedule.is_active)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_work_day(&self, professional_id: &str, day_of_week: i32) -> Result<Option<WorkSchedule>, AppError> {
        sqlx::query_as::<_, WorkSchedule>("SELECT * FROM work_schedules WHERE professional_id = ? AND day_of_week = ?").bind(professional_id).bind(day_of_week).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_work_days(&self, professional_id: &str) -> Result<Vec<WorkSchedule>, AppError> {
        sqlx::query_as::<_, WorkSchedule>("SELECT * FROM work_schedules WHERE professional_id = ? ORDER BY day_of_week ASC").bind(professional_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn create_block(&self, block: &ScheduleBlock) -> Result<ScheduleBlock, AppError> {
        sqlx::query_as::<_, ScheduleBlock>(
            "INSERT INTO schedule_blocks (id, professional_id, start_time, end_time, reason, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&block.id).bind(&block.professional_id).bind(block.start_time).bind(block.end_time)
            .bind(&block.reason).bind(block.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_blocks(&self, professional_id: &str) -> Result<Vec<ScheduleBlock>, AppError> {
        sqlx::query_as::<_, ScheduleBlock>("SELECT * FROM schedule_blocks WHERE professional_id = ? ORDER BY start_time ASC").bind(professional_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_blocks_overlapping(&self, professional_id: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<ScheduleBlock>, AppError> {
        sqlx::query_as::<_, ScheduleBlock>("SELECT * FROM schedule_blocks WHERE professional_id = ? AND start_time < ? AND end_time > ?").bind(professional_id).bind(to).bind(from).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete_block(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedule_blocks WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Schedule block not found".into())); }
        Ok(())
    }
}
