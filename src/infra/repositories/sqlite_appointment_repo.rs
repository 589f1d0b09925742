use crate::domain::{models::appointment::Appointment, ports::AppointmentRepository};
use crate::domain::services::availability::REASON_RESERVED;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use chrono::{DateTime, Utc};

pub struct SqliteAppointmentRepo {
    pool: SqlitePool,
}

impl SqliteAppointmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepo {
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // The availability check ran before this call, but a concurrent
        // request may have inserted since. Re-check inside the transaction.
        if let Some(professional_id) = &appointment.professional_id
            && !appointment.is_fit_in
        {
            let result = sqlx::query("SELECT COUNT(*) as count FROM appointments WHERE professional_id = ? AND status != 'cancelled' AND scheduled_at < ? AND end_time > ?")
                .bind(professional_id).bind(appointment.end_time).bind(appointment.scheduled_at)
                .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
            if result.get::<i64, _>("count") > 0 {
                return Err(AppError::DoubleBooked(REASON_RESERVED.to_string()));
            }
        }

        let created = sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (id, lead_id, client_name, service_id, professional_id, scheduled_at, end_time, status, is_fit_in, notes, reminder_sent, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&appointment.id).bind(&appointment.lead_id).bind(&appointment.client_name).bind(&appointment.service_id)
            .bind(&appointment.professional_id).bind(appointment.scheduled_at).bind(appointment.end_time).bind(&appointment.status)
            .bind(appointment.is_fit_in).bind(&appointment.notes).bind(appointment.reminder_sent).bind(appointment.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments ORDER BY scheduled_at ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_for_professional_between(&self, professional_id: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE professional_id = ? AND status != 'cancelled' AND scheduled_at < ? AND end_time > ?").bind(professional_id).bind(to).bind(from).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update_status(&self, id: &str, status: &str) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>("UPDATE appointments SET status = ? WHERE id = ? RETURNING *")
            .bind(status).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))
    }
    async fn list_reminder_due(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE status = 'scheduled' AND reminder_sent = 0 AND scheduled_at >= ? AND scheduled_at <= ?").bind(from).bind(to).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn mark_reminder_sent(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE appointments SET reminder_sent = 1 WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
