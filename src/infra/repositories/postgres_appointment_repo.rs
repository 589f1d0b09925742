use crate::domain::{models::appointment::Appointment, ports::AppointmentRepository};
use crate::domain::services::availability::REASON_RESERVED;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use chrono::{DateTime, Utc};

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PostgresAppointmentRepo {
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        if let Some(professional_id) = &appointment.professional_id
            && !appointment.is_fit_in
        {
            // Serialize concurrent inserts for the same professional, then
            // re-run the overlap check inside the transaction.
            sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))").bind(professional_id).execute(&mut *tx).await.map_err(AppError::Database)?;

            let result = sqlx::query("SELECT COUNT(*) as count FROM appointments WHERE professional_id = $1 AND status != 'cancelled' AND scheduled_at < $2 AND end_time > $3")
                .bind(professional_id).bind(appointment.end_time).bind(appointment.scheduled_at)
                .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
            if result.get::<i64, _>("count") > 0 {
                return Err(AppError::DoubleBooked(REASON_RESERVED.to_string()));
            }
        }

        let created = sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (id, lead_id, client_name, service_id, professional_id, scheduled_at, end_time, status, is_fit_in, notes, reminder_sent, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
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
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments ORDER BY scheduled_at ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn list_for_professional_between(&self, professional_id: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE professional_id = $1 AND status != 'cancelled' AND scheduled_at < $2 AND end_time > $3").bind(professional_id).bind(to).bind(from).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update_status(&self, id: &str, status: &str) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>("UPDATE appointments SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))
    }
    async fn list_reminder_due(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE status = 'scheduled' AND reminder_sent = FALSE AND scheduled_at >= $1 AND scheduled_at <= $2").bind(from).bind(to).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn mark_reminder_sent(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE appointments SET reminder_sent = TRUE WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
