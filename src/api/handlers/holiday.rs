use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use chrono::NaiveDate;
use tracing::info;

use crate::api::dtos::requests::CreateHolidayRequest;
use crate::domain::models::holiday::Holiday;
use crate::domain::services::availability::parse_hhmm_pair;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_holiday(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateHolidayRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    if !payload.is_closed {
        let (Some(open), Some(close)) = (&payload.open_time, &payload.close_time) else {
            return Err(AppError::Validation("Reduced-hours holidays need open_time and close_time".into()));
        };
        parse_hhmm_pair(open, close)
            .ok_or(AppError::Validation("Times must be HH:MM with open before close".into()))?;
    }

    let holiday = Holiday::new(date, payload.description, payload.is_closed, payload.open_time, payload.close_time);
    let created = state.holiday_repo.create(&holiday).await?;
    info!("holiday {} created for {}", created.id, created.date);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_holidays(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let holidays = state.holiday_repo.list().await?;
    Ok(Json(holidays))
}

pub async fn delete_holiday(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.holiday_repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
