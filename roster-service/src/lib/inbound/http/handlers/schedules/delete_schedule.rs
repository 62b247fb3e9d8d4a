use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::schedule::errors::ScheduleError;
use crate::domain::schedule::models::ScheduleId;
use crate::domain::schedule::ports::ScheduleServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = ScheduleId::from_string(&schedule_id).map_err(ScheduleError::from)?;

    state.schedule_service.delete_schedule(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
