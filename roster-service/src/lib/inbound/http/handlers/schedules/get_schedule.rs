use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::schedule::errors::ScheduleError;
use crate::domain::schedule::models::ScheduleId;
use crate::domain::schedule::ports::ScheduleServicePort;
use crate::inbound::http::handlers::schedules::ScheduleData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Single-read path: an unknown id yields 200 with a null body, not an
/// error. Delete, in contrast, does error.
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<String>,
) -> Result<ApiSuccess<Option<ScheduleData>>, ApiError> {
    let id = ScheduleId::from_string(&schedule_id).map_err(ScheduleError::from)?;

    let schedule = state.schedule_service.get_schedule(&id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        schedule.as_ref().map(ScheduleData::from),
    ))
}
