use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::domain::dates::parse_work_date;
use crate::domain::dates::DateRangeError;
use crate::domain::schedule::errors::ScheduleError;
use crate::domain::schedule::errors::ShiftLengthError;
use crate::domain::schedule::models::ScheduleId;
use crate::domain::schedule::models::ShiftLength;
use crate::domain::schedule::models::UpdateScheduleCommand;
use crate::domain::schedule::ports::ScheduleServicePort;
use crate::inbound::http::handlers::schedules::ScheduleData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_schedule(
    State(state): State<AppState>,
    Path(schedule_id): Path<String>,
    Json(body): Json<UpdateScheduleRequestBody>,
) -> Result<ApiSuccess<UpdateScheduleResponseData>, ApiError> {
    let id = ScheduleId::from_string(&schedule_id).map_err(ScheduleError::from)?;

    let schedule = state
        .schedule_service
        .update_schedule(&id, body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UpdateScheduleResponseData {
            message: "Schedule updated successfully".to_string(),
            schedule: (&schedule).into(),
        },
    ))
}

/// HTTP request body for partial schedule updates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequestBody {
    work_date: Option<String>,
    shift_length: Option<i32>,
    completed: Option<bool>,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateScheduleRequestError {
    #[error("{0}")]
    WorkDate(#[from] DateRangeError),

    #[error("{0}")]
    ShiftLength(#[from] ShiftLengthError),
}

impl UpdateScheduleRequestBody {
    fn try_into_command(self) -> Result<UpdateScheduleCommand, ParseUpdateScheduleRequestError> {
        let work_date = self
            .work_date
            .as_deref()
            .map(parse_work_date)
            .transpose()?;
        let shift_length = self.shift_length.map(ShiftLength::new).transpose()?;

        Ok(UpdateScheduleCommand {
            work_date,
            shift_length,
            completed: self.completed,
        })
    }
}

impl From<ParseUpdateScheduleRequestError> for ApiError {
    fn from(err: ParseUpdateScheduleRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateScheduleResponseData {
    pub message: String,
    pub schedule: ScheduleData,
}
