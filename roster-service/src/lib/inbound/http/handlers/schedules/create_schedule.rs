use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::domain::dates::parse_work_date;
use crate::domain::dates::DateRangeError;
use crate::domain::schedule::errors::ShiftLengthError;
use crate::domain::schedule::models::CreateScheduleCommand;
use crate::domain::schedule::models::ShiftLength;
use crate::domain::schedule::ports::ScheduleServicePort;
use crate::domain::user::errors::UsernameError;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::schedules::ScheduleData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_schedule(
    State(state): State<AppState>,
    Json(body): Json<CreateScheduleRequestBody>,
) -> Result<ApiSuccess<CreateScheduleResponseData>, ApiError> {
    let schedule = state
        .schedule_service
        .create_schedule(body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        CreateScheduleResponseData {
            schedule: (&schedule).into(),
        },
    ))
}

/// HTTP request body for schedule creation. The owner is named by username.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequestBody {
    username: String,
    work_date: String,
    shift_length: i32,
    completed: Option<bool>,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateScheduleRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("{0}")]
    WorkDate(#[from] DateRangeError),

    #[error("{0}")]
    ShiftLength(#[from] ShiftLengthError),
}

impl CreateScheduleRequestBody {
    fn try_into_command(self) -> Result<CreateScheduleCommand, ParseCreateScheduleRequestError> {
        let username = Username::new(self.username)?;
        let work_date = parse_work_date(&self.work_date)?;
        let shift_length = ShiftLength::new(self.shift_length)?;

        Ok(CreateScheduleCommand {
            username,
            work_date,
            shift_length,
            completed: self.completed,
        })
    }
}

impl From<ParseCreateScheduleRequestError> for ApiError {
    fn from(err: ParseCreateScheduleRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateScheduleResponseData {
    pub schedule: ScheduleData,
}
