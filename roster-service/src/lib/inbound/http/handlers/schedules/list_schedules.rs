use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::dates::parse_work_date;
use crate::domain::paging::Page;
use crate::domain::paging::PageRequest;
use crate::domain::schedule::errors::ScheduleError;
use crate::domain::schedule::models::ScheduleQuery;
use crate::domain::schedule::ports::ScheduleServicePort;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::schedules::ScheduleData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// One user's completed schedules inside a date window, paginated.
pub async fn list_schedules(
    State(state): State<AppState>,
    Query(params): Query<ListSchedulesQueryParams>,
) -> Result<ApiSuccess<Page<ScheduleData>>, ApiError> {
    let user_id = UserId::from_string(&params.user_id).map_err(UserError::from)?;
    let start_date = parse_work_date(&params.start_date).map_err(ScheduleError::from)?;
    let end_date = parse_work_date(&params.end_date).map_err(ScheduleError::from)?;

    let query = ScheduleQuery {
        user_id,
        start_date,
        end_date,
        page: PageRequest::new(params.page, params.size),
    };

    let page = state.schedule_service.query_schedules(query).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        page.map(|schedule| (&schedule).into()),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSchedulesQueryParams {
    user_id: String,
    start_date: String,
    end_date: String,
    page: Option<i64>,
    size: Option<i64>,
}
