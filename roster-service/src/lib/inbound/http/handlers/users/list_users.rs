use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::dates::parse_work_date;
use crate::domain::paging::Page;
use crate::domain::paging::PageRequest;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserWorkHours;
use crate::domain::user::models::WorkHoursQuery;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Work-hours report: every user with their aggregated shift hours inside
/// the window, highest first.
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersQueryParams>,
) -> Result<ApiSuccess<Page<WorkHoursData>>, ApiError> {
    let start_date = parse_work_date(&params.start_date).map_err(UserError::from)?;
    let end_date = parse_work_date(&params.end_date).map_err(UserError::from)?;

    let query = WorkHoursQuery {
        start_date,
        end_date,
        page: PageRequest::new(params.page, params.size),
    };

    let page = state.user_service.query_work_hours(query).await?;

    Ok(ApiSuccess::new(StatusCode::OK, page.map(|row| (&row).into())))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQueryParams {
    start_date: String,
    end_date: String,
    page: Option<i64>,
    size: Option<i64>,
}

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkHoursData {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub work_hours: i64,
}

impl From<&UserWorkHours> for WorkHoursData {
    fn from(row: &UserWorkHours) -> Self {
        Self {
            id: row.id.0,
            username: row.username.clone(),
            name: row.name.clone(),
            work_hours: row.work_hours,
        }
    }
}
