use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::auth::SessionResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninRequestBody>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    // A name that cannot even be a username gets the same response as a
    // failed credential check.
    let username = Username::new(body.username)
        .map_err(|_| ApiError::Unauthorized("Incorrect username or password".to_string()))?;

    let session = state.auth_service.signin(&username, &body.password).await?;

    Ok(ApiSuccess::new(StatusCode::OK, (&session).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigninRequestBody {
    username: String,
    password: String,
}
