use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Idempotent: an unknown (already cleared) refresh token still yields 204.
pub async fn signout(
    State(state): State<AppState>,
    Json(body): Json<SignoutRequestBody>,
) -> Result<StatusCode, ApiError> {
    state.auth_service.signout(&body.refresh_token).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignoutRequestBody {
    refresh_token: String,
}
