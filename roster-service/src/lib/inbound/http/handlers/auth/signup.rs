use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::UsernameError;
use crate::domain::user::models::Password;
use crate::domain::user::models::SignupUserCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::auth::SessionResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequestBody>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let session = state.auth_service.signup(body.try_into_command()?).await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, (&session).into()))
}

/// HTTP request body for self-registration. Any role field a caller might
/// send is simply absent from this shape: signup always yields staff.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequestBody {
    username: String,
    password: String,
    name: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Name must not be empty")]
    EmptyName,
}

impl SignupRequestBody {
    fn try_into_command(self) -> Result<SignupUserCommand, ParseSignupRequestError> {
        let username = Username::new(self.username)?;
        let password = Password::new(self.password)?;
        if self.name.trim().is_empty() {
            return Err(ParseSignupRequestError::EmptyName);
        }

        Ok(SignupUserCommand {
            username,
            password,
            name: self.name,
        })
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
