use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::RoleError;
use crate::domain::user::errors::UsernameError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::users::UserData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequestBody>,
) -> Result<ApiSuccess<CreateUserResponseData>, ApiError> {
    let user = state.user_service.create_user(body.try_into_command()?).await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        CreateUserResponseData {
            user: (&user).into(),
        },
    ))
}

/// HTTP request body for admin user creation (raw JSON).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequestBody {
    username: String,
    password: String,
    name: String,
    role: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateUserRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),

    #[error("Name must not be empty")]
    EmptyName,
}

impl CreateUserRequestBody {
    fn try_into_command(self) -> Result<CreateUserCommand, ParseCreateUserRequestError> {
        let username = Username::new(self.username)?;
        let password = Password::new(self.password)?;
        let role = self.role.as_deref().map(str::parse).transpose()?;
        if self.name.trim().is_empty() {
            return Err(ParseCreateUserRequestError::EmptyName);
        }

        Ok(CreateUserCommand {
            username,
            password,
            name: self.name,
            role,
        })
    }
}

impl From<ParseCreateUserRequestError> for ApiError {
    fn from(err: ParseCreateUserRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserResponseData {
    pub user: UserData,
}
