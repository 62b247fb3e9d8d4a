use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::RoleError;
use crate::domain::user::errors::UserError;
use crate::domain::user::errors::UsernameError;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::users::UserData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateUserRequestBody>,
) -> Result<ApiSuccess<UpdateUserResponseData>, ApiError> {
    let id = UserId::from_string(&user_id).map_err(UserError::from)?;

    let user = state
        .user_service
        .update_user(&id, body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UpdateUserResponseData {
            message: "User updated successfully".to_string(),
            user: (&user).into(),
        },
    ))
}

/// HTTP request body for partial user updates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequestBody {
    username: Option<String>,
    password: Option<String>,
    name: Option<String>,
    role: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateUserRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),

    #[error("Name must not be empty")]
    EmptyName,
}

impl UpdateUserRequestBody {
    fn try_into_command(self) -> Result<UpdateUserCommand, ParseUpdateUserRequestError> {
        let username = self.username.map(Username::new).transpose()?;
        let password = self.password.map(Password::new).transpose()?;
        let role = self.role.as_deref().map(str::parse).transpose()?;
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ParseUpdateUserRequestError::EmptyName);
            }
        }

        Ok(UpdateUserCommand {
            username,
            password,
            name: self.name,
            role,
        })
    }
}

impl From<ParseUpdateUserRequestError> for ApiError {
    fn from(err: ParseUpdateUserRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateUserResponseData {
    pub message: String,
    pub user: UserData,
}
