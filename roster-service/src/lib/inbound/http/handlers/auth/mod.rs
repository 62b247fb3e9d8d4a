use serde::Serialize;

use crate::domain::auth::models::Session;
use crate::inbound::http::handlers::users::UserData;

pub mod refresh_token;
pub mod signin;
pub mod signout;
pub mod signup;

/// Body returned by both signin and signup: the sanitized user plus the
/// token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponseData {
    pub user: UserData,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<&Session> for SessionResponseData {
    fn from(session: &Session) -> Self {
        Self {
            user: (&session.user).into(),
            access_token: session.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
        }
    }
}
