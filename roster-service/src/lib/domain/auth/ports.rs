use async_trait::async_trait;

use crate::domain::auth::models::Session;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::SignupUserCommand;
use crate::domain::user::models::Username;

/// Port for the session lifecycle: anonymous -> signed in -> signed out.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and establish a session.
    ///
    /// Unknown username and wrong password both fail with
    /// `InvalidCredentials`; the caller cannot tell which check failed.
    /// A successful signin replaces any previously stored refresh token
    /// (single active session, last signin wins).
    async fn signin(&self, username: &Username, password: &str) -> Result<Session, UserError>;

    /// Register a new staff user and establish a session.
    ///
    /// The role is always `staff`; privilege cannot be self-escalated here.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - username is taken
    async fn signup(&self, command: SignupUserCommand) -> Result<Session, UserError>;

    /// Clear the stored refresh token. Unknown tokens are a no-op, so the
    /// operation is idempotent.
    async fn signout(&self, refresh_token: &str) -> Result<(), UserError>;

    /// Mint a new access token for the session holding `refresh_token`.
    ///
    /// The stored refresh token is not rotated; only a new signin replaces
    /// it.
    ///
    /// # Errors
    /// * `TokenNotAuthorized` - token unknown, expired, forged, or bound to
    ///   a different username
    async fn refresh_token(&self, refresh_token: &str) -> Result<String, UserError>;
}
