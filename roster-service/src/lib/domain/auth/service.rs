use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Utc;

use crate::domain::auth::models::Session;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Role;
use crate::domain::user::models::SignupUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;

/// Domain service for the session lifecycle.
///
/// Coordinates the password hasher, the token issuer, and the user store;
/// the refresh token persisted on the user row is the only session state.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
    token_issuer: Arc<TokenIssuer>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            token_issuer,
        }
    }

    fn issue_pair(&self, user: &User) -> Result<(String, String), UserError> {
        let access = self
            .token_issuer
            .issue_access_token(user.username.as_str(), user.role.as_str())
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))?;
        let refresh = self
            .token_issuer
            .issue_refresh_token(user.username.as_str())
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))?;

        Ok((access, refresh))
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn signin(&self, username: &Username, password: &str) -> Result<Session, UserError> {
        let Some(mut user) = self.repository.find_by_username(username).await? else {
            return Err(UserError::InvalidCredentials);
        };

        let password_matches = self
            .password_hasher
            .verify(password, &user.password_hash)
            .map_err(|e| UserError::Unknown(format!("Password verification failed: {}", e)))?;
        if !password_matches {
            return Err(UserError::InvalidCredentials);
        }

        let (access_token, refresh_token) = self.issue_pair(&user)?;

        // Last signin wins: any previously stored refresh token is replaced.
        self.repository
            .set_refresh_token(&user.id, Some(refresh_token.clone()))
            .await?;
        user.refresh_token = Some(refresh_token.clone());

        Ok(Session {
            user,
            access_token,
            refresh_token,
        })
    }

    async fn signup(&self, command: SignupUserCommand) -> Result<Session, UserError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            username: command.username,
            password_hash,
            // Forced: self-registration can never grant elevated privilege.
            role: Role::Staff,
            refresh_token: None,
            created_at: Utc::now(),
        };

        let (access_token, refresh_token) = self.issue_pair(&user)?;

        let user = User {
            refresh_token: Some(refresh_token.clone()),
            ..user
        };
        let user = self.repository.create(user).await?;

        Ok(Session {
            user,
            access_token,
            refresh_token,
        })
    }

    async fn signout(&self, refresh_token: &str) -> Result<(), UserError> {
        match self.repository.find_by_refresh_token(refresh_token).await? {
            // Unknown token: already signed out. Not an error.
            None => Ok(()),
            Some(user) => self.repository.set_refresh_token(&user.id, None).await,
        }
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<String, UserError> {
        let user = self
            .repository
            .find_by_refresh_token(refresh_token)
            .await?
            .ok_or(UserError::TokenNotAuthorized)?;

        // Expired, malformed, and forged tokens all collapse to the same
        // error as the lookup miss above.
        let claims = self
            .token_issuer
            .verify_refresh_token(refresh_token)
            .map_err(|_| UserError::TokenNotAuthorized)?;

        if claims.username != user.username.as_str() {
            return Err(UserError::TokenNotAuthorized);
        }

        // The stored refresh token is not rotated here; only a new signin
        // replaces it.
        self.token_issuer
            .issue_access_token(user.username.as_str(), user.role.as_str())
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))
    }
}
