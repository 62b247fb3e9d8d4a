use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::Role;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const STAFF_AND_ADMIN: &[Role] = &[Role::Staff, Role::Admin];

/// Identity attached to the request after the authentication stage.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub roles: Vec<Role>,
}

/// Authentication stage: validate the bearer token and attach the caller's
/// identity to the request.
///
/// Failures here are 403: the caller is not authenticated at all. The role
/// stage below answers the separate question of whether an authenticated
/// caller may use the endpoint.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)?;

    let claims = state.token_issuer.verify_access_token(token).map_err(|e| {
        tracing::warn!("Access token validation failed: {}", e);
        ApiError::Forbidden("Invalid or expired token".to_string())
    })?;

    // The token may carry a scalar role or a role set; unknown role names
    // are dropped and the role stage rejects the request if nothing valid
    // remains.
    let roles: Vec<Role> = claims
        .user_info
        .role
        .names()
        .iter()
        .filter_map(|name| name.parse().ok())
        .collect();

    req.extensions_mut().insert(AuthenticatedUser {
        username: claims.user_info.username,
        roles,
    });

    Ok(next.run(req).await)
}

/// Role stage: the authenticated caller must hold one of the endpoint's
/// allowed roles. 401 means "authenticated but insufficient privilege".
pub async fn require_roles(
    allowed: &'static [Role],
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| ApiError::Unauthorized("Insufficient privileges".to_string()))?;

    if !user.roles.iter().any(|role| allowed.contains(role)) {
        return Err(ApiError::Unauthorized(
            "Insufficient privileges".to_string(),
        ));
    }

    Ok(next.run(req).await)
}

pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    require_roles(ADMIN_ONLY, req, next).await
}

pub async fn require_staff_or_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    require_roles(STAFF_AND_ADMIN, req, next).await
}

fn extract_bearer_token(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Forbidden("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Forbidden("Invalid Authorization header".to_string()))?;

    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Forbidden("Invalid Authorization header format. Expected: Bearer <token>".to_string())
    })?;

    Ok(token)
}
