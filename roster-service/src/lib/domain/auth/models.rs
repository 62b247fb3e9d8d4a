use crate::domain::user::models::User;

/// A freshly established session: the signed-in user plus the token pair.
///
/// `user` still carries its secret fields here; handlers are responsible for
/// projecting it through a sanitized view before it crosses the boundary.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}
