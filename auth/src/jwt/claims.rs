use serde::Deserialize;
use serde::Serialize;

/// Payload of a short-lived access token.
///
/// The `UserInfo` wrapper is the wire shape every deployed client already
/// decodes; it stays as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    #[serde(rename = "UserInfo")]
    pub user_info: UserInfo,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Identity carried inside an access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub username: String,

    /// Role membership. An earlier variant of the service issued a `roles`
    /// list instead of a scalar `role`; both decode into this field.
    #[serde(alias = "roles")]
    pub role: RoleClaim,
}

/// Scalar-or-set role payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RoleClaim {
    One(String),
    Many(Vec<String>),
}

impl RoleClaim {
    /// All role names carried by the claim.
    pub fn names(&self) -> Vec<&str> {
        match self {
            RoleClaim::One(role) => vec![role.as_str()],
            RoleClaim::Many(roles) => roles.iter().map(String::as_str).collect(),
        }
    }

    /// Membership check against an allowed set.
    pub fn is_any_of(&self, allowed: &[&str]) -> bool {
        self.names().iter().any(|name| allowed.contains(name))
    }
}

/// Payload of a long-lived refresh token. Carries the username only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshClaims {
    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}
