use chrono::Duration;
use chrono::Utc;

use crate::jwt::AccessClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::RefreshClaims;
use crate::jwt::RoleClaim;
use crate::jwt::UserInfo;

/// Issues and verifies the access/refresh token pair.
///
/// The two token kinds are signed with distinct secrets and carry distinct
/// expirations: a compromised access token self-expires quickly, while the
/// refresh token allows silent renewal of the session.
pub struct TokenIssuer {
    access: JwtHandler,
    refresh: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer from the two configured secrets and lifetimes.
    pub fn new(
        access_secret: &[u8],
        refresh_secret: &[u8],
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access: JwtHandler::new(access_secret),
            refresh: JwtHandler::new(refresh_secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue a short-lived access token carrying username and role.
    ///
    /// # Errors
    /// * `JwtError` - encoding failed
    pub fn issue_access_token(&self, username: &str, role: &str) -> Result<String, JwtError> {
        let now = Utc::now();

        let claims = AccessClaims {
            user_info: UserInfo {
                username: username.to_string(),
                role: RoleClaim::One(role.to_string()),
            },
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };

        self.access.encode(&claims)
    }

    /// Issue a long-lived refresh token carrying the username only.
    ///
    /// # Errors
    /// * `JwtError` - encoding failed
    pub fn issue_refresh_token(&self, username: &str) -> Result<String, JwtError> {
        let now = Utc::now();

        let claims = RefreshClaims {
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
        };

        self.refresh.encode(&claims)
    }

    /// Validate an access token against the access secret.
    ///
    /// # Errors
    /// * `TokenExpired` / `DecodingFailed` - invalid, expired, or signed with
    ///   the wrong secret
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.access.decode(token)
    }

    /// Validate a refresh token against the refresh secret.
    ///
    /// # Errors
    /// * `TokenExpired` / `DecodingFailed` - invalid, expired, or signed with
    ///   the wrong secret
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, JwtError> {
        self.refresh.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(
            b"access_secret_at_least_32_bytes_long!",
            b"refresh_secret_at_least_32_bytes_lng",
            Duration::minutes(15),
            Duration::days(30),
        )
    }

    #[test]
    fn access_token_round_trip() {
        let issuer = issuer();

        let token = issuer.issue_access_token("alice", "staff").unwrap();
        let claims = issuer.verify_access_token(&token).unwrap();

        assert_eq!(claims.user_info.username, "alice");
        assert!(claims.user_info.role.is_any_of(&["staff"]));
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn refresh_token_round_trip() {
        let issuer = issuer();

        let token = issuer.issue_refresh_token("alice").unwrap();
        let claims = issuer.verify_refresh_token(&token).unwrap();

        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn secrets_are_not_interchangeable() {
        let issuer = issuer();

        let access = issuer.issue_access_token("alice", "staff").unwrap();
        let refresh = issuer.issue_refresh_token("alice").unwrap();

        assert!(issuer.verify_refresh_token(&access).is_err());
        assert!(issuer.verify_access_token(&refresh).is_err());
    }

    #[test]
    fn expired_access_token_is_rejected() {
        let issuer = TokenIssuer::new(
            b"access_secret_at_least_32_bytes_long!",
            b"refresh_secret_at_least_32_bytes_lng",
            Duration::minutes(-5),
            Duration::days(30),
        );

        let token = issuer.issue_access_token("alice", "staff").unwrap();
        assert!(matches!(
            issuer.verify_access_token(&token),
            Err(JwtError::TokenExpired)
        ));
    }
}
