use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::paging::PageRequest;
use crate::domain::user::errors::PasswordPolicyError;
use crate::domain::user::errors::RoleError;
use crate::domain::user::errors::UserIdError;
use crate::domain::user::errors::UsernameError;

/// User aggregate entity.
///
/// `password_hash` and `refresh_token` never cross the system boundary;
/// handlers project users through their own sanitized view types.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
    /// The single live session credential. `None` when signed out.
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric,
/// underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` / `TooLong` - length outside 3-32
    /// * `InvalidCharacters` - contains characters outside [A-Za-z0-9_-]
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at the boundary, validated against the
/// password policy before hashing: at least 8 characters, at least one
/// letter and one digit.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// Validate a candidate password.
    ///
    /// # Errors
    /// * `TooShort` - fewer than 8 characters
    /// * `MissingLetterOrDigit` - lacks a letter or lacks a digit
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        let has_letter = raw.chars().any(|c| c.is_ascii_alphabetic());
        let has_digit = raw.chars().any(|c| c.is_ascii_digit());
        if !has_letter || !has_digit {
            return Err(PasswordPolicyError::MissingLetterOrDigit);
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// The plaintext must never reach logs, not even through Debug formatting.
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Role membership. Scalar per user; the authorization guard still accepts
/// token payloads carrying a role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Staff,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// Command for self-service registration. Carries no role on purpose: signup
/// always produces a staff user.
#[derive(Debug)]
pub struct SignupUserCommand {
    pub username: Username,
    pub password: Password,
    pub name: String,
}

/// Command for admin user creation with an explicit role.
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub password: Password,
    pub name: String,
    pub role: Option<Role>,
}

/// Command for partial user updates. Only provided fields are changed.
#[derive(Debug)]
pub struct UpdateUserCommand {
    pub username: Option<Username>,
    pub password: Option<Password>,
    pub name: Option<String>,
    pub role: Option<Role>,
}

/// Query for the per-user work-hours report.
#[derive(Debug, Clone, Copy)]
pub struct WorkHoursQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub page: PageRequest,
}

/// One row of the work-hours report: aggregated shift hours per user inside
/// the queried window, zero when the user has no schedules there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWorkHours {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub work_hours: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_accepts_word_characters() {
        assert!(Username::new("alice".to_string()).is_ok());
        assert!(Username::new("night-shift_01".to_string()).is_ok());
    }

    #[test]
    fn username_rejects_bad_input() {
        assert_eq!(
            Username::new("al".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
        assert_eq!(
            Username::new("a".repeat(33)),
            Err(UsernameError::TooLong {
                max: 32,
                actual: 33
            })
        );
        assert_eq!(
            Username::new("alice!".to_string()),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn password_policy_requires_length_letter_and_digit() {
        assert!(Password::new("Password1".to_string()).is_ok());
        assert_eq!(
            Password::new("Pass1".to_string()),
            Err(PasswordPolicyError::TooShort { min: 8 })
        );
        assert_eq!(
            Password::new("password".to_string()),
            Err(PasswordPolicyError::MissingLetterOrDigit)
        );
        assert_eq!(
            Password::new("11111111".to_string()),
            Err(PasswordPolicyError::MissingLetterOrDigit)
        );
    }

    #[test]
    fn password_debug_redacts_plaintext() {
        let password = Password::new("Password1".to_string()).unwrap();
        assert_eq!(format!("{:?}", password), "Password(<redacted>)");
    }

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!("staff".parse::<Role>().unwrap(), Role::Staff);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Admin.as_str(), "admin");
        assert!(matches!(
            "manager".parse::<Role>(),
            Err(RoleError::Unknown(_))
        ));
    }
}
