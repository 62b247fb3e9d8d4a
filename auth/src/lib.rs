//! Authentication infrastructure for the roster backend.
//!
//! Provides the building blocks the service composes into its session
//! lifecycle:
//! - Password hashing (Argon2id)
//! - JWT encoding and validation
//! - Dual-token issuance (short-lived access, long-lived refresh)
//!
//! The crate knows nothing about users beyond username and role strings;
//! the service owns the domain types and adapts these primitives.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Password1").unwrap();
//! assert!(hasher.verify("Password1", &hash).unwrap());
//! ```
//!
//! ## Token Issuance
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(
//!     b"access_secret_at_least_32_bytes_long!",
//!     b"refresh_secret_at_least_32_bytes_lng",
//!     Duration::minutes(15),
//!     Duration::days(30),
//! );
//!
//! let access = issuer.issue_access_token("alice", "staff").unwrap();
//! let claims = issuer.verify_access_token(&access).unwrap();
//! assert_eq!(claims.user_info.username, "alice");
//! ```

pub mod jwt;
pub mod password;
pub mod tokens;

pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::RefreshClaims;
pub use jwt::RoleClaim;
pub use jwt::UserInfo;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use tokens::TokenIssuer;
