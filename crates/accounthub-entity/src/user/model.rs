//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::provider::AuthProvider;

/// A registered account.
///
/// `username` and `email` are unique and never change after signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique numeric identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Unique email address.
    pub email: String,
    /// Where the account's credentials live.
    pub provider: AuthProvider,
    /// Argon2 PHC-format password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Avatar URL.
    pub image: Option<String>,
    /// Disabled accounts cannot log in and lose their sessions.
    pub disabled: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the user can log in right now.
    pub fn can_login(&self) -> bool {
        !self.disabled
    }

    /// Whether the account authenticates with a local password.
    pub fn has_local_credentials(&self) -> bool {
        self.provider.is_local()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Display name.
    pub display_name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Credential provider.
    pub provider: AuthProvider,
}
