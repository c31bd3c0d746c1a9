//! API token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A long-lived, user-scoped bearer token.
///
/// Tokens never expire on their own; they live until the owner deletes them.
/// Only the SHA-256 digest of the token value is stored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ApiToken {
    /// Unique identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Human-readable label, unique across all tokens.
    pub name: String,
    /// Hex SHA-256 of the token value.
    #[serde(skip_serializing)]
    pub token_hash: String,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiToken")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("name", &self.name)
            .field("token_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Data required to persist a new API token.
#[derive(Clone)]
pub struct CreateApiToken {
    /// Owning user.
    pub user_id: i64,
    /// Label.
    pub name: String,
    /// Hex SHA-256 of the token value.
    pub token_hash: String,
}

impl std::fmt::Debug for CreateApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateApiToken")
            .field("user_id", &self.user_id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
