//! Password reset request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An outstanding, single-use password reset.
///
/// Only the SHA-256 digest of the emailed token is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PasswordResetRequest {
    /// Row identifier.
    pub id: i64,
    /// User the reset belongs to.
    pub user_id: i64,
    /// Email the token was sent to.
    pub email: String,
    /// Hex SHA-256 of the opaque token.
    #[serde(skip_serializing)]
    pub token_hash: String,
    /// After this instant the token can no longer be redeemed.
    pub expires_at: DateTime<Utc>,
}

impl PasswordResetRequest {
    /// Whether the request is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Data required to persist a new reset request.
#[derive(Debug, Clone)]
pub struct CreatePasswordReset {
    /// User the reset belongs to.
    pub user_id: i64,
    /// Email the token is sent to.
    pub email: String,
    /// Hex SHA-256 of the opaque token.
    pub token_hash: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let request = PasswordResetRequest {
            id: 1,
            user_id: 1,
            email: "a@x.com".to_string(),
            token_hash: "ab".repeat(32),
            expires_at: now,
        };
        assert!(!request.is_expired_at(now - Duration::seconds(1)));
        assert!(request.is_expired_at(now));
    }
}
