//! JWT claims structure carried by session credentials.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// JWT claims payload embedded in every session credential.
///
/// Only the username is carried. No numeric id, no role, nothing that
/// would help enumerate accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at of the login that started this refresh chain.
    pub orig_iat: i64,
}

impl Claims {
    /// Returns the username from the subject claim.
    pub fn username(&self) -> &str {
        &self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Whether the credential is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    /// Whether the refresh window, measured from the original login, has
    /// elapsed at `now`.
    pub fn refresh_window_elapsed_at(&self, now: DateTime<Utc>, max_refresh: Duration) -> bool {
        now.timestamp() > self.orig_iat.saturating_add(max_refresh.num_seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_at(now: DateTime<Utc>) -> Claims {
        Claims {
            sub: "alice".to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + 60,
            orig_iat: now.timestamp(),
        }
    }

    #[test]
    fn test_expiry_is_strict() {
        let now = Utc::now();
        let claims = claims_at(now);
        assert!(!claims.is_expired_at(now + Duration::seconds(60)));
        assert!(claims.is_expired_at(now + Duration::seconds(61)));
    }

    #[test]
    fn test_refresh_window_from_original_issue() {
        let now = Utc::now();
        let mut claims = claims_at(now);
        claims.iat += 3000;
        claims.exp += 3000;

        let window = Duration::hours(1);
        assert!(!claims.refresh_window_elapsed_at(now + Duration::seconds(3600), window));
        assert!(claims.refresh_window_elapsed_at(now + Duration::seconds(3601), window));
    }
}
