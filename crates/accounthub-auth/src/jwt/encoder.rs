//! JWT session credential creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use accounthub_core::config::AuthConfig;
use accounthub_core::error::{AppError, ErrorKind};
use accounthub_core::result::AppResult;

use super::claims::Claims;

/// Creates signed HS256 session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Session token lifetime.
    timeout: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            timeout: config.session_timeout(),
        }
    }

    /// Signs a fresh session for `username`, starting a new refresh chain.
    pub fn issue(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> AppResult<(String, DateTime<Utc>)> {
        self.sign(username, now.timestamp(), now)
    }

    /// Signs a continuation of an existing refresh chain. `orig_iat` is
    /// carried over unchanged.
    pub fn reissue(
        &self,
        previous: &Claims,
        now: DateTime<Utc>,
    ) -> AppResult<(String, DateTime<Utc>)> {
        self.sign(&previous.sub, previous.orig_iat, now)
    }

    fn sign(
        &self,
        username: &str,
        orig_iat: i64,
        now: DateTime<Utc>,
    ) -> AppResult<(String, DateTime<Utc>)> {
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.timeout).timestamp(),
            orig_iat,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::with_source(ErrorKind::Encoding, "Failed to sign session token", e)
        })?;

        Ok((token, claims.expires_at()))
    }
}
