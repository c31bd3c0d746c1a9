//! Authentication configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Shortest accepted session signing secret, in bytes.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Placeholder secrets that ship in sample configuration files.
const PLACEHOLDER_SECRETS: &[&str] = &["CHANGE_ME_IN_PRODUCTION", "changeme", "secret"];

/// Credential, session, and password-reset configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session signing (HMAC-SHA256). Has no default.
    #[serde(default, skip_serializing)]
    pub jwt_secret: String,
    /// Session credential lifetime in minutes.
    #[serde(default = "default_session_timeout")]
    pub session_timeout_minutes: u64,
    /// Refresh window in hours, measured from the original login.
    #[serde(default = "default_max_refresh")]
    pub max_refresh_hours: u64,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
    /// Argon2 lanes.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
    /// Password-reset token lifetime in minutes.
    #[serde(default = "default_reset_ttl")]
    pub reset_token_ttl_minutes: u64,
}

impl AuthConfig {
    /// Session credential lifetime.
    pub fn session_timeout(&self) -> Duration {
        Duration::minutes(self.session_timeout_minutes as i64)
    }

    /// Maximum refresh window from the original issuance.
    pub fn max_refresh(&self) -> Duration {
        Duration::hours(self.max_refresh_hours as i64)
    }

    /// Password-reset token lifetime.
    pub fn reset_token_ttl(&self) -> Duration {
        Duration::minutes(self.reset_token_ttl_minutes as i64)
    }

    /// Rejects settings that would make sessions or hashing unsafe.
    pub fn validate(&self) -> Result<(), AppError> {
        let secret = self.jwt_secret.trim();
        if secret.is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set (ACCOUNTHUB__AUTH__JWT_SECRET)",
            ));
        }
        if PLACEHOLDER_SECRETS
            .iter()
            .any(|placeholder| secret.eq_ignore_ascii_case(placeholder))
        {
            return Err(AppError::configuration(
                "auth.jwt_secret is a placeholder value; set a real secret",
            ));
        }
        if secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_JWT_SECRET_BYTES} bytes"
            )));
        }
        if self.session_timeout_minutes == 0 {
            return Err(AppError::configuration(
                "auth.session_timeout_minutes must be greater than zero",
            ));
        }
        if self.max_refresh() < self.session_timeout() {
            return Err(AppError::configuration(
                "auth.max_refresh_hours must cover at least one session timeout",
            ));
        }
        if self.reset_token_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.reset_token_ttl_minutes must be greater than zero",
            ));
        }
        if self.password_min_length > self.password_max_length {
            return Err(AppError::configuration(
                "auth.password_min_length exceeds auth.password_max_length",
            ));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            session_timeout_minutes: default_session_timeout(),
            max_refresh_hours: default_max_refresh(),
            hash_memory_kib: default_hash_memory(),
            hash_iterations: default_hash_iterations(),
            hash_parallelism: default_hash_parallelism(),
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
            reset_token_ttl_minutes: default_reset_ttl(),
        }
    }
}

fn default_session_timeout() -> u64 {
    24 * 60
}

fn default_max_refresh() -> u64 {
    7 * 24
}

fn default_hash_memory() -> u32 {
    19 * 1024
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_hash_parallelism() -> u32 {
    1
}

fn default_password_min() -> usize {
    8
}

fn default_password_max() -> usize {
    45
}

fn default_reset_ttl() -> u64 {
    24 * 60
}
