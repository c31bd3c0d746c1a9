//! Credential provider marker.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an account's credentials are verified.
///
/// Stored as an integer: `0` is a local password, anything else was
/// authenticated by an upstream identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Username and password stored by this service.
    #[default]
    Local = 0,
    /// Google sign-in.
    Google = 1,
    /// Generic OpenID Connect provider.
    Oidc = 2,
}

impl AuthProvider {
    /// Whether passwords for this account are managed locally.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }

    /// Return the provider as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Google => "google",
            Self::Oidc => "oidc",
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
