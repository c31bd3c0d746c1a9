//! Outbound email delivery.

use async_trait::async_trait;

use crate::result::AppResult;

/// Delivers account emails on behalf of the credential flows.
///
/// Implementations report transport failures as errors; the caller decides
/// which [`ErrorKind`](crate::error::ErrorKind) to surface.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync + 'static {
    /// Send a password-reset message carrying the encoded reset code.
    async fn send_reset_email(&self, to: &str, code: &str) -> AppResult<()>;
}
