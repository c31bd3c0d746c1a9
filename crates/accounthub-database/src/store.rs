//! Account store traits.
//!
//! The credential flows depend only on these signatures. Two backends ship
//! with the crate: the PostgreSQL repositories in [`crate::repositories`]
//! and [`crate::memory::MemoryAccountStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use accounthub_core::result::AppResult;
use accounthub_entity::api_token::{ApiToken, CreateApiToken};
use accounthub_entity::notification::{NotificationChannel, NotificationTarget};
use accounthub_entity::password_reset::{CreatePasswordReset, PasswordResetRequest};
use accounthub_entity::user::{CreateUser, User};

/// User records.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a user. Fails with `Conflict` if the username or email is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Replace a user's password hash. Fails with `NotFound` for unknown ids.
    async fn update_password(&self, user_id: i64, password_hash: &str) -> AppResult<()>;

    /// Disable or re-enable an account.
    async fn set_disabled(&self, user_id: i64, disabled: bool) -> AppResult<User>;
}

/// Long-lived API tokens.
#[async_trait]
pub trait ApiTokenStore: Send + Sync + 'static {
    /// Persist a token. Fails with `NameConflict` if the name is in use.
    async fn create(&self, data: &CreateApiToken) -> AppResult<ApiToken>;

    /// All tokens owned by a user, oldest first.
    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<ApiToken>>;

    /// Look up a token by the digest of its value.
    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<ApiToken>>;

    /// Delete a token only if `user_id` owns it. Returns `true` if deleted.
    async fn delete(&self, user_id: i64, token_id: i64) -> AppResult<bool>;
}

/// Result of an atomic redemption attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemOutcome {
    /// The token was consumed and the password replaced.
    Redeemed {
        /// Owner of the rotated password.
        user_id: i64,
    },
    /// A matching token existed but was past its expiry; it has been removed.
    Expired,
    /// No matching token exists (never issued, replaced, or already used).
    Unknown,
}

/// Password reset requests.
#[async_trait]
pub trait PasswordResetStore: Send + Sync + 'static {
    /// Store a new reset request, discarding any earlier ones for the same email.
    async fn replace_for_email(&self, data: &CreatePasswordReset)
    -> AppResult<PasswordResetRequest>;

    /// Outstanding requests for an email, newest first.
    async fn find_by_email(&self, email: &str) -> AppResult<Vec<PasswordResetRequest>>;

    /// Consume the request matching `email` and `token_hash` and, if it is
    /// still valid at `now`, set the owner's password to `password_hash`.
    ///
    /// The lookup, consumption and password write happen as one atomic step:
    /// of any number of concurrent calls for the same token, at most one
    /// returns [`RedeemOutcome::Redeemed`].
    async fn redeem(
        &self,
        email: &str,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<RedeemOutcome>;
}

/// Notification delivery targets.
#[async_trait]
pub trait NotificationTargetStore: Send + Sync + 'static {
    /// Insert or replace the user's target.
    async fn upsert(
        &self,
        user_id: i64,
        channel: NotificationChannel,
    ) -> AppResult<NotificationTarget>;

    /// Remove the user's target. Returns `true` if a row existed.
    async fn delete(&self, user_id: i64) -> AppResult<bool>;

    /// The user's current target, if any.
    async fn find(&self, user_id: i64) -> AppResult<Option<NotificationTarget>>;

    /// Point every unsent notification of the user at `channel`.
    /// Returns the number of notifications updated.
    async fn retarget_pending(&self, user_id: i64, channel: NotificationChannel)
    -> AppResult<u64>;
}
